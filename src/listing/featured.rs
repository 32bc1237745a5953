//! Featured article selection

use std::cmp::Ordering;

use crate::content::Article;

/// Pick up to `limit` featured articles.
///
/// Articles with a featured order come first, lowest order first; the
/// rest follow. Ties (and unordered articles) go newest first.
pub fn select_featured(articles: &[Article], limit: usize) -> Vec<Article> {
    let mut featured: Vec<Article> = articles
        .iter()
        .filter(|article| article.data.featured)
        .cloned()
        .collect();

    featured.sort_by(|a, b| {
        compare_order(a.data.featured_order, b.data.featured_order)
            .then_with(|| b.effective_date().cmp(&a.effective_date()))
    });

    featured.truncate(limit);
    featured
}

fn compare_order(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
