//! Stable article ordering

use std::cmp::{Ordering, Reverse};

use super::SortKey;
use crate::content::Article;

/// Sort key approximating locale-aware collation.
///
/// Strings compare first ignoring accents and case, then by accents,
/// then with lowercase before uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: Reverse<String>,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let text = text.trim();
        Self {
            primary: deunicode::deunicode(text).to_lowercase(),
            secondary: text.to_lowercase(),
            tertiary: Reverse(text.to_string()),
        }
    }
}

/// Compare two strings the way a title list is ordered for readers
pub fn collate(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Sort articles in place. The sort is stable: articles with equal keys
/// keep their relative order.
///
/// Articles without a usable date compare as the oldest possible date.
pub fn sort_articles(articles: &mut [Article], key: SortKey) {
    match key {
        SortKey::PublicationDateDesc => {
            articles.sort_by_cached_key(|a| Reverse(a.effective_date()));
        }
        SortKey::PublicationDateAsc => {
            articles.sort_by_cached_key(|a| a.effective_date());
        }
        SortKey::TitleAsc => {
            articles.sort_by_cached_key(|a| CollationKey::new(&a.title_text()));
        }
        SortKey::TitleDesc => {
            articles.sort_by_cached_key(|a| Reverse(CollationKey::new(&a.title_text())));
        }
    }
}
