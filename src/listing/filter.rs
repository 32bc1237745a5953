//! Search and category filtering

use super::is_all_categories;
use crate::content::Article;

/// Search term and category selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub search: String,
    pub category: String,
}

impl ArticleFilter {
    pub fn new(search: &str, category: &str) -> Self {
        Self {
            search: search.to_string(),
            category: category.to_string(),
        }
    }

    /// Case-insensitive match of the search term against title, excerpt
    /// or author, and of the category (unless every category is selected)
    pub fn matches(&self, article: &Article) -> bool {
        self.matches_search(article) && self.matches_category(article)
    }

    fn matches_search(&self, article: &Article) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        article.title_text().to_lowercase().contains(&term)
            || article.excerpt_text().to_lowercase().contains(&term)
            || article
                .author()
                .is_some_and(|author| author.to_lowercase().contains(&term))
    }

    fn matches_category(&self, article: &Article) -> bool {
        if is_all_categories(&self.category) {
            return true;
        }
        let selected = self.category.trim().to_lowercase();
        article
            .category()
            .is_some_and(|category| category.to_lowercase() == selected)
    }
}

/// Keep the articles matching the filter, in their original order
pub fn apply_filters(articles: &[Article], filter: &ArticleFilter) -> Vec<Article> {
    articles
        .iter()
        .filter(|article| filter.matches(article))
        .cloned()
        .collect()
}
