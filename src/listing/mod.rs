//! Article listing: filtering, ordering, featured selection and
//! pagination state for the news index.
//!
//! Everything here is a pure function of already-fetched articles and
//! request-local filter state.

mod featured;
mod filter;
mod pagination;
mod request;
mod sort;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use featured::select_featured;
pub use filter::{apply_filters, ArticleFilter};
pub use pagination::{PageItem, Pagination};
pub use request::{build_page_request, FilterOverrides, FilterState, ListingDefaults, PageRequest};
pub use sort::{collate, sort_articles, CollationKey};

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Largest page size the content API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort order of the article list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    PublicationDateDesc,
    PublicationDateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::PublicationDateDesc,
        SortKey::PublicationDateAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PublicationDateDesc => "publication_date_desc",
            SortKey::PublicationDateAsc => "publication_date_asc",
            SortKey::TitleAsc => "title_asc",
            SortKey::TitleDesc => "title_desc",
        }
    }

    /// Label shown in the sort selector
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::PublicationDateDesc => "Mais recentes",
            SortKey::PublicationDateAsc => "Mais antigos",
            SortKey::TitleAsc => "Título (A-Z)",
            SortKey::TitleDesc => "Título (Z-A)",
        }
    }

    /// Parse a sort key, falling back to newest-first for anything unknown
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| format!("unknown sort key: {}", s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation of the article list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    pub fn parse_or_default(value: &str) -> Self {
        match value.trim() {
            "list" => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }
}

/// Whether a category value selects every category
pub fn is_all_categories(category: &str) -> bool {
    let category = category.trim();
    category.is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse_or_default("title_asc"), SortKey::TitleAsc);
        assert_eq!(
            SortKey::parse_or_default("publication_date_asc"),
            SortKey::PublicationDateAsc
        );
        assert_eq!(SortKey::parse_or_default("random"), SortKey::PublicationDateDesc);
        assert_eq!(SortKey::parse_or_default(""), SortKey::PublicationDateDesc);
        assert!("bogus".parse::<SortKey>().is_err());
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!(ViewMode::parse_or_default("list"), ViewMode::List);
        assert_eq!(ViewMode::parse_or_default("table"), ViewMode::Grid);
    }

    #[test]
    fn test_all_categories() {
        assert!(is_all_categories("all"));
        assert!(is_all_categories("ALL"));
        assert!(is_all_categories(""));
        assert!(!is_all_categories("Economia"));
    }
}
