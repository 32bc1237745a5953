//! Filter state and navigation requests for the news index

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;

use super::{is_all_categories, SortKey, ViewMode, ALL_CATEGORIES, MAX_PAGE_SIZE};
use crate::content::slice::ArticlesGrid;

/// Characters escaped in query values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Values that are left out of navigation URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingDefaults {
    pub page_size: u32,
    pub sort: SortKey,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            page_size: 12,
            sort: SortKey::PublicationDateDesc,
        }
    }
}

impl ListingDefaults {
    /// Defaults for a grid slice, falling back to the site-wide page size
    pub fn for_grid(grid: Option<&ArticlesGrid>, site_page_size: u32) -> Self {
        let page_size = grid
            .and_then(|g| g.articles_per_page)
            .filter(|n| *n > 0)
            .unwrap_or(site_page_size)
            .clamp(1, MAX_PAGE_SIZE);
        let sort = grid
            .and_then(|g| g.default_sort.as_deref())
            .map(SortKey::parse_or_default)
            .unwrap_or_default();
        Self { page_size, sort }
    }
}

/// Request-local state of the news list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub page: u32,
    pub page_size: u32,
    pub category: String,
    pub search: String,
    pub sort: SortKey,
    pub view: ViewMode,
    pub defaults: ListingDefaults,
}

impl FilterState {
    /// Fresh state with every field at its default
    pub fn new(defaults: ListingDefaults) -> Self {
        Self {
            page: 1,
            page_size: defaults.page_size,
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
            sort: defaults.sort,
            view: ViewMode::Grid,
            defaults,
        }
    }

    /// Parse query parameters; absent or invalid values mean "default"
    pub fn from_query(params: &HashMap<String, String>, defaults: ListingDefaults) -> Self {
        let mut state = Self::new(defaults);
        let get = |key: &str| params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(page) = get("page").and_then(|p| p.parse::<u32>().ok()) {
            state.page = page.max(1);
        }
        if let Some(size) = get("pageSize").and_then(|p| p.parse::<u32>().ok()) {
            if size > 0 {
                state.page_size = size.min(MAX_PAGE_SIZE);
            }
        }
        if let Some(category) = get("category") {
            state.category = normalize_category(category);
        }
        if let Some(search) = get("search") {
            state.search = search.to_string();
        }
        if let Some(sort) = get("sort") {
            state.sort = SortKey::parse_or_default(sort);
        }
        if let Some(view) = get("view") {
            state.view = ViewMode::parse_or_default(view);
        }

        state
    }

    pub fn is_all_categories(&self) -> bool {
        is_all_categories(&self.category)
    }
}

fn normalize_category(category: &str) -> String {
    if is_all_categories(category) {
        ALL_CATEGORIES.to_string()
    } else {
        category.trim().to_string()
    }
}

/// Changes requested by a navigation control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOverrides {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub view: Option<ViewMode>,
}

impl FilterOverrides {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = Some(view);
        self
    }
}

/// A navigation target for the news list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub state: FilterState,
}

impl PageRequest {
    /// Query parameters that differ from their defaults, in a fixed order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let state = &self.state;
        let mut pairs = Vec::new();

        if state.page != 1 {
            pairs.push(("page", state.page.to_string()));
        }
        if state.page_size != state.defaults.page_size {
            pairs.push(("pageSize", state.page_size.to_string()));
        }
        if !state.is_all_categories() {
            pairs.push(("category", state.category.clone()));
        }
        if !state.search.is_empty() {
            pairs.push(("search", state.search.clone()));
        }
        if state.sort != state.defaults.sort {
            pairs.push(("sort", state.sort.as_str().to_string()));
        }
        if state.view != ViewMode::Grid {
            pairs.push(("view", state.view.as_str().to_string()));
        }

        pairs
    }

    /// Encoded query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(&v, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Link to `base` carrying this request
    pub fn href(&self, base: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, query)
        }
    }
}

/// Merge `overrides` over `current`.
///
/// Changing search, category, sort or page size returns to page 1;
/// changing only the page (or the view) keeps the other fields.
pub fn build_page_request(current: &FilterState, overrides: FilterOverrides) -> PageRequest {
    let mut next = current.clone();

    if let Some(search) = overrides.search {
        next.search = search.trim().to_string();
    }
    if let Some(category) = overrides.category {
        next.category = normalize_category(&category);
    }
    if let Some(sort) = overrides.sort {
        next.sort = sort;
    }
    if let Some(page_size) = overrides.page_size {
        next.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    }
    if let Some(view) = overrides.view {
        next.view = view;
    }

    let filters_changed = next.search != current.search
        || next.category != current.category
        || next.sort != current.sort
        || next.page_size != current.page_size;

    next.page = if filters_changed {
        1
    } else {
        overrides.page.unwrap_or(current.page).max(1)
    };

    PageRequest { state: next }
}
