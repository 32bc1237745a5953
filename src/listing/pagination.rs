//! Pagination metadata and clamped navigation

use serde::Serialize;

/// An entry of the numbered page strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageItem {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// Pagination state of one fetched page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub page_size: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Pagination {
    /// Derive pagination from a result count
    pub fn new(current: u32, page_size: u32, total_results: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_results.div_ceil(page_size as u64) as u32;
        let current = current.max(1);
        Self {
            current,
            total_pages,
            total_results,
            page_size,
            has_prev: current > 1 && current <= total_pages,
            has_next: current < total_pages,
        }
    }

    /// Combine API totals with its prev/next tokens
    pub fn from_totals(
        current: u32,
        page_size: u32,
        total_pages: u32,
        total_results: u64,
        prev_token: bool,
        next_token: bool,
    ) -> Self {
        let current = current.max(1);
        Self {
            current,
            total_pages,
            total_results,
            page_size: page_size.max(1),
            has_prev: prev_token && current > 1 && current <= total_pages,
            has_next: next_token && current < total_pages,
        }
    }

    /// A page inside `1..=total_pages`, or `None`
    pub fn goto(&self, page: u32) -> Option<u32> {
        (page >= 1 && page <= self.total_pages).then_some(page)
    }

    pub fn prev(&self) -> Option<u32> {
        if !self.has_prev {
            return None;
        }
        self.goto(self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        if !self.has_next {
            return None;
        }
        self.goto(self.current + 1)
    }

    /// Whether page controls should be shown at all
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    /// Page numbers around the current page, with the first and last page
    /// always present and gaps marked by ellipses
    pub fn items(&self, mid_size: u32) -> Vec<PageItem> {
        let total = self.total_pages;
        if total == 0 {
            return Vec::new();
        }

        let current = self.current.min(total);
        let start = current.saturating_sub(mid_size).max(1);
        let end = (current + mid_size).min(total);
        let page = |number| PageItem::Page {
            number,
            current: number == self.current,
        };

        let mut items = Vec::new();
        if start > 1 {
            items.push(page(1));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }

        items.extend((start..=end).map(page));

        if end < total {
            if end < total - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(page(total));
        }

        items
    }
}
