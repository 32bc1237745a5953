//! The article-driven slices of the news index

use crate::cms::{ContentSource, Query};
use crate::config::SiteConfig;
use crate::content::routes::NEWS_PATH;
use crate::content::slice::{ArticlesGrid, FeaturedArticles};
use crate::content::Article;
use crate::error::Result;
use crate::listing::{
    build_page_request, select_featured, FilterOverrides, FilterState, ListingDefaults, PageItem,
    Pagination, SortKey, ViewMode, ALL_CATEGORIES,
};
use crate::templates::{
    rich_html, ArticleCard, ArticlesGridData, FeaturedArticlesData, HiddenField, LinkData,
    PageLinkData, PaginationData, SelectOption,
};

use super::ViewContext;

/// Pages shown on each side of the current one
const PAGE_WINDOW: u32 = 2;

/// Shortcuts offered above the featured articles
const FEATURED_CATEGORIES: [&str; 4] = ["Tecnologia", "Economia", "Esportes", "Política"];

/// Fetch one page of articles for the request's filter state
pub async fn articles_grid(
    source: &dyn ContentSource,
    ctx: &ViewContext<'_>,
    grid: &ArticlesGrid,
) -> Result<ArticlesGridData> {
    let defaults = ListingDefaults::for_grid(Some(grid), ctx.config.listing.page_size);
    let state = FilterState::from_query(&ctx.params, defaults);

    let response = source.get_articles(&Query::for_listing(&state)).await?;
    tracing::debug!(
        "News page {} of {}: {} results",
        state.page,
        response.total_pages,
        response.total_results_size
    );

    let pagination = Pagination::from_totals(
        state.page,
        state.page_size,
        response.total_pages,
        response.total_results_size,
        response.prev_page.is_some(),
        response.next_page.is_some(),
    );

    Ok(grid_data(grid, &state, &response.results, &pagination))
}

/// Template data of the grid for an already fetched page
pub fn grid_data(
    grid: &ArticlesGrid,
    state: &FilterState,
    articles: &[Article],
    pagination: &Pagination,
) -> ArticlesGridData {
    let href = |overrides: FilterOverrides| build_page_request(state, overrides).href(NEWS_PATH);

    let mut categories = vec![SelectOption {
        value: ALL_CATEGORIES.to_string(),
        label: "Todas as Categorias".to_string(),
        selected: state.is_all_categories(),
    }];
    let current = state.category.to_lowercase();
    categories.extend(grid.categories().into_iter().map(|(name, _)| SelectOption {
        selected: !state.is_all_categories() && name.to_lowercase() == current,
        value: name.clone(),
        label: name,
    }));

    let sorts = SortKey::ALL
        .iter()
        .map(|key| SelectOption {
            value: key.as_str().to_string(),
            label: key.label().to_string(),
            selected: *key == state.sort,
        })
        .collect();

    ArticlesGridData {
        section_title: grid.section_title.clone().filter(|t| !t.trim().is_empty()),
        show_search: grid.show_search,
        show_filters: grid.show_filters,
        search: state.search.clone(),
        categories,
        sorts,
        hidden: hidden_fields(grid, state),
        view: state.view.as_str().to_string(),
        grid_href: href(FilterOverrides::default().with_view(ViewMode::Grid)),
        list_href: href(FilterOverrides::default().with_view(ViewMode::List)),
        clear_href: clear_href(state),
        articles: articles.iter().map(ArticleCard::from_article).collect(),
        result_count: pagination.total_results,
        result_label: result_label(pagination.total_results),
        pagination: pagination_data(state, pagination),
    }
}

/// Link back to the unfiltered list. Only the view mode survives.
fn clear_href(state: &FilterState) -> String {
    let overrides = FilterOverrides::page(1)
        .with_search("")
        .with_category(ALL_CATEGORIES)
        .with_sort(state.defaults.sort)
        .with_page_size(state.defaults.page_size);
    build_page_request(state, overrides).href(NEWS_PATH)
}

/// State the filter form must carry without showing it. Submitting the
/// form always returns to the first page.
fn hidden_fields(grid: &ArticlesGrid, state: &FilterState) -> Vec<HiddenField> {
    build_page_request(state, FilterOverrides::page(1))
        .query_pairs()
        .into_iter()
        .filter(|(name, _)| match *name {
            "search" => !grid.show_search,
            "category" | "sort" => !grid.show_filters,
            _ => true,
        })
        .map(|(name, value)| HiddenField {
            name: name.to_string(),
            value,
        })
        .collect()
}

fn pagination_data(state: &FilterState, pagination: &Pagination) -> Option<PaginationData> {
    if !pagination.is_paginated() {
        return None;
    }

    let href = |page: u32| build_page_request(state, FilterOverrides::page(page)).href(NEWS_PATH);
    let pages = pagination
        .items(PAGE_WINDOW)
        .into_iter()
        .map(|item| match item {
            PageItem::Page { number, current } => PageLinkData {
                number: Some(number),
                href: Some(href(number)),
                current,
            },
            PageItem::Ellipsis => PageLinkData {
                number: None,
                href: None,
                current: false,
            },
        })
        .collect();

    Some(PaginationData {
        current: pagination.current,
        total_pages: pagination.total_pages,
        prev_href: pagination.prev().map(href),
        next_href: pagination.next().map(href),
        pages,
    })
}

/// "1 artigo encontrado", "3 artigos encontrados"
pub fn result_label(count: u64) -> String {
    if count == 1 {
        "1 artigo encontrado".to_string()
    } else {
        format!("{} artigos encontrados", count)
    }
}

/// Fetch the featured pool and pick the articles to highlight
pub async fn featured_articles(
    source: &dyn ContentSource,
    config: &SiteConfig,
    slice: &FeaturedArticles,
) -> Result<FeaturedArticlesData> {
    let pool = source
        .get_all_articles(&Query::featured(config.listing.featured_pool))
        .await?;
    let mut cards = select_featured(&pool, config.listing.featured_limit)
        .iter()
        .map(ArticleCard::from_article)
        .collect::<Vec<_>>();

    let lead = (!cards.is_empty()).then(|| cards.remove(0));

    let categories = if slice.show_category_filter {
        let state = FilterState::new(ListingDefaults::for_grid(None, config.listing.page_size));
        std::iter::once(LinkData::new(NEWS_PATH, "Todas"))
            .chain(FEATURED_CATEGORIES.iter().map(|name| {
                let href = build_page_request(&state, FilterOverrides::default().with_category(name))
                    .href(NEWS_PATH);
                LinkData::new(&href, name)
            }))
            .collect()
    } else {
        Vec::new()
    };

    Ok(FeaturedArticlesData {
        title: rich_html(&slice.title),
        description: rich_html(&slice.description),
        lead,
        others: cards,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures;
    use std::collections::HashMap;

    fn state(pairs: &[(&str, &str)]) -> FilterState {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FilterState::from_query(&params, ListingDefaults::default())
    }

    fn grid(show_search: bool, show_filters: bool) -> ArticlesGrid {
        ArticlesGrid {
            show_search,
            show_filters,
            ..ArticlesGrid::default()
        }
    }

    #[test]
    fn test_result_label() {
        assert_eq!(result_label(0), "0 artigos encontrados");
        assert_eq!(result_label(1), "1 artigo encontrado");
        assert_eq!(result_label(25), "25 artigos encontrados");
    }

    #[test]
    fn test_grid_selections() {
        let state = state(&[("category", "economia"), ("sort", "title_asc")]);
        let pagination = Pagination::new(1, 12, 0);
        let data = grid_data(&grid(true, true), &state, &[], &pagination);

        let selected: Vec<&str> = data
            .categories
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, vec!["Economia"]);
        assert_eq!(data.categories[0].value, "all");
        assert!(data.sorts.iter().any(|o| o.selected && o.value == "title_asc"));
        assert!(data.pagination.is_none());
        assert_eq!(data.result_label, "0 artigos encontrados");
        assert_eq!(data.clear_href, "/junco-news");
    }

    #[test]
    fn test_clear_link_resets_every_filter() {
        let filtered = state(&[
            ("category", "Economia"),
            ("search", "x"),
            ("sort", "title_asc"),
            ("pageSize", "24"),
            ("page", "3"),
        ]);
        let pagination = Pagination::new(3, 24, 0);
        let data = grid_data(&grid(true, true), &filtered, &[], &pagination);
        assert_eq!(data.clear_href, "/junco-news");

        let listed = state(&[("sort", "title_desc"), ("view", "list")]);
        let data = grid_data(&grid(true, true), &listed, &[], &pagination);
        assert_eq!(data.clear_href, "/junco-news?view=list");
    }

    #[test]
    fn test_view_links_keep_page() {
        let state = state(&[("page", "3"), ("search", "chuva")]);
        let pagination = Pagination::new(3, 12, 60);
        let data = grid_data(&grid(true, true), &state, &[], &pagination);

        assert_eq!(data.grid_href, "/junco-news?page=3&search=chuva");
        assert_eq!(data.list_href, "/junco-news?page=3&search=chuva&view=list");
    }

    #[test]
    fn test_hidden_fields_carry_invisible_state() {
        let state = state(&[
            ("page", "2"),
            ("pageSize", "24"),
            ("search", "chuva"),
            ("category", "Cultura"),
            ("view", "list"),
        ]);

        let visible = hidden_fields(&grid(true, true), &state);
        let names: Vec<&str> = visible.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["pageSize", "view"]);

        let hidden = hidden_fields(&grid(false, false), &state);
        let names: Vec<&str> = hidden.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["pageSize", "category", "search", "view"]);
    }

    #[test]
    fn test_pagination_links() {
        let state = state(&[("page", "5"), ("category", "Economia")]);
        let pagination = Pagination::from_totals(5, 12, 10, 120, true, true);
        let data = pagination_data(&state, &pagination).unwrap();

        assert_eq!(data.prev_href.as_deref(), Some("/junco-news?page=4&category=Economia"));
        assert_eq!(data.next_href.as_deref(), Some("/junco-news?page=6&category=Economia"));
        assert_eq!(data.pages[0].href.as_deref(), Some("/junco-news?category=Economia"));
        assert_eq!(data.pages[1].number, None);
        assert!(data.pages.iter().any(|p| p.current && p.number == Some(5)));
        assert_eq!(data.pages.last().and_then(|p| p.number), Some(10));
    }

    #[test]
    fn test_grid_cards() {
        let articles = vec![
            fixtures::article("a", "Primeiro", Some("2024-01-02")),
            fixtures::article("b", "Segundo", None),
        ];
        let state = state(&[]);
        let pagination = Pagination::new(1, 12, 2);
        let data = grid_data(&grid(false, false), &state, &articles, &pagination);

        assert_eq!(data.articles.len(), 2);
        assert_eq!(data.articles[0].title, "Primeiro");
        assert!(data.articles[1].date.is_none());
        assert_eq!(data.result_label, "2 artigos encontrados");
        assert!(data.hidden.is_empty());
    }
}
