//! List news articles from the command line

use anyhow::Result;
use std::collections::HashMap;

use crate::cms::Query;
use crate::content::routes::NEWS_PAGE;
use crate::content::{Article, Slice};
use crate::listing::{
    build_page_request, select_featured, FilterOverrides, FilterState, ListingDefaults, Pagination,
};
use crate::pages::result_label;
use crate::Site;

/// Filters given on the command line
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListArgs {
    /// The arguments as news-page query parameters
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        let mut set = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                params.insert(key.to_string(), value);
            }
        };
        set("search", self.search.clone());
        set("category", self.category.clone());
        set("sort", self.sort.clone());
        set("page", self.page.map(|p| p.to_string()));
        set("pageSize", self.page_size.map(|p| p.to_string()));
        params
    }
}

/// Defaults of the news page grid, or the site defaults without one
async fn news_defaults(site: &Site) -> ListingDefaults {
    let page = match site.source.get_page(NEWS_PAGE).await {
        Ok(page) => Some(page),
        Err(e) => {
            tracing::debug!("No news page, using site defaults: {}", e);
            None
        }
    };
    let grid = page.as_ref().and_then(|page| {
        page.data.slices.iter().find_map(|slice| match slice {
            Slice::ArticlesGrid(body) => Some(&body.primary),
            _ => None,
        })
    });
    ListingDefaults::for_grid(grid, site.config.listing.page_size)
}

fn print_article(article: &Article) {
    let date = article
        .effective_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    println!(
        "  {} - {} [{}] {}",
        date,
        article.title_text(),
        article.category().unwrap_or("-"),
        article.path().unwrap_or_default()
    );
}

/// Print one page of articles, as the news index would show it
pub async fn run(site: &Site, args: &ListArgs) -> Result<()> {
    let defaults = news_defaults(site).await;
    let state = FilterState::from_query(&args.to_params(), defaults);
    let response = site.source.get_articles(&Query::for_listing(&state)).await?;
    let pagination = Pagination::from_totals(
        state.page,
        state.page_size,
        response.total_pages,
        response.total_results_size,
        response.prev_page.is_some(),
        response.next_page.is_some(),
    );

    println!(
        "{} (page {} of {})",
        result_label(pagination.total_results),
        pagination.current,
        pagination.total_pages.max(1)
    );
    for article in &response.results {
        print_article(article);
    }

    let query = build_page_request(&state, FilterOverrides::default()).to_query_string();
    if !query.is_empty() {
        println!("Query: ?{}", query);
    }

    Ok(())
}

/// Print the articles the featured section would highlight
pub async fn featured(site: &Site, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(site.config.listing.featured_limit);
    let pool = site
        .source
        .get_all_articles(&Query::featured(site.config.listing.featured_pool))
        .await?;
    let featured = select_featured(&pool, limit);

    println!("Featured ({}):", featured.len());
    for article in &featured {
        print_article(article);
    }
    Ok(())
}
