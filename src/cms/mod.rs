//! Content sources: the hosted content API and a local JSON directory

mod local;
mod prismic;
pub mod query;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{SiteConfig, SourceKind};
use crate::content::routes::NEWS_ARTICLE;
use crate::content::{Article, PageDocument, RawDocument};
use crate::error::Result;
use crate::listing::MAX_PAGE_SIZE;

pub use local::LocalSource;
pub use prismic::PrismicSource;
pub use query::{Direction, Ordering, Predicate, Query};

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse<T = RawDocument> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub total_results_size: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

fn first_page() -> u32 {
    1
}

impl<T> SearchResponse<T> {
    /// Replace the results, keeping the paging metadata
    pub fn map_results<U>(self, results: Vec<U>) -> SearchResponse<U> {
        SearchResponse {
            page: self.page,
            results_per_page: self.results_per_page,
            total_results_size: self.total_results_size,
            total_pages: self.total_pages,
            next_page: self.next_page,
            prev_page: self.prev_page,
            results,
        }
    }
}

/// Where documents come from
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// The single document of a singleton type
    async fn get_single(&self, kind: &str) -> Result<RawDocument>;

    /// A document by type and uid
    async fn get_by_uid(&self, kind: &str, uid: &str) -> Result<RawDocument>;

    /// One page of documents of a type
    async fn get_by_type(&self, kind: &str, query: &Query) -> Result<SearchResponse>;

    /// Every document of a type matching the query, across all pages
    async fn get_all_by_type(&self, kind: &str, query: &Query) -> Result<Vec<RawDocument>> {
        let mut query = query.clone().page(1).page_size(query.page_size.min(MAX_PAGE_SIZE));
        let mut documents = Vec::new();
        loop {
            let response = self.get_by_type(kind, &query).await?;
            let done = response.next_page.is_none() || response.page >= response.total_pages;
            documents.extend(response.results);
            if done {
                break;
            }
            query.page += 1;
        }
        Ok(documents)
    }

    /// A slice-zone page singleton
    async fn get_page(&self, kind: &str) -> Result<PageDocument> {
        self.get_single(kind).await?.into_typed()
    }

    /// A news article by uid
    async fn get_article(&self, uid: &str) -> Result<Article> {
        self.get_by_uid(NEWS_ARTICLE, uid).await?.into_typed()
    }

    /// One page of news articles
    async fn get_articles(&self, query: &Query) -> Result<SearchResponse<Article>> {
        let mut response = self.get_by_type(NEWS_ARTICLE, query).await?;
        let documents = std::mem::take(&mut response.results);
        Ok(response.map_results(typed_articles(documents)))
    }

    /// Every news article matching the query
    async fn get_all_articles(&self, query: &Query) -> Result<Vec<Article>> {
        let documents = self.get_all_by_type(NEWS_ARTICLE, query).await?;
        Ok(typed_articles(documents))
    }
}

#[async_trait]
impl<S: ContentSource + ?Sized> ContentSource for Arc<S> {
    async fn get_single(&self, kind: &str) -> Result<RawDocument> {
        (**self).get_single(kind).await
    }

    async fn get_by_uid(&self, kind: &str, uid: &str) -> Result<RawDocument> {
        (**self).get_by_uid(kind, uid).await
    }

    async fn get_by_type(&self, kind: &str, query: &Query) -> Result<SearchResponse> {
        (**self).get_by_type(kind, query).await
    }
}

/// Decode articles, dropping documents whose data is not an object
pub fn typed_articles(documents: Vec<RawDocument>) -> Vec<Article> {
    documents
        .into_iter()
        .filter_map(|doc| {
            let id = doc.id.clone();
            match doc.into_typed() {
                Ok(article) => Some(article),
                Err(e) => {
                    tracing::warn!("Skipping malformed article {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

/// Build the content source named in the configuration
pub fn from_config(config: &SiteConfig, base_dir: &std::path::Path) -> Result<Arc<dyn ContentSource>> {
    let source: Arc<dyn ContentSource> = match config.content.source {
        SourceKind::Prismic => Arc::new(PrismicSource::new(&config.content)?),
        SourceKind::Local => Arc::new(LocalSource::load(base_dir.join(&config.content.content_dir))?),
    };
    Ok(source)
}
