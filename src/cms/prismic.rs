//! Client for the hosted content API (Prismic REST API v2)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::query::{field, Predicate, Query};
use super::{ContentSource, SearchResponse};
use crate::config::ContentConfig;
use crate::content::RawDocument;
use crate::error::{Result, SiteError};

/// Repository metadata returned by `/api/v2`
#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master: bool,
}

/// Content API client
pub struct PrismicSource {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl PrismicSource {
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!("junco-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn api_url(&self) -> String {
        format!("{}/api/v2", self.endpoint)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self.client.get(url).query(params);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(200).collect();
            tracing::warn!("Content API returned {} for {}", status, url);
            return Err(SiteError::Cms {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// Resolve the master ref (the published content version)
    async fn master_ref(&self) -> Result<String> {
        let info: ApiInfo = self.get_json(&self.api_url(), &[]).await?;
        info.refs
            .into_iter()
            .find(|r| r.is_master)
            .map(|r| r.reference)
            .ok_or_else(|| SiteError::Cms {
                status: 200,
                message: "repository has no master ref".to_string(),
            })
    }

    async fn search(&self, q: String, query: &Query) -> Result<SearchResponse> {
        let reference = self.master_ref().await?;
        let mut params = vec![
            ("ref", reference),
            ("q", q),
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
        ];
        if let Some(orderings) = query.to_orderings() {
            params.push(("orderings", orderings));
        }

        let url = format!("{}/documents/search", self.api_url());
        tracing::debug!("Content query: {:?}", params);
        self.get_json(&url, &params).await
    }

    async fn first(&self, q: String) -> Result<Option<RawDocument>> {
        let query = Query::new().page_size(1);
        let response = self.search(q, &query).await?;
        Ok(response.results.into_iter().next())
    }
}

#[async_trait]
impl ContentSource for PrismicSource {
    async fn get_single(&self, kind: &str) -> Result<RawDocument> {
        self.first(Query::new().to_q(kind))
            .await?
            .ok_or_else(|| SiteError::single(kind))
    }

    async fn get_by_uid(&self, kind: &str, uid: &str) -> Result<RawDocument> {
        let q = Query::new()
            .filter(Predicate::at(&field(kind, "uid"), uid))
            .to_q(kind);
        self.first(q).await?.ok_or_else(|| SiteError::uid(kind, uid))
    }

    async fn get_by_type(&self, kind: &str, query: &Query) -> Result<SearchResponse> {
        self.search(query.to_q(kind), query).await
    }
}
