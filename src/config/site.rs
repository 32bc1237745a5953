//! Site configuration (site.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    pub base_url: String,

    // Content backend
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub cache: CacheConfig,

    // News listing
    #[serde(default)]
    pub listing: ListingConfig,

    /// Shared secret expected in revalidation webhooks
    pub webhook_secret: Option<String>,

    // Navigation
    pub nav: Vec<NavLink>,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Junco TV - Portal de Notícias".to_string(),
            description: "Portal de notícias com cobertura completa dos principais acontecimentos regionais e nacionais.".to_string(),
            language: "pt-BR".to_string(),
            base_url: "http://localhost:3000".to_string(),

            content: ContentConfig::default(),
            cache: CacheConfig::default(),
            listing: ListingConfig::default(),
            webhook_secret: None,

            nav: vec![
                NavLink::new("Início", "/"),
                NavLink::new("Notícias", "/junco-news"),
                NavLink::new("Sobre nós", "/about"),
            ],

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides on top of the file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (the process env in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("PRISMIC_WEBHOOK_SECRET").filter(|s| !s.is_empty()) {
            self.webhook_secret = Some(secret);
        }
        if let Some(repo) = lookup("PRISMIC_ENVIRONMENT").filter(|s| !s.is_empty()) {
            tracing::debug!("Repository overridden from env: {}", repo);
            self.content.repository = repo;
        }
        if let Some(token) = lookup("PRISMIC_ACCESS_TOKEN").filter(|s| !s.is_empty()) {
            self.content.access_token = Some(token);
        }
        if let Some(url) = lookup("JUNCO_BASE_URL").filter(|s| !s.is_empty()) {
            self.base_url = url;
        }
    }

    /// The configured secret, treating an empty string as unset
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref().filter(|s| !s.is_empty())
    }
}

/// Which backend answers content queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Prismic,
    Local,
}

/// Content backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub source: SourceKind,
    /// Prismic repository name
    pub repository: String,
    /// Full API endpoint; derived from the repository when unset
    pub endpoint: Option<String>,
    pub access_token: Option<String>,
    /// Directory of JSON documents for the local backend
    pub content_dir: String,
    pub timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Local,
            repository: "junco-tv".to_string(),
            endpoint: None,
            access_token: None,
            content_dir: "content".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ContentConfig {
    /// Resolve the API endpoint (without the /api/v2 suffix)
    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.cdn.prismic.io", self.repository),
        }
    }
}

/// Cache behaviour for fetched documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Keep entries until the tag is invalidated
    Force,
    /// Also expire entries after `revalidate_secs`
    Revalidate,
    /// Always fetch fresh content
    Off,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub mode: CacheMode,
    pub revalidate_secs: u64,
    /// Upper bound on stored responses; the oldest go first
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            mode: CacheMode::Force,
            revalidate_secs: 5,
            max_entries: 1000,
        }
    }
}

/// News listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub page_size: u32,
    pub featured_limit: usize,
    /// How many featured candidates to fetch before ranking
    pub featured_pool: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            featured_limit: 4,
            featured_pool: 10,
        }
    }
}

/// A navigation menu entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavLink {
    pub name: String,
    pub path: String,
}

impl NavLink {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}
