//! junco-site: a news site served from a headless CMS
//!
//! Pages are slice zones fetched from the content API (or a local JSON
//! directory), rendered with embedded Tera templates and cached until the
//! CMS webhook asks for revalidation.

pub mod cache;
pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod listing;
pub mod pages;
pub mod server;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cache::{CachedSource, TaggedCache};
use cms::ContentSource;

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "site.yml";

/// The site application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content source, already wrapped in the response cache
    pub source: Arc<dyn ContentSource>,
    /// Response cache shared with the revalidation endpoint
    pub cache: Arc<TaggedCache>,
}

impl Site {
    /// Create a site from a directory, reading `site.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        let source = cms::from_config(&config, &base_dir)?;
        Ok(Self::with_source(config, base_dir, source))
    }

    /// Create a site around an existing content source
    pub fn with_source(
        config: config::SiteConfig,
        base_dir: PathBuf,
        source: Arc<dyn ContentSource>,
    ) -> Self {
        let cache = Arc::new(TaggedCache::new(&config.cache));
        let source: Arc<dyn ContentSource> =
            Arc::new(CachedSource::new(source, Arc::clone(&cache)));

        Self {
            config,
            base_dir,
            source,
            cache,
        }
    }

    /// Directory served under `/static`
    pub fn static_dir(&self) -> PathBuf {
        self.base_dir.join("static")
    }
}
