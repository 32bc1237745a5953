//! Error types shared by the library

use thiserror::Error;

/// Errors raised while fetching, decoding or rendering site content
#[derive(Debug, Error)]
pub enum SiteError {
    /// A singleton or by-uid lookup returned nothing
    #[error("document not found: {kind}{}", uid.as_deref().map(|u| format!("/{u}")).unwrap_or_default())]
    NotFound { kind: String, uid: Option<String> },

    /// Webhook secret missing or wrong
    #[error("invalid or missing secret")]
    Unauthorized,

    /// The content API answered with a non-success status
    #[error("content API error ({status}): {message}")]
    Cms { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SiteError {
    /// Build a not-found error for a singleton document
    pub fn single(kind: &str) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            uid: None,
        }
    }

    /// Build a not-found error for a repeatable document
    pub fn uid(kind: &str, uid: &str) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            uid: Some(uid.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
