//! Primitive CMS field types: images, links, dates and lenient decoding

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::routes;

/// Decode a field, falling back to its default when the value has an
/// unexpected shape. Optional CMS fields never fail a whole document.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decode a number field that may arrive as an integer, a float or a string
pub fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Treat empty key-text values as absent
pub fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a CMS date or timestamp.
///
/// Accepts `2024-01-15` date fields, RFC 3339 timestamps and the
/// `2024-01-15T10:30:00+0000` form used for publication metadata.
/// Anything else is treated as absent.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Image dimensions as reported by the CMS
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// An image field
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageField {
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub alt: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub dimensions: Option<Dimensions>,
}

impl ImageField {
    /// An image is filled when it has a non-empty URL
    pub fn is_filled(&self) -> bool {
        filled(&self.url).is_some()
    }

    pub fn src(&self) -> Option<&str> {
        filled(&self.url)
    }

    pub fn alt_text(&self) -> &str {
        filled(&self.alt).unwrap_or("")
    }
}

/// A link field (web, media or document link)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkField {
    #[serde(deserialize_with = "lenient")]
    pub link_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub target: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub uid: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub document_type: Option<String>,
    /// Display text (newer link fields carry their own label)
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
}

impl LinkField {
    /// Resolve the link to an href, if it points anywhere
    pub fn href(&self) -> Option<String> {
        match self.link_type.as_deref() {
            Some("Document") => {
                let kind = filled(&self.document_type)?;
                routes::resolve(kind, filled(&self.uid))
            }
            _ => filled(&self.url).map(str::to_string),
        }
    }

    pub fn is_filled(&self) -> bool {
        self.href().is_some()
    }

    pub fn opens_new_tab(&self) -> bool {
        self.target.as_deref() == Some("_blank")
    }

    /// Link label, or the provided fallback
    pub fn label<'a>(&'a self, fallback: &'a str) -> &'a str {
        filled(&self.text).unwrap_or(fallback)
    }
}
