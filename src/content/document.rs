//! CMS documents and page singletons

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::fields::{lenient, parse_date, ImageField};
use super::slice::{deserialize_slices, Slice};
use crate::error::Result;

/// A document as returned by the content API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document<T> {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub lang: Option<String>,
    pub data: T,
}

/// A document whose data has not been decoded yet
pub type RawDocument = Document<serde_json::Value>;

impl RawDocument {
    /// Decode the data payload into a typed document
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<Document<T>> {
        let data = serde_json::from_value(self.data)?;
        Ok(Document {
            id: self.id,
            uid: self.uid,
            kind: self.kind,
            first_publication_date: self.first_publication_date,
            last_publication_date: self.last_publication_date,
            tags: self.tags,
            lang: self.lang,
            data,
        })
    }
}

impl<T> Document<T> {
    /// First publication timestamp, if present and well formed
    pub fn first_published(&self) -> Option<DateTime<Utc>> {
        self.first_publication_date.as_deref().and_then(parse_date)
    }
}

/// Data of a slice-zone page (home, about, news index)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageData {
    #[serde(deserialize_with = "lenient")]
    pub meta_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub meta_description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub meta_image: ImageField,
    #[serde(deserialize_with = "deserialize_slices")]
    pub slices: Vec<Slice>,
}

pub type PageDocument = Document<PageData>;
