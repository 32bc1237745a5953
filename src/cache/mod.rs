//! Tagged cache of content API responses
//!
//! Every fetch result is stored under a key derived from the call and is
//! tagged with the content tag. A revalidation webhook drops everything
//! carrying the tag so the next request fetches fresh content.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::cms::{ContentSource, Query, SearchResponse};
use crate::config::{CacheConfig, CacheMode};
use crate::content::RawDocument;
use crate::error::Result;

/// Tag carried by every content API response
pub const CONTENT_TAG: &str = "prismic";

/// A cached response
#[derive(Debug, Clone)]
pub enum CachedValue {
    Document(RawDocument),
    Search(SearchResponse),
}

/// Represents one cached response
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: CachedValue,
    /// Tags used for invalidation
    pub tags: Vec<String>,
    /// When the entry was stored
    pub stored_at: Instant,
    /// Insertion order, oldest lowest
    seq: u64,
}

/// In-memory response cache with tag invalidation
#[derive(Debug)]
pub struct TaggedCache {
    mode: CacheMode,
    ttl: Duration,
    max_entries: usize,
    next_seq: AtomicU64,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TaggedCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            mode: config.mode,
            ttl: Duration::from_secs(config.revalidate_secs),
            max_entries: config.max_entries,
            next_seq: AtomicU64::new(0),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        match self.mode {
            CacheMode::Force => true,
            CacheMode::Revalidate => entry.stored_at.elapsed() < self.ttl,
            CacheMode::Off => false,
        }
    }

    /// Fetch a live entry. A stale entry is dropped on the way.
    pub fn get(&self, key: &str) -> Option<CachedValue> {
        if self.mode == CacheMode::Off {
            return None;
        }
        {
            let entries = self.read();
            match entries.get(key) {
                Some(entry) if self.is_fresh(entry) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.write();
        if entries.get(key).is_some_and(|entry| !self.is_fresh(entry)) {
            entries.remove(key);
            tracing::debug!("Evicted stale cache entry {}", key);
        }
        None
    }

    /// Store a value under `key` with the given tags. Expired entries are
    /// pruned first, then the oldest entries until the cap leaves room.
    pub fn insert(&self, key: String, value: CachedValue, tags: &[&str]) {
        if self.mode == CacheMode::Off || self.max_entries == 0 {
            return;
        }
        let entry = CacheEntry {
            value,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            stored_at: Instant::now(),
            seq: self.next_seq.fetch_add(1, AtomicOrdering::Relaxed),
        };

        let mut entries = self.write();
        entries.remove(&key);
        entries.retain(|_, entry| self.is_fresh(entry));
        while entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(oldest) => {
                    entries.remove(&oldest);
                }
                None => break,
            }
        }
        entries.insert(key, entry);
    }

    /// Drop every entry carrying `tag`. Returns how many were removed.
    pub fn invalidate_tag(&self, tag: &str) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|t| t == tag));
        let removed = before - entries.len();
        tracing::info!("Invalidated {} cached responses tagged {:?}", removed, tag);
        removed
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn query_key(kind: &str, query: &Query) -> String {
    let encoded = serde_json::to_string(query).unwrap_or_default();
    format!("type:{}:{}", kind, encoded)
}

/// A content source whose responses go through a [`TaggedCache`]
pub struct CachedSource<S> {
    inner: S,
    cache: Arc<TaggedCache>,
}

impl<S: ContentSource> CachedSource<S> {
    pub fn new(inner: S, cache: Arc<TaggedCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<TaggedCache> {
        &self.cache
    }
}

#[async_trait]
impl<S: ContentSource> ContentSource for CachedSource<S> {
    async fn get_single(&self, kind: &str) -> Result<RawDocument> {
        let key = format!("single:{}", kind);
        if let Some(CachedValue::Document(doc)) = self.cache.get(&key) {
            return Ok(doc);
        }
        let doc = self.inner.get_single(kind).await?;
        self.cache
            .insert(key, CachedValue::Document(doc.clone()), &[CONTENT_TAG]);
        Ok(doc)
    }

    async fn get_by_uid(&self, kind: &str, uid: &str) -> Result<RawDocument> {
        let key = format!("uid:{}:{}", kind, uid);
        if let Some(CachedValue::Document(doc)) = self.cache.get(&key) {
            return Ok(doc);
        }
        let doc = self.inner.get_by_uid(kind, uid).await?;
        self.cache
            .insert(key, CachedValue::Document(doc.clone()), &[CONTENT_TAG]);
        Ok(doc)
    }

    async fn get_by_type(&self, kind: &str, query: &Query) -> Result<SearchResponse> {
        let key = query_key(kind, query);
        if let Some(CachedValue::Search(response)) = self.cache.get(&key) {
            return Ok(response);
        }
        let response = self.inner.get_by_type(kind, query).await?;
        self.cache
            .insert(key, CachedValue::Search(response.clone()), &[CONTENT_TAG]);
        Ok(response)
    }
}
