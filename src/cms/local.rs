//! Content source backed by a directory of JSON documents

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::query::{field, Predicate, Query};
use super::{typed_articles, ContentSource, SearchResponse};
use crate::content::routes::NEWS_ARTICLE;
use crate::content::RawDocument;
use crate::error::{Result, SiteError};
use crate::listing::{apply_filters, sort_articles, ArticleFilter, ALL_CATEGORIES};

/// Documents loaded from disk, grouped by type in file order
#[derive(Debug, Default)]
pub struct LocalSource {
    documents: IndexMap<String, Vec<RawDocument>>,
}

impl LocalSource {
    /// Load every `*.json` file under `dir`. A file holds one document or
    /// an array of documents.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(SiteError::Config(format!(
                "content directory not found: {}",
                dir.display()
            )));
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            let text = fs::read_to_string(path)?;
            match serde_json::from_str::<Value>(&text) {
                Ok(Value::Array(items)) => {
                    documents.extend(items.into_iter().filter_map(|item| decode(item, path)));
                }
                Ok(item) => documents.extend(decode(item, path)),
                Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        tracing::debug!("Loaded {} documents from {}", documents.len(), dir.display());
        Ok(Self::from_documents(documents))
    }

    pub fn from_documents(documents: Vec<RawDocument>) -> Self {
        let mut grouped: IndexMap<String, Vec<RawDocument>> = IndexMap::new();
        for doc in documents {
            grouped.entry(doc.kind.clone()).or_default().push(doc);
        }
        Self { documents: grouped }
    }

    /// Number of documents of every type
    pub fn len(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn of_kind(&self, kind: &str) -> &[RawDocument] {
        self.documents.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Filter and order articles with the same rules the list view uses
    fn narrow_articles(&self, documents: Vec<RawDocument>, query: &Query) -> Vec<RawDocument> {
        let filter = article_filter(&query.filters);
        let by_id: IndexMap<String, RawDocument> = documents
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();

        let articles = typed_articles(by_id.values().cloned().collect());
        let mut articles = apply_filters(&articles, &filter);
        if let Some(key) = query.sort_key() {
            sort_articles(&mut articles, key);
        }

        articles
            .iter()
            .filter_map(|article| by_id.get(&article.id).cloned())
            .collect()
    }
}

fn decode(item: Value, path: &Path) -> Option<RawDocument> {
    match serde_json::from_value(item) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!("Skipping malformed document in {}: {}", path.display(), e);
            None
        }
    }
}

/// Whether a predicate is answered by the article filter rather than by
/// a plain field comparison
fn is_article_predicate(predicate: &Predicate) -> bool {
    match predicate {
        Predicate::At { path, .. } => *path == field(NEWS_ARTICLE, "category"),
        Predicate::FullText { path, .. } => path == "document",
    }
}

fn article_filter(predicates: &[Predicate]) -> ArticleFilter {
    let mut search = String::new();
    let mut category = ALL_CATEGORIES.to_string();
    for predicate in predicates.iter().filter(|p| is_article_predicate(p)) {
        match predicate {
            Predicate::At { value, .. } => {
                category = value.as_str().unwrap_or_default().to_string();
            }
            Predicate::FullText { text, .. } => search = text.clone(),
        }
    }
    ArticleFilter::new(&search, &category)
}

/// Value a predicate path points at
fn lookup(doc: &RawDocument, path: &str) -> Option<Value> {
    match path {
        "document.type" => return Some(Value::String(doc.kind.clone())),
        "document.id" => return Some(Value::String(doc.id.clone())),
        "document.tags" => return Some(Value::from(doc.tags.clone())),
        _ => {}
    }

    let name = path.strip_prefix("my.")?.split_once('.')?.1;
    if name == "uid" {
        return doc.uid.clone().map(Value::String);
    }
    doc.data.get(name).cloned()
}

fn matches(doc: &RawDocument, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::At { path, value } => match lookup(doc, path) {
            Some(Value::Array(items)) if !value.is_array() => items.contains(value),
            Some(found) => found == *value,
            None => false,
        },
        Predicate::FullText { path, text } => {
            let haystack = match path.as_str() {
                "document" => doc.data.to_string(),
                _ => lookup(doc, path).map(|v| v.to_string()).unwrap_or_default(),
            };
            haystack.to_lowercase().contains(&text.to_lowercase())
        }
    }
}

fn paginate(kind: &str, documents: Vec<RawDocument>, query: &Query) -> SearchResponse {
    let page_size = query.page_size.max(1);
    let page = query.page.max(1);
    let total = documents.len() as u64;
    let total_pages = total.div_ceil(page_size as u64) as u32;
    let token = |n: u32| format!("local://{}?page={}&pageSize={}", kind, n, page_size);

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let results = documents
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    SearchResponse {
        page,
        results_per_page: page_size,
        total_results_size: total,
        total_pages,
        next_page: (page < total_pages).then(|| token(page + 1)),
        prev_page: (page > 1).then(|| token(page - 1)),
        results,
    }
}

#[async_trait]
impl ContentSource for LocalSource {
    async fn get_single(&self, kind: &str) -> Result<RawDocument> {
        self.of_kind(kind)
            .first()
            .cloned()
            .ok_or_else(|| SiteError::single(kind))
    }

    async fn get_by_uid(&self, kind: &str, uid: &str) -> Result<RawDocument> {
        self.of_kind(kind)
            .iter()
            .find(|doc| doc.uid.as_deref() == Some(uid))
            .cloned()
            .ok_or_else(|| SiteError::uid(kind, uid))
    }

    async fn get_by_type(&self, kind: &str, query: &Query) -> Result<SearchResponse> {
        let articles = kind == NEWS_ARTICLE;
        let mut documents: Vec<RawDocument> = self
            .of_kind(kind)
            .iter()
            .filter(|doc| {
                query
                    .filters
                    .iter()
                    .filter(|p| !(articles && is_article_predicate(p)))
                    .all(|p| matches(doc, p))
            })
            .cloned()
            .collect();

        if articles {
            documents = self.narrow_articles(documents, query);
        }

        Ok(paginate(kind, documents, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{FilterState, ListingDefaults, SortKey};
    use serde_json::json;
    use tempfile::TempDir;

    fn article(id: &str, title: &str, category: &str, date: &str) -> Value {
        json!({
            "id": id,
            "uid": slug::slugify(title),
            "type": "news_article",
            "data": {
                "title": [{"type": "heading1", "text": title, "spans": []}],
                "category": category,
                "publication_date": date,
                "featured": id == "n2"
            }
        })
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("about.json"),
            json!({"id": "about", "type": "about", "data": {"slices": []}}).to_string(),
        )
        .unwrap();
        fs::create_dir(dir.path().join("news")).unwrap();
        fs::write(
            dir.path().join("news").join("articles.json"),
            json!([
                article("n1", "Economia Cresce", "Economia", "2024-01-02"),
                article("n2", "Chuva Forte", "Clima", "2024-01-05"),
                article("n3", "Feira de Economia Solidária", "economia", "2023-11-20"),
            ])
            .to_string(),
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        dir
    }

    fn ids(response: &SearchResponse) -> Vec<&str> {
        response.results.iter().map(|d| d.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_load_directory() {
        let dir = fixture();
        let source = LocalSource::load(dir.path()).unwrap();
        assert_eq!(source.len(), 4);

        assert_eq!(source.get_single("about").await.unwrap().id, "about");
        assert!(source.get_single("home_page").await.unwrap_err().is_not_found());

        let doc = source.get_by_uid("news_article", "chuva-forte").await.unwrap();
        assert_eq!(doc.id, "n2");
        assert!(source.get_by_uid("news_article", "nada").await.is_err());
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = LocalSource::load(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[tokio::test]
    async fn test_listing_query() {
        let dir = fixture();
        let source = LocalSource::load(dir.path()).unwrap();

        let mut state = FilterState::new(ListingDefaults::default());
        let response = source.get_by_type(NEWS_ARTICLE, &Query::for_listing(&state)).await.unwrap();
        assert_eq!(ids(&response), vec!["n2", "n1", "n3"]);
        assert_eq!(response.total_pages, 1);
        assert!(response.next_page.is_none());

        state.category = "ECONOMIA".to_string();
        state.sort = SortKey::PublicationDateAsc;
        let response = source.get_by_type(NEWS_ARTICLE, &Query::for_listing(&state)).await.unwrap();
        assert_eq!(ids(&response), vec!["n3", "n1"]);

        state.category = ALL_CATEGORIES.to_string();
        state.search = "chuva".to_string();
        let response = source.get_by_type(NEWS_ARTICLE, &Query::for_listing(&state)).await.unwrap();
        assert_eq!(ids(&response), vec!["n2"]);
    }

    #[tokio::test]
    async fn test_paging() {
        let dir = fixture();
        let source = LocalSource::load(dir.path()).unwrap();

        let mut state = FilterState::new(ListingDefaults::default());
        state.page_size = 2;
        state.sort = SortKey::TitleAsc;
        let first = source.get_by_type(NEWS_ARTICLE, &Query::for_listing(&state)).await.unwrap();
        assert_eq!(ids(&first), vec!["n2", "n1"]);
        assert_eq!(first.total_pages, 2);
        assert!(first.next_page.is_some());
        assert!(first.prev_page.is_none());

        state.page = 2;
        let second = source.get_by_type(NEWS_ARTICLE, &Query::for_listing(&state)).await.unwrap();
        assert_eq!(ids(&second), vec!["n3"]);
        assert!(second.next_page.is_none());

        state.page = 9;
        let beyond = source.get_by_type(NEWS_ARTICLE, &Query::for_listing(&state)).await.unwrap();
        assert!(beyond.results.is_empty());
        assert_eq!(beyond.total_results_size, 3);
    }

    #[tokio::test]
    async fn test_featured_and_all_pages() {
        let dir = fixture();
        let source = LocalSource::load(dir.path()).unwrap();

        let featured = source.get_all_articles(&Query::featured(10)).await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].id, "n2");

        let all = source
            .get_all_by_type(NEWS_ARTICLE, &Query::new().page_size(1))
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }
}
