//! News article documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::Document;
use super::fields::{filled, lenient, lenient_int, parse_date, ImageField};
use super::rich_text::RichText;
use super::routes;

/// Fields of a `news_article` document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArticleData {
    pub title: RichText,
    pub subtitle: RichText,
    pub excerpt: RichText,
    pub body: RichText,
    #[serde(deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub author: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub publication_date: Option<String>,
    #[serde(deserialize_with = "lenient_int")]
    pub reading_time: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub featured: bool,
    #[serde(deserialize_with = "lenient_int")]
    pub featured_order: Option<i64>,
    /// Comma separated tag list
    #[serde(deserialize_with = "lenient")]
    pub tags: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub featured_image: ImageField,
    #[serde(deserialize_with = "lenient")]
    pub meta_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub meta_description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub meta_image: ImageField,
}

pub type Article = Document<ArticleData>;

impl Article {
    pub fn title_text(&self) -> String {
        self.data.title.as_text()
    }

    pub fn excerpt_text(&self) -> String {
        self.data.excerpt.as_text()
    }

    pub fn author(&self) -> Option<&str> {
        filled(&self.data.author)
    }

    pub fn category(&self) -> Option<&str> {
        filled(&self.data.category)
    }

    /// Publication date, falling back to the first publication timestamp.
    /// `None` when neither is present or parseable.
    pub fn effective_date(&self) -> Option<DateTime<Utc>> {
        self.data
            .publication_date
            .as_deref()
            .and_then(parse_date)
            .or_else(|| self.first_published())
    }

    pub fn reading_time(&self) -> Option<i64> {
        self.data.reading_time.filter(|m| *m > 0)
    }

    /// Trimmed, non-empty entries of the comma separated tag field
    pub fn tag_list(&self) -> Vec<String> {
        self.data
            .tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Site path of the article, when it has a uid
    pub fn path(&self) -> Option<String> {
        filled(&self.uid).map(routes::article_path)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build an article for tests
    pub fn article(id: &str, title: &str, date: Option<&str>) -> Article {
        Document {
            id: id.to_string(),
            uid: Some(slug::slugify(title)),
            kind: routes::NEWS_ARTICLE.to_string(),
            first_publication_date: None,
            last_publication_date: None,
            tags: Vec::new(),
            lang: Some("pt-br".to_string()),
            data: ArticleData {
                title: RichText::heading(title),
                publication_date: date.map(str::to_string),
                ..ArticleData::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RawDocument;
    use chrono::Datelike;

    #[test]
    fn test_parse_article() {
        let raw: RawDocument = serde_json::from_str(
            r#"{
                "id": "X1",
                "uid": "economia-cresce",
                "type": "news_article",
                "first_publication_date": "2024-01-03T09:00:00+0000",
                "data": {
                    "title": [{"type":"heading1","text":"Economia Cresce","spans":[]}],
                    "excerpt": [{"type":"paragraph","text":"Resumo","spans":[]}],
                    "category": "Economia",
                    "author": "Ana Souza",
                    "publication_date": "2024-01-02",
                    "reading_time": 4,
                    "featured": true,
                    "featured_order": 2,
                    "tags": "economia, pib , ",
                    "featured_image": {"url": "https://img/1.jpg", "alt": "Capa"}
                }
            }"#,
        )
        .unwrap();
        let article: Article = raw.into_typed().unwrap();

        assert_eq!(article.title_text(), "Economia Cresce");
        assert_eq!(article.category(), Some("Economia"));
        assert_eq!(article.author(), Some("Ana Souza"));
        assert_eq!(article.effective_date().unwrap().day(), 2);
        assert_eq!(article.reading_time(), Some(4));
        assert!(article.data.featured);
        assert_eq!(article.data.featured_order, Some(2));
        assert_eq!(article.tag_list(), vec!["economia", "pib"]);
        assert_eq!(article.path().as_deref(), Some("/junco-news/economia-cresce"));
    }

    #[test]
    fn test_date_falls_back_to_first_publication() {
        let mut article = fixtures::article("a", "Sem data", None);
        assert!(article.effective_date().is_none());

        article.first_publication_date = Some("2023-12-31T23:00:00+0000".to_string());
        assert_eq!(article.effective_date().unwrap().year(), 2023);

        article.data.publication_date = Some("garbage".to_string());
        assert_eq!(article.effective_date().unwrap().year(), 2023);
    }

    #[test]
    fn test_malformed_optional_fields() {
        let raw: RawDocument = serde_json::from_str(
            r#"{"id":"b","type":"news_article","data":{
                "title": "Texto simples",
                "featured": "yes",
                "reading_time": "abc",
                "author": 12,
                "featured_image": []
            }}"#,
        )
        .unwrap();
        let article: Article = raw.into_typed().unwrap();
        assert_eq!(article.title_text(), "Texto simples");
        assert!(!article.data.featured);
        assert!(article.reading_time().is_none());
        assert!(article.author().is_none());
        assert!(!article.data.featured_image.is_filled());
        assert!(article.path().is_none());
    }
}
