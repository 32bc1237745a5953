//! Content API queries: predicates, orderings and paging

use serde::{Deserialize, Serialize};

use crate::content::routes::NEWS_ARTICLE;
use crate::listing::{FilterState, SortKey};

/// Sort direction of an ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// One ordering clause, e.g. `document.first_publication_date desc`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ordering {
    pub field: String,
    pub direction: Direction,
}

impl Ordering {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Desc,
        }
    }

    fn to_clause(&self) -> String {
        match self.direction {
            Direction::Asc => self.field.clone(),
            Direction::Desc => format!("{} desc", self.field),
        }
    }
}

/// A query predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Field equals value
    At { path: String, value: serde_json::Value },
    /// Full-text search over a document or field
    FullText { path: String, text: String },
}

impl Predicate {
    pub fn at(path: &str, value: impl Into<serde_json::Value>) -> Self {
        Predicate::At {
            path: path.to_string(),
            value: value.into(),
        }
    }

    pub fn fulltext(path: &str, text: &str) -> Self {
        Predicate::FullText {
            path: path.to_string(),
            text: text.to_string(),
        }
    }

    /// Render in the content API predicate syntax
    pub fn to_query(&self) -> String {
        match self {
            Predicate::At { path, value } => format!("[at({}, {})]", path, literal(value)),
            Predicate::FullText { path, text } => {
                format!("[fulltext({}, {})]", path, quote(text))
            }
        }
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn literal(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => quote(s),
        other => other.to_string(),
    }
}

/// Paging, ordering and filtering of a by-type query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub page: u32,
    pub page_size: u32,
    pub orderings: Vec<Ordering>,
    pub filters: Vec<Predicate>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            orderings: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    /// The `q` parameter for documents of `kind`
    pub fn to_q(&self, kind: &str) -> String {
        let mut q = String::from("[");
        q.push_str(&Predicate::at("document.type", kind).to_query());
        for predicate in &self.filters {
            q.push_str(&predicate.to_query());
        }
        q.push(']');
        q
    }

    /// The `orderings` parameter, if any ordering is set
    pub fn to_orderings(&self) -> Option<String> {
        if self.orderings.is_empty() {
            return None;
        }
        let clauses: Vec<String> = self.orderings.iter().map(Ordering::to_clause).collect();
        Some(format!("[{}]", clauses.join(",")))
    }

    /// Query behind one page of the news list
    ///
    /// The Prismic API matches these predicates more strictly than
    /// [`LocalSource`](crate::cms::LocalSource) does. `fulltext` matches
    /// whole words anywhere in the document, body included, and `at` on
    /// the category is case-sensitive. The local backend runs
    /// [`apply_filters`](crate::listing::apply_filters) instead, which
    /// matches substrings of title, excerpt and author and ignores
    /// category case. A search for `"econo"` only hits locally.
    pub fn for_listing(state: &FilterState) -> Self {
        let mut query = Query::new().page(state.page).page_size(state.page_size);
        query.orderings = orderings_for(state.sort);

        if !state.is_all_categories() {
            query = query.filter(Predicate::at(&field(NEWS_ARTICLE, "category"), state.category.as_str()));
        }
        if !state.search.is_empty() {
            query = query.filter(Predicate::fulltext("document", &state.search));
        }
        query
    }

    /// Candidates for the featured section
    pub fn featured(pool: u32) -> Self {
        Query::new()
            .page_size(pool)
            .filter(Predicate::at(&field(NEWS_ARTICLE, "featured"), true))
            .order_by(Ordering::asc(&field(NEWS_ARTICLE, "featured_order")))
            .order_by(Ordering::desc(FIRST_PUBLICATION))
    }

    /// The sort key these orderings express, if they come from one
    pub fn sort_key(&self) -> Option<SortKey> {
        SortKey::ALL
            .into_iter()
            .find(|key| orderings_for(*key) == self.orderings)
    }
}

const FIRST_PUBLICATION: &str = "document.first_publication_date";

/// Path of a custom field, e.g. `my.news_article.category`
pub fn field(kind: &str, name: &str) -> String {
    format!("my.{}.{}", kind, name)
}

/// Orderings implementing a list sort key
pub fn orderings_for(sort: SortKey) -> Vec<Ordering> {
    let date = field(NEWS_ARTICLE, "publication_date");
    let title = field(NEWS_ARTICLE, "title");
    match sort {
        SortKey::PublicationDateDesc => vec![Ordering::desc(&date), Ordering::desc(FIRST_PUBLICATION)],
        SortKey::PublicationDateAsc => vec![Ordering::asc(&date), Ordering::asc(FIRST_PUBLICATION)],
        SortKey::TitleAsc => vec![Ordering::asc(&title)],
        SortKey::TitleDesc => vec![Ordering::desc(&title)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{FilterState, ListingDefaults};

    #[test]
    fn test_predicate_syntax() {
        assert_eq!(
            Predicate::at("my.news_article.category", "Economia").to_query(),
            r#"[at(my.news_article.category, "Economia")]"#
        );
        assert_eq!(
            Predicate::at("my.news_article.featured", true).to_query(),
            "[at(my.news_article.featured, true)]"
        );
        assert_eq!(
            Predicate::fulltext("document", r#"o "boi""#).to_query(),
            r#"[fulltext(document, "o \"boi\"")]"#
        );
    }

    #[test]
    fn test_listing_query_defaults() {
        let state = FilterState::new(ListingDefaults::default());
        let query = Query::for_listing(&state);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 12);
        assert!(query.filters.is_empty());
        assert_eq!(query.to_q("news_article"), r#"[[at(document.type, "news_article")]]"#);
        assert_eq!(
            query.to_orderings().as_deref(),
            Some("[my.news_article.publication_date desc,document.first_publication_date desc]")
        );
        assert_eq!(query.sort_key(), Some(SortKey::PublicationDateDesc));
    }

    #[test]
    fn test_listing_query_with_filters() {
        let mut state = FilterState::new(ListingDefaults::default());
        state.category = "Cultura".to_string();
        state.search = "festa".to_string();
        state.sort = SortKey::TitleAsc;
        state.page = 2;

        let query = Query::for_listing(&state);
        assert_eq!(query.page, 2);
        assert_eq!(
            query.to_q("news_article"),
            r#"[[at(document.type, "news_article")][at(my.news_article.category, "Cultura")][fulltext(document, "festa")]]"#
        );
        assert_eq!(query.to_orderings().as_deref(), Some("[my.news_article.title]"));
        assert_eq!(query.sort_key(), Some(SortKey::TitleAsc));
    }

    #[test]
    fn test_featured_query() {
        let query = Query::featured(10);
        assert_eq!(query.page_size, 10);
        assert_eq!(
            query.to_orderings().as_deref(),
            Some("[my.news_article.featured_order,document.first_publication_date desc]")
        );
        assert_eq!(query.sort_key(), None);
    }
}
