//! Route table mapping document types to site paths

/// Custom type of the home page singleton
pub const HOME_PAGE: &str = "home_page";
/// Custom type of the about page singleton
pub const ABOUT_PAGE: &str = "about";
/// Custom type of the news index singleton
pub const NEWS_PAGE: &str = "junco_news";
/// Custom type of news articles
pub const NEWS_ARTICLE: &str = "news_article";

/// Base path of the news section
pub const NEWS_PATH: &str = "/junco-news";

/// Resolve a document type (and uid for repeatable types) to a path
pub fn resolve(kind: &str, uid: Option<&str>) -> Option<String> {
    match kind {
        HOME_PAGE => Some("/".to_string()),
        ABOUT_PAGE => Some("/about".to_string()),
        NEWS_PAGE => Some(NEWS_PATH.to_string()),
        NEWS_ARTICLE => uid.map(article_path),
        _ => None,
    }
}

/// Path of a single news article
pub fn article_path(uid: &str) -> String {
    format!("{}/{}", NEWS_PATH, uid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(resolve(HOME_PAGE, None).as_deref(), Some("/"));
        assert_eq!(resolve(NEWS_PAGE, None).as_deref(), Some("/junco-news"));
        assert_eq!(
            resolve(NEWS_ARTICLE, Some("chuva-no-sertao")).as_deref(),
            Some("/junco-news/chuva-no-sertao")
        );
        assert_eq!(resolve(NEWS_ARTICLE, None), None);
        assert_eq!(resolve("unknown", None), None);
    }
}
