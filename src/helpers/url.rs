//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Normalise a site path to start with a single slash
///
/// # Examples
/// ```ignore
/// url_for("junco-news") // -> "/junco-news"
/// ```
pub fn url_for(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
        return path.to_string();
    }
    format!("/{}", path.trim_start_matches('/'))
}

/// Generate an absolute URL on the configured base URL
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/junco-news/a") // -> "https://junco.tv/junco-news/a"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let path = url_for(path);
    if path.starts_with("http") {
        return path;
    }
    format!("{}{}", config.base_url.trim_end_matches('/'), path)
}

/// Encode a URL component
pub fn encode_url(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Whether a link leaves the site
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            base_url: "https://junco.tv/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        assert_eq!(url_for("junco-news"), "/junco-news");
        assert_eq!(url_for("//about"), "//about");
        assert_eq!(url_for("/"), "/");
        assert_eq!(url_for("https://x.com/a"), "https://x.com/a");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/junco-news/economia"),
            "https://junco.tv/junco-news/economia"
        );
        assert_eq!(full_url_for(&config, "https://x.com"), "https://x.com");
    }

    #[test]
    fn test_encode_url() {
        assert_eq!(encode_url("a b&c"), "a%20b%26c");
        assert_eq!(encode_url("Olá!"), "Ol%C3%A1!");
    }
}
