//! HTML helper functions

use serde::Serialize;

use super::url::encode_url;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Page metadata rendered into `<head>`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
    /// `website` or `article`
    pub kind: String,
}

/// Generate Open Graph meta tags
pub fn open_graph(meta: &PageMeta, site_name: &str) -> String {
    let kind = if meta.kind.is_empty() { "website" } else { &meta.kind };
    let mut tags = vec![
        format!(r#"<meta property="og:type" content="{}">"#, html_escape(kind)),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(&meta.title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, html_escape(&meta.url)),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !meta.description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(&meta.description)
        ));
    }

    if let Some(img) = &meta.image {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            html_escape(img)
        ));
    }

    tags.join("\n")
}

/// A share target for an article
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ShareLink {
    pub name: &'static str,
    pub href: String,
}

/// Share links for Facebook, Twitter, LinkedIn and WhatsApp
pub fn share_links(url: &str, title: &str) -> Vec<ShareLink> {
    let url = encode_url(url);
    let title = encode_url(title);
    vec![
        ShareLink {
            name: "Facebook",
            href: format!("https://www.facebook.com/sharer/sharer.php?u={}", url),
        },
        ShareLink {
            name: "Twitter",
            href: format!("https://twitter.com/intent/tweet?url={}&text={}", url, title),
        },
        ShareLink {
            name: "LinkedIn",
            href: format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url),
        },
        ShareLink {
            name: "WhatsApp",
            href: format!("https://wa.me/?text={}%20{}", title, url),
        },
    ]
}
