//! Theme mode and navigation context
//!
//! Both are built per request and handed to the layout explicitly.

use serde::Serialize;

use crate::config::NavLink;

/// Cookie holding the reader's theme choice
pub const THEME_COOKIE: &str = "theme";

/// Colour scheme of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Read the theme from a `Cookie` header, defaulting to dark
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        header
            .into_iter()
            .flat_map(|h| h.split(';'))
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| name.trim() == THEME_COOKIE)
            .and_then(|(_, value)| Self::parse(value))
            .unwrap_or_default()
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// `Set-Cookie` value persisting this theme for a year
    pub fn cookie(&self) -> String {
        format!(
            "{}={}; Path=/; Max-Age=31536000; SameSite=Lax",
            THEME_COOKIE,
            self.as_str()
        )
    }
}

/// A navigation menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: String,
    pub path: String,
    pub active: bool,
}

impl NavItem {
    /// Whether this entry owns `current_path`. The root only matches itself.
    pub fn is_active(path: &str, current_path: &str) -> bool {
        let path = path.trim_end_matches('/');
        let current = current_path.trim_end_matches('/');
        if path.is_empty() {
            return current.is_empty();
        }
        current == path || current.starts_with(&format!("{}/", path))
    }
}

/// Navigation state of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavContext {
    pub current_path: String,
    pub theme: ThemeMode,
    pub items: Vec<NavItem>,
    /// Link switching to the other theme and back to this page
    pub toggle_href: String,
}

impl NavContext {
    pub fn new(links: &[NavLink], current_path: &str, theme: ThemeMode) -> Self {
        let items = links
            .iter()
            .map(|link| NavItem {
                name: link.name.clone(),
                path: link.path.clone(),
                active: NavItem::is_active(&link.path, current_path),
            })
            .collect();

        let toggle_href = format!(
            "/theme/{}?return={}",
            theme.toggled().as_str(),
            crate::helpers::encode_url(current_path)
        );

        Self {
            current_path: current_path.to_string(),
            theme,
            items,
            toggle_href,
        }
    }
}

/// Only same-site absolute paths are accepted as redirect targets
pub fn safe_return_path(path: Option<&str>) -> String {
    match path {
        Some(p) if p.starts_with('/') && !p.starts_with("//") && !p.contains('\\') => p.to_string(),
        _ => "/".to_string(),
    }
}
