//! Helper functions for templates
//!
//! These functions back the custom Tera filters and the view builders:
//! date formatting, URL generation, HTML escaping and rich text rendering.

mod date;
mod html;
mod rich_text;
mod url;

pub use date::*;
pub use html::*;
pub use rich_text::*;
pub use url::*;
