//! Content module - typed CMS documents, fields and slices

mod article;
mod document;
pub mod fields;
pub mod rich_text;
pub mod routes;
pub mod slice;

pub use article::{Article, ArticleData};
pub use document::{Document, PageData, PageDocument, RawDocument};
pub use fields::{ImageField, LinkField};
pub use rich_text::{Block, RichText};
pub use slice::Slice;

#[cfg(test)]
pub(crate) use article::fixtures;
