//! Rich text fields
//!
//! A rich text field is an ordered list of blocks. The block set is fixed
//! by the content schema, so it is modelled as a closed enum; kinds the
//! schema does not know decode to [`Block::Unknown`] and render nothing.

use serde::{Deserialize, Deserializer, Serialize};

use super::fields::{lenient, ImageField, LinkField};

/// A run of text with inline spans
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextBlock {
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    #[serde(deserialize_with = "lenient")]
    pub spans: Vec<Span>,
}

impl TextBlock {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            spans: Vec::new(),
        }
    }
}

/// An embedded media block (oEmbed)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbedBlock {
    #[serde(deserialize_with = "lenient")]
    pub oembed: EmbedData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbedData {
    #[serde(deserialize_with = "lenient")]
    pub embed_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub html: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
}

/// One block of a rich text field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "heading1")]
    Heading1(TextBlock),
    #[serde(rename = "heading2")]
    Heading2(TextBlock),
    #[serde(rename = "heading3")]
    Heading3(TextBlock),
    #[serde(rename = "heading4")]
    Heading4(TextBlock),
    #[serde(rename = "heading5")]
    Heading5(TextBlock),
    #[serde(rename = "heading6")]
    Heading6(TextBlock),
    #[serde(rename = "paragraph")]
    Paragraph(TextBlock),
    #[serde(rename = "preformatted")]
    Preformatted(TextBlock),
    #[serde(rename = "list-item")]
    ListItem(TextBlock),
    #[serde(rename = "o-list-item")]
    OrderedListItem(TextBlock),
    #[serde(rename = "image")]
    Image(ImageField),
    #[serde(rename = "embed")]
    Embed(EmbedBlock),
    #[serde(other)]
    Unknown,
}

impl Block {
    /// The text content of text-bearing blocks
    pub fn text(&self) -> Option<&TextBlock> {
        match self {
            Block::Heading1(t)
            | Block::Heading2(t)
            | Block::Heading3(t)
            | Block::Heading4(t)
            | Block::Heading5(t)
            | Block::Heading6(t)
            | Block::Paragraph(t)
            | Block::Preformatted(t)
            | Block::ListItem(t)
            | Block::OrderedListItem(t) => Some(t),
            Block::Image(_) | Block::Embed(_) | Block::Unknown => None,
        }
    }
}

/// Inline formatting applied to a character range of a text block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
}

/// Known span styles
#[derive(Debug, Clone, PartialEq)]
pub enum SpanStyle {
    Strong,
    Em,
    Hyperlink(LinkField),
    Label(String),
}

impl Span {
    /// Decode the span kind; unknown kinds yield `None` and are skipped
    pub fn style(&self) -> Option<SpanStyle> {
        match self.kind.as_str() {
            "strong" => Some(SpanStyle::Strong),
            "em" => Some(SpanStyle::Em),
            "hyperlink" => serde_json::from_value(self.data.clone())
                .ok()
                .map(SpanStyle::Hyperlink),
            "label" => self
                .data
                .get("label")
                .and_then(|l| l.as_str())
                .map(|l| SpanStyle::Label(l.to_string())),
            _ => None,
        }
    }
}

/// A rich text field
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct RichText(pub Vec<Block>);

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let blocks = match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| Block::deserialize(item).unwrap_or(Block::Unknown))
                .collect(),
            // Key text used where rich text is expected
            serde_json::Value::String(s) if !s.trim().is_empty() => {
                vec![Block::Paragraph(TextBlock::plain(&s))]
            }
            _ => Vec::new(),
        };
        Ok(RichText(blocks))
    }
}

impl RichText {
    /// A single-paragraph field, mostly for tests and scaffolding
    pub fn paragraph(text: &str) -> Self {
        RichText(vec![Block::Paragraph(TextBlock::plain(text))])
    }

    pub fn heading(text: &str) -> Self {
        RichText(vec![Block::Heading1(TextBlock::plain(text))])
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    /// Filled when at least one block carries content
    pub fn is_filled(&self) -> bool {
        self.0.iter().any(|block| match block {
            Block::Image(image) => image.is_filled(),
            Block::Embed(_) => true,
            Block::Unknown => false,
            other => other.text().is_some_and(|t| !t.text.trim().is_empty()),
        })
    }

    /// Plain text of all text blocks, joined by a space
    pub fn as_text(&self) -> String {
        self.0
            .iter()
            .filter_map(Block::text)
            .map(|t| t.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
