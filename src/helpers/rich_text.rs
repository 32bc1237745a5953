//! Rich text to HTML

use super::html::html_escape;
use crate::content::rich_text::{Block, SpanStyle, TextBlock};
use crate::content::RichText;

/// Render rich text to HTML
pub fn render_rich_text(rich: &RichText) -> String {
    render_rich_text_shifted(rich, 0)
}

/// Render rich text, demoting every heading by `shift` levels (capped at h6).
/// Used where the page already owns the top-level heading.
pub fn render_rich_text_shifted(rich: &RichText, shift: u8) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in rich.blocks() {
        let list = match block {
            Block::ListItem(_) => Some("ul"),
            Block::OrderedListItem(_) => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }

        html.push_str(&render_block(block, shift));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

fn render_block(block: &Block, shift: u8) -> String {
    let heading = |level: u8, text: &TextBlock| {
        let level = (level + shift).min(6);
        format!("<h{level}>{}</h{level}>", render_spans(text))
    };

    match block {
        Block::Heading1(t) => heading(1, t),
        Block::Heading2(t) => heading(2, t),
        Block::Heading3(t) => heading(3, t),
        Block::Heading4(t) => heading(4, t),
        Block::Heading5(t) => heading(5, t),
        Block::Heading6(t) => heading(6, t),
        Block::Paragraph(t) => format!("<p>{}</p>", render_spans(t)),
        Block::Preformatted(t) => format!("<pre><code>{}</code></pre>", html_escape(&t.text)),
        Block::ListItem(t) | Block::OrderedListItem(t) => format!("<li>{}</li>", render_spans(t)),
        Block::Image(image) => match image.src() {
            Some(src) => format!(
                r#"<p class="block-img"><img src="{}" alt="{}" loading="lazy"></p>"#,
                html_escape(src),
                html_escape(image.alt_text())
            ),
            None => String::new(),
        },
        Block::Embed(embed) => {
            let data = &embed.oembed;
            match (data.html.as_deref(), data.embed_url.as_deref()) {
                (Some(markup), url) => format!(
                    r#"<div class="embed" data-oembed="{}">{}</div>"#,
                    html_escape(url.unwrap_or("")),
                    markup
                ),
                (None, Some(url)) => format!(
                    r#"<p class="embed"><a href="{0}" target="_blank" rel="noopener noreferrer">{0}</a></p>"#,
                    html_escape(url)
                ),
                (None, None) => String::new(),
            }
        }
        Block::Unknown => String::new(),
    }
}

/// Render the inline spans of a text block.
///
/// Span offsets count characters; spans running past the text are
/// clipped and empty or unknown spans are ignored.
pub fn render_spans(block: &TextBlock) -> String {
    let chars: Vec<char> = block.text.chars().collect();
    let len = chars.len();

    let spans: Vec<(usize, usize, SpanStyle)> = block
        .spans
        .iter()
        .filter_map(|span| {
            let style = span.style()?;
            let (start, end) = (span.start.min(len), span.end.min(len));
            (start < end).then_some((start, end, style))
        })
        .collect();

    let mut cuts = vec![0, len];
    for (start, end, _) in &spans {
        cuts.push(*start);
        cuts.push(*end);
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut html = String::new();
    for window in cuts.windows(2) {
        let (from, to) = (window[0], window[1]);
        let text: String = chars[from..to].iter().collect();
        let mut segment = html_escape(&text).replace('\n', "<br />");

        // First declared span ends up outermost
        for (_, _, style) in spans
            .iter()
            .filter(|(start, end, _)| *start <= from && to <= *end)
            .rev()
        {
            segment = wrap(style, &segment);
        }
        html.push_str(&segment);
    }
    html
}

fn wrap(style: &SpanStyle, inner: &str) -> String {
    match style {
        SpanStyle::Strong => format!("<strong>{}</strong>", inner),
        SpanStyle::Em => format!("<em>{}</em>", inner),
        SpanStyle::Hyperlink(link) => {
            let href = link.href().unwrap_or_else(|| "#".to_string());
            let target = if link.opens_new_tab() {
                r#" target="_blank" rel="noopener noreferrer""#
            } else {
                ""
            };
            format!(r#"<a href="{}"{}>{}</a>"#, html_escape(&href), target, inner)
        }
        SpanStyle::Label(label) => {
            format!(r#"<span class="{}">{}</span>"#, html_escape(label), inner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich(json: &str) -> RichText {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let text = rich(
            r#"[{"type":"heading1","text":"Título","spans":[]},
                {"type":"paragraph","text":"A & B","spans":[]}]"#,
        );
        assert_eq!(render_rich_text(&text), "<h1>Título</h1><p>A &amp; B</p>");
        assert_eq!(
            render_rich_text_shifted(&text, 1),
            "<h2>Título</h2><p>A &amp; B</p>"
        );
    }

    #[test]
    fn test_list_grouping() {
        let text = rich(
            r#"[{"type":"list-item","text":"um","spans":[]},
                {"type":"list-item","text":"dois","spans":[]},
                {"type":"o-list-item","text":"três","spans":[]},
                {"type":"paragraph","text":"fim","spans":[]}]"#,
        );
        assert_eq!(
            render_rich_text(&text),
            "<ul><li>um</li><li>dois</li></ul><ol><li>três</li></ol><p>fim</p>"
        );
    }

    #[test]
    fn test_spans() {
        let text = rich(
            r#"[{"type":"paragraph","text":"Veja o site agora","spans":[
                {"start":0,"end":4,"type":"strong"},
                {"start":7,"end":11,"type":"hyperlink","data":{"link_type":"Web","url":"https://junco.tv","target":"_blank"}},
                {"start":12,"end":99,"type":"em"},
                {"start":2,"end":2,"type":"strong"},
                {"start":0,"end":3,"type":"mystery"}
            ]}]"#,
        );
        assert_eq!(
            render_rich_text(&text),
            r#"<p><strong>Veja</strong> o <a href="https://junco.tv" target="_blank" rel="noopener noreferrer">site</a> <em>agora</em></p>"#
        );
    }

    #[test]
    fn test_nested_spans_and_document_links() {
        let text = rich(
            r#"[{"type":"paragraph","text":"leia isto","spans":[
                {"start":0,"end":9,"type":"hyperlink","data":{"link_type":"Document","type":"news_article","uid":"chuva"}},
                {"start":5,"end":9,"type":"strong"}
            ]}]"#,
        );
        assert_eq!(
            render_rich_text(&text),
            r#"<p><a href="/junco-news/chuva">leia </a><a href="/junco-news/chuva"><strong>isto</strong></a></p>"#
        );
    }

    #[test]
    fn test_images_embeds_and_unknown() {
        let text = rich(
            r#"[{"type":"image","url":"https://img/1.jpg","alt":"Foto"},
                {"type":"image","url":""},
                {"type":"embed","oembed":{"embed_url":"https://youtu.be/x","html":"<iframe></iframe>"}},
                {"type":"strange-block","text":"?"}]"#,
        );
        assert_eq!(
            render_rich_text(&text),
            r#"<p class="block-img"><img src="https://img/1.jpg" alt="Foto" loading="lazy"></p><div class="embed" data-oembed="https://youtu.be/x"><iframe></iframe></div>"#
        );
    }

    #[test]
    fn test_line_breaks_and_escaping() {
        let text = RichText::paragraph("linha 1\n<linha 2>");
        assert_eq!(render_rich_text(&text), "<p>linha 1<br />&lt;linha 2&gt;</p>");
    }
}
