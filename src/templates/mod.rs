//! Site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

mod data;

pub use data::*;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::error::Result;
use crate::helpers::{html_escape, long_date, short_date, strip_html, truncate};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("page.html", include_str!("site/page.html")),
            ("article.html", include_str!("site/article.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Partials
            (
                "partials/macros.html",
                include_str!("site/partials/macros.html"),
            ),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            // Slices
            (
                "slices/hero_about.html",
                include_str!("site/slices/hero_about.html"),
            ),
            (
                "slices/hero_stats_with_actions.html",
                include_str!("site/slices/hero_stats_with_actions.html"),
            ),
            (
                "slices/our_mission.html",
                include_str!("site/slices/our_mission.html"),
            ),
            (
                "slices/our_story.html",
                include_str!("site/slices/our_story.html"),
            ),
            (
                "slices/presenters_team.html",
                include_str!("site/slices/presenters_team.html"),
            ),
            (
                "slices/programs_list.html",
                include_str!("site/slices/programs_list.html"),
            ),
            (
                "slices/contact_section.html",
                include_str!("site/slices/contact_section.html"),
            ),
            (
                "slices/featured_articles.html",
                include_str!("site/slices/featured_articles.html"),
            ),
            (
                "slices/articles_grid.html",
                include_str!("site/slices/articles_grid.html"),
            ),
        ])?;

        // Slashes stay readable in escaped URLs
        tera.set_escape_fn(html_escape);

        // Register custom filters
        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render one slice through its template
    pub fn render_slice(&self, view: &SliceView) -> Result<String> {
        let (template, context) = match &view.content {
            SliceContent::HeroAbout(data) => ("slices/hero_about.html", slice_context(view, data)),
            SliceContent::HeroStatsWithActions(data) => (
                "slices/hero_stats_with_actions.html",
                slice_context(view, data),
            ),
            SliceContent::OurMission(data) => ("slices/our_mission.html", slice_context(view, data)),
            SliceContent::OurStory(data) => ("slices/our_story.html", slice_context(view, data)),
            SliceContent::PresentersTeam(data) => {
                ("slices/presenters_team.html", slice_context(view, data))
            }
            SliceContent::ProgramsList(data) => {
                ("slices/programs_list.html", slice_context(view, data))
            }
            SliceContent::ContactSection(data) => {
                ("slices/contact_section.html", slice_context(view, data))
            }
            SliceContent::FeaturedArticles(data) => {
                ("slices/featured_articles.html", slice_context(view, data))
            }
            SliceContent::ArticlesGrid(data) => {
                ("slices/articles_grid.html", slice_context(view, data))
            }
        };
        self.render(template, &context)
    }

    /// Render a page made of slices
    pub fn render_page(&self, layout: &LayoutData, slices: &[SliceView]) -> Result<String> {
        let rendered = slices
            .iter()
            .map(|slice| self.render_slice(slice))
            .collect::<Result<Vec<String>>>()?;

        let mut context = layout_context(layout);
        context.insert("slices", &rendered);
        self.render("page.html", &context)
    }

    pub fn render_article(&self, layout: &LayoutData, article: &ArticleDetail) -> Result<String> {
        let mut context = layout_context(layout);
        context.insert("article", article);
        self.render("article.html", &context)
    }

    pub fn render_not_found(&self, layout: &LayoutData, view: &NotFoundData) -> Result<String> {
        let mut context = layout_context(layout);
        context.insert("not_found", view);
        self.render("not_found.html", &context)
    }
}

fn layout_context(layout: &LayoutData) -> Context {
    let mut context = Context::new();
    context.insert("layout", layout);
    context
}

fn slice_context<T: Serialize>(view: &SliceView, data: &T) -> Context {
    let mut context = Context::new();
    context.insert("slice_type", view.slice_type);
    context.insert("variation", &view.variation);
    context.insert("slice", data);
    context
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };

    Ok(tera::Value::String(truncate(&s, length, Some(&omission))))
}

/// Tera filter: format an RFC 3339 or `YYYY-MM-DD` date.
/// `format="long"` gives "15 de janeiro de 2024", anything else `dd/mm/yyyy`.
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "short".to_string(),
    };

    let date = DateTime::parse_from_rfc3339(&s).ok().or_else(|| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().fixed_offset())
    });

    // Unparseable input is passed through untouched
    let Some(date) = date else {
        return Ok(tera::Value::String(s));
    };

    let formatted = match format.as_str() {
        "long" => long_date(&date),
        _ => short_date(&date),
    };
    Ok(tera::Value::String(formatted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apply(
        filter: fn(&tera::Value, &HashMap<String, tera::Value>) -> tera::Result<tera::Value>,
        value: tera::Value,
        args: &[(&str, tera::Value)],
    ) -> String {
        let args: HashMap<String, tera::Value> =
            args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        filter(&value, &args).unwrap().as_str().unwrap().to_string()
    }

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_date_format_filter() {
        assert_eq!(
            apply(date_format_filter, json!("2024-01-02T10:00:00+00:00"), &[]),
            "02/01/2024"
        );
        assert_eq!(apply(date_format_filter, json!("2024-01-02"), &[]), "02/01/2024");
        assert_eq!(
            apply(date_format_filter, json!("2024-01-02"), &[("format", json!("long"))]),
            "2 de janeiro de 2024"
        );
        assert_eq!(apply(date_format_filter, json!("ontem"), &[]), "ontem");
    }

    #[test]
    fn test_truncate_and_strip_filters() {
        assert_eq!(
            apply(truncate_chars_filter, json!("Uma frase longa"), &[("length", json!(10))]),
            "Uma frase…"
        );
        assert_eq!(apply(strip_html_filter, json!("<b>oi</b>"), &[]), "oi");
    }
}
