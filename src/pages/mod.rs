//! View builders
//!
//! Each route fetches its documents through a [`ContentSource`] and turns
//! them into the typed template data of [`crate::templates`]. Nothing here
//! renders HTML except through the [`TemplateRenderer`].

mod article;
mod news;
mod slices;

pub use article::{article_detail, article_page};
pub use news::{articles_grid, featured_articles, grid_data, result_label};
pub use slices::{initials, static_slice};

use chrono::{Datelike, Utc};
use std::collections::HashMap;

use crate::cms::ContentSource;
use crate::config::SiteConfig;
use crate::content::fields::filled;
use crate::content::routes::NEWS_PATH;
use crate::content::Slice;
use crate::error::Result;
use crate::helpers::{full_url_for, open_graph, PageMeta};
use crate::templates::{
    ArticleDetail, LayoutData, LinkData, NotFoundData, SliceContent, SliceView, TemplateRenderer,
};
use crate::theme::{NavContext, ThemeMode};

/// Everything a view needs to know about the request
#[derive(Debug, Clone)]
pub struct ViewContext<'a> {
    pub config: &'a SiteConfig,
    pub current_path: String,
    pub theme: ThemeMode,
    /// Query parameters of the request
    pub params: HashMap<String, String>,
}

impl<'a> ViewContext<'a> {
    pub fn new(config: &'a SiteConfig, current_path: &str, theme: ThemeMode) -> Self {
        Self {
            config,
            current_path: current_path.to_string(),
            theme,
            params: HashMap::new(),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Page metadata, falling back to the site title and description
    pub fn page_meta(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        image: Option<&str>,
        kind: &str,
    ) -> PageMeta {
        PageMeta {
            title: non_empty(title).unwrap_or(&self.config.title).to_string(),
            description: non_empty(description)
                .unwrap_or(&self.config.description)
                .to_string(),
            url: full_url_for(self.config, &self.current_path),
            image: non_empty(image).map(str::to_string),
            kind: kind.to_string(),
        }
    }

    pub fn layout(&self, meta: PageMeta) -> LayoutData {
        LayoutData {
            site_title: self.config.title.clone(),
            lang: self.config.language.clone(),
            og_tags: open_graph(&meta, &self.config.title),
            meta,
            nav: NavContext::new(&self.config.nav, &self.current_path, self.theme),
            year: Utc::now().year(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A view ready for rendering
#[derive(Debug, Clone)]
pub enum View {
    Page {
        layout: LayoutData,
        slices: Vec<SliceView>,
    },
    Article {
        layout: LayoutData,
        article: Box<ArticleDetail>,
    },
    NotFound {
        layout: LayoutData,
        data: NotFoundData,
    },
}

impl View {
    pub fn render(&self, renderer: &TemplateRenderer) -> Result<String> {
        match self {
            View::Page { layout, slices } => renderer.render_page(layout, slices),
            View::Article { layout, article } => renderer.render_article(layout, article),
            View::NotFound { layout, data } => renderer.render_not_found(layout, data),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, View::NotFound { .. })
    }
}

/// What the not-found view is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Page,
    Article,
}

/// A slice-zone page singleton with every slice resolved
pub async fn slice_page(
    source: &dyn ContentSource,
    ctx: &ViewContext<'_>,
    kind: &str,
) -> Result<View> {
    let page = source.get_page(kind).await?;

    let mut slices = Vec::with_capacity(page.data.slices.len());
    for slice in &page.data.slices {
        if let Some(view) = slice_view(source, ctx, slice).await? {
            slices.push(view);
        }
    }

    let meta = ctx.page_meta(
        filled(&page.data.meta_title),
        filled(&page.data.meta_description),
        page.data.meta_image.src(),
        "website",
    );

    Ok(View::Page {
        layout: ctx.layout(meta),
        slices,
    })
}

async fn slice_view(
    source: &dyn ContentSource,
    ctx: &ViewContext<'_>,
    slice: &Slice,
) -> Result<Option<SliceView>> {
    let content = match slice {
        Slice::FeaturedArticles(body) => SliceContent::FeaturedArticles(
            featured_articles(source, ctx.config, &body.primary).await?,
        ),
        Slice::ArticlesGrid(body) => {
            SliceContent::ArticlesGrid(articles_grid(source, ctx, &body.primary).await?)
        }
        other => match static_slice(other) {
            Some(content) => content,
            None => {
                tracing::debug!("Skipping slice without a view: {}", other.slice_type());
                return Ok(None);
            }
        },
    };

    Ok(Some(SliceView {
        slice_type: slice.slice_type(),
        variation: slice.variation().to_string(),
        content,
    }))
}

/// The not-found view
pub fn not_found_page(ctx: &ViewContext<'_>, missing: Missing) -> View {
    let data = match missing {
        Missing::Article => NotFoundData {
            heading: "Artigo não encontrado".to_string(),
            message: "O artigo que você está procurando não existe ou foi removido.".to_string(),
            links: vec![
                LinkData::new(NEWS_PATH, "Voltar para Notícias"),
                LinkData::new("/", "Ir para Início"),
            ],
        },
        Missing::Page => NotFoundData {
            heading: "Página não encontrada".to_string(),
            message: "A página que você está procurando não existe.".to_string(),
            links: vec![LinkData::new("/", "Ir para Início")],
        },
    };

    let meta = ctx.page_meta(Some(&data.heading), None, None, "website");
    View::NotFound {
        layout: ctx.layout(meta),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::LocalSource;
    use crate::content::routes::{ABOUT_PAGE, HOME_PAGE};
    use crate::content::RawDocument;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> RawDocument {
        serde_json::from_value(value).unwrap()
    }

    fn source() -> LocalSource {
        LocalSource::from_documents(vec![
            doc(json!({
                "id": "home", "type": "home_page",
                "data": {
                    "meta_title": "Junco TV",
                    "slices": [
                        {"slice_type": "hero_about", "variation": "default",
                         "primary": {"title": [{"type": "heading1", "text": "Olá", "spans": []}]}},
                        {"slice_type": "featured_articles", "primary": {"show_category_filter": true}},
                        {"slice_type": "mystery", "primary": {}}
                    ]
                }
            })),
            doc(json!({
                "id": "a1", "uid": "chuva", "type": "news_article",
                "data": {
                    "title": [{"type": "heading1", "text": "Chuva no sertão", "spans": []}],
                    "featured": true, "publication_date": "2024-03-01"
                }
            })),
        ])
    }

    #[tokio::test]
    async fn test_slice_page_resolves_slices() {
        let config = SiteConfig::default();
        let ctx = ViewContext::new(&config, "/", ThemeMode::Dark);
        let view = slice_page(&source(), &ctx, HOME_PAGE).await.unwrap();

        let View::Page { layout, slices } = view else {
            panic!("expected a page view");
        };
        assert_eq!(layout.meta.title, "Junco TV");
        assert_eq!(layout.meta.description, config.description);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].slice_type, "hero_about");
        assert_eq!(slices[0].variation, "default");

        let SliceContent::FeaturedArticles(featured) = &slices[1].content else {
            panic!("expected featured articles");
        };
        assert_eq!(featured.lead.as_ref().map(|a| a.title.as_str()), Some("Chuva no sertão"));
        assert_eq!(featured.categories[0].href, "/junco-news");
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found_error() {
        let config = SiteConfig::default();
        let ctx = ViewContext::new(&config, "/about", ThemeMode::Dark);
        let err = slice_page(&source(), &ctx, ABOUT_PAGE).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_not_found_views_render() {
        let config = SiteConfig::default();
        let ctx = ViewContext::new(&config, "/junco-news/nada", ThemeMode::Light);
        let renderer = TemplateRenderer::new().unwrap();

        let view = not_found_page(&ctx, Missing::Article);
        assert!(view.is_not_found());
        let html = view.render(&renderer).unwrap();
        assert!(html.contains("Artigo não encontrado"));
        assert!(html.contains(r#"href="/junco-news""#));
        assert!(html.contains(r#"class="light""#));
    }

    #[test]
    fn test_page_meta_fallbacks() {
        let config = SiteConfig::default();
        let ctx = ViewContext::new(&config, "/about", ThemeMode::Dark);
        let meta = ctx.page_meta(Some("  "), Some("Sobre nós"), Some(""), "website");
        assert_eq!(meta.title, config.title);
        assert_eq!(meta.description, "Sobre nós");
        assert_eq!(meta.image, None);
        assert!(meta.url.ends_with("/about"));
    }
}
