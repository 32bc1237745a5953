//! The article detail page

use crate::cms::ContentSource;
use crate::config::SiteConfig;
use crate::content::fields::filled;
use crate::content::routes::{article_path, NEWS_PATH};
use crate::content::Article;
use crate::error::Result;
use crate::helpers::{date_xml, full_url_for, long_date, reading_time, share_links, short_date};
use crate::templates::{rich_html, ArticleDetail, ImageData, LinkData};

use super::{View, ViewContext};

/// Fetch an article by uid and build its page
pub async fn article_page(
    source: &dyn ContentSource,
    ctx: &ViewContext<'_>,
    uid: &str,
) -> Result<View> {
    let article = source.get_article(uid).await?;
    let detail = article_detail(ctx.config, &article);

    let image = article
        .data
        .meta_image
        .src()
        .or_else(|| article.data.featured_image.src());
    let excerpt = article.excerpt_text();
    let meta = ctx.page_meta(
        filled(&article.data.meta_title).or(Some(detail.title.as_str())),
        filled(&article.data.meta_description).or(Some(excerpt.as_str())),
        image,
        "article",
    );

    Ok(View::Article {
        layout: ctx.layout(meta),
        article: Box::new(detail),
    })
}

/// Template data of an article
pub fn article_detail(config: &SiteConfig, article: &Article) -> ArticleDetail {
    let title = article.title_text();
    let date = article.effective_date();
    let path = article
        .path()
        .unwrap_or_else(|| article_path(article.uid.as_deref().unwrap_or(&article.id)));

    ArticleDetail {
        title_html: rich_html(&article.data.title),
        subtitle_html: rich_html(&article.data.subtitle),
        excerpt_html: rich_html(&article.data.excerpt),
        body_html: rich_html(&article.data.body),
        category: article.category().map(str::to_string),
        featured: article.data.featured,
        date_short: date.as_ref().map(short_date),
        date_long: date.as_ref().map(long_date),
        date_iso: date.as_ref().map(date_xml),
        reading_time: article.reading_time().map(reading_time),
        author: article.author().map(str::to_string),
        image: ImageData::from_field(&article.data.featured_image),
        tags: article.tag_list(),
        share: share_links(&full_url_for(config, &path), &title),
        back: LinkData::new(NEWS_PATH, "Voltar para Notícias"),
        title,
    }
}
