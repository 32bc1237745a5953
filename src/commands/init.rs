//! Initialize a new site with local sample content

use anyhow::{bail, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Junco site configuration

title: Junco TV
description: Notícias e programas da Junco TV
language: pt-BR
base_url: http://localhost:3000

content:
  # prismic | local
  source: local
  repository: junco-tv
  content_dir: content
  timeout_secs: 10

cache:
  # force keeps responses until the webhook revalidates,
  # revalidate also expires them after revalidate_secs
  mode: revalidate
  revalidate_secs: 5
  max_entries: 1000

listing:
  page_size: 12
  featured_limit: 4
  featured_pool: 10

# webhook_secret: change-me

nav:
  - name: Início
    path: /
  - name: Sobre
    path: /about
  - name: Notícias
    path: /junco-news

server:
  ip: localhost
  port: 3000
"#;

const STYLESHEET: &str = r#":root { color-scheme: dark; }
html.light { color-scheme: light; }
body { font-family: system-ui, sans-serif; margin: 0; }
main { max-width: 72rem; margin: 0 auto; padding: 1rem; }
.nav-items, .share-links, .pagination ul { display: flex; gap: 1rem; list-style: none; padding: 0; }
.active, .current { font-weight: bold; }
.articles-grid__items--grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }
.badge { display: inline-block; padding: 0 .5rem; border: 1px solid currentColor; border-radius: 1rem; font-size: .75rem; }
img { max-width: 100%; height: auto; }
"#;

fn heading(text: &str) -> Value {
    json!([{ "type": "heading1", "text": text, "spans": [] }])
}

fn paragraph(text: &str) -> Value {
    json!([{ "type": "paragraph", "text": text, "spans": [] }])
}

fn sample_pages() -> Vec<(&'static str, Value)> {
    vec![
        (
            "home.json",
            json!({
                "id": "home", "type": "home_page",
                "data": {
                    "meta_title": "Junco TV",
                    "meta_description": "Notícias e programas da Junco TV",
                    "slices": [
                        {
                            "slice_type": "hero_stats_with_actions", "variation": "default",
                            "primary": {
                                "title": heading("Junco TV"),
                                "description": paragraph("Informação que conecta a nossa região."),
                                "stats": [
                                    {"value": "10+", "label": "Programas"},
                                    {"value": "24h", "label": "No ar"}
                                ],
                                "primary_cta": {"link_type": "Document", "type": "junco_news", "text": "Ver notícias"},
                                "secondary_cta": {"link_type": "Document", "type": "about", "text": "Sobre nós"}
                            }
                        },
                        {
                            "slice_type": "featured_articles", "variation": "default",
                            "primary": {"title": heading("Em destaque"), "show_category_filter": true}
                        }
                    ]
                }
            }),
        ),
        (
            "about.json",
            json!({
                "id": "about", "type": "about",
                "data": {
                    "meta_title": "Sobre a Junco TV",
                    "slices": [
                        {
                            "slice_type": "hero_about", "variation": "default",
                            "primary": {
                                "title": heading("Sobre nós"),
                                "description": paragraph("Uma emissora feita pela comunidade.")
                            }
                        },
                        {
                            "slice_type": "contact_section", "variation": "default",
                            "primary": {
                                "title": heading("Contato"),
                                "email": "contato@junco.tv",
                                "social_links": [
                                    {"platform": "Instagram", "url": {"link_type": "Web", "url": "https://instagram.com/junco.tv"}}
                                ]
                            }
                        }
                    ]
                }
            }),
        ),
        (
            "junco_news.json",
            json!({
                "id": "news", "type": "junco_news",
                "data": {
                    "meta_title": "Notícias",
                    "slices": [
                        {
                            "slice_type": "featured_articles", "variation": "default",
                            "primary": {"title": heading("Destaques")}
                        },
                        {
                            "slice_type": "articles_grid", "variation": "default",
                            "primary": {
                                "section_title": "Todas as notícias",
                                "show_search": true,
                                "show_filters": true,
                                "default_sort": "publication_date_desc",
                                "articles_per_page": 6
                            }
                        }
                    ]
                }
            }),
        ),
    ]
}

fn sample_article(uid: &str, title: &str, category: &str, date: &str, featured: bool) -> Value {
    json!({
        "id": uid, "uid": uid, "type": "news_article",
        "first_publication_date": format!("{}T12:00:00+0000", date),
        "data": {
            "title": heading(title),
            "excerpt": paragraph(&format!("Resumo: {}.", title)),
            "body": paragraph("Conteúdo de exemplo. Edite os arquivos em content/ para começar."),
            "category": category,
            "author": "Redação Junco",
            "publication_date": date,
            "reading_time": 3,
            "featured": featured,
            "tags": category.to_lowercase()
        }
    })
}

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists in {:?}", CONFIG_FILE, target_dir);
    }

    let content_dir = target_dir.join("content");
    fs::create_dir_all(content_dir.join("news"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;
    fs::write(target_dir.join("static/site.css"), STYLESHEET)?;

    for (name, document) in sample_pages() {
        fs::write(content_dir.join(name), serde_json::to_string_pretty(&document)?)?;
    }

    let articles = json!([
        sample_article("bem-vindo", "Bem-vindo à Junco TV", "Cultura", "2024-03-01", true),
        sample_article("feira-de-tecnologia", "Feira de tecnologia movimenta a cidade", "Tecnologia", "2024-03-05", true),
        sample_article("safra-recorde", "Safra recorde anima produtores", "Economia", "2024-03-10", false),
    ]);
    fs::write(
        content_dir.join("news/articles.json"),
        serde_json::to_string_pretty(&articles)?,
    )?;

    tracing::debug!("Wrote sample content to {:?}", content_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::ContentSource;
    use crate::listing::{FilterState, ListingDefaults};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_site_is_servable() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let site = crate::Site::new(tmp.path()).unwrap();
        assert_eq!(site.config.title, "Junco TV");
        assert_eq!(site.config.nav.len(), 3);

        site.source.get_page("home_page").await.unwrap();
        let query = crate::cms::Query::for_listing(&FilterState::new(ListingDefaults::default()));
        let articles = site.source.get_articles(&query).await.unwrap();
        assert_eq!(articles.total_results_size, 3);
        assert_eq!(articles.results[0].uid.as_deref(), Some("safra-recorde"));
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
