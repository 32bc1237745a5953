use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use junco_site::cms::LocalSource;
use junco_site::config::SiteConfig;
use junco_site::content::RawDocument;
use junco_site::server::{create_router, AppState};
use junco_site::Site;

fn doc(value: Value) -> RawDocument {
    serde_json::from_value(value).unwrap()
}

fn rich(kind: &str, text: &str) -> Value {
    json!([{ "type": kind, "text": text, "spans": [] }])
}

fn article(uid: &str, title: &str, category: &str, date: &str, featured: bool) -> RawDocument {
    doc(json!({
        "id": uid, "uid": uid, "type": "news_article",
        "data": {
            "title": rich("heading1", title),
            "excerpt": rich("paragraph", &format!("Sobre {}", title)),
            "category": category,
            "publication_date": date,
            "featured": featured
        }
    }))
}

fn documents() -> Vec<RawDocument> {
    vec![
        doc(json!({
            "id": "home", "type": "home_page",
            "data": {
                "meta_title": "Junco TV",
                "slices": [
                    {"slice_type": "hero_about", "variation": "default",
                     "primary": {"title": rich("heading1", "Bem-vindo")}},
                    {"slice_type": "featured_articles", "primary": {}}
                ]
            }
        })),
        doc(json!({
            "id": "news", "type": "junco_news",
            "data": {
                "meta_title": "Notícias",
                "slices": [
                    {"slice_type": "articles_grid", "variation": "default",
                     "primary": {"show_search": true, "show_filters": true, "articles_per_page": 2}}
                ]
            }
        })),
        article("chuva", "Chuva volta ao sertão", "Cultura", "2024-03-01", true),
        article("safra", "Safra recorde", "Economia", "2024-03-10", false),
        article("bolsa", "Agro puxa a bolsa", "economia", "2024-02-20", false),
    ]
}

struct TestSite {
    site: Site,
    app: Router,
    _tmp: TempDir,
}

fn test_site(secret: Option<&str>) -> TestSite {
    let tmp = TempDir::new().unwrap();
    let config = SiteConfig {
        webhook_secret: secret.map(str::to_string),
        ..SiteConfig::default()
    };
    let source = Arc::new(LocalSource::from_documents(documents()));
    let site = Site::with_source(config, tmp.path().to_path_buf(), source);
    let app = create_router(Arc::new(AppState::new(&site).unwrap()));
    TestSite {
        site,
        app,
        _tmp: tmp,
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn revalidate(app: &Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/revalidate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_home_page() {
    let t = test_site(None);
    let (status, html) = get(&t.app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Junco TV</title>"));
    assert!(html.contains(r#"data-slice-type="hero_about""#));
    assert!(html.contains(r#"data-slice-type="featured_articles""#));
    assert!(html.contains("Chuva volta ao sertão"));
    assert!(html.contains(r#"class="dark""#));
}

#[tokio::test]
async fn test_news_filters_and_pagination() {
    let t = test_site(None);

    let (status, html) = get(&t.app, "/junco-news?category=ECONOMIA&sort=title_asc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("2 artigos encontrados"));
    assert!(!html.contains("Chuva volta ao sertão"));
    let bolsa = html.find("Agro puxa a bolsa").unwrap();
    let safra = html.find("Safra recorde").unwrap();
    assert!(bolsa < safra);

    let (_, html) = get(&t.app, "/junco-news").await;
    assert!(html.contains("3 artigos encontrados"));
    assert!(html.contains(r#"href="/junco-news?page=2""#));
    assert!(html.contains("Safra recorde"));
    assert!(!html.contains("Agro puxa a bolsa"));

    let (_, html) = get(&t.app, "/junco-news?page=2&view=list").await;
    assert!(html.contains("Agro puxa a bolsa"));
    assert!(html.contains("article-card--list"));
    assert!(html.contains(r#"<input type="hidden" name="view" value="list">"#));
}

#[tokio::test]
async fn test_news_empty_state() {
    let t = test_site(None);
    let (status, html) = get(&t.app, "/junco-news?search=inexistente&sort=title_asc").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Nenhum artigo encontrado"));
    assert!(html.contains(r#"href="/junco-news">Limpar Filtros</a>"#));
    assert!(html.contains("0 artigos encontrados"));
}

#[tokio::test]
async fn test_article_page() {
    let t = test_site(None);

    let (status, html) = get(&t.app, "/junco-news/safra").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Safra recorde</h1>"));
    assert!(html.contains("10/03/2024"));
    assert!(html.contains("Voltar para Notícias"));
    assert!(html.contains("https://wa.me/?text="));

    let (status, html) = get(&t.app, "/junco-news/nada").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Artigo não encontrado"));
}

#[tokio::test]
async fn test_missing_documents_and_routes() {
    let t = test_site(None);

    let (status, html) = get(&t.app, "/about").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Página não encontrada"));

    let (status, _) = get(&t.app, "/nao-existe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_theme_toggle() {
    let t = test_site(None);
    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/theme/light?return=/about")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/about");
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("theme=light"));

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, "theme=light")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"class="light""#));
    assert!(html.contains("/theme/dark?return=%2F"));
}

#[tokio::test]
async fn test_revalidate_requires_secret() {
    let t = test_site(Some("s3cret"));
    get(&t.app, "/").await;
    let cached = t.site.cache.len();
    assert!(cached > 0);

    let (status, body) = revalidate(&t.app, r#"{"secret": "wrong"}"#).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or missing secret");
    assert_eq!(t.site.cache.len(), cached);

    let (status, _) = revalidate(&t.app, r#"{"type": "api-update"}"#).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(t.site.cache.len(), cached);

    let (status, body) = revalidate(&t.app, r#"{"secret": "s3cret"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revalidated"], true);
    assert!(body["now"].as_i64().unwrap() > 0);
    assert!(t.site.cache.is_empty());
}

#[tokio::test]
async fn test_revalidate_without_configured_secret() {
    let t = test_site(None);
    get(&t.app, "/junco-news").await;
    assert!(!t.site.cache.is_empty());

    let (status, body) = revalidate(&t.app, "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revalidated"], true);
    assert!(t.site.cache.is_empty());

    let (status, _) = revalidate(&t.app, "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
