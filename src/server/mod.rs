//! HTTP server: page routes, theme switching and the revalidation webhook

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cache::{TaggedCache, CONTENT_TAG};
use crate::cms::ContentSource;
use crate::config::SiteConfig;
use crate::content::routes::{ABOUT_PAGE, HOME_PAGE, NEWS_PAGE, NEWS_PATH};
use crate::pages::{article_page, not_found_page, slice_page, Missing, View, ViewContext};
use crate::templates::TemplateRenderer;
use crate::theme::{safe_return_path, ThemeMode};
use crate::Site;

/// Shared, read-only server state
pub struct AppState {
    pub config: SiteConfig,
    pub source: Arc<dyn ContentSource>,
    pub cache: Arc<TaggedCache>,
    pub renderer: TemplateRenderer,
    /// Served under `/static` when it exists
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(site: &Site) -> Result<Self> {
        let static_dir = site.static_dir();
        Ok(Self {
            config: site.config.clone(),
            source: Arc::clone(&site.source),
            cache: Arc::clone(&site.cache),
            renderer: TemplateRenderer::new()?,
            static_dir: static_dir.is_dir().then_some(static_dir),
        })
    }
}

/// Build the router over the given state
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(home_handler))
        .route("/about", get(about_handler))
        .route(NEWS_PATH, get(news_handler))
        .route(&format!("{}/:uid", NEWS_PATH), get(article_handler))
        .route("/theme/:mode", get(theme_handler))
        .route("/api/revalidate", post(revalidate_handler));

    if let Some(dir) = &state.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(site)?);
    let app = create_router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");
    tracing::info!(
        "Serving {:?} content from {} (cache: {:?})",
        site.config.content.source,
        site.config.content.endpoint(),
        site.config.cache.mode
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn theme_from(headers: &HeaderMap) -> ThemeMode {
    ThemeMode::from_cookie_header(
        headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok()),
    )
}

/// Render a view, turning fetch failures into the not-found view
fn respond(
    state: &AppState,
    ctx: &ViewContext<'_>,
    result: crate::error::Result<View>,
    missing: Missing,
) -> Response {
    let (status, view) = match result {
        Ok(view) => (StatusCode::OK, view),
        Err(e) => {
            if e.is_not_found() {
                tracing::debug!("{}: {}", ctx.current_path, e);
            } else {
                tracing::warn!("Failed to load {}: {}", ctx.current_path, e);
            }
            (StatusCode::NOT_FOUND, not_found_page(ctx, missing))
        }
    };

    match view.render(&state.renderer) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {}: {}", ctx.current_path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

async fn page_response(state: &AppState, headers: &HeaderMap, path: &str, kind: &str) -> Response {
    let ctx = ViewContext::new(&state.config, path, theme_from(headers));
    let result = slice_page(state.source.as_ref(), &ctx, kind).await;
    respond(state, &ctx, result, Missing::Page)
}

async fn home_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    page_response(&state, &headers, "/", HOME_PAGE).await
}

async fn about_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    page_response(&state, &headers, "/about", ABOUT_PAGE).await
}

async fn news_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let ctx = ViewContext::new(&state.config, NEWS_PATH, theme_from(&headers)).with_params(params);
    let result = slice_page(state.source.as_ref(), &ctx, NEWS_PAGE).await;
    respond(&state, &ctx, result, Missing::Page)
}

async fn article_handler(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
    headers: HeaderMap,
) -> Response {
    let path = format!("{}/{}", NEWS_PATH, uid);
    let ctx = ViewContext::new(&state.config, &path, theme_from(&headers));
    let result = article_page(state.source.as_ref(), &ctx, &uid).await;
    respond(&state, &ctx, result, Missing::Article)
}

async fn fallback_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let ctx = ViewContext::new(&state.config, uri.path(), theme_from(&headers));
    let view = not_found_page(&ctx, Missing::Page);
    match view.render(&state.renderer) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render not-found page: {}", e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

/// Store the chosen theme and go back where the reader came from
async fn theme_handler(
    Path(mode): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let target = safe_return_path(params.get("return").map(String::as_str));
    match ThemeMode::parse(&mode) {
        Some(theme) => ([(header::SET_COOKIE, theme.cookie())], Redirect::to(&target)).into_response(),
        None => Redirect::to(&target).into_response(),
    }
}

/// Body of the CMS webhook. Only the secret matters; everything else is
/// logged.
#[derive(Debug, Default, Deserialize)]
struct RevalidatePayload {
    #[serde(default)]
    secret: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

async fn revalidate_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let payload: RevalidatePayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Rejected revalidation with invalid body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Invalid JSON body" })),
            )
                .into_response();
        }
    };

    if let Some(expected) = state.config.webhook_secret() {
        if payload.secret.as_deref() != Some(expected) {
            tracing::warn!("Rejected revalidation with a missing or wrong secret");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid or missing secret" })),
            )
                .into_response();
        }
    }

    let removed = state.cache.invalidate_tag(CONTENT_TAG);
    tracing::info!(
        "Revalidated after {} webhook: {} responses dropped",
        payload.kind.as_deref().unwrap_or("unknown"),
        removed
    );

    Json(json!({
        "revalidated": true,
        "now": chrono::Utc::now().timestamp_millis(),
    }))
    .into_response()
}
