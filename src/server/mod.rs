//! HTTP server hosting the category pages and the posts API

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::PostStore;
use crate::loader::{CategoryPageLoader, HttpFetcher, LoadError};
use crate::templates::TemplateRenderer;
use crate::Site;

/// Suffix of the JSON data route of a category page
const DATA_SUFFIX: &str = "/__data.json";

/// Server state
pub struct AppState {
    config: SiteConfig,
    store: PostStore,
    client: reqwest::Client,
    /// Origin the server is reachable at, used to resolve relative fetches
    origin: String,
    loader: CategoryPageLoader,
    renderer: TemplateRenderer,
}

impl AppState {
    pub fn new(site: &Site, origin: impl Into<String>) -> Result<Self> {
        Ok(Self {
            config: site.config.clone(),
            store: site.store.clone(),
            client: reqwest::Client::new(),
            origin: origin.into(),
            loader: CategoryPageLoader::from_config(&site.config),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Fetcher scoped to the page at `path`
    fn fetcher_for(&self, path: &str) -> HttpFetcher {
        HttpFetcher::new(
            self.client.clone(),
            format!("{}{}", self.origin.trim_end_matches('/'), path),
        )
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<LoadError> for ApiError {
    fn from(err: LoadError) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let page_route = state.config.category_path(":category");
    let data_route = format!("{}{}", page_route, DATA_SUFFIX);
    let api_route = format!("{}/api/posts", state.config.root.trim_end_matches('/'));

    Router::new()
        .route(&api_route, get(posts_api_handler))
        .route(&page_route, get(category_page_handler))
        .route(&data_route, get(category_data_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    // Relative fetches loop back to this server
    let origin_addr = if local_addr.ip().is_unspecified() {
        SocketAddr::new(Ipv4Addr::LOCALHOST.into(), local_addr.port())
    } else {
        local_addr
    };
    let state = Arc::new(AppState::new(site, format!("http://{}", origin_addr))?);

    let url = format!("http://{}:{}", ip, local_addr.port());
    println!("Server running at {}", url);
    println!(
        "Category pages at {}{}",
        url,
        site.config.category_path("<category>")
    );
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Serve the raw posts JSON
async fn posts_api_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.store.read_raw().await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!("Posts API failed: {:#}", e);
            ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Could not read posts".to_string(),
            }
            .into_response()
        }
    }
}

/// Render a category page
async fn category_page_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    uri: Uri,
) -> Response {
    let fetcher = state.fetcher_for(uri.path());

    let rendered = match state.loader.load(&category, &fetcher).await {
        Ok(result) => state
            .renderer
            .render_category(&state.config, &result)
            .map(|html| Html(html).into_response()),
        Err(err) => state
            .renderer
            .render_error(&state.config, &err)
            .map(|html| (err.status(), Html(html)).into_response()),
    };

    rendered.unwrap_or_else(|e| {
        tracing::error!("Failed to render category page: {:#}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
    })
}

/// Category page data as JSON
async fn category_data_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    uri: Uri,
) -> Response {
    let page_path = uri.path().strip_suffix(DATA_SUFFIX).unwrap_or(uri.path());
    let fetcher = state.fetcher_for(page_path);

    match state.loader.load(&category, &fetcher).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
