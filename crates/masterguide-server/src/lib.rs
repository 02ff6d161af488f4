//! Master Account Guides server
//!
//! Single-page site: `GET /` records the visit, reconciles the content
//! catalog against the taxonomy, and renders the page with the embedded
//! data the client search filter consumes. The server is started via
//! `start_server()`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, Response, StatusCode, Uri},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use rust_embed::Embed;
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use masterguide_core::catalog::{self, ContentCatalog};
use masterguide_core::paths;
use masterguide_core::storage::visits::{VisitCounter, VisitLog, VisitLogger};
use masterguide_core::storage::JsonFileStore;

pub mod client_ip;
pub mod error;
pub mod render;

use error::AppError;

/// Embedded site assets: page template, stylesheet, client script.
#[derive(Embed)]
#[folder = "assets"]
#[prefix = ""]
struct Assets;

/// Configuration for starting the server.
pub struct ServerConfig {
    /// Port to listen on (default: 3000).
    pub port: u16,
    /// Directory holding the flat-file stores and the uploads dir.
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Shared application state.
///
/// The locks are the write-serialization point for the flat-file stores:
/// every load-modify-save runs under a write guard, so concurrent requests
/// cannot lose counter increments or log records.
#[derive(Clone)]
pub struct AppState {
    pub visit_logger: Arc<RwLock<VisitLogger>>,
    pub catalog_store: Arc<RwLock<JsonFileStore<ContentCatalog>>>,
}

impl AppState {
    /// Build state over file stores rooted at `data_dir`.
    pub fn for_data_dir(data_dir: &std::path::Path) -> Self {
        let counter_store: JsonFileStore<VisitCounter> =
            JsonFileStore::new(paths::visit_counter_path(data_dir));
        let log_store: JsonFileStore<VisitLog> =
            JsonFileStore::new(paths::visit_log_path(data_dir));

        Self {
            visit_logger: Arc::new(RwLock::new(VisitLogger::new(
                Box::new(counter_store),
                Box::new(log_store),
            ))),
            catalog_store: Arc::new(RwLock::new(JsonFileStore::new(paths::catalog_path(
                data_dir,
            )))),
        }
    }
}

/// Build the router with the page route, health endpoint, and asset fallback.
pub fn build_router(config: &ServerConfig) -> anyhow::Result<(Router, AppState)> {
    paths::ensure_layout(&config.data_dir)?;
    let state = AppState::for_data_dir(&config.data_dir);

    let app = Router::new()
        .route("/", get(page))
        .route("/health", get(health))
        .fallback(serve_asset)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok((app, state))
}

/// Start the server and block until shutdown.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let (app, _state) = build_router(&config)?;

    tracing::info!("masterguide server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// The single content route: log the visit, reconcile the catalog, render.
async fn page(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let ip = client_ip::resolve(&headers, Some(addr));

    let visit_count = {
        let logger = state.visit_logger.write().await;
        logger.record_visit(&ip)?
    };

    let catalog = {
        use masterguide_core::storage::StateStore;
        let store = state.catalog_store.write().await;
        let mut catalog = store.load()?;
        if catalog::synchronize(&mut catalog) > 0 {
            store.save(&catalog)?;
        }
        catalog
    };

    Ok(Html(render::render_page(visit_count, &catalog)?))
}

/// Serve embedded static assets (stylesheet, client script).
async fn serve_asset(uri: Uri) -> Result<Response<Body>, AppError> {
    let path = uri.path().trim_start_matches('/');

    let Some(file) = Assets::get(path) else {
        return Err(AppError::NotFound(format!("no such page: /{path}")));
    };

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control(path))
        .body(Body::from(file.data.to_vec()))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Cache-control header value based on file type.
fn cache_control(path: &str) -> &'static str {
    if path.ends_with(".html") {
        "no-cache"
    } else {
        "public, max-age=3600"
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: HashMap::from([("search".to_string(), true), ("guides".to_string(), true)]),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    features: HashMap<String, bool>,
}
