//! HTTP server assembly: router construction, CORS policy and the
//! listener loop.

use anyhow::Context;
use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Json;
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tracing::info;

use crate::routes::{self, AppState};
use crate::{AppConfig, PwsClient, VERSION};

/// Build the full application router from configuration.
pub fn app(config: &AppConfig) -> anyhow::Result<Router> {
    let client = PwsClient::new(config).context("Failed to build upstream client")?;
    Ok(build_router(config, client))
}

pub fn build_router(config: &AppConfig, client: PwsClient) -> Router {
    Router::new()
        .route("/", get(info_payload))
        .nest("/api", routes::router(AppState { client }))
        .fallback(not_found)
        .layer(cors_layer(config))
}

/// In production only the configured origins may call the API; any other
/// environment stays open for local frontend development.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.is_production() {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn info_payload() -> Json<Value> {
    Json(json!({
        "status": "online",
        "message": "PWS Dashboard API Server",
        "endpoints": {
            "current": "/api/weather/current",
            "stats": "/api/weather/stats",
            "unified": "/api/weather/all",
        },
        "version": VERSION,
    }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "The requested endpoint does not exist",
        })),
    )
}

/// Bind the listener and serve until the process is stopped.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let router = app(&config)?;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")
}
