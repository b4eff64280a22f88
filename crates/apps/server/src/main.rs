//! Proxy in front of the demographic statistics API.
//!
//! Holds the API key server-side and exposes two JSON endpoints:
//! - `GET /api/prefectures`
//! - `GET /api/population?prefCode=<int>`

mod config;
mod proxy;
mod upstream;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ProxyConfig;
use crate::proxy::AppState;
use crate::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ProxyConfig::from_env()?;
    if config.credentials.is_none() {
        warn!("API_URL or API_KEY is not set; API routes will answer 500");
    }

    let state = AppState {
        upstream: Arc::new(UpstreamClient::new(config.upstream_timeout)?),
        config: Arc::new(config),
    };
    let addr = state.config.addr;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(proxy::router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("population proxy listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}
