use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use streaming::{
    ErrorBody, CATALOG_ROUTE, DATASET_ROUTE, REGION_CODE_PARAM, UPSTREAM_CATALOG_PATH,
    UPSTREAM_DATASET_PATH,
};
use tracing::error;

use crate::config::{Credentials, ProxyConfig};
use crate::upstream::{UpstreamClient, UpstreamError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    fn credentials(&self) -> Result<&Credentials, ApiError> {
        self.config
            .credentials
            .as_ref()
            .ok_or(ApiError::Configuration)
    }
}

/// What the proxy was fetching when the upstream refused.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resource {
    Prefectures,
    Population,
}

impl Resource {
    fn describe(self) -> &'static str {
        match self {
            Resource::Prefectures => "prefectures",
            Resource::Population => "population data",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Prefecture code is required")]
    MissingPrefCode,
    #[error("API configuration is missing")]
    Configuration,
    #[error("Failed to fetch {} from external API", .resource.describe())]
    Upstream { status: StatusCode, resource: Resource },
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    fn from_upstream(err: UpstreamError, resource: Resource) -> Self {
        match err {
            UpstreamError::Status(status) => ApiError::Upstream { status, resource },
            other => ApiError::Internal(other.to_string()),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPrefCode => StatusCode::BAD_REQUEST,
            ApiError::Configuration | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => error!(%detail, "proxy request failed"),
            ApiError::Configuration => error!("API_URL or API_KEY is not set"),
            _ => {}
        }
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CATALOG_ROUTE, get(get_prefectures))
        .route(DATASET_ROUTE, get(get_population))
        .with_state(state)
}

async fn get_prefectures(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let creds = state.credentials()?;
    let body = state
        .upstream
        .get_json(creds, UPSTREAM_CATALOG_PATH, &[], state.config.catalog_ttl)
        .await
        .map_err(|e| ApiError::from_upstream(e, Resource::Prefectures))?;
    Ok(Json(body))
}

async fn get_population(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    // Anything non-empty is forwarded; the upstream judges whether it is a code.
    let code = params
        .get(REGION_CODE_PARAM)
        .filter(|raw| !raw.is_empty())
        .ok_or(ApiError::MissingPrefCode)?;
    let creds = state.credentials()?;

    let body = state
        .upstream
        .get_json(
            creds,
            UPSTREAM_DATASET_PATH,
            &[(REGION_CODE_PARAM, code.as_str())],
            state.config.dataset_ttl,
        )
        .await
        .map_err(|e| ApiError::from_upstream(e, Resource::Population))?;
    Ok(Json(body))
}
