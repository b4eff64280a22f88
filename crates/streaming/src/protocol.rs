//! Shared wire constants for the proxy endpoints.
//!
//! The proxy and the HTTP client source both build on these, so the two ends
//! cannot drift apart.

use serde::{Deserialize, Serialize};

/// Region catalog route on the proxy.
pub const CATALOG_ROUTE: &str = "/api/prefectures";
/// Per-region population route on the proxy.
pub const DATASET_ROUTE: &str = "/api/population";
/// Query parameter carrying the region code on [`DATASET_ROUTE`].
pub const REGION_CODE_PARAM: &str = "prefCode";

/// Header carrying the upstream API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Upstream API paths, relative to `API_URL`.
pub const UPSTREAM_CATALOG_PATH: &str = "/api/v1/prefectures";
pub const UPSTREAM_DATASET_PATH: &str = "/api/v1/population/composition/perYear";

/// JSON body of every proxy error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
