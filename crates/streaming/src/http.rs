use std::time::Duration;

use foundation::{CatalogResponse, DatasetResponse, RegionCode};
use serde::de::DeserializeOwned;

use crate::protocol::{CATALOG_ROUTE, DATASET_ROUTE, ErrorBody, REGION_CODE_PARAM};
use crate::source::{BoxFuture, RemoteDataSource, SourceError};

/// Proxy-backed source (`GET /api/prefectures`, `GET /api/population?prefCode=`).
///
/// The API key never leaves the proxy; this client only knows the proxy's base URL.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SourceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn catalog_url(&self) -> String {
        format!("{}{}", self.base_url, CATALOG_ROUTE)
    }

    fn dataset_url(&self, code: RegionCode) -> String {
        format!("{}{}?{}={}", self.base_url, DATASET_ROUTE, REGION_CODE_PARAM, code)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, SourceError> {
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            // An unreadable error body still reports the status.
            let message = resp
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok())
                .map(|b| b.error);
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| self.map_reqwest_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| SourceError::Decode(e.to_string()))
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            return SourceError::Timeout(self.timeout.unwrap_or_default());
        }
        if err.is_decode() {
            return SourceError::Decode(err.to_string());
        }
        SourceError::Transport(err.to_string())
    }
}

impl RemoteDataSource for HttpSource {
    fn fetch_region_catalog(&self) -> BoxFuture<'_, Result<CatalogResponse, SourceError>> {
        let url = self.catalog_url();
        Box::pin(async move { self.get_json(url).await })
    }

    fn fetch_region_dataset(
        &self,
        code: RegionCode,
    ) -> BoxFuture<'_, Result<DatasetResponse, SourceError>> {
        let url = self.dataset_url(code);
        Box::pin(async move { self.get_json(url).await })
    }
}
