use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use foundation::{CatalogResponse, DatasetResponse, RegionCode};
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::source::{BoxFuture, RemoteDataSource, SourceError};

/// Default window during which a repeated dataset fetch is served from memory.
pub const DEFAULT_DEDUP_INTERVAL: Duration = Duration::from_secs(60);

/// Response memo in front of another source.
///
/// - The region catalog is kept for the lifetime of the memo after the first
///   successful fetch.
/// - Dataset responses are reused for `dedup_interval` after they arrive.
/// - Failures are never memoised.
pub struct MemoSource {
    inner: Arc<dyn RemoteDataSource>,
    dedup_interval: Duration,
    catalog: Mutex<Option<CatalogResponse>>,
    datasets: Mutex<HashMap<RegionCode, (Instant, DatasetResponse)>>,
}

impl MemoSource {
    pub fn new(inner: Arc<dyn RemoteDataSource>) -> Self {
        Self::with_dedup_interval(inner, DEFAULT_DEDUP_INTERVAL)
    }

    pub fn with_dedup_interval(inner: Arc<dyn RemoteDataSource>, dedup_interval: Duration) -> Self {
        Self {
            inner,
            dedup_interval,
            catalog: Mutex::new(None),
            datasets: Mutex::new(HashMap::new()),
        }
    }

    pub fn dedup_interval(&self) -> Duration {
        self.dedup_interval
    }

    pub fn invalidate(&self, code: RegionCode) {
        self.datasets.lock().remove(&code);
    }

    fn fresh_dataset(&self, code: RegionCode) -> Option<DatasetResponse> {
        let mut datasets = self.datasets.lock();
        match datasets.get(&code) {
            Some((at, resp)) if at.elapsed() < self.dedup_interval => Some(resp.clone()),
            Some(_) => {
                datasets.remove(&code);
                None
            }
            None => None,
        }
    }
}

impl RemoteDataSource for MemoSource {
    fn fetch_region_catalog(&self) -> BoxFuture<'_, Result<CatalogResponse, SourceError>> {
        Box::pin(async move {
            let cached = self.catalog.lock().clone();
            if let Some(resp) = cached {
                return Ok(resp);
            }
            let resp = self.inner.fetch_region_catalog().await?;
            *self.catalog.lock() = Some(resp.clone());
            Ok(resp)
        })
    }

    fn fetch_region_dataset(
        &self,
        code: RegionCode,
    ) -> BoxFuture<'_, Result<DatasetResponse, SourceError>> {
        Box::pin(async move {
            if let Some(resp) = self.fresh_dataset(code) {
                debug!(%code, "dataset served from memo");
                return Ok(resp);
            }
            let resp = self.inner.fetch_region_dataset(code).await?;
            self.datasets
                .lock()
                .insert(code, (Instant::now(), resp.clone()));
            Ok(resp)
        })
    }
}
