use std::collections::HashMap;

use foundation::{ApiResponse, CatalogResponse, DatasetResponse, Region, RegionCode, RegionDataset};
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;

use crate::source::{BoxFuture, RemoteDataSource, SourceError};

/// Call accounting for one region code.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CallStats {
    /// Calls started so far.
    pub total: usize,
    /// Calls currently awaiting completion.
    pub active: usize,
    /// Highest `active` ever observed.
    pub peak: usize,
}

/// Releases a held dataset fetch when opened (or dropped).
#[derive(Debug)]
pub struct Gate {
    tx: watch::Sender<bool>,
}

impl Gate {
    pub fn open(&self) {
        let _ = self.tx.send(true);
    }
}

/// In-memory source for tests and offline demos.
///
/// Responses are scripted per code; [`MemorySource::hold`] parks every fetch of
/// a code until the returned [`Gate`] opens, which lets callers decide the
/// order in which concurrent fetches complete.
#[derive(Debug, Default)]
pub struct MemorySource {
    regions: RwLock<Vec<Region>>,
    catalog_error: RwLock<Option<SourceError>>,
    datasets: RwLock<HashMap<RegionCode, Result<RegionDataset, SourceError>>>,
    gates: Mutex<HashMap<RegionCode, watch::Receiver<bool>>>,
    calls: Mutex<HashMap<RegionCode, CallStats>>,
    catalog_calls: Mutex<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_regions(regions: Vec<Region>) -> Self {
        let source = Self::default();
        *source.regions.write() = regions;
        source
    }

    pub fn set_regions(&self, regions: Vec<Region>) {
        *self.regions.write() = regions;
    }

    pub fn fail_catalog(&self, error: SourceError) {
        *self.catalog_error.write() = Some(error);
    }

    pub fn set_dataset(&self, code: RegionCode, dataset: RegionDataset) {
        self.datasets.write().insert(code, Ok(dataset));
    }

    pub fn fail_dataset(&self, code: RegionCode, error: SourceError) {
        self.datasets.write().insert(code, Err(error));
    }

    /// Parks subsequent fetches of `code` until the gate opens.
    pub fn hold(&self, code: RegionCode) -> Gate {
        let (tx, rx) = watch::channel(false);
        self.gates.lock().insert(code, rx);
        Gate { tx }
    }

    pub fn stats(&self, code: RegionCode) -> CallStats {
        self.calls.lock().get(&code).copied().unwrap_or_default()
    }

    pub fn calls(&self, code: RegionCode) -> usize {
        self.stats(code).total
    }

    pub fn catalog_calls(&self) -> usize {
        *self.catalog_calls.lock()
    }

    fn enter(&self, code: RegionCode) {
        let mut calls = self.calls.lock();
        let stats = calls.entry(code).or_default();
        stats.total += 1;
        stats.active += 1;
        stats.peak = stats.peak.max(stats.active);
    }

    fn leave(&self, code: RegionCode) {
        if let Some(stats) = self.calls.lock().get_mut(&code) {
            stats.active = stats.active.saturating_sub(1);
        }
    }

    fn scripted(&self, code: RegionCode) -> Result<DatasetResponse, SourceError> {
        match self.datasets.read().get(&code) {
            Some(Ok(dataset)) => Ok(ApiResponse::ok(dataset.clone())),
            Some(Err(error)) => Err(error.clone()),
            None => Err(SourceError::Upstream {
                status: 404,
                message: Some(format!("no dataset for region {code}")),
            }),
        }
    }
}

impl RemoteDataSource for MemorySource {
    fn fetch_region_catalog(&self) -> BoxFuture<'_, Result<CatalogResponse, SourceError>> {
        Box::pin(async move {
            *self.catalog_calls.lock() += 1;
            if let Some(error) = self.catalog_error.read().clone() {
                return Err(error);
            }
            Ok(ApiResponse::ok(self.regions.read().clone()))
        })
    }

    fn fetch_region_dataset(
        &self,
        code: RegionCode,
    ) -> BoxFuture<'_, Result<DatasetResponse, SourceError>> {
        Box::pin(async move {
            self.enter(code);
            let gate = self.gates.lock().get(&code).cloned();
            if let Some(mut rx) = gate {
                // A dropped gate counts as open.
                let _ = rx.wait_for(|open| *open).await;
            }
            let result = self.scripted(code);
            self.leave(code);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySource;
    use crate::source::{RemoteDataSource, SourceError};
    use foundation::{Region, RegionCode, RegionDataset};

    #[tokio::test]
    async fn serves_scripted_catalog_and_datasets() {
        let source = MemorySource::with_regions(vec![Region::new(1, "北海道")]);
        source.set_dataset(
            RegionCode(1),
            RegionDataset {
                boundary_year: 2020,
                series: vec![],
            },
        );

        let catalog = source.fetch_region_catalog().await.unwrap();
        assert_eq!(catalog.result.len(), 1);
        assert_eq!(source.catalog_calls(), 1);

        let ds = source.fetch_region_dataset(RegionCode(1)).await.unwrap();
        assert_eq!(ds.result.boundary_year, 2020);
        assert_eq!(source.calls(RegionCode(1)), 1);

        let missing = source.fetch_region_dataset(RegionCode(2)).await;
        assert_eq!(missing.unwrap_err().status(), Some(404));
    }

    #[tokio::test]
    async fn scripted_failures_are_returned() {
        let source = MemorySource::new();
        source.fail_catalog(SourceError::Transport("offline".into()));
        assert!(source.fetch_region_catalog().await.is_err());
        source.fail_dataset(RegionCode(3), SourceError::upstream(502));
        assert_eq!(
            source.fetch_region_dataset(RegionCode(3)).await.unwrap_err(),
            SourceError::upstream(502)
        );
    }

    #[tokio::test]
    async fn held_fetch_waits_for_gate() {
        let source = std::sync::Arc::new(MemorySource::new());
        source.set_dataset(
            RegionCode(1),
            RegionDataset {
                boundary_year: 2020,
                series: vec![],
            },
        );
        let gate = source.hold(RegionCode(1));

        let s = source.clone();
        let task = tokio::spawn(async move { s.fetch_region_dataset(RegionCode(1)).await });
        tokio::task::yield_now().await;
        assert_eq!(source.stats(RegionCode(1)).active, 1);
        assert!(!task.is_finished());

        gate.open();
        assert!(task.await.unwrap().is_ok());
        assert_eq!(source.stats(RegionCode(1)).active, 0);
        assert_eq!(source.stats(RegionCode(1)).peak, 1);
    }
}
