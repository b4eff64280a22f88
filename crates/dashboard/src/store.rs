use std::sync::Arc;
use std::time::Duration;

use chart::ChartOptions;
use foundation::{Category, RegionCode, RegionDataset};
use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use runtime::{Event, EventBus, Revision};
use streaming::{
    BoxFuture, DataCache, FetchCoordinator, FetchState, RemoteDataSource, Request, Settlement,
    SourceError,
};
use tracing::{debug, error, info, trace};

use crate::catalog::RegionCatalog;
use crate::selection::{SelectionChange, SelectionStore};
use crate::view::ChartView;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Per-fetch deadline. `None` waits as long as the source does.
    pub fetch_timeout: Option<Duration>,
    pub category: Category,
    /// Retained events before the oldest are dropped. `None` keeps all.
    pub event_capacity: Option<usize>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: None,
            category: Category::default(),
            event_capacity: Some(1024),
        }
    }
}

/// State transitions recorded for observers.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    CatalogLoaded { regions: usize },
    CatalogFailed { error: SourceError },
    SelectionChanged { code: RegionCode, change: SelectionChange },
    SelectionCleared { removed: usize },
    FetchStarted { code: RegionCode, request: Request },
    FetchSettled { code: RegionCode, settlement: Settlement },
    CacheEvicted { codes: Vec<RegionCode> },
    CategoryChanged { category: Category },
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("region {0} is not in the catalog")]
    UnknownRegion(RegionCode),
    #[error("region catalog is not loaded")]
    CatalogNotLoaded,
}

/// A finished network call waiting to be applied.
struct Settled {
    code: RegionCode,
    request: Request,
    outcome: Result<RegionDataset, SourceError>,
}

/// Selection, fetch coordination, cache and projection in one owner.
///
/// All state mutation happens through `&mut self`, so selection changes and
/// fetch settlements are applied one at a time in the order the caller
/// drives them. Outstanding fetches live in an internal set of futures that
/// only make progress inside [`Dashboard::settle_next`],
/// [`Dashboard::settle_all`] and [`Dashboard::pump`].
///
/// Every mutation advances [`Dashboard::revision`]; renderers compare
/// revisions to decide whether to call [`Dashboard::view`] again.
pub struct Dashboard {
    source: Arc<dyn RemoteDataSource>,
    fetch_timeout: Option<Duration>,
    category: Category,
    catalog: RegionCatalog,
    selection: SelectionStore,
    coordinator: FetchCoordinator,
    cache: DataCache,
    revision: Revision,
    events: EventBus<DashboardEvent>,
    pending: FuturesUnordered<BoxFuture<'static, Settled>>,
}

impl Dashboard {
    pub fn new(source: Arc<dyn RemoteDataSource>, config: DashboardConfig) -> Self {
        let events = match config.event_capacity {
            Some(cap) => EventBus::with_max_len(cap),
            None => EventBus::new(),
        };
        Self {
            source,
            fetch_timeout: config.fetch_timeout,
            category: config.category,
            catalog: RegionCatalog::default(),
            selection: SelectionStore::new(),
            coordinator: FetchCoordinator::new(),
            cache: DataCache::new(),
            revision: Revision::INITIAL,
            events,
            pending: FuturesUnordered::new(),
        }
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn cache(&self) -> &DataCache {
        &self.cache
    }

    pub fn fetch_state(&self, code: RegionCode) -> FetchState {
        self.coordinator.state(&self.cache, code)
    }

    /// Network calls not yet applied, discarded ones included.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event<DashboardEvent>> + '_ {
        self.events.iter()
    }

    pub fn drain_events(&mut self) -> Vec<Event<DashboardEvent>> {
        self.events.drain()
    }

    /// Fetches the region catalog unless it is already loaded.
    pub async fn load_regions(&mut self) -> &RegionCatalog {
        if !self.catalog.is_loaded() {
            self.fetch_catalog().await;
        }
        &self.catalog
    }

    /// Fetches the region catalog even if a previous load succeeded.
    pub async fn reload_regions(&mut self) -> &RegionCatalog {
        self.fetch_catalog().await;
        &self.catalog
    }

    async fn fetch_catalog(&mut self) {
        let outcome = self.source.fetch_region_catalog().await;
        let kind = match outcome {
            Ok(resp) => {
                info!(regions = resp.result.len(), "region catalog loaded");
                let regions = resp.result.len();
                self.catalog = RegionCatalog::Loaded(resp.result);
                DashboardEvent::CatalogLoaded { regions }
            }
            Err(error) => {
                error!(%error, "region catalog fetch failed");
                self.catalog = RegionCatalog::Failed(error.to_string());
                DashboardEvent::CatalogFailed { error }
            }
        };
        self.bump(kind);
    }

    /// Checks or unchecks a region.
    ///
    /// A newly checked region starts a fetch unless one is already outstanding
    /// or its data is cached. An unchecked region loses its cache entry at once
    /// and any fetch still running for it is discarded when it lands.
    pub fn toggle(&mut self, code: RegionCode, name: &str, selected: bool) -> SelectionChange {
        let change = self.selection.toggle(code, name, selected);
        if !change.changed() {
            return change;
        }
        self.bump(DashboardEvent::SelectionChanged { code, change });

        match change {
            SelectionChange::Added => {
                if let Some(request) = self.coordinator.on_selected(&mut self.cache, code, name) {
                    self.spawn_fetch(code, request);
                }
            }
            SelectionChange::Removed => {
                self.coordinator.on_deselected(&mut self.cache, code);
            }
            SelectionChange::Unchanged => {}
        }
        self.reconcile();
        change
    }

    /// Like [`Dashboard::toggle`], resolving the name from the loaded catalog.
    pub fn toggle_by_code(
        &mut self,
        code: RegionCode,
        selected: bool,
    ) -> Result<SelectionChange, DashboardError> {
        if !self.catalog.is_loaded() {
            return Err(DashboardError::CatalogNotLoaded);
        }
        let name = self
            .catalog
            .find(code)
            .map(|r| r.name.clone())
            .ok_or(DashboardError::UnknownRegion(code))?;
        Ok(self.toggle(code, &name, selected))
    }

    /// Deselects everything at once.
    pub fn clear_selection(&mut self) {
        let removed = self.selection.clear();
        if removed.is_empty() {
            return;
        }
        self.bump(DashboardEvent::SelectionCleared {
            removed: removed.len(),
        });
        self.reconcile();
    }

    /// Switches the projected category. Never triggers a fetch.
    pub fn set_category(&mut self, category: Category) {
        if self.category == category {
            return;
        }
        self.category = category;
        self.bump(DashboardEvent::CategoryChanged { category });
    }

    /// Waits for the next outstanding fetch and applies it.
    ///
    /// Returns `None` when nothing is outstanding.
    pub async fn settle_next(&mut self) -> Option<(RegionCode, Settlement)> {
        let settled = self.pending.next().await?;
        Some(self.apply(settled))
    }

    /// Applies every outstanding fetch, waiting as needed.
    pub async fn settle_all(&mut self) -> Vec<(RegionCode, Settlement)> {
        let mut out = Vec::new();
        while let Some(settled) = self.settle_next().await {
            out.push(settled);
        }
        out
    }

    /// Polls outstanding fetches once and applies those already finished.
    pub fn pump(&mut self) -> Vec<(RegionCode, Settlement)> {
        let mut out = Vec::new();
        while let Some(Some(settled)) = self.pending.next().now_or_never() {
            out.push(self.apply(settled));
        }
        out
    }

    /// Current projection for the rendering layer.
    pub fn view(&self) -> ChartView {
        if self.selection.is_empty() {
            return ChartView::placeholder();
        }
        ChartView::Chart {
            options: ChartOptions::for_category(self.category),
            data: chart::project(&self.cache, self.category),
        }
    }

    fn spawn_fetch(&mut self, code: RegionCode, request: Request) {
        let source = Arc::clone(&self.source);
        let timeout = self.fetch_timeout;
        self.pending.push(Box::pin(async move {
            let fetch = source.fetch_region_dataset(code);
            let outcome = match timeout {
                Some(limit) => tokio::time::timeout(limit, fetch)
                    .await
                    .unwrap_or(Err(SourceError::Timeout(limit))),
                None => fetch.await,
            };
            Settled {
                code,
                request,
                outcome: outcome.map(|resp| resp.result),
            }
        }));
        self.bump(DashboardEvent::FetchStarted { code, request });
    }

    fn apply(&mut self, settled: Settled) -> (RegionCode, Settlement) {
        let Settled {
            code,
            request,
            outcome,
        } = settled;
        let settlement = self
            .coordinator
            .settle(&mut self.cache, code, request, outcome);
        debug!(%code, request = request.0, ?settlement, "fetch settled");
        self.bump(DashboardEvent::FetchSettled {
            code,
            settlement: settlement.clone(),
        });
        (code, settlement)
    }

    fn reconcile(&mut self) {
        let selected = self.selection.codes();
        let evicted = self.coordinator.reconcile(&mut self.cache, &selected);
        if !evicted.is_empty() {
            self.bump(DashboardEvent::CacheEvicted { codes: evicted });
        }
    }

    fn bump(&mut self, kind: DashboardEvent) {
        let revision = self.revision.advance();
        trace!(%revision, ?kind, "dashboard state advanced");
        self.events.emit(revision, kind);
    }
}
