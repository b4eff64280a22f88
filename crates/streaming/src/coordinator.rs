use std::collections::{BTreeMap, BTreeSet};

use foundation::{RegionCode, RegionDataset};
use tracing::{debug, warn};

use crate::cache::DataCache;
use crate::fetch_state::FetchState;
use crate::request::Request;
use crate::source::SourceError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum SlotState {
    Fetching,
    Discarding,
}

/// One outstanding network call.
#[derive(Debug, Clone)]
struct Slot {
    request: Request,
    state: SlotState,
    name: String,
}

/// What happened when a fetch result was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Dataset written into the cache.
    Committed,
    /// Fetch failed; the region stays selected without data.
    Failed(SourceError),
    /// Region was deselected before the result arrived; result dropped.
    Discarded,
    /// No matching outstanding request (already settled or superseded).
    Stale,
}

/// Bridges selection transitions to remote fetches.
///
/// Guarantees:
/// - At most one outstanding request per region code. Re-selecting a code whose
///   discarded request is still in the air re-attaches to that request instead
///   of issuing a second one.
/// - A result whose region was deselected before it arrived never reaches the
///   cache.
///
/// The coordinator only decides; the caller performs the I/O and reports back
/// through [`FetchCoordinator::settle`].
#[derive(Debug)]
pub struct FetchCoordinator {
    next_request: u64,
    slots: BTreeMap<RegionCode, Slot>,
}

impl Default for FetchCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self {
            next_request: 1,
            slots: BTreeMap::new(),
        }
    }

    /// Number of network calls still outstanding, discarded ones included.
    pub fn outstanding(&self) -> usize {
        self.slots.len()
    }

    /// The in-flight mark: a fetch is outstanding and its result is wanted.
    pub fn is_in_flight(&self, code: RegionCode) -> bool {
        self.slots
            .get(&code)
            .is_some_and(|s| s.state == SlotState::Fetching)
    }

    pub fn request_for(&self, code: RegionCode) -> Option<Request> {
        self.slots.get(&code).map(|s| s.request)
    }

    pub fn state(&self, cache: &DataCache, code: RegionCode) -> FetchState {
        if let Some(slot) = self.slots.get(&code) {
            return match slot.state {
                SlotState::Fetching => FetchState::Fetching,
                SlotState::Discarding => FetchState::Discarding,
            };
        }
        match cache.get(code) {
            Some(entry) if entry.has_data() => FetchState::Committed,
            Some(_) => FetchState::Failed,
            None => FetchState::Idle,
        }
    }

    /// Region entered the selection.
    ///
    /// Returns the request the caller must issue, or `None` when an outstanding
    /// request or cached entry already covers the region.
    pub fn on_selected(
        &mut self,
        cache: &mut DataCache,
        code: RegionCode,
        name: &str,
    ) -> Option<Request> {
        if let Some(slot) = self.slots.get_mut(&code) {
            if slot.state == SlotState::Discarding {
                debug!(%code, request = slot.request.0, "re-attaching to outstanding fetch");
                slot.state = SlotState::Fetching;
                slot.name = name.to_string();
                cache.insert_placeholder(code, name);
            }
            return None;
        }

        if cache.contains(code) {
            return None;
        }

        let request = Request(self.next_request);
        self.next_request += 1;
        self.slots.insert(
            code,
            Slot {
                request,
                state: SlotState::Fetching,
                name: name.to_string(),
            },
        );
        cache.insert_placeholder(code, name);
        debug!(%code, request = request.0, "fetch started");
        Some(request)
    }

    /// Region left the selection.
    ///
    /// Clears the in-flight mark and drops the cache entry synchronously.
    /// Returns `true` if an in-flight fetch was marked for discard.
    pub fn on_deselected(&mut self, cache: &mut DataCache, code: RegionCode) -> bool {
        cache.remove(code);
        self.detach(code)
    }

    /// Brings cache and in-flight marks in line with the current selection.
    ///
    /// Never adds entries. Returns the evicted cache codes.
    pub fn reconcile(
        &mut self,
        cache: &mut DataCache,
        selected: &BTreeSet<RegionCode>,
    ) -> Vec<RegionCode> {
        let stale: Vec<RegionCode> = self
            .slots
            .iter()
            .filter(|(code, slot)| slot.state == SlotState::Fetching && !selected.contains(code))
            .map(|(code, _)| *code)
            .collect();
        for code in stale {
            self.detach(code);
        }
        cache.retain_codes(selected)
    }

    /// Applies the outcome of a fetch issued for `request`.
    pub fn settle(
        &mut self,
        cache: &mut DataCache,
        code: RegionCode,
        request: Request,
        outcome: Result<RegionDataset, SourceError>,
    ) -> Settlement {
        let matches = self
            .slots
            .get(&code)
            .is_some_and(|slot| slot.request == request);
        if !matches {
            debug!(%code, request = request.0, "ignoring stale settlement");
            return Settlement::Stale;
        }
        let Some(slot) = self.slots.remove(&code) else {
            return Settlement::Stale;
        };

        if slot.state == SlotState::Discarding {
            debug!(%code, request = request.0, "discarding result for deselected region");
            return Settlement::Discarded;
        }

        match outcome {
            Ok(dataset) => {
                cache.commit(code, &slot.name, dataset);
                debug!(%code, request = request.0, "dataset committed");
                Settlement::Committed
            }
            Err(error) => {
                warn!(%code, %error, "population fetch failed");
                cache.insert_placeholder(code, &slot.name);
                Settlement::Failed(error)
            }
        }
    }

    fn detach(&mut self, code: RegionCode) -> bool {
        match self.slots.get_mut(&code) {
            Some(slot) if slot.state == SlotState::Fetching => {
                slot.state = SlotState::Discarding;
                true
            }
            _ => false,
        }
    }
}
