/// Observable per-region fetch lifecycle.
///
/// Idle → Fetching → Committed | Failed, with Fetching → Discarding when the
/// region is deselected before its result arrives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Not selected and no request outstanding.
    Idle,
    /// Selected, request outstanding, result will be committed.
    Fetching,
    /// Deselected while the request was outstanding; the result will be dropped.
    Discarding,
    /// Selected and holding a dataset.
    Committed,
    /// Selected, the last fetch failed, no dataset.
    Failed,
}

impl FetchState {
    /// Whether a network call for the region is still outstanding.
    pub fn is_outstanding(self) -> bool {
        matches!(self, FetchState::Fetching | FetchState::Discarding)
    }
}
