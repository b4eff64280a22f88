use std::collections::BTreeSet;

use foundation::RegionCode;
use indexmap::IndexMap;

/// A checked region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRegion {
    pub code: RegionCode,
    pub name: String,
}

/// Outcome of a toggle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    Unchanged,
}

impl SelectionChange {
    pub fn changed(self) -> bool {
        self != SelectionChange::Unchanged
    }
}

/// Ordered set of selected regions.
///
/// Ordering contract:
/// - Iteration yields regions in the order they were toggled on.
/// - Removing a region keeps the relative order of the others.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    regions: IndexMap<RegionCode, String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent in both directions.
    pub fn toggle(&mut self, code: RegionCode, name: &str, selected: bool) -> SelectionChange {
        if selected {
            if self.regions.contains_key(&code) {
                return SelectionChange::Unchanged;
            }
            self.regions.insert(code, name.to_string());
            SelectionChange::Added
        } else if self.regions.shift_remove(&code).is_some() {
            SelectionChange::Removed
        } else {
            SelectionChange::Unchanged
        }
    }

    /// Removes everything, returning the removed regions in selection order.
    pub fn clear(&mut self) -> Vec<SelectedRegion> {
        self.regions
            .drain(..)
            .map(|(code, name)| SelectedRegion { code, name })
            .collect()
    }

    pub fn contains(&self, code: RegionCode) -> bool {
        self.regions.contains_key(&code)
    }

    pub fn position(&self, code: RegionCode) -> Option<usize> {
        self.regions.get_index_of(&code)
    }

    pub fn name_of(&self, code: RegionCode) -> Option<&str> {
        self.regions.get(&code).map(String::as_str)
    }

    pub fn codes(&self) -> BTreeSet<RegionCode> {
        self.regions.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = SelectedRegion> + '_ {
        self.regions.iter().map(|(code, name)| SelectedRegion {
            code: *code,
            name: name.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
