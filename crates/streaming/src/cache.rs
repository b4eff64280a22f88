use std::collections::BTreeSet;

use foundation::{RegionCode, RegionDataset};
use indexmap::IndexMap;

/// Last known dataset for one selected region.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub code: RegionCode,
    pub name: String,
    /// `None` while the fetch is outstanding or after it failed.
    pub dataset: Option<RegionDataset>,
}

impl CacheEntry {
    pub fn placeholder(code: RegionCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            dataset: None,
        }
    }

    pub fn has_data(&self) -> bool {
        self.dataset.is_some()
    }
}

/// Per-region dataset cache with stable iteration order.
///
/// Notes on ordering:
/// - Entries iterate in insertion order, which the coordinator keeps equal to
///   selection order.
/// - Removal shifts later entries down instead of swapping, so deselecting a
///   region never reorders the remaining ones.
#[derive(Debug, Default, Clone)]
pub struct DataCache {
    entries: IndexMap<RegionCode, CacheEntry>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, code: RegionCode) -> bool {
        self.entries.contains_key(&code)
    }

    pub fn get(&self, code: RegionCode) -> Option<&CacheEntry> {
        self.entries.get(&code)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> + '_ {
        self.entries.values()
    }

    pub fn codes(&self) -> impl Iterator<Item = RegionCode> + '_ {
        self.entries.keys().copied()
    }

    /// Inserts a dataless entry for `code` unless one already exists.
    ///
    /// Returns `true` if the cache changed.
    pub fn insert_placeholder(&mut self, code: RegionCode, name: &str) -> bool {
        if self.entries.contains_key(&code) {
            return false;
        }
        self.entries
            .insert(code, CacheEntry::placeholder(code, name));
        true
    }

    /// Stores a fetched dataset, keeping the entry's position if it exists.
    pub fn commit(&mut self, code: RegionCode, name: &str, dataset: RegionDataset) {
        let entry = self
            .entries
            .entry(code)
            .or_insert_with(|| CacheEntry::placeholder(code, name));
        entry.name = name.to_string();
        entry.dataset = Some(dataset);
    }

    pub fn remove(&mut self, code: RegionCode) -> Option<CacheEntry> {
        self.entries.shift_remove(&code)
    }

    /// Drops every entry whose code is not in `keep`.
    ///
    /// Returns the evicted codes in their former iteration order.
    pub fn retain_codes(&mut self, keep: &BTreeSet<RegionCode>) -> Vec<RegionCode> {
        let evicted: Vec<RegionCode> = self
            .entries
            .keys()
            .filter(|code| !keep.contains(code))
            .copied()
            .collect();
        if !evicted.is_empty() {
            self.entries.retain(|code, _| keep.contains(code));
        }
        evicted
    }
}

impl<'a> IntoIterator for &'a DataCache {
    type Item = &'a CacheEntry;
    type IntoIter = indexmap::map::Values<'a, RegionCode, CacheEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::DataCache;
    use foundation::{CategorySeries, RegionCode, RegionDataset, TimeSeriesPoint};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn dataset(value: f64) -> RegionDataset {
        RegionDataset {
            boundary_year: 2020,
            series: vec![CategorySeries::new(
                "総人口",
                vec![TimeSeriesPoint::new(1980, value)],
            )],
        }
    }

    #[test]
    fn removal_preserves_order_of_remaining_entries() {
        let mut cache = DataCache::new();
        for (code, name) in [(1, "北海道"), (2, "青森県"), (3, "岩手県")] {
            cache.insert_placeholder(RegionCode(code), name);
        }
        cache.remove(RegionCode(1));
        let codes: Vec<u32> = cache.codes().map(|c| c.0).collect();
        assert_eq!(codes, vec![2, 3]);
    }

    #[test]
    fn commit_fills_placeholder_in_place() {
        let mut cache = DataCache::new();
        cache.insert_placeholder(RegionCode(13), "東京都");
        cache.insert_placeholder(RegionCode(27), "大阪府");
        cache.commit(RegionCode(13), "東京都", dataset(1.0));

        let first = cache.entries().next().unwrap();
        assert_eq!(first.code, RegionCode(13));
        assert!(first.has_data());
        assert!(!cache.get(RegionCode(27)).unwrap().has_data());
    }

    #[test]
    fn placeholder_does_not_clobber_existing_data() {
        let mut cache = DataCache::new();
        cache.commit(RegionCode(1), "北海道", dataset(2.0));
        assert!(!cache.insert_placeholder(RegionCode(1), "北海道"));
        assert!(cache.get(RegionCode(1)).unwrap().has_data());
    }

    #[test]
    fn retain_codes_reports_evictions_in_order() {
        let mut cache = DataCache::new();
        for code in [5, 1, 9, 3] {
            cache.insert_placeholder(RegionCode(code), "r");
        }
        let keep: BTreeSet<RegionCode> = [RegionCode(1), RegionCode(3)].into_iter().collect();
        let evicted = cache.retain_codes(&keep);
        assert_eq!(evicted, vec![RegionCode(5), RegionCode(9)]);
        let codes: Vec<u32> = (&cache).into_iter().map(|e| e.code.0).collect();
        assert_eq!(codes, vec![1, 3]);
    }
}
