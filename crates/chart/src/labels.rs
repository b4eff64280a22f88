use streaming::CacheEntry;

/// X-axis labels: the years of the first category series of the first entry
/// that has data, in point order.
///
/// Every region is assumed to report the same years. Entries with a different
/// year range are not realigned.
pub fn extract_labels<'a, I>(entries: I) -> Vec<i32>
where
    I: IntoIterator<Item = &'a CacheEntry>,
{
    entries
        .into_iter()
        .find_map(|entry| entry.dataset.as_ref())
        .and_then(|dataset| dataset.series.first())
        .map(|series| series.points.iter().map(|p| p.year).collect())
        .unwrap_or_default()
}
