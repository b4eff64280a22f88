//! Chart projection.
//!
//! Pure functions from cache contents plus a category to chart-ready data.
//! Nothing here touches the network or mutates the cache; callers may
//! re-project as often as they like.

pub mod labels;
pub mod options;
pub mod series;
pub mod symbology;

pub use labels::*;
pub use options::*;
pub use series::*;
pub use symbology::*;

use foundation::Category;
use serde::Serialize;
use streaming::CacheEntry;

/// Labels plus series, ready for a line chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartData {
    pub labels: Vec<i32>,
    pub datasets: Vec<PlottedSeries>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

pub fn project<'a, I>(entries: I, category: Category) -> ChartData
where
    I: IntoIterator<Item = &'a CacheEntry> + Copy,
{
    ChartData {
        labels: extract_labels(entries),
        datasets: build_datasets(entries, category),
    }
}

#[cfg(test)]
mod tests {
    use super::project;
    use foundation::{Category, CategorySeries, RegionCode, RegionDataset, TimeSeriesPoint};
    use streaming::CacheEntry;

    #[test]
    fn serializes_for_the_rendering_layer() {
        let entries = vec![CacheEntry {
            code: RegionCode(1),
            name: "北海道".into(),
            dataset: Some(RegionDataset {
                boundary_year: 2020,
                series: vec![CategorySeries::new(
                    "総人口",
                    vec![
                        TimeSeriesPoint::new(1980, 12817.0),
                        TimeSeriesPoint::new(1985, 12707.0),
                    ],
                )],
            }),
        }];
        let data = project(&entries, Category::Total);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["labels"], serde_json::json!([1980, 1985]));
        assert_eq!(json["datasets"][0]["displayName"], "北海道");
        assert_eq!(json["datasets"][0]["colorIndex"], 0);
        assert_eq!(json["datasets"][0]["borderColor"], "rgb(255, 99, 132)");
        assert_eq!(json["datasets"][0]["values"], serde_json::json!([12817.0, 12707.0]));
    }
}
