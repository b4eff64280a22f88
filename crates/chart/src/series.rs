use foundation::Category;
use serde::Serialize;
use streaming::CacheEntry;

use crate::symbology::{SeriesColor, color_for};

/// One line on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlottedSeries {
    /// Legend text (the region name).
    pub display_name: String,
    pub values: Vec<f64>,
    /// Position among the emitted series.
    pub color_index: usize,
    #[serde(flatten)]
    pub color: SeriesColor,
}

/// One series per entry that has data for `category`, in entry order.
///
/// Entries without data, and datasets lacking the category, are skipped.
/// Colours follow the position among emitted series, so a skipped entry does
/// not leave a gap in the palette.
pub fn build_datasets<'a, I>(entries: I, category: Category) -> Vec<PlottedSeries>
where
    I: IntoIterator<Item = &'a CacheEntry>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let series = entry.dataset.as_ref()?.series_for(category)?;
            Some((entry.name.as_str(), series))
        })
        .enumerate()
        .map(|(color_index, (name, series))| PlottedSeries {
            display_name: name.to_string(),
            values: series.points.iter().map(|p| p.value).collect(),
            color_index,
            color: color_for(color_index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::build_datasets;
    use crate::symbology::color_for;
    use foundation::{Category, CategorySeries, RegionCode, RegionDataset, TimeSeriesPoint};
    use pretty_assertions::assert_eq;
    use streaming::CacheEntry;

    fn entry(code: u32, name: &str, series: Vec<(&str, Vec<f64>)>) -> CacheEntry {
        CacheEntry {
            code: RegionCode(code),
            name: name.to_string(),
            dataset: Some(RegionDataset {
                boundary_year: 2020,
                series: series
                    .into_iter()
                    .map(|(label, values)| {
                        CategorySeries::new(
                            label,
                            values
                                .into_iter()
                                .enumerate()
                                .map(|(i, v)| TimeSeriesPoint::new(1980 + 5 * i as i32, v))
                                .collect(),
                        )
                    })
                    .collect(),
            }),
        }
    }

    #[test]
    fn empty_cache_yields_no_series() {
        assert!(build_datasets(&Vec::<CacheEntry>::new(), Category::Total).is_empty());
    }

    #[test]
    fn missing_category_is_skipped() {
        let entries = vec![entry(1, "北海道", vec![("総人口", vec![12817.0])])];
        assert!(build_datasets(&entries, Category::Elderly).is_empty());
    }

    #[test]
    fn values_follow_point_order_per_category() {
        let entries = vec![entry(
            1,
            "北海道",
            vec![
                ("総人口", vec![12817.0, 12707.0]),
                ("年少人口", vec![2906.0, 2769.0]),
            ],
        )];
        let total = build_datasets(&entries, Category::Total);
        assert_eq!(total.len(), 1);
        assert_eq!(total[0].display_name, "北海道");
        assert_eq!(total[0].values, vec![12817.0, 12707.0]);

        let youth = build_datasets(&entries, Category::Youth);
        assert_eq!(youth[0].values, vec![2906.0, 2769.0]);
    }

    #[test]
    fn colors_are_positional_among_emitted_series() {
        let entries = vec![
            CacheEntry::placeholder(RegionCode(2), "青森県"),
            entry(3, "岩手県", vec![("老年人口", vec![1.0])]),
            entry(13, "東京都", vec![("総人口", vec![2.0])]),
            entry(27, "大阪府", vec![("総人口", vec![3.0])]),
        ];
        let out = build_datasets(&entries, Category::Total);
        let names: Vec<&str> = out.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["東京都", "大阪府"]);
        assert_eq!(out[0].color_index, 0);
        assert_eq!(out[1].color_index, 1);
        assert_eq!(out[1].color, color_for(1));
    }

    #[test]
    fn labels_outside_category_set_are_ignored() {
        let entries = vec![entry(1, "北海道", vec![("その他", vec![1.0])])];
        for category in Category::ALL {
            assert!(build_datasets(&entries, category).is_empty());
        }
    }
}
