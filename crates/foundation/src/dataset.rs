use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::region::ApiResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub year: i32,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl TimeSeriesPoint {
    pub fn new(year: i32, value: f64) -> Self {
        Self {
            year,
            value,
            rate: None,
        }
    }
}

/// One labelled time series inside a region dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub label: String,
    #[serde(rename = "data")]
    pub points: Vec<TimeSeriesPoint>,
}

impl CategorySeries {
    pub fn new(label: impl Into<String>, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// `None` for labels outside the fixed category set.
    pub fn category(&self) -> Option<Category> {
        Category::from_label(&self.label)
    }
}

/// Full per-region payload of the population composition endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDataset {
    #[serde(rename = "boundaryYear")]
    pub boundary_year: i32,
    #[serde(rename = "data")]
    pub series: Vec<CategorySeries>,
}

impl RegionDataset {
    pub fn series_for(&self, category: Category) -> Option<&CategorySeries> {
        self.series.iter().find(|s| s.label == category.label())
    }
}

pub type DatasetResponse = ApiResponse<RegionDataset>;

#[cfg(test)]
mod tests {
    use super::{CategorySeries, DatasetResponse, TimeSeriesPoint};
    use crate::category::Category;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_population_wire_format() {
        let body = r#"{
            "message": null,
            "result": {
                "boundaryYear": 2020,
                "data": [
                    {"label": "総人口", "data": [
                        {"year": 1980, "value": 12817},
                        {"year": 1985, "value": 12707}
                    ]},
                    {"label": "年少人口", "data": [
                        {"year": 1980, "value": 2906, "rate": 22.68},
                        {"year": 1985, "value": 2769, "rate": 21.79}
                    ]}
                ]
            }
        }"#;
        let resp: DatasetResponse = serde_json::from_str(body).unwrap();
        let ds = resp.result;
        assert_eq!(ds.boundary_year, 2020);
        assert_eq!(ds.series.len(), 2);
        assert_eq!(
            ds.series[0].points,
            vec![
                TimeSeriesPoint::new(1980, 12817.0),
                TimeSeriesPoint::new(1985, 12707.0)
            ]
        );
        assert_eq!(ds.series[1].points[0].rate, Some(22.68));
        assert_eq!(
            ds.series_for(Category::Youth).map(|s| s.points.len()),
            Some(2)
        );
        assert!(ds.series_for(Category::Elderly).is_none());
    }

    #[test]
    fn unknown_labels_have_no_category() {
        let s = CategorySeries::new("外国人人口", vec![]);
        assert_eq!(s.category(), None);
        let s = CategorySeries::new("老年人口", vec![]);
        assert_eq!(s.category(), Some(Category::Elderly));
    }

    #[test]
    fn absent_rate_is_not_serialized() {
        let json = serde_json::to_string(&TimeSeriesPoint::new(1990, 5.0)).unwrap();
        assert_eq!(json, r#"{"year":1990,"value":5.0}"#);
    }
}
