use serde::{Deserialize, Serialize};

/// The four demographic breakdowns the upstream API reports per region.
///
/// Series carrying any other label are ignored by the chart projection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "総人口")]
    Total,
    #[serde(rename = "年少人口")]
    Youth,
    #[serde(rename = "生産年齢人口")]
    WorkingAge,
    #[serde(rename = "老年人口")]
    Elderly,
}

impl Category {
    /// Selector order.
    pub const ALL: [Category; 4] = [
        Category::Total,
        Category::Youth,
        Category::WorkingAge,
        Category::Elderly,
    ];

    /// Label as it appears in upstream series data.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Total => "総人口",
            Category::Youth => "年少人口",
            Category::WorkingAge => "生産年齢人口",
            Category::Elderly => "老年人口",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown population category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s.trim()).ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn labels_round_trip_through_from_str() {
        for c in Category::ALL {
            assert_eq!(c.label().parse::<Category>(), Ok(c));
        }
        assert!("人口".parse::<Category>().is_err());
    }

    #[test]
    fn default_is_total_population() {
        assert_eq!(Category::default(), Category::Total);
        assert_eq!(Category::default().to_string(), "総人口");
    }

    #[test]
    fn selector_order_is_fixed() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["総人口", "年少人口", "生産年齢人口", "老年人口"]);
    }
}
