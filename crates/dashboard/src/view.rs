use chart::{ChartData, ChartOptions};
use serde::Serialize;

/// Shown instead of an empty chart when no region is selected.
pub const PLACEHOLDER_MESSAGE: &str = "都道府県を選択してください";

/// What the rendering layer should draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartView {
    Placeholder { message: &'static str },
    Chart { options: ChartOptions, data: ChartData },
}

impl ChartView {
    pub fn placeholder() -> Self {
        ChartView::Placeholder {
            message: PLACEHOLDER_MESSAGE,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartView::Placeholder { .. })
    }

    pub fn data(&self) -> Option<&ChartData> {
        match self {
            ChartView::Chart { data, .. } => Some(data),
            ChartView::Placeholder { .. } => None,
        }
    }
}
