use foundation::Category;
use serde::Serialize;

pub const Y_AXIS_TITLE: &str = "人口数";
pub const X_AXIS_TITLE: &str = "年";

/// Presentation settings handed to the rendering layer with the chart data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: String,
    pub responsive: bool,
    /// Fill the container instead of keeping a fixed aspect ratio.
    pub maintain_aspect_ratio: bool,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub legend_position: LegendPosition,
    /// Tooltip shows every series at the hovered x index.
    pub tooltip_by_index: bool,
    pub max_label_rotation: u16,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
}

impl ChartOptions {
    pub fn for_category(category: Category) -> Self {
        Self {
            title: format!("都道府県別人口構成 - {category}"),
            responsive: true,
            maintain_aspect_ratio: false,
            x_axis_title: X_AXIS_TITLE,
            y_axis_title: Y_AXIS_TITLE,
            legend_position: LegendPosition::Top,
            tooltip_by_index: true,
            max_label_rotation: 45,
        }
    }
}
