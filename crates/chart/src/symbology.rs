use serde::Serialize;

/// Series stroke colours, assigned by position.
pub const PALETTE: [&str; 8] = [
    "rgb(255, 99, 132)",
    "rgb(53, 162, 235)",
    "rgb(75, 192, 192)",
    "rgb(255, 159, 64)",
    "rgb(153, 102, 255)",
    "rgb(255, 205, 86)",
    "rgb(201, 203, 207)",
    "rgb(54, 162, 235)",
];

/// Fill alpha applied to the stroke colour.
pub const FILL_ALPHA: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesColor {
    pub border_color: String,
    pub background_color: String,
}

/// Colour for the series at `index`, wrapping around the palette.
pub fn color_for(index: usize) -> SeriesColor {
    let border = PALETTE[index % PALETTE.len()];
    SeriesColor {
        border_color: border.to_string(),
        background_color: with_alpha(border, FILL_ALPHA),
    }
}

/// `rgb(r, g, b)` -> `rgba(r, g, b, a)`. Other strings are returned unchanged.
fn with_alpha(rgb: &str, alpha: f32) -> String {
    match rgb
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(channels) => format!("rgba({channels}, {alpha})"),
        None => rgb.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{PALETTE, color_for};

    #[test]
    fn background_is_translucent_border() {
        let c = color_for(0);
        assert_eq!(c.border_color, "rgb(255, 99, 132)");
        assert_eq!(c.background_color, "rgba(255, 99, 132, 0.5)");
    }

    #[test]
    fn index_wraps_modulo_palette() {
        assert_eq!(color_for(PALETTE.len() + 1), color_for(1));
    }
}
