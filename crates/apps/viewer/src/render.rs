use std::fmt::Write;

use chart::ChartData;
use dashboard::ChartView;
use foundation::Region;

/// One line per region: `code<TAB>name`.
pub fn region_list(regions: &[Region]) -> String {
    let mut out = String::new();
    for r in regions {
        let _ = writeln!(out, "{}\t{}", r.code, r.name);
    }
    out
}

/// Plain-text rendering of the chart view: one row per year, one column per
/// plotted series.
pub fn table(view: &ChartView) -> String {
    match view {
        ChartView::Placeholder { message } => format!("{message}\n"),
        ChartView::Chart { options, data } => {
            let mut out = String::new();
            let _ = writeln!(out, "{}", options.title);
            out.push_str(&grid(data, options.x_axis_title));
            out
        }
    }
}

fn grid(data: &ChartData, x_title: &str) -> String {
    let mut out = String::new();
    let _ = write!(out, "{x_title}");
    for series in &data.datasets {
        let _ = write!(out, "\t{}", series.display_name);
    }
    out.push('\n');

    for (i, year) in data.labels.iter().enumerate() {
        let _ = write!(out, "{year}");
        for series in &data.datasets {
            match series.values.get(i) {
                Some(v) => {
                    let _ = write!(out, "\t{v}");
                }
                None => out.push_str("\t-"),
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{region_list, table};
    use chart::{ChartData, ChartOptions, PlottedSeries, color_for};
    use dashboard::ChartView;
    use foundation::{Category, Region};
    use pretty_assertions::assert_eq;

    #[test]
    fn placeholder_prints_prompt() {
        assert_eq!(table(&ChartView::placeholder()), "都道府県を選択してください\n");
    }

    #[test]
    fn chart_prints_year_rows() {
        let view = ChartView::Chart {
            options: ChartOptions::for_category(Category::Total),
            data: ChartData {
                labels: vec![1980, 1985],
                datasets: vec![PlottedSeries {
                    display_name: "北海道".into(),
                    values: vec![12817.0],
                    color_index: 0,
                    color: color_for(0),
                }],
            },
        };
        assert_eq!(
            table(&view),
            "都道府県別人口構成 - 総人口\n年\t北海道\n1980\t12817\n1985\t-\n"
        );
    }

    #[test]
    fn lists_regions() {
        let regions = vec![Region::new(1, "北海道"), Region::new(13, "東京都")];
        assert_eq!(region_list(&regions), "1\t北海道\n13\t東京都\n");
    }
}
