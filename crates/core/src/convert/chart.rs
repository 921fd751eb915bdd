use crate::options::Context;
use crate::raw::{RawChart, RawChartData, RawChartSeries};
use crate::types::{new_id, ChartData, ChartElement, ChartOptions, ChartType};

/// Map a vendor chart type to the editor chart type.
///
/// Bar charts laid out horizontally (`barDir == "bar"`) become columns.
/// Unknown types fall back to [`ChartType::Bar`].
pub fn chart_type_for(vendor_type: &str, bar_dir: Option<&str>) -> ChartType {
    match vendor_type {
        "barChart" | "bar3DChart" if bar_dir == Some("bar") => ChartType::Column,
        "barChart" | "bar3DChart" => ChartType::Bar,
        "lineChart" | "line3DChart" => ChartType::Line,
        "areaChart" | "area3DChart" => ChartType::Area,
        "scatterChart" | "bubbleChart" => ChartType::Scatter,
        "pieChart" | "pie3DChart" => ChartType::Pie,
        "radarChart" => ChartType::Radar,
        "doughnutChart" => ChartType::Ring,
        other => {
            log::debug!("Unknown chart type '{}', using bar", other);
            ChartType::Bar
        }
    }
}

fn is_coordinate_chart(vendor_type: &str) -> bool {
    matches!(vendor_type, "scatterChart" | "bubbleChart")
}

/// Convert a chart, reshaping its data for the chart kind.
pub fn convert_chart(el: &RawChart, ctx: &Context<'_>) -> ChartElement {
    let frame = ctx.ratio.frame(&el.frame);

    let data = match (&el.data, is_coordinate_chart(&el.chart_type)) {
        (RawChartData::Matrix(matrix), true) => coordinate_data(matrix),
        (RawChartData::Series(series), false) => category_data(series),
        _ => {
            log::debug!(
                "Chart data does not match chart type '{}'; leaving it empty",
                el.chart_type
            );
            ChartData::default()
        }
    };

    let stack = matches!(el.grouping.as_deref(), Some("stacked" | "percentStacked"));

    ChartElement {
        id: new_id(),
        left: frame.left,
        top: frame.top,
        width: frame.width,
        height: frame.height,
        rotate: el.frame.rotate,
        chart_type: chart_type_for(&el.chart_type, el.bar_dir.as_deref()),
        data,
        options: ChartOptions {
            stack: stack.then_some(true),
        },
        theme_colors: if el.colors.is_empty() {
            ctx.theme.theme_colors.clone()
        } else {
            el.colors.clone()
        },
        text_color: ctx.theme.font_color.clone(),
    }
}

/// Scatter data: one label per point, the `[xs, ys]` matrix as series.
fn coordinate_data(matrix: &[Vec<f64>]) -> ChartData {
    let points = matrix.first().map(Vec::len).unwrap_or(0);
    ChartData {
        labels: (1..=points).map(|i| format!("Coordinate {}", i)).collect(),
        legends: vec!["X".to_string(), "Y".to_string()],
        series: matrix.to_vec(),
    }
}

fn category_data(series: &[RawChartSeries]) -> ChartData {
    let labels = series
        .first()
        .map(|first| {
            let mut entries: Vec<(&String, &String)> = first.xlabels.iter().collect();
            entries.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            });
            entries.into_iter().map(|(_, label)| label.clone()).collect()
        })
        .unwrap_or_default();

    ChartData {
        labels,
        legends: series.iter().map(|s| s.key.clone()).collect(),
        series: series
            .iter()
            .map(|s| s.values.iter().map(|v| v.y).collect())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ScaleRatio, Theme};
    use crate::raw::RawChartPoint;
    use crate::shapes::ShapeLibrary;
    use std::collections::HashMap;

    fn convert(el: &RawChart) -> ChartElement {
        let theme = Theme::default();
        let shapes = ShapeLibrary::builtin();
        convert_chart(el, &Context::new(ScaleRatio::new(1.0), &theme, &shapes))
    }

    fn series(key: &str, ys: &[f64], labels: &[(&str, &str)]) -> RawChartSeries {
        RawChartSeries {
            key: key.to_string(),
            values: ys.iter().map(|&y| RawChartPoint { y }).collect(),
            xlabels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_chart_type_mapping_is_total() {
        let table = [
            ("barChart", None, ChartType::Bar),
            ("bar3DChart", Some("col"), ChartType::Bar),
            ("barChart", Some("bar"), ChartType::Column),
            ("lineChart", None, ChartType::Line),
            ("line3DChart", None, ChartType::Line),
            ("areaChart", None, ChartType::Area),
            ("area3DChart", None, ChartType::Area),
            ("scatterChart", None, ChartType::Scatter),
            ("bubbleChart", None, ChartType::Scatter),
            ("pieChart", None, ChartType::Pie),
            ("pie3DChart", None, ChartType::Pie),
            ("radarChart", None, ChartType::Radar),
            ("doughnutChart", None, ChartType::Ring),
            ("surfaceChart", None, ChartType::Bar),
            ("", None, ChartType::Bar),
        ];
        for (vendor, dir, expected) in table {
            assert_eq!(chart_type_for(vendor, dir), expected, "{}", vendor);
        }
    }

    #[test]
    fn test_category_chart() {
        let el = RawChart {
            chart_type: "lineChart".to_string(),
            data: RawChartData::Series(vec![
                series("Sales", &[1.0, 2.0, 3.0], &[("10", "Q11"), ("2", "Q3"), ("0", "Q1")]),
                series("Costs", &[4.0, 5.0, 6.0], &[]),
            ]),
            grouping: Some("percentStacked".to_string()),
            ..Default::default()
        };

        let chart = convert(&el);
        assert_eq!(chart.chart_type, ChartType::Line);
        assert_eq!(chart.data.labels, vec!["Q1", "Q3", "Q11"]);
        assert_eq!(chart.data.legends, vec!["Sales", "Costs"]);
        assert_eq!(chart.data.series, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(chart.options.stack, Some(true));
        assert_eq!(chart.theme_colors, Theme::default().theme_colors);
    }

    #[test]
    fn test_scatter_chart() {
        let el = RawChart {
            chart_type: "scatterChart".to_string(),
            data: RawChartData::Matrix(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]),
            colors: vec!["#111".to_string()],
            ..Default::default()
        };

        let chart = convert(&el);
        assert_eq!(chart.chart_type, ChartType::Scatter);
        assert_eq!(
            chart.data.labels,
            vec!["Coordinate 1", "Coordinate 2", "Coordinate 3"]
        );
        assert_eq!(chart.data.legends, vec!["X", "Y"]);
        assert_eq!(chart.data.series[1], vec![4.0, 5.0, 6.0]);
        assert_eq!(chart.options.stack, None);
        assert_eq!(chart.theme_colors, vec!["#111"]);
    }

    #[test]
    fn test_mismatched_data_is_empty() {
        let el = RawChart {
            chart_type: "pieChart".to_string(),
            data: RawChartData::Matrix(vec![vec![1.0]]),
            ..Default::default()
        };
        assert_eq!(convert(&el).data, ChartData::default());
    }
}
