//! Render boundary: turn resolved assignments into chart views.

use crate::log::IngestStats;
use crate::model::{ChartAssignment, ChartType, Series, render_set};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub x_label: String,
    pub charts: Vec<ChartView>,
    pub totals: TotalsView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    /// 1-based, in render order.
    pub figure: usize,
    pub title: String,
    pub label: String,
    /// Caption drawn above the chart.
    pub heading: String,
    pub chart_type: ChartType,
    pub observations: usize,
    #[serde(flatten)]
    pub data: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    /// One y value per occurrence index; categorical observations are gaps.
    /// `y_min..y_max` spans every finite point and the zero baseline.
    Points {
        points: Vec<Option<f64>>,
        y_min: f64,
        y_max: f64,
    },
    /// Count of each distinct value, in first-seen order.
    Slices { slices: Vec<PieSlice> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TotalsView {
    pub titles: usize,
    pub series: usize,
    pub charts: usize,
    pub omitted: usize,
    /// Series whose chart type the renderer does not draw.
    pub unsupported: usize,
    pub lines: usize,
    pub accepted_lines: usize,
    pub dropped_lines: usize,
    pub observations: usize,
}

impl TotalsView {
    /// Why a report has nothing to draw.
    pub fn no_charts_message(&self, source: &str) -> String {
        if self.series == 0 {
            format!("No graphable lines in {}", source)
        } else {
            format!(
                "No charts to draw from {} ({} omitted, {} unsupported)",
                source, self.omitted, self.unsupported
            )
        }
    }
}

impl ChartView {
    /// One-line preview, e.g. `Figure 1: Sys / Idle (Line, 2 observations)`.
    pub fn summary(&self) -> String {
        format!(
            "Figure {}: {} / {} ({}, {} observation{})",
            self.figure,
            self.title,
            self.label,
            self.chart_type,
            self.observations,
            if self.observations == 1 { "" } else { "s" }
        )
    }
}

/// Build report data from resolved assignments.
///
/// `Omit` assignments are skipped. Unrecognized chart types are logged and
/// skipped; they do not consume a figure number.
pub fn build_report(
    assignments: &[ChartAssignment<'_>],
    stats: &IngestStats,
    x_label: &str,
) -> ReportData {
    let mut charts = Vec::new();
    let mut unsupported = 0usize;
    let mut titles: Vec<&str> = Vec::new();

    for a in assignments {
        if !titles.contains(&a.title) {
            titles.push(a.title);
        }
        if a.is_omitted() {
            tracing::info!(title = a.title, label = a.label, "skipping plot for label");
        }
    }

    let mut rendered = 0usize;
    for a in render_set(assignments) {
        rendered += 1;

        let data = match &a.chart_type {
            ChartType::Pie => ChartData::Slices {
                slices: frequencies(a.series),
            },
            ChartType::Line | ChartType::Bar | ChartType::Scatter | ChartType::Stairs => {
                points(a.series)
            }
            other => {
                tracing::warn!(
                    title = a.title,
                    label = a.label,
                    chart_type = %other,
                    "unrecognized chart type; no chart drawn"
                );
                unsupported += 1;
                continue;
            }
        };

        let figure = charts.len() + 1;
        tracing::info!(figure, chart_type = %a.chart_type, label = a.label, "creating plot");

        let heading = if a.chart_type.is_categorical() {
            format!("{} ({})", a.title, a.label)
        } else {
            a.title.to_string()
        };

        charts.push(ChartView {
            figure,
            title: a.title.to_string(),
            label: a.label.to_string(),
            heading,
            chart_type: a.chart_type.clone(),
            observations: a.series.values().len(),
            data,
        });
    }

    ReportData {
        x_label: x_label.to_string(),
        totals: TotalsView {
            titles: titles.len(),
            series: assignments.len(),
            charts: charts.len(),
            omitted: assignments.len() - rendered,
            unsupported,
            lines: stats.lines,
            accepted_lines: stats.accepted,
            dropped_lines: stats.dropped(),
            observations: stats.observations,
        },
        charts,
    }
}

/// Numeric view of a series with its y range, so the page never has to scan
/// the points to scale an axis.
fn points(series: &Series) -> ChartData {
    let points: Vec<Option<f64>> = series.values().iter().map(|v| v.as_f64()).collect();

    let (y_min, mut y_max) = points
        .iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if y_min == y_max {
        y_max = y_min + 1.0;
    }

    ChartData::Points {
        points,
        y_min,
        y_max,
    }
}

/// Count each distinct value, keyed by its display form.
fn frequencies(series: &Series) -> Vec<PieSlice> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for v in series.values() {
        *counts.entry(v.to_string()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| PieSlice { value, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogParser;
    use crate::model::resolve;
    use pretty_assertions::assert_eq;

    fn build(lines: &[&str]) -> ReportData {
        let mut parser = LogParser::new().unwrap();
        for line in lines {
            parser.ingest_line(line);
        }
        let assignments = resolve(parser.store());
        build_report(&assignments, parser.stats(), "Occurrence")
    }

    #[test]
    fn pie_counts_distinct_values_in_first_seen_order() {
        let report = build(&[
            "<OS> <State:Running> <Pie>",
            "<OS> <State:Idle>",
            "<OS> <State:Running>",
        ]);
        let chart = &report.charts[0];
        assert_eq!(chart.heading, "OS (State)");
        assert_eq!(
            chart.data,
            ChartData::Slices {
                slices: vec![
                    PieSlice { value: "Running".into(), count: 2 },
                    PieSlice { value: "Idle".into(), count: 1 },
                ]
            }
        );
    }

    #[test]
    fn pie_groups_equal_numbers() {
        let report = build(&["<T> <a:1> <Pie>", "<T> <a:1.0>", "<T> <a:2>"]);
        assert_eq!(
            report.charts[0].data,
            ChartData::Slices {
                slices: vec![
                    PieSlice { value: "1".into(), count: 2 },
                    PieSlice { value: "2".into(), count: 1 },
                ]
            }
        );
    }

    #[test]
    fn numeric_charts_leave_gaps_for_categorical_values() {
        let report = build(&["<T> <a:1> <Bar>", "<T> <a:n/a>", "<T> <a:3>"]);
        assert_eq!(
            report.charts[0].data,
            ChartData::Points {
                points: vec![Some(1.0), None, Some(3.0)],
                y_min: 0.0,
                y_max: 3.0,
            }
        );
        assert_eq!(report.charts[0].heading, "T");
    }

    #[test]
    fn y_range_covers_negatives_and_skips_non_finite() {
        let report = build(&["<T> <a:-4>", "<T> <a:inf>", "<T> <a:2.5>", "<T> <a:NaN>"]);
        let ChartData::Points { y_min, y_max, .. } = report.charts[0].data else {
            panic!("expected points");
        };
        assert_eq!((y_min, y_max), (-4.0, 2.5));
    }

    #[test]
    fn flat_or_empty_series_gets_a_unit_range() {
        let report = build(&["<T> <a:0, b:idle>"]);
        for chart in &report.charts {
            let ChartData::Points { y_min, y_max, .. } = chart.data else {
                panic!("expected points");
            };
            assert_eq!((y_min, y_max), (0.0, 1.0));
        }
    }

    #[test]
    fn long_series_range_is_computed_up_front() {
        let mut parser = LogParser::new().unwrap();
        for i in 0..200_000 {
            parser.ingest_line(&format!("<Sys> <Idle:{}>", i % 100));
        }
        parser.ingest_line("<Net> <rx:1>");
        let assignments = resolve(parser.store());
        let report = build_report(&assignments, parser.stats(), "Occurrence");

        assert_eq!(report.charts.len(), 2);
        assert_eq!(report.charts[0].observations, 200_000);
        let ChartData::Points { y_min, y_max, .. } = report.charts[0].data else {
            panic!("expected points");
        };
        assert_eq!((y_min, y_max), (0.0, 99.0));
    }

    #[test]
    fn blank_chart_type_group_is_unsupported() {
        let report = build(&["<T> <a:1> < >"]);
        assert!(report.charts.is_empty());
        assert_eq!(report.totals.unsupported, 1);
        assert_eq!(report.totals.omitted, 0);
        assert_eq!(report.totals.series, 1);
    }

    #[test]
    fn omit_and_unknown_types_are_not_drawn() {
        let report = build(&["<T> <a:1, b:2, c:3> <Omit, Donut>", "plain line"]);
        let figures: Vec<(usize, &str)> = report
            .charts
            .iter()
            .map(|c| (c.figure, c.label.as_str()))
            .collect();
        assert_eq!(figures, vec![(1, "c")]);
        assert_eq!(report.totals.series, 3);
        assert_eq!(report.totals.omitted, 1);
        assert_eq!(report.totals.unsupported, 1);
        assert_eq!(report.totals.titles, 1);
        assert_eq!(report.totals.lines, 2);
        assert_eq!(report.totals.dropped_lines, 1);
    }

    #[test]
    fn empty_report_says_why() {
        let plain = build(&["boot ok", "StorageNotGraphed <Storage:1>"]);
        assert_eq!(
            plain.totals.no_charts_message("app.log"),
            "No graphable lines in app.log"
        );

        let hidden = build(&["<T> <a:1, b:2> <Omit, Donut>"]);
        assert!(hidden.charts.is_empty());
        assert_eq!(
            hidden.totals.no_charts_message("app.log"),
            "No charts to draw from app.log (1 omitted, 1 unsupported)"
        );
    }

    #[test]
    fn summary_pluralizes_observations() {
        let report = build(&["<T> <a:1, b:1>", "<T> <b:2>"]);
        let lines: Vec<String> = report.charts.iter().map(ChartView::summary).collect();
        assert_eq!(
            lines,
            vec![
                "Figure 1: T / a (Line, 1 observation)",
                "Figure 2: T / b (Line, 2 observations)",
            ]
        );
    }

    #[test]
    fn figures_number_across_titles() {
        let report = build(&["<A> <x:1>", "<B> <y:2, z:3> <Scatter, Stairs>"]);
        let figures: Vec<String> = report.charts.iter().map(ChartView::summary).collect();
        assert_eq!(
            figures,
            vec![
                "Figure 1: A / x (Line, 1 observation)",
                "Figure 2: B / y (Scatter, 1 observation)",
                "Figure 3: B / z (Stairs, 1 observation)",
            ]
        );
    }

    #[test]
    fn serializes_kind_tag_and_chart_type() {
        let report = build(&["<Sys> <Idle:100>"]);
        let json = serde_json::to_value(&report.charts[0]).unwrap();
        assert_eq!(json["kind"], "points");
        assert_eq!(json["chart_type"], "Line");
        assert_eq!(json["points"][0], 100.0);
    }
}
