//! Chart-type tokens and their positional resolution against a title's labels.

use crate::model::series::Series;
use crate::model::store::TimeSeriesStore;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Scatter,
    Pie,
    Stairs,
    Omit,
    /// Unrecognized token, forwarded as written.
    Other(String),
}

impl ChartType {
    pub fn from_token(token: &str) -> Self {
        match token {
            "Line" => ChartType::Line,
            "Bar" => ChartType::Bar,
            "Scatter" => ChartType::Scatter,
            "Pie" => ChartType::Pie,
            "Stairs" => ChartType::Stairs,
            "Omit" => ChartType::Omit,
            other => ChartType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChartType::Line => "Line",
            ChartType::Bar => "Bar",
            ChartType::Scatter => "Scatter",
            ChartType::Pie => "Pie",
            ChartType::Stairs => "Stairs",
            ChartType::Omit => "Omit",
            ChartType::Other(s) => s,
        }
    }

    /// Pie charts read a series as value frequencies rather than a sequence.
    pub fn is_categorical(&self) -> bool {
        matches!(self, ChartType::Pie)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChartType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ordered chart-type tokens captured for a title, e.g. from `<Pie, Bar, Omit>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartTypeSpec(Vec<String>);

impl ChartTypeSpec {
    /// Split a chart-type group on `,`, trimming every token.
    pub fn parse(group: &str) -> Self {
        Self(group.split(',').map(|t| t.trim().to_string()).collect())
    }

    pub fn get(&self, position: usize) -> Option<ChartType> {
        self.0.get(position).map(|t| ChartType::from_token(t))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Resolved chart type for one (title, label), borrowing its series.
#[derive(Debug, Clone)]
pub struct ChartAssignment<'a> {
    pub title: &'a str,
    pub label: &'a str,
    pub chart_type: ChartType,
    pub series: &'a Series,
}

impl ChartAssignment<'_> {
    pub fn is_omitted(&self) -> bool {
        self.chart_type == ChartType::Omit
    }
}

/// Assign a chart type to every (title, label) in the store.
///
/// Titles are walked in ordinal order and labels in first-seen order. The
/// n-th label of a title takes the n-th token of the title's first captured
/// chart-type spec; labels past the end of the spec (or titles without one)
/// get `Line`. Resolution runs against the final label order, so labels that
/// first appeared after a shorter spec was captured fall back to `Line`.
pub fn resolve(store: &TimeSeriesStore) -> Vec<ChartAssignment<'_>> {
    let mut out = Vec::new();

    for entry in store.titles() {
        let title = entry.name();
        let spec = entry.chart_types();

        for (position, (label, series)) in entry.series().enumerate() {
            let chart_type = spec
                .and_then(|s| s.get(position))
                .unwrap_or_default();

            out.push(ChartAssignment {
                title,
                label,
                chart_type,
                series,
            });
        }
    }

    out
}

/// Assignments that reach the render boundary (everything but `Omit`).
pub fn render_set<'s, 'a>(
    assignments: &'s [ChartAssignment<'a>],
) -> impl Iterator<Item = &'s ChartAssignment<'a>> {
    assignments.iter().filter(|a| !a.is_omitted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::series::Observation;
    use pretty_assertions::assert_eq;

    fn store_with(title: &str, labels: &[&str], spec: Option<&str>) -> TimeSeriesStore {
        let mut store = TimeSeriesStore::new();
        store.register_title(title);
        for l in labels {
            store.append_observation(title, l, Observation::Numeric(1.0));
        }
        if let Some(s) = spec {
            store.record_chart_types(title, ChartTypeSpec::parse(s));
        }
        store
    }

    fn kinds<'a>(assignments: &'a [ChartAssignment<'a>]) -> Vec<(&'a str, String)> {
        assignments
            .iter()
            .map(|a| (a.label, a.chart_type.to_string()))
            .collect()
    }

    #[test]
    fn tokens_align_by_position() {
        let store = store_with("T", &["a", "b", "c"], Some("Bar,Omit"));
        let resolved = resolve(&store);
        assert_eq!(
            kinds(&resolved),
            vec![
                ("a", "Bar".to_string()),
                ("b", "Omit".to_string()),
                ("c", "Line".to_string()),
            ]
        );

        let rendered: Vec<&str> = render_set(&resolved).map(|a| a.label).collect();
        assert_eq!(rendered, vec!["a", "c"]);
    }

    #[test]
    fn defaults_to_line_without_spec() {
        let store = store_with("Sys", &["Idle", "Net"], None);
        let resolved = resolve(&store);
        assert!(resolved.iter().all(|a| a.chart_type == ChartType::Line));
    }

    #[test]
    fn tokens_are_trimmed_and_unknown_pass_through() {
        let store = store_with("T", &["a", "b", "c"], Some(" Pie ,  Stairs,Donut "));
        let resolved = resolve(&store);
        assert_eq!(resolved[0].chart_type, ChartType::Pie);
        assert_eq!(resolved[1].chart_type, ChartType::Stairs);
        assert_eq!(resolved[2].chart_type, ChartType::Other("Donut".to_string()));
    }

    #[test]
    fn walks_titles_in_ordinal_order() {
        let mut store = TimeSeriesStore::new();
        store.append_observation("Zeta", "z", Observation::Numeric(1.0));
        store.append_observation("Alpha", "a", Observation::Numeric(1.0));
        let titles: Vec<&str> = resolve(&store).iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn chart_type_round_trips_through_token() {
        for t in ["Line", "Bar", "Scatter", "Pie", "Stairs", "Omit", "Histogram"] {
            assert_eq!(ChartType::from_token(t).as_str(), t);
        }
        assert!(ChartType::Pie.is_categorical());
        assert!(!ChartType::Bar.is_categorical());
    }
}
