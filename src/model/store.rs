//! Time-series store: title -> label -> append-only series.
//!
//! Both levels are insertion ordered. Chart-type tokens are matched to labels
//! by position, so label order must be exactly first-append order.

use crate::model::chart::ChartTypeSpec;
use crate::model::series::{Observation, Series};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct TitleEntry {
    name: String,
    ordinal: usize,
    chart_types: Option<ChartTypeSpec>,
    labels: IndexMap<String, Series>,
}

impl TitleEntry {
    fn new(name: &str, ordinal: usize) -> Self {
        Self {
            name: name.to_string(),
            ordinal,
            chart_types: None,
            labels: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 0-based, assigned when the title is first seen.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn chart_types(&self) -> Option<&ChartTypeSpec> {
        self.chart_types.as_ref()
    }

    /// Labels with their series, in first-seen order.
    pub fn series(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.labels.iter().map(|(l, s)| (l.as_str(), s))
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimeSeriesStore {
    titles: IndexMap<String, TitleEntry>,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `title` if unseen. Returns its ordinal and whether it was
    /// created by this call.
    pub fn register_title(&mut self, title: &str) -> (usize, bool) {
        if let Some(entry) = self.titles.get(title) {
            return (entry.ordinal, false);
        }
        let ordinal = self.titles.len();
        self.titles
            .insert(title.to_string(), TitleEntry::new(title, ordinal));
        (ordinal, true)
    }

    /// Append one observation. Registers the title if needed.
    /// Returns true when this created the label's series.
    pub fn append_observation(&mut self, title: &str, label: &str, value: Observation) -> bool {
        self.register_title(title);
        let Some(entry) = self.titles.get_mut(title) else {
            return false;
        };

        let created = !entry.labels.contains_key(label);
        entry
            .labels
            .entry(label.to_string())
            .or_default()
            .push(value);
        created
    }

    /// Store `spec` for `title` unless one is already recorded.
    /// Returns false when the title is unknown or already has a spec.
    pub fn record_chart_types(&mut self, title: &str, spec: ChartTypeSpec) -> bool {
        match self.titles.get_mut(title) {
            Some(entry) if entry.chart_types.is_none() => {
                entry.chart_types = Some(spec);
                true
            }
            _ => false,
        }
    }

    pub fn chart_types(&self, title: &str) -> Option<&ChartTypeSpec> {
        self.titles.get(title).and_then(|t| t.chart_types.as_ref())
    }

    /// Labels of `title` in first-append order; empty for unknown titles.
    pub fn labels_in_order(&self, title: &str) -> Vec<&str> {
        self.titles
            .get(title)
            .map(|t| t.labels.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn series_for(&self, title: &str, label: &str) -> Option<&Series> {
        self.titles.get(title).and_then(|t| t.labels.get(label))
    }

    pub fn title(&self, title: &str) -> Option<&TitleEntry> {
        self.titles.get(title)
    }

    /// Titles in ordinal order.
    pub fn titles(&self) -> impl Iterator<Item = &TitleEntry> {
        self.titles.values()
    }

    pub fn title_count(&self) -> usize {
        self.titles.len()
    }

    pub fn series_count(&self) -> usize {
        self.titles.values().map(TitleEntry::label_count).sum()
    }
}
