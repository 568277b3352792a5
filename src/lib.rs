//! Turn embedded `<Title> <label:value, ...> <ChartType, ...>` log annotations
//! into ordered time series and chart reports.

pub mod log;
pub mod model;
pub mod render;

pub type Result<T> = anyhow::Result<T>;
