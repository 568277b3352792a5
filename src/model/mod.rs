//! Aggregation model: the time-series store plus chart-type resolution.

pub mod chart;
pub mod series;
pub mod store;

pub use chart::{ChartAssignment, ChartType, ChartTypeSpec, render_set, resolve};
pub use series::{Observation, Series};
pub use store::{TimeSeriesStore, TitleEntry};
