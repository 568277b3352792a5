//! Render boundary: chart views built from resolved assignments, and the
//! HTML export document.

pub mod html;
pub mod view;

pub use html::render_html_report;
pub use view::{ChartData, ChartView, PieSlice, ReportData, TotalsView, build_report};
