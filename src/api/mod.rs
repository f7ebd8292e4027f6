//! Host-facing surface: chart definitions, per-chart config and the dashboard
//! that wires filtering, rendering and tooltips together.

mod charts;
mod config;
mod dashboard;

pub use charts::{Chart, Indicator, IndicatorLineChart, ScatterChart, SectorTreemap};
pub use config::{ChartConfig, MAX_TICK_COUNT};
pub use dashboard::Dashboard;
