//! indicator-charts: renderer-agnostic chart pipeline for economic and tech
//! indicator records.
//!
//! Records flow through filtering and aggregation, get mapped by continuous or
//! ordinal scales (or tiled by the squarified treemap), and come out as a
//! plain `ChartScene` of geometry items that any `Renderer` can draw. Tooltip
//! state is computed by hit-testing pointer positions against that geometry.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, Dashboard, IndicatorLineChart, ScatterChart, SectorTreemap};
pub use error::{ChartError, ChartResult};
