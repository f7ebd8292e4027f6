use serde::{Deserialize, Serialize};

use crate::core::hierarchy::TreemapConfig;
use crate::core::types::{DEFAULT_MARGIN, Margin, PlotBounds, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipConfig;

/// Largest accepted `x_tick_count` / `y_tick_count`.
pub const MAX_TICK_COUNT: usize = 100;

/// Per-chart render configuration supplied by the host.
///
/// Serializable so hosts can load chart setup from their own config files;
/// every field except the viewport has a documented default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    #[serde(default = "default_margin")]
    pub margin: Margin,
    #[serde(default = "default_tick_count")]
    pub x_tick_count: usize,
    #[serde(default = "default_tick_count")]
    pub y_tick_count: usize,
    #[serde(default)]
    pub tooltip: TooltipConfig,
    #[serde(default)]
    pub treemap: TreemapConfig,
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin: default_margin(),
            x_tick_count: default_tick_count(),
            y_tick_count: default_tick_count(),
            tooltip: TooltipConfig::default(),
            treemap: TreemapConfig::default(),
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_tick_counts(mut self, x_tick_count: usize, y_tick_count: usize) -> Self {
        self.x_tick_count = x_tick_count;
        self.y_tick_count = y_tick_count;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    #[must_use]
    pub fn with_treemap(mut self, treemap: TreemapConfig) -> Self {
        self.treemap = treemap;
        self
    }

    /// Plot area left after margins; degenerate while the viewport is unmeasured.
    #[must_use]
    pub fn bounds(&self) -> PlotBounds {
        PlotBounds::from_viewport(self.viewport, self.margin)
    }

    /// Rejects configuration that cannot describe any layout.
    ///
    /// A zero viewport is accepted: hosts report it transiently before mount.
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.margin.top, "margin.top"),
            (self.margin.right, "margin.right"),
            (self.margin.bottom, "margin.bottom"),
            (self.margin.left, "margin.left"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "chart config `{name}` must be finite and >= 0"
                )));
            }
        }
        for (count, name) in [
            (self.x_tick_count, "x_tick_count"),
            (self.y_tick_count, "y_tick_count"),
        ] {
            if count > MAX_TICK_COUNT {
                return Err(ChartError::InvalidData(format!(
                    "chart config `{name}` must be <= {MAX_TICK_COUNT}, got {count}"
                )));
            }
        }
        if !self.tooltip.offset_x.is_finite() || !self.tooltip.offset_y.is_finite() {
            return Err(ChartError::InvalidData(
                "tooltip offset must be finite".to_owned(),
            ));
        }
        if !self.treemap.padding.is_finite() || self.treemap.padding < 0.0 {
            return Err(ChartError::InvalidData(
                "treemap padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()
    }
}

fn default_margin() -> Margin {
    DEFAULT_MARGIN
}

fn default_tick_count() -> usize {
    10
}
