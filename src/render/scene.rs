use serde::{Deserialize, Serialize};

use crate::core::geometry::{GeometryItem, LegendEntry};
use crate::core::types::{Margin, PlotBounds, Viewport};
use crate::error::{ChartError, ChartResult};

pub const SCENE_JSON_SCHEMA_V1: u32 = 1;

/// Backend-agnostic output of one chart render.
///
/// `items` live in plot space; renderers translate them by `origin()` to
/// place the plot inside the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub viewport: Viewport,
    pub margin: Margin,
    pub bounds: PlotBounds,
    pub items: Vec<GeometryItem>,
    pub legend: Vec<LegendEntry>,
}

impl ChartScene {
    #[must_use]
    pub fn new(viewport: Viewport, margin: Margin) -> Self {
        Self {
            viewport,
            margin,
            bounds: PlotBounds::from_viewport(viewport, margin),
            items: Vec::new(),
            legend: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<GeometryItem>) -> Self {
        self.items.extend(items);
        self
    }

    #[must_use]
    pub fn with_legend_entry(mut self, entry: LegendEntry) -> Self {
        self.legend.push(entry);
        self
    }

    /// Offset of the plot area inside the viewport.
    #[must_use]
    pub fn origin(&self) -> (f64, f64) {
        (self.margin.left, self.margin.top)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() && !self.items.is_empty() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for item in &self.items {
            item.validate()?;
        }
        for entry in &self.legend {
            entry.color.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSceneJsonContractV1 {
    pub schema_version: u32,
    pub scene: ChartScene,
}

impl ChartScene {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSceneJsonContractV1 {
            schema_version: SCENE_JSON_SCHEMA_V1,
            scene: self.clone(),
        };
        Ok(serde_json::to_string_pretty(&payload)?)
    }

    /// Accepts either a bare scene or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(scene) = serde_json::from_str::<ChartScene>(input) {
            return Ok(scene);
        }
        let payload: ChartSceneJsonContractV1 = serde_json::from_str(input)?;
        if payload.schema_version != SCENE_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported scene schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.scene)
    }
}
