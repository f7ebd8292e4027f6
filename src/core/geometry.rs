use serde::{Deserialize, Serialize};

use crate::core::color::Color;
use crate::error::{ChartError, ChartResult};

/// One labelled number shown in a tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaField {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

/// Data a hoverable item summarises: its values and the category it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub category_label: String,
    pub category: String,
    pub fields: Vec<MetaField>,
}

impl ItemMeta {
    #[must_use]
    pub fn new(category_label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            category_label: category_label.into(),
            category: category.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, label: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        self.fields.push(MetaField {
            label: label.into(),
            value,
            unit: unit.into(),
        });
        self
    }

    /// Primary value (first field).
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.fields.first().map(|field| field.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathVertex {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal axis under the plot; tick `pos` is an x coordinate.
    Bottom,
    /// Vertical axis left of the plot; tick `pos` is a y coordinate.
    Left,
}

/// Renderer-agnostic drawable primitive in plot-space pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GeometryItem {
    Point {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        meta: ItemMeta,
    },
    PathSegment {
        series: String,
        points: Vec<PathVertex>,
        color: Color,
        stroke_width: f64,
    },
    Rect {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        color: Color,
        meta: ItemMeta,
    },
    AxisTick {
        axis: Axis,
        pos: f64,
        label: String,
    },
    /// Text anchored at its top-left corner. Hidden labels are still emitted;
    /// the renderer decides whether to skip them.
    Label {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        visible: bool,
    },
}

impl GeometryItem {
    #[must_use]
    pub fn meta(&self) -> Option<&ItemMeta> {
        match self {
            Self::Point { meta, .. } | Self::Rect { meta, .. } => Some(meta),
            Self::PathSegment { .. } | Self::AxisTick { .. } | Self::Label { .. } => None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Point {
                x,
                y,
                radius,
                color,
                ..
            } => {
                if !all_finite(&[*x, *y]) {
                    return Err(ChartError::InvalidData(
                        "point coordinates must be finite".to_owned(),
                    ));
                }
                if !radius.is_finite() || *radius <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "point radius must be finite and > 0".to_owned(),
                    ));
                }
                color.validate()
            }
            Self::PathSegment {
                points,
                color,
                stroke_width,
                ..
            } => {
                if points.iter().any(|vertex| !all_finite(&[vertex.x, vertex.y])) {
                    return Err(ChartError::InvalidData(
                        "path vertices must be finite".to_owned(),
                    ));
                }
                if !stroke_width.is_finite() || *stroke_width <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "path stroke width must be finite and > 0".to_owned(),
                    ));
                }
                color.validate()
            }
            Self::Rect {
                x0,
                y0,
                x1,
                y1,
                color,
                ..
            } => {
                if !all_finite(&[*x0, *y0, *x1, *y1]) || x1 < x0 || y1 < y0 {
                    return Err(ChartError::InvalidData(
                        "rect corners must be finite and ordered".to_owned(),
                    ));
                }
                color.validate()
            }
            Self::AxisTick { pos, .. } => {
                if pos.is_finite() {
                    Ok(())
                } else {
                    Err(ChartError::InvalidData(
                        "axis tick position must be finite".to_owned(),
                    ))
                }
            }
            Self::Label {
                x, y, font_size, ..
            } => {
                if !all_finite(&[*x, *y]) || !font_size.is_finite() || *font_size < 0.0 {
                    return Err(ChartError::InvalidData(
                        "label position and font size must be finite".to_owned(),
                    ));
                }
                Ok(())
            }
        }
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|value| value.is_finite())
}

/// Legend swatch for one series or category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}
