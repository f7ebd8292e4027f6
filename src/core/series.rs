use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::aggregate::AggregatedPoint;
use crate::core::color::Color;
use crate::core::geometry::{GeometryItem, ItemMeta, PathVertex};
use crate::core::scale::Scale;
use crate::error::ChartResult;

/// Where a series reads one coordinate from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueSource {
    /// The group key on a numeric axis (years as plain numbers).
    Key,
    /// The group key on a time axis (years as unix seconds).
    KeyTime,
    /// A reduced or projected field of the point.
    Field(String),
}

impl ValueSource {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    #[must_use]
    pub fn resolve(&self, point: &AggregatedPoint) -> Option<f64> {
        match self {
            Self::Key => point.key.numeric_value(),
            Self::KeyTime => point.key.time_value(),
            Self::Field(name) => point.value(name),
        }
    }
}

/// Point fill: one color, or per-category overrides with a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesColor {
    Fixed(Color),
    ByCategory {
        overrides: IndexMap<String, Color>,
        fallback: Color,
    },
}

impl SeriesColor {
    #[must_use]
    pub fn resolve(&self, category: &str) -> Color {
        match self {
            Self::Fixed(color) => *color,
            Self::ByCategory {
                overrides,
                fallback,
            } => overrides.get(category).copied().unwrap_or(*fallback),
        }
    }

    #[must_use]
    pub fn base(&self) -> Color {
        match self {
            Self::Fixed(color) => *color,
            Self::ByCategory { fallback, .. } => *fallback,
        }
    }
}

/// Visual encoding and tooltip wording of one line/scatter series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub name: String,
    pub unit: String,
    pub category_label: String,
    pub color: SeriesColor,
    pub radius: f64,
    pub draw_path: bool,
    pub stroke_width: f64,
    /// Extra fields listed in the tooltip after the y value, as `(field, label, unit)`.
    pub detail_fields: Vec<(String, String, String)>,
}

impl SeriesStyle {
    #[must_use]
    pub fn line(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            unit: String::new(),
            category_label: "Year".to_owned(),
            color: SeriesColor::Fixed(color),
            radius: 4.0,
            draw_path: true,
            stroke_width: 1.5,
            detail_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn scatter(name: impl Into<String>, color: SeriesColor) -> Self {
        Self {
            name: name.into(),
            unit: String::new(),
            category_label: "Country".to_owned(),
            color,
            radius: 5.0,
            draw_path: false,
            stroke_width: 1.5,
            detail_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_detail_field(
        mut self,
        field: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        self.detail_fields
            .push((field.into(), label.into(), unit.into()));
        self
    }
}

/// Projects points through the x/y scales.
///
/// Emits the connecting `PathSegment` first (when `style.draw_path`) so the
/// markers stack on top of it, then one `Point` per input point in input
/// order. Points missing either coordinate are skipped. Line charts must pass
/// points already sorted by x.
pub fn emit_series(
    points: &[AggregatedPoint],
    x: &ValueSource,
    y: &ValueSource,
    x_scale: Scale,
    y_scale: Scale,
    style: &SeriesStyle,
) -> ChartResult<Vec<GeometryItem>> {
    let mut markers = Vec::with_capacity(points.len());
    let mut vertices = Vec::with_capacity(points.len());

    for point in points {
        let (Some(x_value), Some(y_value)) = (x.resolve(point), y.resolve(point)) else {
            trace!(key = %point.key, series = %style.name, "skipping point without coordinates");
            continue;
        };
        let px = x_scale.map(x_value)?;
        let py = y_scale.map(y_value)?;
        let category = point.key.label();

        let mut meta = ItemMeta::new(&style.category_label, &category).with_field(
            &style.name,
            y_value,
            &style.unit,
        );
        for (field, label, unit) in &style.detail_fields {
            if let Some(value) = point.value(field) {
                meta = meta.with_field(label, value, unit);
            }
        }

        markers.push(GeometryItem::Point {
            x: px,
            y: py,
            radius: style.radius,
            color: style.color.resolve(&category),
            meta,
        });
        vertices.push(PathVertex { x: px, y: py });
    }

    let mut items = Vec::with_capacity(markers.len() + 1);
    if style.draw_path && !vertices.is_empty() {
        items.push(GeometryItem::PathSegment {
            series: style.name.clone(),
            points: vertices,
            color: style.color.base(),
            stroke_width: style.stroke_width,
        });
    }
    items.extend(markers);
    Ok(items)
}
