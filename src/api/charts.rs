use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    Axis, Color, FieldReducer, FilterSpec, GeometryItem, GroupOrder, LegendEntry, OrdinalScale,
    Record, SCHEME_SET2, Scale, ScaleKind, SeriesColor, SeriesStyle, TreemapStyle, ValueSource,
    aggregate, build_scale, emit_axis_ticks, emit_series, emit_treemap, extent, fields,
    filter_records, key_by_field, key_by_year, layout_treemap, project_records, retain_positive,
};
use crate::error::ChartResult;
use crate::render::ChartScene;

use super::ChartConfig;

/// One chart of the dashboard: a pure function from records and config to a scene.
pub trait Chart {
    fn id(&self) -> &str;

    /// Builds the full scene for `records`. Empty input or degenerate bounds
    /// produce an empty scene rather than an error.
    fn build_scene(&self, records: &[Record], config: &ChartConfig) -> ChartResult<ChartScene>;
}

/// Bottom and left axis ticks, each labelled in its scale's default format.
fn axis_ticks(x_scale: Scale, y_scale: Scale, config: &ChartConfig) -> ChartResult<Vec<GeometryItem>> {
    let mut items = emit_axis_ticks(
        x_scale,
        Axis::Bottom,
        config.x_tick_count,
        x_scale.default_tick_format(),
    )?;
    items.extend(emit_axis_ticks(
        y_scale,
        Axis::Left,
        config.y_tick_count,
        y_scale.default_tick_format(),
    )?);
    Ok(items)
}

/// One averaged indicator drawn as a line with markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub field: String,
    pub output: String,
    pub label: String,
    pub color: Color,
}

impl Indicator {
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        output: impl Into<String>,
        label: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            field: field.into(),
            output: output.into(),
            label: label.into(),
            color,
        }
    }
}

/// Yearly means of percentage indicators for one country on a time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorLineChart {
    pub id: String,
    pub country: Option<String>,
    pub indicators: Vec<Indicator>,
    pub y_domain: (f64, f64),
    pub unit: String,
}

impl IndicatorLineChart {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            country: None,
            indicators: Vec::new(),
            y_domain: (0.0, 100.0),
            unit: "%".to_owned(),
        }
    }

    /// 5G coverage and internet penetration for `country`.
    #[must_use]
    pub fn connectivity(id: impl Into<String>, country: impl Into<String>) -> Self {
        Self::new(id)
            .with_country(country)
            .with_indicator(Indicator::new(
                fields::NETWORK_COVERAGE_5G,
                "avg5G",
                "5G Coverage",
                Color::STEEL_BLUE,
            ))
            .with_indicator(Indicator::new(
                fields::INTERNET_PENETRATION,
                "avgInternet",
                "Internet Penetration",
                Color::GREEN,
            ))
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicators.push(indicator);
        self
    }

    #[must_use]
    pub fn with_y_domain(mut self, min: f64, max: f64) -> Self {
        self.y_domain = (min, max);
        self
    }
}

impl Chart for IndicatorLineChart {
    fn id(&self) -> &str {
        &self.id
    }

    fn build_scene(&self, records: &[Record], config: &ChartConfig) -> ChartResult<ChartScene> {
        let config = config.validate()?;
        let mut scene = ChartScene::new(config.viewport, config.margin);
        let bounds = scene.bounds;
        if bounds.is_degenerate() {
            return Ok(scene);
        }

        let scoped;
        let records = match &self.country {
            Some(country) => {
                scoped = filter_records(
                    records,
                    &FilterSpec::cleared().with_country(country.as_str()),
                );
                scoped.as_slice()
            }
            None => records,
        };

        let reducers: Vec<FieldReducer> = self
            .indicators
            .iter()
            .map(|indicator| FieldReducer::mean(&indicator.field, &indicator.output))
            .collect();
        let points = aggregate(records, key_by_year, &reducers, GroupOrder::Ascending);
        let Some(x_domain) = extent(points.iter().filter_map(|point| point.key.time_value()))
        else {
            return Ok(scene);
        };

        let x_scale = build_scale(ScaleKind::Time, x_domain, (0.0, bounds.width))?;
        let y_scale = build_scale(ScaleKind::Linear, self.y_domain, (bounds.height, 0.0))?;

        let mut items = axis_ticks(x_scale, y_scale, &config)?;
        for indicator in &self.indicators {
            let style = SeriesStyle::line(&indicator.label, indicator.color).with_unit(&self.unit);
            items.extend(emit_series(
                &points,
                &ValueSource::KeyTime,
                &ValueSource::field(&indicator.output),
                x_scale,
                y_scale,
                &style,
            )?);
            scene = scene.with_legend_entry(LegendEntry {
                label: format!("{} ({})", indicator.label, self.unit),
                color: indicator.color,
            });
        }

        debug!(chart = %self.id, groups = points.len(), items = items.len(), "built line scene");
        Ok(scene.with_items(items))
    }
}

/// Per-record scatter: log x of one field against linear y of another,
/// colored by category with optional highlights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub id: String,
    pub category_field: String,
    pub x_field: String,
    pub x_label: String,
    pub y_field: String,
    pub y_label: String,
    pub highlights: IndexMap<String, Color>,
    pub fallback_color: Color,
    pub opacity: f64,
}

impl ScatterChart {
    /// University collaborations (log) against startup count, China and Japan highlighted.
    #[must_use]
    pub fn innovation(id: impl Into<String>) -> Self {
        let mut highlights = IndexMap::new();
        highlights.insert("Japan".to_owned(), Color::RED);
        highlights.insert("China".to_owned(), Color::GREEN);
        Self {
            id: id.into(),
            category_field: fields::COUNTRY.to_owned(),
            x_field: fields::UNIVERSITY_COLLABORATIONS.to_owned(),
            x_label: "University Collaborations".to_owned(),
            y_field: fields::STARTUP_COUNT.to_owned(),
            y_label: "Startups".to_owned(),
            highlights,
            fallback_color: Color::STEEL_BLUE,
            opacity: 0.7,
        }
    }

    fn series_color(&self) -> SeriesColor {
        SeriesColor::ByCategory {
            overrides: self
                .highlights
                .iter()
                .map(|(name, color)| (name.clone(), color.with_alpha(self.opacity)))
                .collect(),
            fallback: self.fallback_color.with_alpha(self.opacity),
        }
    }
}

impl Chart for ScatterChart {
    fn id(&self) -> &str {
        &self.id
    }

    fn build_scene(&self, records: &[Record], config: &ChartConfig) -> ChartResult<ChartScene> {
        let config = config.validate()?;
        let mut scene = ChartScene::new(config.viewport, config.margin);
        let bounds = scene.bounds;
        if bounds.is_degenerate() {
            return Ok(scene);
        }

        let projected = project_records(
            records,
            key_by_field(&self.category_field),
            &[self.x_field.as_str(), self.y_field.as_str()],
        );
        let mut points = retain_positive(projected, &self.x_field);
        points.retain(|point| point.value(&self.y_field).is_some());

        let (Some(x_domain), Some((_, y_max))) = (
            extent(points.iter().filter_map(|point| point.value(&self.x_field))),
            extent(points.iter().filter_map(|point| point.value(&self.y_field))),
        ) else {
            return Ok(scene);
        };

        let x_scale = build_scale(ScaleKind::Log, x_domain, (0.0, bounds.width))?;
        let y_scale = build_scale(ScaleKind::Linear, (0.0, y_max), (bounds.height, 0.0))?;

        let mut items = axis_ticks(x_scale, y_scale, &config)?;
        let style = SeriesStyle::scatter(&self.y_label, self.series_color()).with_detail_field(
            &self.x_field,
            &self.x_label,
            "",
        );
        items.extend(emit_series(
            &points,
            &ValueSource::field(&self.x_field),
            &ValueSource::field(&self.y_field),
            x_scale,
            y_scale,
            &style,
        )?);

        for (name, color) in &self.highlights {
            scene = scene.with_legend_entry(LegendEntry {
                label: name.clone(),
                color: color.with_alpha(self.opacity),
            });
        }

        debug!(chart = %self.id, points = points.len(), items = items.len(), "built scatter scene");
        Ok(scene.with_items(items))
    }
}

/// Sum of one value field per category, laid out as a squarified treemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorTreemap {
    pub id: String,
    pub category_field: String,
    pub value_field: String,
    pub palette: Vec<Color>,
    pub style: TreemapStyle,
}

impl SectorTreemap {
    /// Tech exports per tech sector on the Set2 palette.
    #[must_use]
    pub fn tech_exports(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category_field: fields::TECH_SECTOR.to_owned(),
            value_field: fields::TECH_EXPORTS_USD.to_owned(),
            palette: SCHEME_SET2.to_vec(),
            style: TreemapStyle::default(),
        }
    }
}

impl Chart for SectorTreemap {
    fn id(&self) -> &str {
        &self.id
    }

    fn build_scene(&self, records: &[Record], config: &ChartConfig) -> ChartResult<ChartScene> {
        let config = config.validate()?;
        let scene = ChartScene::new(config.viewport, config.margin);
        let bounds = scene.bounds;
        if bounds.is_degenerate() {
            return Ok(scene);
        }

        let root = layout_treemap(
            records,
            key_by_field(&self.category_field),
            &self.value_field,
            bounds,
            config.treemap,
        );
        let colors = OrdinalScale::new(
            root.leaves().into_iter().map(|leaf| leaf.name.clone()),
            &self.palette,
        )?;
        let items = emit_treemap(&root, &colors, &self.style);

        debug!(chart = %self.id, leaves = root.children.len(), items = items.len(), "built treemap scene");
        Ok(scene.with_items(items))
    }
}
