use tracing::{debug, warn};

use crate::core::{CategoryFilter, FilterOptions, FilterSpec, Record, Viewport, filter_records};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{TooltipOverlay, TooltipState};
use crate::render::{ChartScene, Renderer};

use super::{Chart, ChartConfig};

struct ChartSlot {
    chart: Box<dyn Chart>,
    config: ChartConfig,
    overlay: TooltipOverlay,
    scene: Option<ChartScene>,
}

/// Owns the dataset, the shared filter, and every registered chart.
///
/// Each filter change recomputes the filtered records; `render_all` then
/// rebuilds every scene from scratch and hands it to the renderer. Pointer
/// events are routed to the per-chart tooltip overlay.
pub struct Dashboard<R: Renderer> {
    renderer: R,
    records: Vec<Record>,
    options: FilterOptions,
    filter: FilterSpec,
    filtered: Vec<Record>,
    charts: Vec<ChartSlot>,
}

impl<R: Renderer> Dashboard<R> {
    pub fn new(renderer: R, records: Vec<Record>) -> Self {
        let options = FilterOptions::from_records(&records);
        debug!(
            records = records.len(),
            sectors = options.sectors.len(),
            countries = options.countries.len(),
            years = options.years.len(),
            "dashboard loaded"
        );
        Self {
            renderer,
            filtered: records.clone(),
            records,
            options,
            filter: FilterSpec::cleared(),
            charts: Vec::new(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    #[must_use]
    pub fn filter_options(&self) -> &FilterOptions {
        &self.options
    }

    #[must_use]
    pub fn filtered_records(&self) -> &[Record] {
        &self.filtered
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.filtered = filter_records(&self.records, &self.filter);
    }

    pub fn set_sector(&mut self, sector: impl Into<CategoryFilter>) {
        let next = self.filter.clone().with_sector(sector);
        self.set_filter(next);
    }

    pub fn set_country(&mut self, country: impl Into<CategoryFilter>) {
        let next = self.filter.clone().with_country(country);
        self.set_filter(next);
    }

    pub fn set_start_year(&mut self, start_year: Option<i32>) {
        let next = self.filter.clone().with_start_year(start_year);
        self.set_filter(next);
    }

    pub fn set_end_year(&mut self, end_year: Option<i32>) {
        let next = self.filter.clone().with_end_year(end_year);
        self.set_filter(next);
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(FilterSpec::cleared());
    }

    /// Registers a chart; ids must be unique.
    pub fn add_chart(&mut self, chart: Box<dyn Chart>, config: ChartConfig) -> ChartResult<()> {
        let config = config.validate()?;
        if self.charts.iter().any(|slot| slot.chart.id() == chart.id()) {
            return Err(ChartError::InvalidData(format!(
                "duplicate chart id `{}`",
                chart.id()
            )));
        }
        self.charts.push(ChartSlot {
            overlay: TooltipOverlay::new(config.tooltip),
            chart,
            config,
            scene: None,
        });
        Ok(())
    }

    pub fn chart_ids(&self) -> impl Iterator<Item = &str> {
        self.charts.iter().map(|slot| slot.chart.id())
    }

    pub fn set_viewport(&mut self, id: &str, viewport: Viewport) -> ChartResult<()> {
        let slot = self.slot_mut(id)?;
        slot.config = slot.config.with_viewport(viewport);
        Ok(())
    }

    /// Rebuilds and renders every chart against the current filtered records.
    ///
    /// Previous scenes are discarded and any visible tooltip is hidden, since
    /// it may point at geometry that no longer exists.
    pub fn render_all(&mut self) -> ChartResult<()> {
        for slot in &mut self.charts {
            let scene = slot.chart.build_scene(&self.filtered, &slot.config)?;
            let (origin_x, origin_y) = scene.origin();
            slot.overlay.set_origin(origin_x, origin_y);
            slot.overlay.on_pointer_leave();
            self.renderer.render(&scene)?;
            debug!(
                chart = slot.chart.id(),
                items = scene.items.len(),
                records = self.filtered.len(),
                "chart rendered"
            );
            slot.scene = Some(scene);
        }
        Ok(())
    }

    /// Routes a viewport-space pointer position to the chart's tooltip.
    pub fn pointer_move(&mut self, id: &str, x: f64, y: f64) -> ChartResult<TooltipState> {
        let slot = self.slot_mut(id)?;
        let Some(scene) = &slot.scene else {
            warn!(chart = id, "pointer event before first render");
            return Ok(slot.overlay.on_pointer_leave().clone());
        };
        Ok(slot.overlay.on_pointer_move(x, y, &scene.items).clone())
    }

    pub fn pointer_leave(&mut self, id: &str) -> ChartResult<TooltipState> {
        let slot = self.slot_mut(id)?;
        Ok(slot.overlay.on_pointer_leave().clone())
    }

    pub fn tooltip(&self, id: &str) -> ChartResult<&TooltipState> {
        Ok(self.slot(id)?.overlay.state())
    }

    /// Last rendered scene for `id`, if `render_all` has run.
    pub fn scene(&self, id: &str) -> ChartResult<Option<&ChartScene>> {
        Ok(self.slot(id)?.scene.as_ref())
    }

    fn slot(&self, id: &str) -> ChartResult<&ChartSlot> {
        self.charts
            .iter()
            .find(|slot| slot.chart.id() == id)
            .ok_or_else(|| unknown_chart(id))
    }

    fn slot_mut(&mut self, id: &str) -> ChartResult<&mut ChartSlot> {
        self.charts
            .iter_mut()
            .find(|slot| slot.chart.id() == id)
            .ok_or_else(|| unknown_chart(id))
    }
}

fn unknown_chart(id: &str) -> ChartError {
    ChartError::InvalidData(format!("unknown chart id `{id}`"))
}
