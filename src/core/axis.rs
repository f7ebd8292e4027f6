use crate::core::geometry::{Axis, GeometryItem};
use crate::core::scale::Scale;
use crate::core::ticks::TickFormat;
use crate::error::ChartResult;

/// Emits roughly `count` ticks for `scale`, positioned in plot space.
pub fn emit_axis_ticks(
    scale: Scale,
    axis: Axis,
    count: usize,
    format: TickFormat,
) -> ChartResult<Vec<GeometryItem>> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| {
            Ok(GeometryItem::AxisTick {
                axis,
                pos: scale.map(value)?,
                label: format.format(value),
            })
        })
        .collect()
}
