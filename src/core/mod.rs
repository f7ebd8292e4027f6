pub mod aggregate;
pub mod axis;
pub mod color;
pub mod filter;
pub mod geometry;
pub mod hierarchy;
pub mod log_scale;
pub mod ordinal_scale;
pub mod primitives;
pub mod record;
pub mod scale;
pub mod series;
mod squarify;
pub mod ticks;
pub mod time_scale;
pub mod treemap_geometry;
pub mod types;

pub use aggregate::{
    AggregatedPoint, CategoryKey, FieldReducer, GroupOrder, Reducer, aggregate, key_by_field,
    key_by_year, project_records, retain_positive,
};
pub use axis::emit_axis_ticks;
pub use color::{Color, SCHEME_SET2};
pub use filter::{CategoryFilter, FilterOptions, FilterSpec, filter_records};
pub use geometry::{Axis, GeometryItem, ItemMeta, LegendEntry, MetaField, PathVertex};
pub use hierarchy::{
    HierarchyNode, LayoutRect, TreemapConfig, apply_layout, build_hierarchy, layout_treemap,
};
pub use log_scale::LogScale;
pub use ordinal_scale::OrdinalScale;
pub use record::{FieldValue, Record, fields, records_from_json_str};
pub use scale::{LinearScale, Scale, ScaleKind, build_scale, extent};
pub use series::{SeriesColor, SeriesStyle, ValueSource, emit_series};
pub use ticks::TickFormat;
pub use time_scale::TimeScale;
pub use treemap_geometry::{TreemapLabelConfig, TreemapStyle, emit_treemap};
pub use types::{DEFAULT_MARGIN, Margin, PlotBounds, Viewport};
