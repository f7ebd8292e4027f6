use std::cmp::Reverse;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::aggregate::CategoryKey;
use crate::core::record::Record;
use crate::core::squarify::squarify;
use crate::core::types::PlotBounds;

/// Axis-aligned rectangle in plot-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl LayoutRect {
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Zero-area rectangle at one position.
    #[must_use]
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width() * self.height()
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// True when the interiors intersect; shared edges do not count.
    #[must_use]
    pub fn overlaps(self, other: Self, tolerance: f64) -> bool {
        self.x0 + tolerance < other.x1
            && other.x0 + tolerance < self.x1
            && self.y0 + tolerance < other.y1
            && other.y0 + tolerance < self.y1
    }

    /// Shrinks every side by `amount`, collapsing to the center line when the
    /// rectangle is thinner than `2 * amount`.
    #[must_use]
    pub fn inset(self, amount: f64) -> Self {
        let (x0, x1) = shrink_span(self.x0, self.x1, amount);
        let (y0, y1) = shrink_span(self.y0, self.y1, amount);
        Self::new(x0, y0, x1, y1)
    }
}

fn shrink_span(start: f64, end: f64, amount: f64) -> (f64, f64) {
    if end - start <= 2.0 * amount {
        let mid = (start + end) / 2.0;
        (mid, mid)
    } else {
        (start + amount, end - amount)
    }
}

/// Treemap layout tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreemapConfig {
    /// Gap between neighbouring leaf rectangles.
    pub padding: f64,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self { padding: 1.0 }
    }
}

/// Node of the one-level sector hierarchy.
///
/// After layout each leaf carries `cell`, the tile it was allotted, and
/// `rect`, the drawn rectangle (the cell inset by half the padding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,
    pub value: f64,
    pub children: Vec<HierarchyNode>,
    pub cell: Option<LayoutRect>,
    pub rect: Option<LayoutRect>,
}

impl HierarchyNode {
    #[must_use]
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            children: Vec::new(),
            cell: None,
            rect: None,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaves in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&HierarchyNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a HierarchyNode>) {
        if self.is_leaf() {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }
}

/// Builds a root with one child per group; each child's value is the sum of
/// `value_field` over its records (absent values count as 0).
///
/// Children are sorted by descending value, keeping first-seen order on ties.
pub fn build_hierarchy<F>(records: &[Record], key_fn: F, value_field: &str) -> HierarchyNode
where
    F: Fn(&Record) -> Option<CategoryKey>,
{
    let mut sums: IndexMap<String, f64> = IndexMap::new();
    for record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };
        *sums.entry(key.label()).or_insert(0.0) += record.number(value_field).unwrap_or(0.0);
    }

    let mut children: Vec<HierarchyNode> = sums
        .into_iter()
        .map(|(name, value)| HierarchyNode::leaf(name, value))
        .collect();
    children.sort_by_key(|child| Reverse(OrderedFloat(child.value)));

    HierarchyNode {
        name: "root".to_owned(),
        value: children.iter().map(|child| child.value).sum(),
        children,
        cell: None,
        rect: None,
    }
}

/// Builds the hierarchy and tiles its leaves into `bounds`.
pub fn layout_treemap<F>(
    records: &[Record],
    key_fn: F,
    value_field: &str,
    bounds: PlotBounds,
    config: TreemapConfig,
) -> HierarchyNode
where
    F: Fn(&Record) -> Option<CategoryKey>,
{
    let mut root = build_hierarchy(records, key_fn, value_field);
    apply_layout(&mut root, bounds, config);
    root
}

/// Assigns `cell` and `rect` to the root's children.
///
/// Negative or non-finite values get no area. Zero-area leaves and every leaf
/// under degenerate bounds receive zero-size rectangles.
pub fn apply_layout(root: &mut HierarchyNode, bounds: PlotBounds, config: TreemapConfig) {
    let outer = LayoutRect::new(0.0, 0.0, bounds.width, bounds.height);
    root.cell = Some(outer);
    root.rect = Some(outer);

    let weights: Vec<f64> = root
        .children
        .iter()
        .map(|child| {
            if child.value.is_finite() {
                child.value.max(0.0)
            } else {
                0.0
            }
        })
        .collect();
    let total: f64 = weights.iter().sum();

    if bounds.is_degenerate() || total <= 0.0 {
        for child in &mut root.children {
            child.cell = Some(LayoutRect::point(0.0, 0.0));
            child.rect = Some(LayoutRect::point(0.0, 0.0));
        }
        debug!(
            leaf_count = root.children.len(),
            width = bounds.width,
            height = bounds.height,
            "treemap layout degenerate"
        );
        return;
    }

    let scale = bounds.area() / total;
    let positive: Vec<(usize, f64)> = weights
        .iter()
        .enumerate()
        .filter(|(_, weight)| **weight > 0.0)
        .map(|(index, weight)| (index, weight * scale))
        .collect();
    let areas: Vec<f64> = positive.iter().map(|(_, area)| *area).collect();
    let tiles = squarify(&areas, outer);

    let empty_cell = LayoutRect::point(outer.x1, outer.y1);
    for child in &mut root.children {
        child.cell = Some(empty_cell);
        child.rect = Some(empty_cell);
    }
    let half_padding = (config.padding / 2.0).max(0.0);
    for ((index, _), tile) in positive.iter().zip(tiles) {
        let child = &mut root.children[*index];
        child.cell = Some(tile);
        child.rect = Some(tile.inset(half_padding));
    }

    debug!(
        leaf_count = root.children.len(),
        width = bounds.width,
        height = bounds.height,
        "treemap layout"
    );
}

#[cfg(test)]
mod tests {
    use super::{LayoutRect, TreemapConfig, build_hierarchy, layout_treemap};
    use crate::core::aggregate::key_by_field;
    use crate::core::record::{Record, fields};
    use crate::core::types::PlotBounds;

    fn exports(sector: &str, value: &str) -> Record {
        Record::new()
            .with(fields::TECH_SECTOR, sector)
            .with(fields::TECH_EXPORTS_USD, value)
    }

    #[test]
    fn children_sorted_descending_with_stable_ties() {
        let records = vec![
            exports("Cloud", "10"),
            exports("AI", "30"),
            exports("Chips", "10"),
            exports("AI", "5"),
            exports("Cloud", "oops"),
        ];
        let root = build_hierarchy(
            &records,
            key_by_field(fields::TECH_SECTOR),
            fields::TECH_EXPORTS_USD,
        );
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["AI", "Cloud", "Chips"]);
        assert_eq!(root.children[0].value, 35.0);
        assert_eq!(root.value, 55.0);
    }

    #[test]
    fn zero_value_leaf_gets_degenerate_rect() {
        let records = vec![exports("AI", "30"), exports("Robotics", "0")];
        let root = layout_treemap(
            &records,
            key_by_field(fields::TECH_SECTOR),
            fields::TECH_EXPORTS_USD,
            PlotBounds::new(100.0, 50.0),
            TreemapConfig::default(),
        );
        let ai = root.children[0].rect.expect("laid out");
        assert_eq!(ai, LayoutRect::new(0.5, 0.5, 99.5, 49.5));
        let robotics = root.children[1].rect.expect("laid out");
        assert_eq!(robotics.area(), 0.0);
    }

    #[test]
    fn degenerate_bounds_do_not_panic() {
        let records = vec![exports("AI", "30")];
        let root = layout_treemap(
            &records,
            key_by_field(fields::TECH_SECTOR),
            fields::TECH_EXPORTS_USD,
            PlotBounds::new(0.0, 300.0),
            TreemapConfig::default(),
        );
        assert_eq!(root.children[0].rect.map(LayoutRect::area), Some(0.0));
    }
}
