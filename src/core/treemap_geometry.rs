use serde::{Deserialize, Serialize};

use crate::core::color::Color;
use crate::core::geometry::{GeometryItem, ItemMeta};
use crate::core::hierarchy::HierarchyNode;
use crate::core::ordinal_scale::OrdinalScale;

/// Leaf label placement and the fit heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreemapLabelConfig {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Estimated pixels per character; a label shows only when the rectangle
    /// is wider than `chars * char_width_px`.
    pub char_width_px: f64,
    pub max_font_size: f64,
}

impl Default for TreemapLabelConfig {
    fn default() -> Self {
        Self {
            offset_x: 5.0,
            offset_y: 20.0,
            char_width_px: 8.0,
            max_font_size: 12.0,
        }
    }
}

impl TreemapLabelConfig {
    #[must_use]
    pub fn fits(self, text: &str, width: f64) -> bool {
        width > text.chars().count() as f64 * self.char_width_px
    }
}

/// Tooltip wording and fill rules for treemap leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapStyle {
    pub category_label: String,
    pub value_label: String,
    pub unit: String,
    /// Fill for leaves missing from the color scale's domain.
    pub fallback_color: Color,
    pub labels: TreemapLabelConfig,
}

impl Default for TreemapStyle {
    fn default() -> Self {
        Self {
            category_label: "Sector".to_owned(),
            value_label: "Tech Exports (USD)".to_owned(),
            unit: String::new(),
            fallback_color: Color::STEEL_BLUE,
            labels: TreemapLabelConfig::default(),
        }
    }
}

/// Emits one `Rect` per laid-out leaf followed by one `Label` per leaf.
///
/// Labels that do not fit are emitted with `visible: false`. A root without
/// children or without a positive-area layout yields no geometry.
#[must_use]
pub fn emit_treemap(
    root: &HierarchyNode,
    colors: &OrdinalScale,
    style: &TreemapStyle,
) -> Vec<GeometryItem> {
    if root.is_leaf() || root.rect.is_none_or(|rect| rect.area() <= 0.0) {
        return Vec::new();
    }

    let leaves: Vec<&HierarchyNode> = root
        .leaves()
        .into_iter()
        .filter(|leaf| leaf.rect.is_some())
        .collect();
    let mut items = Vec::with_capacity(leaves.len() * 2);

    for leaf in &leaves {
        let Some(rect) = leaf.rect else {
            continue;
        };
        items.push(GeometryItem::Rect {
            x0: rect.x0,
            y0: rect.y0,
            x1: rect.x1,
            y1: rect.y1,
            color: colors.map(&leaf.name).unwrap_or(style.fallback_color),
            meta: ItemMeta::new(&style.category_label, &leaf.name).with_field(
                &style.value_label,
                leaf.value,
                &style.unit,
            ),
        });
    }

    let labels = style.labels;
    for leaf in &leaves {
        let Some(rect) = leaf.rect else {
            continue;
        };
        let width = rect.width();
        items.push(GeometryItem::Label {
            x: rect.x0 + labels.offset_x,
            y: rect.y0 + labels.offset_y,
            text: leaf.name.clone(),
            font_size: labels.max_font_size.min(width / 3.0).max(0.0),
            visible: labels.fits(&leaf.name, width),
        });
    }

    items
}
