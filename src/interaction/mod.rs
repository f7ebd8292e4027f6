//! Pointer hit-testing and tooltip state.
//!
//! Hit-testing is a pure function over emitted geometry; `TooltipOverlay`
//! keeps the single piece of mutable state each chart instance owns.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::geometry::{GeometryItem, ItemMeta};

/// Tooltip display state handed to the tooltip collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub html: String,
}

impl TooltipState {
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Tooltip placement relative to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset_x: 10.0,
            offset_y: -10.0,
        }
    }
}

/// Topmost item under the pointer: points within their radius, rectangles
/// with positive area containing the pointer. Later items win.
#[must_use]
pub fn hit_test(x: f64, y: f64, items: &[GeometryItem]) -> Option<&GeometryItem> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    items.iter().rev().find(|item| match item {
        GeometryItem::Point {
            x: cx,
            y: cy,
            radius,
            ..
        } => {
            let dx = x - cx;
            let dy = y - cy;
            dx * dx + dy * dy <= radius * radius
        }
        GeometryItem::Rect { x0, y0, x1, y1, .. } => {
            x0 < x1 && y0 < y1 && x >= *x0 && x <= *x1 && y >= *y0 && y <= *y1
        }
        GeometryItem::PathSegment { .. }
        | GeometryItem::AxisTick { .. }
        | GeometryItem::Label { .. } => false,
    })
}

/// Tooltip for a pointer at `(x, y)` in the same space as `items`.
#[must_use]
pub fn hover(x: f64, y: f64, items: &[GeometryItem], config: TooltipConfig) -> TooltipState {
    match hit_test(x, y, items).and_then(GeometryItem::meta) {
        Some(meta) => TooltipState {
            visible: true,
            x: x + config.offset_x,
            y: y + config.offset_y,
            html: tooltip_html(meta),
        },
        None => clear(),
    }
}

#[must_use]
pub fn clear() -> TooltipState {
    TooltipState::hidden()
}

/// `<strong>label:</strong> value` lines for each field, then the category.
#[must_use]
pub fn tooltip_html(meta: &ItemMeta) -> String {
    let mut html = String::new();
    for field in &meta.fields {
        html.push_str(&format!(
            "<strong>{}:</strong> {:.2}{}<br>",
            escape_html(&field.label),
            field.value,
            escape_html(&field.unit)
        ));
    }
    html.push_str(&format!(
        "<strong>{}:</strong> {}",
        escape_html(&meta.category_label),
        escape_html(&meta.category)
    ));
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Per-chart tooltip owner.
///
/// Pointer coordinates arrive in viewport space; `origin` is the plot-area
/// offset inside the viewport, used to hit-test against plot-space geometry.
/// The tooltip is positioned in viewport space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipOverlay {
    config: TooltipConfig,
    origin: (f64, f64),
    state: TooltipState,
}

impl TooltipOverlay {
    #[must_use]
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            origin: (0.0, 0.0),
            state: TooltipState::hidden(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> TooltipConfig {
        self.config
    }

    pub fn set_origin(&mut self, origin_x: f64, origin_y: f64) {
        self.origin = (origin_x, origin_y);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, items: &[GeometryItem]) -> &TooltipState {
        let (origin_x, origin_y) = self.origin;
        let mut next = hover(x - origin_x, y - origin_y, items, self.config);
        if next.visible {
            next.x += origin_x;
            next.y += origin_y;
        }
        if next.visible != self.state.visible {
            trace!(visible = next.visible, x, y, "tooltip visibility changed");
        }
        self.state = next;
        &self.state
    }

    pub fn on_pointer_leave(&mut self) -> &TooltipState {
        self.state = clear();
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::{TooltipConfig, TooltipOverlay, hit_test, tooltip_html};
    use crate::core::color::Color;
    use crate::core::geometry::{GeometryItem, ItemMeta};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, name: &str) -> GeometryItem {
        GeometryItem::Rect {
            x0,
            y0,
            x1,
            y1,
            color: Color::STEEL_BLUE,
            meta: ItemMeta::new("Sector", name).with_field("Tech Exports (USD)", 10.0, ""),
        }
    }

    #[test]
    fn later_items_win_overlapping_hits() {
        let items = vec![rect(0.0, 0.0, 10.0, 10.0, "below"), rect(0.0, 0.0, 10.0, 10.0, "above")];
        let hit = hit_test(5.0, 5.0, &items).and_then(GeometryItem::meta);
        assert_eq!(hit.map(|meta| meta.category.as_str()), Some("above"));
    }

    #[test]
    fn zero_area_rects_are_not_hoverable() {
        let items = vec![rect(4.0, 4.0, 4.0, 4.0, "empty")];
        assert!(hit_test(4.0, 4.0, &items).is_none());
    }

    #[test]
    fn html_escapes_text() {
        let meta = ItemMeta::new("Sector", "R&D <core>").with_field("Share", 12.5, "%");
        assert_eq!(
            tooltip_html(&meta),
            "<strong>Share:</strong> 12.50%<br><strong>Sector:</strong> R&amp;D &lt;core&gt;"
        );
    }

    #[test]
    fn overlay_translates_viewport_pointer_into_plot_space() {
        let items = vec![rect(0.0, 0.0, 20.0, 20.0, "AI")];
        let mut overlay = TooltipOverlay::new(TooltipConfig::default());
        overlay.set_origin(60.0, 30.0);

        let state = overlay.on_pointer_move(70.0, 40.0, &items).clone();
        assert!(state.visible);
        assert_eq!((state.x, state.y), (80.0, 30.0));

        assert!(!overlay.on_pointer_move(5.0, 5.0, &items).visible);
        overlay.on_pointer_move(70.0, 40.0, &items);
        assert!(!overlay.on_pointer_leave().visible);
    }
}
