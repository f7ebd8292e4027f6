use crate::core::geometry::GeometryItem;
use crate::error::ChartResult;
use crate::render::{ChartScene, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates scene content so invalid geometry surfaces before a
/// real drawing surface is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_item_count: usize,
    pub last_point_count: usize,
    pub last_rect_count: usize,
    pub last_visible_label_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &ChartScene) -> ChartResult<()> {
        scene.validate()?;
        self.render_count += 1;
        self.last_item_count = scene.items.len();
        self.last_point_count = scene
            .items
            .iter()
            .filter(|item| matches!(item, GeometryItem::Point { .. }))
            .count();
        self.last_rect_count = scene
            .items
            .iter()
            .filter(|item| matches!(item, GeometryItem::Rect { .. }))
            .count();
        self.last_visible_label_count = scene
            .items
            .iter()
            .filter(|item| matches!(item, GeometryItem::Label { visible: true, .. }))
            .count();
        Ok(())
    }
}
