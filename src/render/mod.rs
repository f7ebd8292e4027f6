mod null_renderer;
mod scene;

pub use null_renderer::NullRenderer;
pub use scene::{ChartScene, ChartSceneJsonContractV1, SCENE_JSON_SCHEMA_V1};

use crate::error::ChartResult;

/// Contract implemented by any drawing surface.
///
/// Surfaces receive a fully materialized, immutable `ChartScene` and own any
/// diffing or redraw strategy; chart computation never touches them.
pub trait Renderer {
    fn render(&mut self, scene: &ChartScene) -> ChartResult<()>;
}
