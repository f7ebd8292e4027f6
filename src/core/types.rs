use serde::{Deserialize, Serialize};

/// Outer chart size in pixels as reported by the host's sizing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Margin applied when the host does not provide one.
pub const DEFAULT_MARGIN: Margin = Margin {
    top: 30.0,
    right: 30.0,
    bottom: 50.0,
    left: 60.0,
};

impl Default for Margin {
    fn default() -> Self {
        DEFAULT_MARGIN
    }
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Inner plot area left after subtracting margins from the viewport.
///
/// Width and height never go negative: a viewport smaller than its margins
/// yields degenerate (zero) bounds, which every pipeline stage treats as
/// "nothing to draw".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBounds {
    pub width: f64,
    pub height: f64,
}

impl PlotBounds {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_length(width),
            height: sanitize_length(height),
        }
    }

    #[must_use]
    pub fn from_viewport(viewport: Viewport, margin: Margin) -> Self {
        Self::new(
            f64::from(viewport.width) - margin.left - margin.right,
            f64::from(viewport.height) - margin.top - margin.bottom,
        )
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width * self.height
    }
}

fn sanitize_length(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
