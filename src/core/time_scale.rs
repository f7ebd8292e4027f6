use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::ticks::year_ticks;
use crate::error::ChartResult;

/// Time axis over unix seconds with calendar-year ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    /// Creates a scale from a unix-seconds domain.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self {
            linear: LinearScale::new(domain, range)?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    pub fn map(self, seconds: f64) -> ChartResult<f64> {
        self.linear.map(seconds)
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        self.linear.invert(pixel)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (start, end) = self.linear.domain();
        year_ticks(start, end, count)
    }
}
