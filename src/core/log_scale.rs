use serde::{Deserialize, Serialize};

use crate::core::scale::validate_pair;
use crate::core::ticks::log_ladder_ticks;
use crate::error::{ChartError, ChartResult};

/// Logarithmic domain → pixel mapping over a strictly positive domain.
///
/// The scale never clamps: non-positive inputs are rejected, and domains are
/// expected to come from data already passed through `retain_positive`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        validate_pair("log", "domain", domain)?;
        validate_pair("log", "range", range)?;
        if domain.0 <= 0.0 || domain.1 <= 0.0 {
            return Err(ChartError::InvalidScale {
                kind: "log",
                reason: format!(
                    "domain must be strictly positive, got [{}, {}]",
                    domain.0, domain.1
                ),
            });
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn map(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "log scale input must be finite and > 0, got {value}"
            )));
        }

        let start = self.domain_start.ln();
        let span = self.domain_end.ln() - start;
        if span == 0.0 {
            return Ok((self.range_start + self.range_end) / 2.0);
        }
        let normalized = (value.ln() - start) / span;
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let start = self.domain_start.ln();
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (pixel - self.range_start) / span;
        Ok((start + normalized * (self.domain_end.ln() - start)).exp())
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        log_ladder_ticks(self.domain_start, self.domain_end, count)
    }
}
