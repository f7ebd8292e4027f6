use serde::{Deserialize, Serialize};

use crate::core::log_scale::LogScale;
use crate::core::ticks::{TickFormat, linear_ticks};
use crate::core::time_scale::TimeScale;
use crate::error::{ChartError, ChartResult};

/// Linear domain → pixel mapping.
///
/// A zero-span domain (single data value) maps every input to the middle of
/// the range instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        validate_pair("linear", "domain", domain)?;
        validate_pair("linear", "range", range)?;
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
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return Ok((self.range_start + self.range_end) / 2.0);
        }
        let normalized = (value - self.domain_start) / span;
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (pixel - self.range_start) / span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain_start, self.domain_end, count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    Linear,
    Log,
    Time,
}

/// Continuous scale used for one axis of one render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Linear(LinearScale),
    Log(LogScale),
    Time(TimeScale),
}

impl Scale {
    #[must_use]
    pub fn kind(self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Log(_) => ScaleKind::Log,
            Self::Time(_) => ScaleKind::Time,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.domain(),
            Self::Log(scale) => scale.domain(),
            Self::Time(scale) => scale.domain(),
        }
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.range(),
            Self::Log(scale) => scale.range(),
            Self::Time(scale) => scale.range(),
        }
    }

    pub fn map(self, value: f64) -> ChartResult<f64> {
        match self {
            Self::Linear(scale) => scale.map(value),
            Self::Log(scale) => scale.map(value),
            Self::Time(scale) => scale.map(value),
        }
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        match self {
            Self::Linear(scale) => scale.invert(pixel),
            Self::Log(scale) => scale.invert(pixel),
            Self::Time(scale) => scale.invert(pixel),
        }
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(scale) => scale.ticks(count),
            Self::Log(scale) => scale.ticks(count),
            Self::Time(scale) => scale.ticks(count),
        }
    }

    /// Tick label style matching the scale kind.
    #[must_use]
    pub fn default_tick_format(self) -> TickFormat {
        match self {
            Self::Linear(_) => TickFormat::Plain,
            Self::Log(_) => TickFormat::Si,
            Self::Time(_) => TickFormat::Year,
        }
    }
}

/// Builds a continuous scale from a caller-computed domain and a pixel range.
///
/// For y axes pass a reversed range (`(height, 0.0)`) so larger values sit higher.
pub fn build_scale(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> ChartResult<Scale> {
    Ok(match kind {
        ScaleKind::Linear => Scale::Linear(LinearScale::new(domain, range)?),
        ScaleKind::Log => Scale::Log(LogScale::new(domain, range)?),
        ScaleKind::Time => Scale::Time(TimeScale::new(domain, range)?),
    })
}

/// `[min, max]` over the finite values, or `None` when there are none.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

pub(crate) fn validate_pair(kind: &'static str, what: &str, pair: (f64, f64)) -> ChartResult<()> {
    if !pair.0.is_finite() || !pair.1.is_finite() {
        return Err(ChartError::InvalidScale {
            kind,
            reason: format!("{what} must be finite, got [{}, {}]", pair.0, pair.1),
        });
    }
    Ok(())
}
