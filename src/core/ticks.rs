use serde::{Deserialize, Serialize};

use crate::core::primitives::{unix_seconds_to_datetime, unix_seconds_to_year, year_to_unix_seconds};

/// Label style for axis ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickFormat {
    /// Integers without decimals, fractions trimmed to two places.
    #[default]
    Plain,
    /// SI-prefixed compact form (`1.5k`, `20M`), trailing zeros trimmed.
    Si,
    /// Four-digit calendar year of a unix-seconds time value.
    Year,
}

impl TickFormat {
    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Plain => format_plain(value),
            Self::Si => format_si(value),
            Self::Year => unix_seconds_to_datetime(value)
                .map(|time| time.format("%Y").to_string())
                .unwrap_or_default(),
        }
    }
}

/// "Nice" ticks on 1/2/5 multiples of a power of ten, roughly `count` of them.
#[must_use]
pub fn linear_ticks(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }
    if start == end {
        return vec![start];
    }

    let (min, max) = (start.min(end), start.max(end));
    let raw_step = (max - min) / count as f64;
    let power = raw_step.log10().floor();
    let error = raw_step / 10_f64.powf(power);
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };

    // Negative powers divide by an integral inverse step to keep ticks like 0.3 exact.
    let mut ticks: Vec<f64> = if power < 0.0 {
        let inverse = 10_f64.powf(-power) / factor;
        let first = (min * inverse).ceil() as i64;
        let last = (max * inverse).floor() as i64;
        (first..=last).map(|index| index as f64 / inverse).collect()
    } else {
        let step = factor * 10_f64.powf(power);
        let first = (min / step).ceil() as i64;
        let last = (max / step).floor() as i64;
        (first..=last).map(|index| index as f64 * step).collect()
    };

    if end < start {
        ticks.reverse();
    }
    ticks
}

/// Ticks on the 1-2-5 ladder of each decade, thinned to at most `count`.
///
/// Both bounds must be positive; callers build log domains from positive data only.
#[must_use]
pub fn log_ladder_ticks(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 0 || !(start > 0.0 && end > 0.0) || !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }

    let (min, max) = (start.min(end), start.max(end));
    let min_exp = min.log10().floor() as i32;
    let max_exp = max.log10().ceil() as i32;

    let mut ticks = Vec::new();
    for exp in min_exp..=max_exp {
        let decade = 10_f64.powi(exp);
        for multiplier in [1.0, 2.0, 5.0] {
            let candidate = decade * multiplier;
            if candidate >= min * (1.0 - 1e-12) && candidate <= max * (1.0 + 1e-12) {
                ticks.push(candidate);
            }
        }
    }

    let mut sampled = evenly_sample(ticks, count);
    if end < start {
        sampled.reverse();
    }
    sampled
}

/// One tick per calendar year inside a unix-seconds range, thinned to a
/// whole-year stride so at most `count` remain.
#[must_use]
pub fn year_ticks(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }
    let (min, max) = (start.min(end), start.max(end));
    let (Some(first_year), Some(last_year)) =
        (unix_seconds_to_year(min), unix_seconds_to_year(max))
    else {
        return Vec::new();
    };

    let years: Vec<f64> = (first_year..=last_year)
        .filter_map(year_to_unix_seconds)
        .filter(|seconds| *seconds >= min && *seconds <= max)
        .collect();
    let stride = years.len().div_ceil(count).max(1);
    let mut ticks: Vec<f64> = years.into_iter().step_by(stride).collect();
    if end < start {
        ticks.reverse();
    }
    ticks
}

fn evenly_sample(ticks: Vec<f64>, target: usize) -> Vec<f64> {
    if ticks.len() <= target {
        return ticks;
    }
    if target == 1 {
        return vec![ticks[0]];
    }
    let last_index = ticks.len() - 1;
    let mut sampled: Vec<f64> = Vec::with_capacity(target);
    for step in 0..target {
        let ratio = step as f64 / (target - 1) as f64;
        let index = (ratio * last_index as f64).round() as usize;
        let value = ticks[index.min(last_index)];
        if sampled.last() != Some(&value) {
            sampled.push(value);
        }
    }
    sampled
}

#[must_use]
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    trim_fraction(format!("{value:.2}"))
}

/// Compact SI formatting with three significant digits.
#[must_use]
pub fn format_si(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    const PREFIXES: [(i32, &str); 9] = [
        (-9, "n"),
        (-6, "µ"),
        (-3, "m"),
        (0, ""),
        (3, "k"),
        (6, "M"),
        (9, "G"),
        (12, "T"),
        (15, "P"),
    ];

    let exponent = value.abs().log10().floor() as i32;
    let prefix_exp = (exponent.div_euclid(3) * 3).clamp(-9, 15);
    let suffix = PREFIXES
        .iter()
        .find(|(exp, _)| *exp == prefix_exp)
        .map_or("", |(_, suffix)| *suffix);

    let scaled = value / 10_f64.powi(prefix_exp);
    let decimals = (2 - (exponent - prefix_exp)).max(0) as usize;
    format!("{}{suffix}", trim_fraction(format!("{scaled:.decimals$}")))
}

fn trim_fraction(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}
