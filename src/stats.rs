//! Numeric helpers shared by the cleaning and aggregation stages.

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the `q`-th quantile (0.0–1.0) of a slice of values using linear
/// interpolation between the surrounding order statistics.
///
/// Returns `None` for empty input.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let base = pos.floor() as usize;
    let frac = pos - base as f64;

    if base + 1 < sorted.len() {
        Some(sorted[base] + frac * (sorted[base + 1] - sorted[base]))
    } else {
        Some(sorted[base])
    }
}

/// An inclusive value range derived from two quantiles of a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileBand {
    pub low: f64,
    pub high: f64,
}

impl PercentileBand {
    /// Computes the band spanning the `low_q` and `high_q` quantiles of
    /// `values`. Returns `None` for empty input.
    pub fn from_values(values: &[f64], low_q: f64, high_q: f64) -> Option<Self> {
        Some(Self {
            low: quantile(values, low_q)?,
            high: quantile(values, high_q)?,
        })
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}
