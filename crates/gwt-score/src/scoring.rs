//! Data scoring curves.
//!
//! The composite score of a stored item is `basic_score(size) * basic_rate(points)`.
//! Sizes at or below [`SCORE_SIZE_THRESHOLD`] all score the curve midpoint (500.5);
//! above it the score climbs towards 1000.

use gwt_core::constants::{
    BASIC_RATE_AMPLITUDE, BASIC_RATE_CENTER, BASIC_RATE_SLOPE, BASIC_SCORE_AMPLITUDE,
    BASIC_SCORE_SLOPE, SCORE_SIZE_THRESHOLD, SIZE_BAND_EDGES, SIZE_RATE_CEILING,
};

use crate::logistic::Logistic;

/// Basic score by bytes above the size threshold.
pub const BASIC_SCORE_CURVE: Logistic =
    Logistic::new(BASIC_SCORE_AMPLITUDE, BASIC_SCORE_SLOPE, 0.0);

/// Basic rate by data point count.
pub const BASIC_RATE_CURVE: Logistic =
    Logistic::new(BASIC_RATE_AMPLITUDE, BASIC_RATE_SLOPE, BASIC_RATE_CENTER);

/// Baseline score of an item holding `data_size` bytes.
///
/// # Examples
///
/// ```
/// use gwt_score::basic_score;
/// assert_eq!(basic_score(0), 500.5);
/// ```
pub fn basic_score(data_size: u64) -> f64 {
    let excess = data_size.saturating_sub(SCORE_SIZE_THRESHOLD);
    BASIC_SCORE_CURVE.eval(excess as f64)
}

/// Score multiplier for an item with `data_points` data points.
///
/// # Examples
///
/// ```
/// use gwt_score::basic_rate;
/// assert_eq!(basic_rate(90), 10.5);
/// ```
pub fn basic_rate(data_points: u64) -> f64 {
    BASIC_RATE_CURVE.eval(data_points as f64)
}

/// `basic_score(data_size) * basic_rate(data_points)`.
pub fn composite_score(data_size: u64, data_points: u64) -> f64 {
    basic_score(data_size) * basic_rate(data_points)
}

/// Piecewise-linear size multiplier.
///
/// | size            | multiplier |
/// |-----------------|------------|
/// | < 128 MiB       | 1.0        |
/// | 128 MiB – 4 GiB | 1.0 – 1.5  |
/// | 4 GiB – 32 GiB  | 1.5 – 2.0  |
/// | 32 GiB – 1 TiB  | 2.0 – 3.0  |
/// | ≥ 1 TiB         | 4.0        |
///
/// The last band ends just below 3.0 and the multiplier then steps to 4.0.
pub fn rate_by_size(data_size: u64) -> f64 {
    let [small, medium, large, huge] = SIZE_BAND_EDGES;
    if data_size < small {
        1.0
    } else if data_size < medium {
        interpolate(data_size, small, medium, 1.0, 1.5)
    } else if data_size < large {
        interpolate(data_size, medium, large, 1.5, 2.0)
    } else if data_size < huge {
        interpolate(data_size, large, huge, 2.0, 3.0)
    } else {
        SIZE_RATE_CEILING
    }
}

fn interpolate(size: u64, lo: u64, hi: u64, from: f64, to: f64) -> f64 {
    from + (size - lo) as f64 * (to - from) / (hi - lo) as f64
}
