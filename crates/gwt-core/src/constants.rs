//! Model constants. Sizes are in bytes, rates are dimensionless `f64`.

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;
pub const GIB: u64 = 1024 * MIB;
pub const TIB: u64 = 1024 * GIB;

/// Data size below which the basic score stays at its midpoint.
///
/// # Examples
///
/// ```
/// use gwt_core::constants::{SCORE_SIZE_THRESHOLD, MIB};
/// assert_eq!(SCORE_SIZE_THRESHOLD, 128 * MIB);
/// ```
pub const SCORE_SIZE_THRESHOLD: u64 = 128 * MIB;

/// Logistic slope for the basic score, exactly 2^-17.
pub const BASIC_SCORE_SLOPE: f64 = 0.000_007_629_394_531_25;
/// Amplitude of the basic score logistic (`999 / (1 + e^-kx) + 1`).
pub const BASIC_SCORE_AMPLITUDE: f64 = 999.0;

/// Data point count at which the basic rate sits at its midpoint.
pub const BASIC_RATE_CENTER: f64 = 90.0;
pub const BASIC_RATE_SLOPE: f64 = 0.15;
pub const BASIC_RATE_AMPLITUDE: f64 = 19.0;

/// Upper edges of the size-multiplier bands.
pub const SIZE_BAND_EDGES: [u64; 4] = [128 * MIB, 4 * GIB, 32 * GIB, TIB];
/// Multiplier applied at or above the last band edge.
pub const SIZE_RATE_CEILING: f64 = 4.0;

/// Experience granted per chain point.
pub const EXP_PER_POINT: u64 = 8;
/// Experience of a data item that has never been shown.
pub const BASE_EXP: u64 = 1;

/// Number of levels in the level and income tables.
pub const MAX_LEVEL: u32 = 20;

/// `mine_gwt(0)`.
pub const MINE_FLOOR: f64 = 0.2;
/// Span between [`MINE_FLOOR`] and the asymptote of `mine_gwt`.
pub const MINE_SPAN: f64 = 1.8;
/// Growth ratio assumed when capacity grows by 2% or less.
pub const MIN_GROWTH_RATIO: f64 = 0.02;

/// Settlement windows per period used when scaling size deltas into a growth rate.
pub const GROWTH_WINDOWS: f64 = 56.0 * 6.0;
/// Periods per year used to annualize the growth rate.
pub const ANNUALIZE_FACTOR: f64 = 4.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_units_chain() {
        assert_eq!(MIB, 1_048_576);
        assert_eq!(GIB, 1_073_741_824);
        assert_eq!(TIB, 1_099_511_627_776);
    }

    #[test]
    fn basic_score_slope_is_power_of_two() {
        assert_eq!(BASIC_SCORE_SLOPE, 1.0 / 131_072.0);
    }

    #[test]
    fn size_bands_strictly_increasing() {
        for pair in SIZE_BAND_EDGES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(SIZE_BAND_EDGES[0], SCORE_SIZE_THRESHOLD);
    }

    #[test]
    fn mine_asymptote_is_two() {
        assert_eq!(MINE_FLOOR + MINE_SPAN, 2.0);
    }

    #[test]
    fn growth_scaling() {
        assert_eq!(GROWTH_WINDOWS * ANNUALIZE_FACTOR, 1344.0);
    }
}
