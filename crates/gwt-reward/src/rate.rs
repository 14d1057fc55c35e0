//! Network reward-rate evolution.
//!
//! Between two capacity readings the reward rate moves with the annualized
//! growth (or shrink) rate of the network:
//!
//! - growth: `g = Δ * 56 * 6 * 4 / total_size`; the new rate is `g` when `g`
//!   exceeds the previous rate, otherwise `last_rate * (1 + g)`.
//! - shrink: `d = Δ * 56 * 6 * 4 / total_size`; a collapse (`d > 1`) resets
//!   to the carve floor, otherwise `last_rate * (1 - d)`.
//!
//! Both sizes must be non-zero.

use gwt_core::constants::{ANNUALIZE_FACTOR, GROWTH_WINDOWS};
use gwt_core::error::DomainError;
use gwt_core::traits::Carve;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which rule produced a [`RateUpdate`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateBranch {
    /// Growth rate exceeded the previous rate and replaced it.
    GrowthOvertake,
    /// Previous rate compounded by the growth rate.
    GrowthCompound,
    /// Capacity unchanged.
    Steady,
    /// Previous rate reduced by the shrink rate.
    Decay,
    /// Shrink rate above 1; rate reset to the carve floor.
    FloorReset,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RateUpdate {
    pub rate: f64,
    /// Growth or shrink rate that drove the update.
    pub change: f64,
    pub branch: RateBranch,
}

fn annualized(delta: u64, total_size: u64) -> f64 {
    delta as f64 * GROWTH_WINDOWS * ANNUALIZE_FACTOR / total_size as f64
}

/// New network reward rate after capacity moved from `last_total_size` to `total_size`.
///
/// # Examples
///
/// ```
/// use gwt_reward::carve::FlatCarve;
/// use gwt_reward::rate::{calc_reward_rate, RateBranch};
///
/// let carve = FlatCarve { floor: 0.01 };
/// let up = calc_reward_rate(1000, 1000, 0.5, &carve).unwrap();
/// assert_eq!(up.rate, 0.5);
/// assert_eq!(up.branch, RateBranch::Steady);
/// assert!(calc_reward_rate(0, 1000, 0.5, &carve).is_err());
/// ```
pub fn calc_reward_rate<C: Carve + ?Sized>(
    last_total_size: u64,
    total_size: u64,
    last_rate: f64,
    carve: &C,
) -> Result<RateUpdate, DomainError> {
    if last_total_size == 0 {
        return Err(DomainError::DivisionByZero("last_total_size"));
    }
    if total_size == 0 {
        return Err(DomainError::DivisionByZero("total_size"));
    }
    let last_rate = DomainError::check_non_negative("last_rate", last_rate)?;

    let update = if total_size > last_total_size {
        let g_rate = annualized(total_size - last_total_size, total_size);
        if g_rate > last_rate {
            RateUpdate {
                rate: g_rate,
                change: g_rate,
                branch: RateBranch::GrowthOvertake,
            }
        } else {
            RateUpdate {
                rate: last_rate * (1.0 + g_rate),
                change: g_rate,
                branch: RateBranch::GrowthCompound,
            }
        }
    } else if total_size == last_total_size {
        RateUpdate {
            rate: last_rate,
            change: 0.0,
            branch: RateBranch::Steady,
        }
    } else {
        let d_rate = annualized(last_total_size - total_size, total_size);
        if d_rate > 1.0 {
            RateUpdate {
                rate: carve.floor_rate(),
                change: d_rate,
                branch: RateBranch::FloorReset,
            }
        } else {
            RateUpdate {
                rate: last_rate * (1.0 - d_rate),
                change: d_rate,
                branch: RateBranch::Decay,
            }
        }
    };

    debug!(
        last_total_size,
        total_size,
        last_rate,
        rate = update.rate,
        branch = ?update.branch,
        "reward rate updated"
    );
    Ok(update)
}
