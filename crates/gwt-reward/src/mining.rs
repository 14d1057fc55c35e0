//! GWT mining curve.
//!
//! `mine_gwt(x) = 0.2 + 1.8x / (x + 1)` where `x` is the network's capacity
//! growth ratio. The curve starts at 0.2, passes 1.1 at `x = 1` and
//! approaches 2.0. Growth of 2% or less is treated as exactly 2%.

use gwt_core::constants::{MINE_FLOOR, MINE_SPAN, MIN_GROWTH_RATIO};
use gwt_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Mining multiplier for growth ratio `x`.
///
/// # Examples
///
/// ```
/// use gwt_reward::mining::mine_gwt;
/// assert_eq!(mine_gwt(0.0).unwrap(), 0.2);
/// assert!((mine_gwt(1.0).unwrap() - 1.1).abs() < 1e-12);
/// ```
pub fn mine_gwt(x: f64) -> Result<f64, DomainError> {
    let x = DomainError::check_non_negative("growth ratio", x)?;
    Ok(MINE_FLOOR + (MINE_SPAN * x) / (x + 1.0))
}

/// Growth ratio between two capacity readings, floored at 2%.
pub fn growth_ratio(last_size: u64, this_size: u64) -> Result<f64, DomainError> {
    if last_size == 0 {
        return Err(DomainError::DivisionByZero("last_size"));
    }
    let (last, this) = (last_size as f64, this_size as f64);
    if this > last * (1.0 + MIN_GROWTH_RATIO) {
        Ok(this / last - 1.0)
    } else {
        Ok(MIN_GROWTH_RATIO)
    }
}

/// Mining multiplier for capacity moving from `last_size` to `this_size`.
pub fn reward_ratio(last_size: u64, this_size: u64) -> Result<f64, DomainError> {
    mine_gwt(growth_ratio(last_size, this_size)?)
}

/// One point of [`mine_curve`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CurveSample {
    pub x: f64,
    pub value: f64,
}

/// Samples `mine_gwt` from 0 while below `until`, adding `step` to `x` each time.
///
/// `x` accumulates rounding error, so `(0.1, 10.0)` yields 101 samples, the
/// last at `x = 9.99999999999998`.
pub fn mine_curve(step: f64, until: f64) -> Result<Vec<CurveSample>, DomainError> {
    let step = DomainError::check_positive("step", step)?;
    let until = DomainError::check_non_negative("until", until)?;
    let mut samples = Vec::new();
    let mut x = 0.0f64;
    while x < until {
        samples.push(CurveSample {
            x,
            value: mine_gwt(x)?,
        });
        let next = x + step;
        // step below the precision of x
        if next <= x {
            break;
        }
        x = next;
    }
    Ok(samples)
}

/// One point of [`ratio_sweep`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RatioSample {
    pub last_size: u64,
    pub this_size: u64,
    pub ratio: f64,
}

/// Grows capacity from `start` by `step` bytes at a time while below `until`,
/// evaluating [`reward_ratio`] for each increment.
pub fn ratio_sweep(start: u64, step: u64, until: u64) -> Result<Vec<RatioSample>, DomainError> {
    if step == 0 {
        return Err(DomainError::NonPositive {
            name: "step",
            value: 0.0,
        });
    }
    let mut samples = Vec::new();
    let mut size = start;
    while size < until {
        let next = size.saturating_add(step);
        samples.push(RatioSample {
            last_size: size,
            this_size: next,
            ratio: reward_ratio(size, next)?,
        });
        size = next;
    }
    Ok(samples)
}
