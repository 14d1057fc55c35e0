//! Shared test helpers for integration tests.

use gwt_core::error::EconError;
use gwt_core::traits::Carve;
use gwt_core::types::{MixHash, Order, SystemState};
use gwt_reward::history::SnapshotHistory;
use gwt_reward::rate::calc_reward_rate;

/// Mix hash whose bytes are all `seed`.
pub fn mix(seed: u8) -> MixHash {
    MixHash([seed; 32])
}

pub fn order(price: f64, guarantee_ratio: f64, size: u64) -> Order {
    Order {
        price,
        guarantee_ratio,
        size,
    }
}

/// Build a snapshot history from capacity readings taken every `interval`
/// seconds, evolving the reward rate between readings.
///
/// The first reading starts at `initial_rate`; daemon and supply rates are fixed.
pub fn evolve_history<C: Carve>(
    capacities: &[u64],
    interval: u64,
    initial_rate: f64,
    daemon_rate: f64,
    supply_rate: f64,
    carve: &C,
) -> Result<SnapshotHistory, EconError> {
    let mut history = SnapshotHistory::new();
    let mut rate = initial_rate;
    for (i, &total_size) in capacities.iter().enumerate() {
        if i > 0 {
            rate = calc_reward_rate(capacities[i - 1], total_size, rate, carve)?.rate;
        }
        let state = SystemState {
            total_size,
            reward_rate: rate,
            daemon_rate,
            supply_rate,
        };
        history.record(i as u64 * interval, state)?;
    }
    Ok(history)
}

/// Approximate float equality scaled to the magnitudes involved.
pub fn approx_eq(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= 1e-9 * scale.abs().max(1.0)
}
