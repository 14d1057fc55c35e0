//! Withdrawal settlement between the system, the daemon and the supplier.
//!
//! For a usage window `[last_withdraw, now]`:
//!
//! 1. The renter owes `income = price * size * elapsed`.
//! 2. The reward rate at each end of the window is the carve of
//!    `price * guarantee_ratio * reward_rate` over the network's total size.
//! 3. The window's reward is the trapezoidal integral of that rate over
//!    `elapsed * size`.
//! 4. The reward is split between daemon and supply in proportion to
//!    `daemon_rate : supply_rate * guarantee_ratio` (each averaged over the window).
//!    The system keeps whatever the split leaves.
//! 5. Deltas: system `+ system_income - income`, daemon `+ daemon_reward`,
//!    supply `+ supply_reward + income`.
//!
//! The income moves from system to supply, so the three deltas always sum to
//! the reward minted for the window.

use gwt_core::error::{DomainError, SettlementError};
use gwt_core::traits::{Carve, SystemStateSource};
use gwt_core::types::{BalanceDelta, Ledger, Order, Settlement, SystemState, Usage};
use tracing::{debug, info};

fn endpoint_reward_rate<C: Carve + ?Sized>(
    order: &Order,
    state: &SystemState,
    carve: &C,
) -> Result<f64, DomainError> {
    carve.apportion(
        order.price * order.guarantee_ratio * state.reward_rate,
        state.total_size,
    )
}

/// Settle `usage` under `order` up to `now` without touching any balances.
pub fn compute_settlement<S, C>(
    order: &Order,
    usage: &Usage,
    now: u64,
    states: &S,
    carve: &C,
) -> Result<Settlement, SettlementError>
where
    S: SystemStateSource + ?Sized,
    C: Carve + ?Sized,
{
    order.validate()?;
    let elapsed = usage.elapsed(now)?;
    let start = states.system_state(usage.last_withdraw)?;
    let end = states.system_state(now)?;
    start.validate()?;
    end.validate()?;

    let span = elapsed as f64;
    let size = usage.size as f64;
    let income = order.price * size * span;

    let start_reward_rate = endpoint_reward_rate(order, &start, carve)?;
    let end_reward_rate = endpoint_reward_rate(order, &end, carve)?;
    let reward = span * size * (end_reward_rate + start_reward_rate) / 2.0;

    let daemon_rate = (start.daemon_rate + end.daemon_rate) / 2.0;
    let supply_weight = (start.supply_rate + end.supply_rate) / 2.0 * order.guarantee_ratio;
    let weight_total = daemon_rate + supply_weight;
    if weight_total == 0.0 {
        return Err(
            DomainError::DivisionByZero("daemon_rate + supply_rate * guarantee_ratio").into(),
        );
    }
    let daemon_reward = reward * (daemon_rate / weight_total);
    let supply_reward = reward * (supply_weight / weight_total);
    let system_income = reward - daemon_reward - supply_reward;

    let delta = BalanceDelta {
        system: system_income - income,
        daemon: daemon_reward,
        supply: supply_reward + income,
    };

    debug!(
        elapsed,
        income,
        reward,
        daemon_reward,
        supply_reward,
        system_income,
        "settlement computed"
    );

    Ok(Settlement {
        elapsed,
        income,
        start_reward_rate,
        end_reward_rate,
        reward,
        daemon_reward,
        supply_reward,
        system_income,
        delta,
    })
}

/// Settles usage against injected state and carve collaborators.
pub struct SettlementEngine<S, C> {
    states: S,
    carve: C,
}

impl<S: SystemStateSource, C: Carve> SettlementEngine<S, C> {
    pub fn new(states: S, carve: C) -> Self {
        Self { states, carve }
    }

    /// Compute the settlement for `usage` up to `now`.
    pub fn settle(
        &self,
        order: &Order,
        usage: &Usage,
        now: u64,
    ) -> Result<Settlement, SettlementError> {
        compute_settlement(order, usage, now, &self.states, &self.carve)
    }

    /// Settle, credit `ledger`, and move `usage.last_withdraw` to `now`.
    ///
    /// On error neither the ledger nor the usage record is modified.
    pub fn withdraw(
        &self,
        order: &Order,
        usage: &mut Usage,
        now: u64,
        ledger: &mut Ledger,
    ) -> Result<Settlement, SettlementError> {
        let settlement = self.settle(order, usage, now)?;
        ledger.apply(&settlement.delta);
        usage.last_withdraw = now;
        info!(
            now,
            reward = settlement.reward,
            income = settlement.income,
            "withdrawal settled"
        );
        Ok(settlement)
    }
}
