//! # gwt-reward: Mining curve, settlement and reward-rate evolution.
//!
//! - [`mining`]: `mine_gwt` saturating curve and the capacity growth ratio feeding it
//! - [`settlement`]: time-weighted withdrawal split between system, daemon and supply
//! - [`rate`]: network reward-rate update from two capacity readings
//! - [`ledger`]: mutex-guarded balances for concurrent settlement
//! - [`carve`], [`history`]: reference collaborators for the simulator and tests

pub mod carve;
pub mod history;
pub mod ledger;
pub mod mining;
pub mod rate;
pub mod settlement;

pub use carve::{CarveConfig, FlatCarve, SizeScaledCarve};
pub use history::{SnapshotHistory, TimedSnapshot};
pub use ledger::SharedLedger;
pub use mining::{mine_gwt, reward_ratio};
pub use rate::{RateBranch, RateUpdate, calc_reward_rate};
pub use settlement::{SettlementEngine, compute_settlement};
