//! Collaborator interfaces the formulas depend on but do not define.
//!
//! - [`SystemStateSource`]: network snapshots by timestamp (gwt-reward provides `SnapshotHistory`)
//! - [`Carve`]: apportions a rate contribution by total network size
//! - [`PointSource`]: per-chain show points of a data item (gwt-score provides `FixedPoints`)

use crate::error::{DomainError, ScoreError, SettlementError};
use crate::types::{MixHash, SystemState};

/// Point-in-time view of network state.
pub trait SystemStateSource: Send + Sync {
    /// Snapshot in effect at `timestamp`.
    fn system_state(&self, timestamp: u64) -> Result<SystemState, SettlementError>;
}

/// Apportionment of a rate contribution across the network's total size.
///
/// Implementations must be monotonic in `rate`.
pub trait Carve: Send + Sync {
    /// Per-unit rate for a contribution of `rate` when the network holds `total_size` bytes.
    fn apportion(&self, rate: f64, total_size: u64) -> Result<f64, DomainError>;

    /// Rate a network falls back to after a collapse (the carve evaluated at zero).
    fn floor_rate(&self) -> f64;
}

/// Show points a data item earned on one chain.
pub trait PointSource: Send + Sync {
    /// Short label used in logs and errors (e.g. "eth").
    fn name(&self) -> &str;

    fn points(&self, mix_hash: &MixHash) -> Result<u64, ScoreError>;
}

impl<T: SystemStateSource + ?Sized> SystemStateSource for &T {
    fn system_state(&self, timestamp: u64) -> Result<SystemState, SettlementError> {
        (**self).system_state(timestamp)
    }
}

impl<T: Carve + ?Sized> Carve for &T {
    fn apportion(&self, rate: f64, total_size: u64) -> Result<f64, DomainError> {
        (**self).apportion(rate, total_size)
    }

    fn floor_rate(&self) -> f64 {
        (**self).floor_rate()
    }
}

impl<T: Carve + ?Sized> Carve for Box<T> {
    fn apportion(&self, rate: f64, total_size: u64) -> Result<f64, DomainError> {
        (**self).apportion(rate, total_size)
    }

    fn floor_rate(&self) -> f64 {
        (**self).floor_rate()
    }
}
