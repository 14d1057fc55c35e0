//! In-memory [`SystemStateSource`] backed by timestamped snapshots.
//!
//! A snapshot stays in effect until the next one, so a lookup at `t` returns
//! the latest snapshot recorded at or before `t`.

use std::collections::BTreeMap;

use gwt_core::error::SettlementError;
use gwt_core::traits::SystemStateSource;
use gwt_core::types::SystemState;
use serde::{Deserialize, Serialize};

/// A snapshot paired with the time it was taken.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimedSnapshot {
    pub timestamp: u64,
    #[serde(flatten)]
    pub state: SystemState,
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotHistory {
    snapshots: BTreeMap<u64, SystemState>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from snapshots in any order. A later entry replaces an earlier one
    /// with the same timestamp.
    pub fn from_snapshots(
        snapshots: impl IntoIterator<Item = TimedSnapshot>,
    ) -> Result<Self, SettlementError> {
        let mut history = Self::new();
        for snap in snapshots {
            history.record(snap.timestamp, snap.state)?;
        }
        Ok(history)
    }

    pub fn record(&mut self, timestamp: u64, state: SystemState) -> Result<(), SettlementError> {
        state.validate()?;
        self.snapshots.insert(timestamp, state);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Most recent snapshot, if any.
    pub fn latest(&self) -> Option<(u64, &SystemState)> {
        self.snapshots.iter().next_back().map(|(t, s)| (*t, s))
    }
}

impl SystemStateSource for SnapshotHistory {
    fn system_state(&self, timestamp: u64) -> Result<SystemState, SettlementError> {
        self.snapshots
            .range(..=timestamp)
            .next_back()
            .map(|(_, state)| state.clone())
            .ok_or(SettlementError::MissingSnapshot(timestamp))
    }
}
