//! Model types: storage orders, usage records, system snapshots and balances.
//!
//! Sizes and timestamps are `u64`; prices, ratios and rates are `f64`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A 32-byte identifier of a stored data item.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(try_from = "String", into = "String")]
pub struct MixHash(pub [u8; 32]);

impl MixHash {
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Display for MixHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for MixHash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| format!("invalid mix hash: {e}"))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| format!("mix hash must be 32 bytes, got {}", v.len()))?;
        Ok(Self(arr))
    }
}

impl TryFrom<String> for MixHash {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MixHash> for String {
    fn from(h: MixHash) -> Self {
        h.to_string()
    }
}

/// A storage order between a daemon and a supplier.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    /// Currency per unit size per unit time.
    pub price: f64,
    /// Collateral multiplier locked relative to `price`.
    pub guarantee_ratio: f64,
    /// Ordered capacity in bytes.
    pub size: u64,
}

impl Order {
    pub fn validate(&self) -> Result<(), DomainError> {
        DomainError::check_non_negative("price", self.price)?;
        DomainError::check_non_negative("guarantee_ratio", self.guarantee_ratio)?;
        Ok(())
    }
}

/// Capacity consumed under an order and the time it was last settled.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Usage {
    pub size: u64,
    pub last_withdraw: u64,
}

impl Usage {
    /// Seconds elapsed between the last settlement and `now`.
    pub fn elapsed(&self, now: u64) -> Result<u64, DomainError> {
        now.checked_sub(self.last_withdraw).ok_or(DomainError::TimeReversed {
            last: self.last_withdraw,
            now,
        })
    }
}

/// Network-wide state at one point in time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SystemState {
    /// Aggregate network capacity in bytes.
    pub total_size: u64,
    /// Per-unit reward rate.
    pub reward_rate: f64,
    pub daemon_rate: f64,
    pub supply_rate: f64,
}

impl SystemState {
    pub fn validate(&self) -> Result<(), DomainError> {
        DomainError::check_non_negative("reward_rate", self.reward_rate)?;
        DomainError::check_non_negative("daemon_rate", self.daemon_rate)?;
        DomainError::check_non_negative("supply_rate", self.supply_rate)?;
        Ok(())
    }
}

/// Additive changes to the three balances produced by one settlement.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct BalanceDelta {
    pub system: f64,
    pub daemon: f64,
    pub supply: f64,
}

impl BalanceDelta {
    /// Net amount created by the settlement.
    pub fn total(&self) -> f64 {
        self.system + self.daemon + self.supply
    }
}

/// System, daemon and supply balances.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Ledger {
    pub system: f64,
    pub daemon: f64,
    pub supply: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, delta: &BalanceDelta) {
        self.system += delta.system;
        self.daemon += delta.daemon;
        self.supply += delta.supply;
    }

    pub fn total(&self) -> f64 {
        self.system + self.daemon + self.supply
    }
}

/// Breakdown of a single withdrawal.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settlement {
    pub elapsed: u64,
    /// Rent owed by the renter for the window.
    pub income: f64,
    pub start_reward_rate: f64,
    pub end_reward_rate: f64,
    /// Reward minted for the window (trapezoidal integral of the reward rate).
    pub reward: f64,
    pub daemon_reward: f64,
    pub supply_reward: f64,
    pub system_income: f64,
    pub delta: BalanceDelta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ------------------------------------------------------------------
    // MixHash
    // ------------------------------------------------------------------

    #[test]
    fn mix_hash_hex_roundtrip() {
        let h = MixHash([0xab; 32]);
        let parsed: MixHash = h.to_string().parse().unwrap();
        assert_eq!(parsed, h);
    }

    #[test]
    fn mix_hash_accepts_0x_prefix() {
        let s = format!("0x{}", "11".repeat(32));
        let h: MixHash = s.parse().unwrap();
        assert_eq!(h, MixHash([0x11; 32]));
    }

    #[test]
    fn mix_hash_rejects_short_input() {
        let err = "abcd".parse::<MixHash>().unwrap_err();
        assert!(err.contains("32 bytes"), "{err}");
    }

    proptest! {
        #[test]
        fn mix_hash_parses_its_display(bytes in prop::array::uniform32(any::<u8>())) {
            let h = MixHash(bytes);
            prop_assert_eq!(h.to_string().parse::<MixHash>().unwrap(), h);
            prop_assert_eq!(format!("0x{h}").parse::<MixHash>().unwrap(), h);
        }

        #[test]
        fn elapsed_is_checked_difference(last in any::<u64>(), now in any::<u64>()) {
            let usage = Usage { size: 0, last_withdraw: last };
            match usage.elapsed(now) {
                Ok(e) => prop_assert_eq!(e, now - last),
                Err(err) => {
                    prop_assert!(now < last);
                    prop_assert_eq!(err, DomainError::TimeReversed { last, now });
                }
            }
        }
    }

    #[test]
    fn mix_hash_serializes_as_string() {
        let json = serde_json::to_string(&MixHash::ZERO).unwrap();
        assert_eq!(json, format!("\"{}\"", "00".repeat(32)));
    }

    // ------------------------------------------------------------------
    // Order / Usage / SystemState
    // ------------------------------------------------------------------

    #[test]
    fn order_rejects_negative_price() {
        let order = Order { price: -1.0, guarantee_ratio: 1.0, size: 10 };
        assert!(matches!(
            order.validate(),
            Err(DomainError::NegativeValue { name: "price", .. })
        ));
    }

    #[test]
    fn usage_elapsed() {
        let usage = Usage { size: 1, last_withdraw: 100 };
        assert_eq!(usage.elapsed(160), Ok(60));
        assert_eq!(usage.elapsed(100), Ok(0));
        assert_eq!(
            usage.elapsed(99),
            Err(DomainError::TimeReversed { last: 100, now: 99 })
        );
    }

    #[test]
    fn system_state_rejects_nan_rate() {
        let state = SystemState {
            total_size: 1,
            reward_rate: f64::NAN,
            daemon_rate: 1.0,
            supply_rate: 1.0,
        };
        assert!(state.validate().is_err());
    }

    // ------------------------------------------------------------------
    // Ledger
    // ------------------------------------------------------------------

    #[test]
    fn ledger_apply_accumulates() {
        let mut ledger = Ledger::new();
        let delta = BalanceDelta { system: -2.0, daemon: 1.0, supply: 3.0 };
        ledger.apply(&delta);
        ledger.apply(&delta);
        assert_eq!(ledger, Ledger { system: -4.0, daemon: 2.0, supply: 6.0 });
        assert_eq!(ledger.total(), 2.0 * delta.total());
    }
}
