//! Reference [`Carve`] implementations.
//!
//! The production carve is supplied by the network; these stand-ins keep the
//! simulator and tests self-contained.

use gwt_core::error::DomainError;
use gwt_core::traits::Carve;
use serde::{Deserialize, Serialize};

/// Passes the contribution through unchanged regardless of network size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatCarve {
    pub floor: f64,
}

impl Carve for FlatCarve {
    fn apportion(&self, rate: f64, _total_size: u64) -> Result<f64, DomainError> {
        DomainError::check_non_negative("rate", rate)
    }

    fn floor_rate(&self) -> f64 {
        self.floor
    }
}

/// Dilutes the contribution as the network grows: `rate * pivot / (pivot + total_size)`.
///
/// At `total_size == pivot` the rate is halved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeScaledCarve {
    pub pivot: u64,
    pub floor: f64,
}

impl Carve for SizeScaledCarve {
    fn apportion(&self, rate: f64, total_size: u64) -> Result<f64, DomainError> {
        let rate = DomainError::check_non_negative("rate", rate)?;
        let denom = self.pivot as f64 + total_size as f64;
        if denom == 0.0 {
            return Err(DomainError::DivisionByZero("carve pivot + total_size"));
        }
        Ok(rate * self.pivot as f64 / denom)
    }

    fn floor_rate(&self) -> f64 {
        self.floor
    }
}

/// Carve selection as it appears in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CarveConfig {
    Flat { floor: f64 },
    SizeScaled { pivot: u64, floor: f64 },
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self::Flat { floor: 0.0 }
    }
}

impl CarveConfig {
    pub fn build(&self) -> Result<Box<dyn Carve>, DomainError> {
        match *self {
            Self::Flat { floor } => {
                let floor = DomainError::check_non_negative("floor", floor)?;
                Ok(Box::new(FlatCarve { floor }))
            }
            Self::SizeScaled { pivot, floor } => {
                let floor = DomainError::check_non_negative("floor", floor)?;
                Ok(Box::new(SizeScaledCarve { pivot, floor }))
            }
        }
    }
}
