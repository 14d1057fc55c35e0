//! Error types for the GWT economic model.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{name} must be non-negative, got {value}")] NegativeValue { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")] NonFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")] NonPositive { name: &'static str, value: f64 },
    #[error("division by zero: {0}")] DivisionByZero(&'static str),
    #[error("time reversed: now {now} is before last withdrawal {last}")] TimeReversed { last: u64, now: u64 },
}

impl DomainError {
    /// Reject NaN, infinities and negative values for a named input.
    ///
    /// ```
    /// use gwt_core::error::DomainError;
    /// assert!(DomainError::check_non_negative("price", 1.5).is_ok());
    /// assert!(DomainError::check_non_negative("price", -0.1).is_err());
    /// ```
    pub fn check_non_negative(name: &'static str, value: f64) -> Result<f64, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::NonFinite { name, value });
        }
        if value < 0.0 {
            return Err(DomainError::NegativeValue { name, value });
        }
        Ok(value)
    }

    /// Like [`check_non_negative`](Self::check_non_negative) but also rejects zero.
    pub fn check_positive(name: &'static str, value: f64) -> Result<f64, DomainError> {
        Self::check_non_negative(name, value)?;
        if value == 0.0 {
            return Err(DomainError::NonPositive { name, value });
        }
        Ok(value)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("experience {0} is below the first level bin")] ExperienceBelowTable(u64),
    #[error("point source {source_name}: {reason}")] PointSource { source_name: String, reason: String },
    #[error(transparent)] Domain(#[from] DomainError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("no system state snapshot at or before {0}")] MissingSnapshot(u64),
    #[error(transparent)] Domain(#[from] DomainError),
}

#[derive(Error, Debug)]
pub enum EconError {
    #[error(transparent)] Domain(#[from] DomainError),
    #[error(transparent)] Score(#[from] ScoreError),
    #[error(transparent)] Settlement(#[from] SettlementError),
}
