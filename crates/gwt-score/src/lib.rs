//! # gwt-score: Data scoring, experience and level progression.
//!
//! Everything here is a pure formula or a lookup over immutable tables:
//! - **Logistic curves**: the basic score (by data size) and the basic rate
//!   (by data point count) are both shifted logistic functions.
//! - **Size multiplier**: piecewise-linear over four size bands.
//! - **Experience**: `1 + 8 * points`, with points gathered from one or more
//!   weighted per-chain [`PointSource`](gwt_core::traits::PointSource)s.
//! - **Levels**: 20 half-open experience bins mapped to a daily income table.

pub mod experience;
pub mod level;
pub mod logistic;
pub mod scoring;

pub use experience::{ExperienceCalculator, FixedPoints, experience_from_points};
pub use level::{
    INCOME_TABLE, IncomeTable, LEVEL_TABLE, LevelRow, LevelTable, daily_income_for_exp, level_rows,
};
pub use scoring::{basic_rate, basic_score, composite_score, rate_by_size};
