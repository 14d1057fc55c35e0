//! Integration test suite for the GWT economic model.
//!
//! Tests here drive several crates together: the scoring pipeline from chain
//! points to daily income, and multi-window settlement over a network whose
//! reward rate evolves with its capacity.

pub mod helpers;
