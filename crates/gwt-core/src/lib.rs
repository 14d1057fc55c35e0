//! # gwt-core
//! Shared types, constants and collaborator traits for the GWT economic model.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
