//! Common Test Utilities
//!
//! Shared builders for portfolios and datasets used across test modules.

pub mod fixtures;

pub use fixtures::*;
