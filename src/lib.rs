//! Peer Observatory - portfolio crowding dashboard (TUI Edition)
//!
//! Core library providing the portfolio data model, one-shot dataset
//! loading, chart geometry and the terminal dashboard that renders them.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
