//! Domain layer: portfolio records, loading, formatting, view state and
//! chart geometry. Nothing in here knows about the terminal.

pub mod chart;
pub mod data_source;
pub mod fixtures;
pub mod format;
pub mod logging;
pub mod model;
pub mod tooltips;
pub mod view_state;
