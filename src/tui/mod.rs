//! Terminal dashboard: event loop, layout, views and chart widgets.

pub mod app;
pub mod events;
pub mod hit_map;
pub mod layout;
pub mod theme;
pub mod tooltip;
pub mod views;
pub mod widgets;
