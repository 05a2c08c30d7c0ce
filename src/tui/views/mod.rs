//! Dashboard views.
//!
//! Each view is a projection of `(Dataset, ViewState)` onto a region of the
//! frame. Views register what they drew in the frame's [`HitMap`] so the
//! interaction layer can resolve pointer events afterwards.
//!
//! [`HitMap`]: super::hit_map::HitMap

pub mod detail;
pub mod filter_bar;
pub mod help_panel;
pub mod portfolio_table;
pub mod scatter_panel;
