//! Property-based tests for the dashboard core
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `view_state_props`: sorting and filtering
//!   - Flipping the direction twice restores the sorted order
//!   - Ascending order is non-decreasing and stable on ties
//!   - Every visible row satisfies the active filters
//!   - The selection is always a visible row, or absent when none are
//!
//! - `chart_props`: chart geometry
//!   - Hover resolves to an in-range sample inside the plot, nothing outside
//!   - Line points span the plot from left to right
//!   - Bubble radii stay within the configured range
//!   - Hit-testing finds a bubble at its centre and nothing just past its edge
//!
//! ## Configuration
//!
//! proptest runs 256 cases per property by default; override with
//! `PROPTEST_CASES`.

mod chart_props;
mod view_state_props;
