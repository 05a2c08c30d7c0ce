//! Crate-level test suites that span several modules.
//!
//! Unit tests live next to the code they exercise; this tree holds shared
//! builders, property tests and HTTP-backed integration tests.

mod common;
mod integration;
mod property;
