//! Shared test utilities for git-sim
//!
//! Fixtures build simulators in known states; assertions wrap the
//! `predicates` checks used across the integration tests.

pub mod assertions;
pub mod fixtures;
