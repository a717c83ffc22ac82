//! Test helpers shared across crates in the workspace.
//!
//! Provides temporary catalog directories and a `figment::Jail` wrapper for
//! configuration tests.

pub mod catalog;
pub mod figment;
