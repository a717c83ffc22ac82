//! Library interface for the `yamleo` command-line tool.
//!
//! The binary is a thin wrapper: it parses [`cli::Cli`], installs logging,
//! loads [`config::Settings`] and hands both to [`commands::run`]. The
//! spreadsheet adapter and the unused-key audit live here so they can be
//! tested without spawning the binary.

pub mod audit;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs_helpers;
pub mod logging;
pub mod report;
pub mod spreadsheet;
