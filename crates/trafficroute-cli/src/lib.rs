//! Traffic routing CLI library.
//!
//! Subcommand handlers, output formatting and logging setup shared by the
//! `trafficroute-cli` binary.

pub mod commands;
pub mod logging;
pub mod output;
