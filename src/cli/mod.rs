//! Command-line interface for orderstats.
//!
//! Provides the `report` pipeline command and a standalone `catalog`
//! inspection command.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, CatalogArgs, Cli, Commands, ReportArgs};
