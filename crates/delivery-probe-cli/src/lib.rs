//! delivery-probe CLI library
//!
//! Argument parsing, report rendering and the `run` command, kept out of
//! `main.rs` so they can be unit tested.

#![warn(missing_docs)]

mod commands;
mod error;
mod output;
mod run;

pub use commands::{Cli, ColorArg, Commands, OutputFormat, RunArgs, ScenariosArgs};
pub use error::{CliError, CliResult};
pub use output::{render_results, render_scenarios};
pub use run::{build_config, finish, run_suite, selected_scenarios};
