//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use delivery_probe::{Scenario, BASE_URL_ENV, CHROMIUM_PATH_ENV, DEFAULT_DAY_OFFSET};
use std::path::PathBuf;

/// delivery-probe: end-to-end scenarios for the card delivery booking form
#[derive(Parser, Debug)]
#[command(name = "delivery-probe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against the live form in chromium
    Run(RunArgs),

    /// List available scenarios
    Scenarios(ScenariosArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Scenario to run (repeatable; default: all)
    #[arg(short, long = "scenario", value_name = "NAME")]
    pub scenarios: Vec<Scenario>,

    /// URL of the form under test
    #[arg(long, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// JSON file with the valid city list
    #[arg(long, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Disable the chromium sandbox (containers, CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Chromium executable
    #[arg(long, env = CHROMIUM_PATH_ENV, value_name = "PATH")]
    pub chromium_path: Option<String>,

    /// Seed for random city selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Days from today for the meeting date
    #[arg(long, default_value_t = DEFAULT_DAY_OFFSET)]
    pub day_offset: u32,

    /// Assertion timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Success notification timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub success_timeout: Option<u64>,

    /// Stop after the first failing scenario
    #[arg(long)]
    pub fail_fast: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the scenarios command
#[derive(Parser, Debug)]
pub struct ScenariosArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Report format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON document on stdout
    Json,
}

/// Color choice argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorArg {
    /// Apply to the process-wide console settings
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => {
                console::set_colors_enabled(true);
                console::set_colors_enabled_stderr(true);
            }
            Self::Never => {
                console::set_colors_enabled(false);
                console::set_colors_enabled_stderr(false);
            }
        }
    }
}
