//! delivery-probe: run the card delivery form scenarios
//!
//! ## Usage
//!
//! ```bash
//! delivery-probe scenarios                      # List scenarios
//! delivery-probe run                            # Run all scenarios
//! delivery-probe run -s invalid_city --headed   # One scenario, visible browser
//! delivery-probe run --format json > report.json
//! ```

use clap::Parser;
use delivery_probe_cli::{render_results, render_scenarios, run_suite, Cli, CliResult, Commands};
use std::process::ExitCode;

/// At least one scenario failed
const EXIT_SCENARIO_FAILED: u8 = 1;

/// Setup failed before any scenario could run
const EXIT_SETUP_FAILED: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_SCENARIO_FAILED),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_SETUP_FAILED)
        }
    }
}

fn run() -> CliResult<bool> {
    let cli = Cli::parse();
    cli.color.apply();
    let _ = delivery_probe::logging::init(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Scenarios(args) => {
            println!("{}", render_scenarios(args.format)?);
            Ok(true)
        }
        Commands::Run(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let results = runtime.block_on(run_suite(&args))?;
            println!("{}", render_results(&results, args.format)?);
            Ok(results.all_passed())
        }
    }
}
