//! The `run` command: launch chromium and execute the selected scenarios

use delivery_probe::{
    Browser, FormContext, HarnessConfig, HarnessResult, Scenario, SuiteResults, SuiteRunner,
};
use std::time::Duration;
use tracing::{info, warn};

use crate::commands::RunArgs;
use crate::error::{CliError, CliResult};

/// Map command-line arguments onto a harness configuration.
///
/// Starts from the environment so `DELIVERY_BASE_URL` and `CHROMIUM_PATH`
/// apply even when clap did not see them.
pub fn build_config(args: &RunArgs) -> CliResult<HarnessConfig> {
    let mut config = HarnessConfig::from_env()
        .with_headless(!args.headed)
        .with_day_offset(args.day_offset);

    if let Some(ref url) = args.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(ref path) = args.fixture {
        config = config.with_fixture_path(path.clone());
    }
    if args.no_sandbox {
        config = config.with_no_sandbox();
    }
    if let Some(ref path) = args.chromium_path {
        config = config.with_chromium_path(path.clone());
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let assertion = match args.timeout {
        Some(0) => return Err(CliError::config("--timeout must be greater than zero")),
        Some(ms) => Duration::from_millis(ms),
        None => config.assertion_timeout,
    };
    let success = match args.success_timeout {
        Some(0) => {
            return Err(CliError::config(
                "--success-timeout must be greater than zero",
            ))
        }
        Some(ms) => Duration::from_millis(ms),
        None => config.success_timeout,
    };
    Ok(config.with_timeouts(assertion, success))
}

/// Scenarios named on the command line, or all of them
pub fn selected_scenarios(args: &RunArgs) -> Vec<Scenario> {
    if args.scenarios.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        args.scenarios.clone()
    }
}

/// Execute the suite; setup failures are errors, scenario failures are results
pub async fn run_suite(args: &RunArgs) -> CliResult<SuiteResults> {
    let context = FormContext::load(build_config(args)?)?;
    let scenarios = selected_scenarios(args);

    let browser = Browser::launch(context.config().browser_config()).await?;
    let mut runner = SuiteRunner::new(context);
    if args.fail_fast {
        runner = runner.with_fail_fast();
    }

    let results = runner
        .run(&scenarios, || {
            let browser = browser.clone();
            async move { browser.new_page().await }
        })
        .await;

    Ok(finish(results, browser.close().await))
}

/// Scenario results stand even when chromium fails to shut down cleanly
pub fn finish(results: SuiteResults, closed: HarnessResult<()>) -> SuiteResults {
    match closed {
        Ok(()) => info!(passed = results.all_passed(), "browser closed"),
        Err(e) => warn!(error = %e, "browser did not close cleanly"),
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;
    use delivery_probe::{HarnessError, ScenarioResult};

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["delivery-probe", "run"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            Commands::Scenarios(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_flags_map_onto_config() {
        let args = run_args(&[
            "--base-url",
            "http://127.0.0.1:8080",
            "--headed",
            "--no-sandbox",
            "--chromium-path",
            "/usr/bin/chromium",
            "--seed",
            "11",
            "--day-offset",
            "5",
            "--timeout",
            "2000",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.day_offset, 5);
        assert_eq!(config.assertion_timeout, Duration::from_millis(2000));
        assert_eq!(config.success_timeout, Duration::from_millis(15_000));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = run_args(&["--timeout", "0"]);
        assert!(matches!(build_config(&args), Err(CliError::Config { .. })));
    }

    #[test]
    fn test_default_selection_is_all() {
        assert_eq!(selected_scenarios(&run_args(&[])), Scenario::ALL.to_vec());
        assert_eq!(
            selected_scenarios(&run_args(&["-s", "invalid_phone"])),
            vec![Scenario::InvalidPhone]
        );
    }

    #[test]
    fn test_close_failure_keeps_results() {
        let results = SuiteResults {
            results: vec![
                ScenarioResult::pass(Scenario::InvalidCity, Duration::from_millis(900)),
                ScenarioResult::fail(Scenario::InvalidName, "timed out", Duration::from_secs(10)),
            ],
            duration: Duration::from_secs(11),
        };
        let closed = Err(HarnessError::BrowserLaunchError {
            message: "connection closed".to_string(),
        });
        let kept = finish(results.clone(), closed);
        assert_eq!(kept, results);
        assert_eq!(kept.failed_count(), 1);
    }
}
