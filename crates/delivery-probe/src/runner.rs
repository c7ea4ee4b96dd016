//! Suite runner: every scenario on its own fresh page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::context::FormContext;
use crate::driver::PageDriver;
use crate::harness::FormTestHarness;
use crate::result::HarnessResult;
use crate::scenario::Scenario;

/// Result of running a single scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario that ran
    pub scenario: Scenario,
    /// Whether it passed
    pub passed: bool,
    /// Error message if it failed
    pub error: Option<String>,
    /// Wall-clock duration
    pub duration: Duration,
}

impl ScenarioResult {
    /// Create a passing result
    #[must_use]
    pub const fn pass(scenario: Scenario, duration: Duration) -> Self {
        Self {
            scenario,
            passed: true,
            error: None,
            duration,
        }
    }

    /// Create a failing result
    #[must_use]
    pub fn fail(scenario: Scenario, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            scenario,
            passed: false,
            error: Some(error.into()),
            duration,
        }
    }
}

/// Results from running a list of scenarios
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteResults {
    /// Individual results, in run order
    pub results: Vec<ScenarioResult>,
    /// Total duration
    pub duration: Duration,
}

impl SuiteResults {
    /// Check if all scenarios passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Count passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Count failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Number of scenarios that ran
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Failed scenarios
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

/// Runs scenarios sequentially, each against a new driver
#[derive(Debug, Clone)]
pub struct SuiteRunner {
    context: Arc<FormContext>,
    today: Option<NaiveDate>,
    fail_fast: bool,
}

impl SuiteRunner {
    /// Create a runner over a loaded context
    #[must_use]
    pub const fn new(context: Arc<FormContext>) -> Self {
        Self {
            context,
            today: None,
            fail_fast: false,
        }
    }

    /// Pin the date meeting dates are computed from
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Stop after the first failing scenario
    #[must_use]
    pub const fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Run `scenarios`, obtaining a fresh page from `new_driver` for each.
    ///
    /// A failing scenario never affects the next one.
    pub async fn run<D, F, Fut>(&self, scenarios: &[Scenario], mut new_driver: F) -> SuiteResults
    where
        D: PageDriver,
        F: FnMut() -> Fut,
        Fut: Future<Output = HarnessResult<D>>,
    {
        let start = Instant::now();
        let mut results = Vec::with_capacity(scenarios.len());
        info!(count = scenarios.len(), "running scenarios");

        for &scenario in scenarios {
            let scenario_start = Instant::now();
            let outcome = match new_driver().await {
                Ok(driver) => self.run_one(scenario, driver).await,
                Err(e) => Err(e),
            };
            let elapsed = scenario_start.elapsed();

            let result = match outcome {
                Ok(()) => {
                    info!(%scenario, ms = elapsed.as_millis() as u64, "✓ passed");
                    ScenarioResult::pass(scenario, elapsed)
                }
                Err(e) => {
                    warn!(%scenario, error = %e, "✗ failed");
                    ScenarioResult::fail(scenario, e.to_string(), elapsed)
                }
            };
            let failed = !result.passed;
            results.push(result);
            if failed && self.fail_fast {
                break;
            }
        }

        let suite = SuiteResults {
            results,
            duration: start.elapsed(),
        };
        info!(
            passed = suite.passed_count(),
            failed = suite.failed_count(),
            ms = suite.duration.as_millis() as u64,
            "suite finished"
        );
        suite
    }

    /// Run `scenario` on `driver`, then close the page whatever the outcome
    async fn run_one<D: PageDriver>(&self, scenario: Scenario, driver: D) -> HarnessResult<()> {
        let mut harness = self.harness(driver);
        let outcome = harness.run_scenario(scenario).await;
        let mut driver = harness.into_driver();
        if let Err(e) = driver.close().await {
            warn!(%scenario, error = %e, "page did not close");
        }
        outcome
    }

    fn harness<D: PageDriver>(&self, driver: D) -> FormTestHarness<D> {
        let harness = FormTestHarness::new(Arc::clone(&self.context), driver);
        match self.today {
            Some(today) => harness.with_today(today),
            None => harness,
        }
    }
}
