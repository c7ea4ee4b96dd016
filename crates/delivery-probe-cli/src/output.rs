//! Report rendering for scenario runs

use console::{style, Style};
use delivery_probe::{Scenario, SuiteResults};
use serde::Serialize;

use crate::commands::OutputFormat;
use crate::error::CliResult;

#[derive(Serialize)]
struct ScenarioRow {
    name: &'static str,
    skipped_field: Option<String>,
    outcome: &'static str,
}

#[derive(Serialize)]
struct Report<'a> {
    passed: bool,
    total: usize,
    passed_count: usize,
    failed_count: usize,
    duration_ms: u128,
    results: Vec<ResultRow<'a>>,
}

#[derive(Serialize)]
struct ResultRow<'a> {
    name: &'static str,
    passed: bool,
    error: Option<&'a str>,
    duration_ms: u128,
}

/// Render the list of available scenarios
pub fn render_scenarios(format: OutputFormat) -> CliResult<String> {
    let rows: Vec<ScenarioRow> = Scenario::ALL
        .into_iter()
        .map(|scenario| ScenarioRow {
            name: scenario.name(),
            skipped_field: scenario.skip_field().map(|f| f.to_string()),
            outcome: if scenario.skip_field().is_some() {
                "field error"
            } else {
                "success notification"
            },
        })
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => Ok(rows
            .iter()
            .map(|row| {
                format!(
                    "{:<26} {}",
                    style(row.name).bold(),
                    style(row.outcome).dim()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render the outcome of a suite run
pub fn render_results(results: &SuiteResults, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report(results))?),
        OutputFormat::Text => Ok(text_report(results)),
    }
}

fn report(results: &SuiteResults) -> Report<'_> {
    Report {
        passed: results.all_passed(),
        total: results.total(),
        passed_count: results.passed_count(),
        failed_count: results.failed_count(),
        duration_ms: results.duration.as_millis(),
        results: results
            .results
            .iter()
            .map(|r| ResultRow {
                name: r.scenario.name(),
                passed: r.passed,
                error: r.error.as_deref(),
                duration_ms: r.duration.as_millis(),
            })
            .collect(),
    }
}

fn text_report(results: &SuiteResults) -> String {
    let mut lines = Vec::with_capacity(results.total() + 2);
    for result in &results.results {
        let secs = result.duration.as_secs_f64();
        if result.passed {
            lines.push(format!(
                "{} {} ({secs:.2}s)",
                style("✓").green().bold(),
                result.scenario
            ));
        } else {
            lines.push(format!(
                "{} {} ({secs:.2}s)",
                style("✗").red().bold(),
                result.scenario
            ));
            if let Some(ref error) = result.error {
                lines.push(format!("    {}", style(error).red()));
            }
        }
    }

    let passed = Style::new().green().bold();
    let failed = Style::new().red().bold();
    let status = if results.all_passed() {
        passed.apply_to("PASSED")
    } else {
        failed.apply_to("FAILED")
    };
    lines.push(String::new());
    lines.push(format!(
        "{status} {} scenarios in {:.2}s ({} passed, {} failed)",
        results.total(),
        results.duration.as_secs_f64(),
        results.passed_count(),
        results.failed_count()
    ));
    lines.join("\n")
}
