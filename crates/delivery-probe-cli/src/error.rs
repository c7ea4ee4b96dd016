//! Error types for the CLI

use delivery_probe::HarnessError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that abort a CLI run before or outside scenario execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Harness setup error (config, fixture, browser launch)
    #[error("{0}")]
    Harness(#[from] HarnessError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error("Report generation failed: {0}")]
    Report(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_error_passes_through() {
        let err: CliError = HarnessError::fixture("empty city list").into();
        assert_eq!(err.to_string(), "Fixture error: empty city list");
    }

    #[test]
    fn test_config_error() {
        assert!(CliError::config("bad").to_string().contains("bad"));
    }
}
