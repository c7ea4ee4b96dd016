//! Result and error types for the delivery form harness.

use thiserror::Error;

use crate::wait::RetryError;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can occur while driving the form
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched the selector
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    InputError {
        /// Error message
        message: String,
    },

    /// JavaScript evaluation error
    #[error("Evaluation failed: {message}")]
    EvaluationError {
        /// Error message
        message: String,
    },

    /// Fixture could not be loaded (fatal for the whole run)
    #[error("Fixture error: {message}")]
    FixtureError {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Error message
        message: String,
    },

    /// A bounded-wait expectation never held
    #[error("Expectation failed: {0}")]
    Expectation(#[from] RetryError),
}

impl HarnessError {
    /// Create a fixture error
    #[must_use]
    pub fn fixture(message: impl Into<String>) -> Self {
        Self::FixtureError {
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole run rather than a single scenario
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::FixtureError { .. } | Self::BrowserLaunchError { .. } | Self::ConfigError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fixture_error_is_fatal() {
        assert!(HarnessError::fixture("missing cities.json").is_fatal());
    }

    #[test]
    fn test_expectation_error_is_not_fatal() {
        let err = HarnessError::from(RetryError {
            message: "not visible".into(),
            attempts: 3,
            duration: Duration::from_millis(300),
            description: Some("city error".into()),
        });
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("city error"));
    }

    #[test]
    fn test_navigation_error_display() {
        let err = HarnessError::NavigationError {
            url: "http://localhost:9999".into(),
            message: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "Navigation to http://localhost:9999 failed: connection refused"
        );
    }
}
