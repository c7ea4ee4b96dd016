//! Harness configuration.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::browser::BrowserConfig;
use crate::form::meeting_date;
use crate::locator::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
use crate::result::{HarnessError, HarnessResult};

/// Default address of the application under test
pub const DEFAULT_BASE_URL: &str = "http://localhost:9999";

/// Days added to today for a valid meeting date
pub const DEFAULT_DAY_OFFSET: u32 = 3;

/// Timeout for the success notification to appear (15 seconds)
pub const SUCCESS_TIMEOUT_MS: u64 = 15_000;

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "DELIVERY_BASE_URL";

/// Environment variable pointing at a chromium binary
pub const CHROMIUM_PATH_ENV: &str = "CHROMIUM_PATH";

/// Configuration shared by every scenario of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// URL the form is served from
    pub base_url: String,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Run without a visible window
    pub headless: bool,
    /// Chromium sandbox (disable for containers)
    pub sandbox: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Days added to today for the meeting date
    pub day_offset: u32,
    /// Timeout for field assertions
    pub assertion_timeout: Duration,
    /// Timeout for the success notification to appear
    pub success_timeout: Duration,
    /// Interval between polls
    pub poll_interval: Duration,
    /// City fixture on disk (None = bundled list)
    pub fixture_path: Option<PathBuf>,
    /// Seed for city selection (None = entropy)
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            viewport_width: 1920,
            viewport_height: 1080,
            headless: true,
            sandbox: true,
            chromium_path: None,
            day_offset: DEFAULT_DAY_OFFSET,
            assertion_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            success_timeout: Duration::from_millis(SUCCESS_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            fixture_path: None,
            seed: None,
        }
    }
}

impl HarnessConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `DELIVERY_BASE_URL` and `CHROMIUM_PATH`
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an environment lookup
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(path) = lookup(CHROMIUM_PATH_ENV).filter(|v| !v.is_empty()) {
            self.chromium_path = Some(path);
        }
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set the meeting date offset
    #[must_use]
    pub const fn with_day_offset(mut self, days: u32) -> Self {
        self.day_offset = days;
        self
    }

    /// Set the field assertion and success notification timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, assertion: Duration, success: Duration) -> Self {
        self.assertion_timeout = assertion;
        self.success_timeout = success;
        self
    }

    /// Set the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Load cities from a file instead of the bundled list
    #[must_use]
    pub fn with_fixture_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixture_path = Some(path.into());
        self
    }

    /// Seed city selection
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations no scenario could run with
    pub fn validate(&self) -> HarnessResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(HarnessError::ConfigError {
                message: format!("base URL must be http(s): {}", self.base_url),
            });
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(HarnessError::ConfigError {
                message: "viewport dimensions must be non-zero".to_string(),
            });
        }
        if self.poll_interval.is_zero() {
            return Err(HarnessError::ConfigError {
                message: "poll interval must be non-zero".to_string(),
            });
        }
        if meeting_date(Local::now().date_naive(), self.day_offset).is_none() {
            return Err(HarnessError::ConfigError {
                message: format!("day offset {} is past the last valid date", self.day_offset),
            });
        }
        Ok(())
    }

    /// Browser launch settings derived from this config
    #[must_use]
    pub fn browser_config(&self) -> BrowserConfig {
        let mut config = BrowserConfig::default()
            .with_viewport(self.viewport_width, self.viewport_height)
            .with_headless(self.headless);
        if !self.sandbox {
            config = config.with_no_sandbox();
        }
        if let Some(ref path) = self.chromium_path {
            config = config.with_chromium_path(path.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!((config.viewport_width, config.viewport_height), (1920, 1080));
        assert_eq!(config.day_offset, 3);
        assert_eq!(config.assertion_timeout, Duration::from_secs(10));
        assert_eq!(config.success_timeout, Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = HarnessConfig::default().with_env_overrides(|key| match key {
            BASE_URL_ENV => Some("http://127.0.0.1:7777".to_string()),
            CHROMIUM_PATH_ENV => Some("/usr/bin/chromium".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://127.0.0.1:7777");
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = HarnessConfig::default().with_env_overrides(|_| Some(String::new()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.chromium_path.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let err = HarnessConfig::default()
            .with_base_url("localhost:9999")
            .validate()
            .unwrap_err();
        assert!(matches!(err, HarnessError::ConfigError { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_viewport() {
        assert!(HarnessConfig::default()
            .with_viewport(0, 1080)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_day_offset_past_calendar_end() {
        let err = HarnessConfig::default()
            .with_day_offset(u32::MAX)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("day offset"));
        assert!(HarnessConfig::default()
            .with_day_offset(365)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_browser_config_mapping() {
        let browser = HarnessConfig::default()
            .with_headless(false)
            .with_no_sandbox()
            .with_chromium_path("/opt/chrome")
            .browser_config();
        assert!(!browser.headless);
        assert!(!browser.sandbox);
        assert_eq!(browser.viewport_width, 1920);
        assert_eq!(browser.chromium_path.as_deref(), Some("/opt/chrome"));
    }
}
