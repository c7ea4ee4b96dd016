//! Polling assertions on located elements.
//!
//! ```ignore
//! expect(Locator::new(".notification__title").with_timeout(Duration::from_secs(15)))
//!     .to_be_visible()
//!     .verify(&page)
//!     .await?;
//! ```
//!
//! Text conditions match case-insensitively on whitespace-normalized text
//! and succeed when the expected text is a substring of the rendered text.

use std::time::Duration;
use tracing::debug;

use crate::driver::PageDriver;
use crate::locator::{Locator, DEFAULT_POLL_INTERVAL_MS};
use crate::result::HarnessResult;
use crate::wait::{poll_until, AssertionCheckResult, RetryConfig, RetryResult};

/// Condition checked against one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Element exists and is rendered
    Visible,
    /// Rendered text contains the expected text
    ContainsText(String),
    /// Input value contains the expected value
    HasValue(String),
}

impl Condition {
    /// Short description used in failure messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Visible => "be visible".to_string(),
            Self::ContainsText(text) => format!("have text '{text}'"),
            Self::HasValue(value) => format!("have value '{value}'"),
        }
    }

    async fn check<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        locator: &Locator,
    ) -> HarnessResult<AssertionCheckResult> {
        let selector = locator.selector();
        let outcome = match self {
            Self::Visible => {
                if driver.is_visible(selector).await? {
                    AssertionCheckResult::Pass
                } else {
                    AssertionCheckResult::Fail(format!("{selector} is not visible"))
                }
            }
            Self::ContainsText(expected) => match driver.text_content(selector).await? {
                Some(actual) if text_matches(&actual, expected) => AssertionCheckResult::Pass,
                Some(actual) => AssertionCheckResult::Fail(format!(
                    "{selector} has text '{actual}', expected '{expected}'"
                )),
                None => AssertionCheckResult::Fail(format!("{selector} not found")),
            },
            Self::HasValue(expected) => match driver.input_value(selector).await? {
                Some(actual) if actual.contains(expected.as_str()) => AssertionCheckResult::Pass,
                Some(actual) => AssertionCheckResult::Fail(format!(
                    "{selector} has value '{actual}', expected '{expected}'"
                )),
                None => AssertionCheckResult::Fail(format!("{selector} not found")),
            },
        };
        Ok(outcome)
    }
}

/// Collapse whitespace runs and lowercase
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether `actual` contains `expected` under [`normalize_text`]
#[must_use]
pub fn text_matches(actual: &str, expected: &str) -> bool {
    normalize_text(actual).contains(&normalize_text(expected))
}

/// Assertion builder for a locator
#[derive(Debug, Clone)]
pub struct Expect {
    locator: Locator,
}

impl Expect {
    /// Create a new expectation for a locator
    #[must_use]
    pub const fn new(locator: Locator) -> Self {
        Self { locator }
    }

    /// Assert the element is visible
    #[must_use]
    pub fn to_be_visible(&self) -> Expectation {
        self.with_condition(Condition::Visible)
    }

    /// Assert the element's text contains `text`
    #[must_use]
    pub fn to_have_text(&self, text: impl Into<String>) -> Expectation {
        self.with_condition(Condition::ContainsText(text.into()))
    }

    /// Assert the input's value contains `value`
    #[must_use]
    pub fn to_have_value(&self, value: impl Into<String>) -> Expectation {
        self.with_condition(Condition::HasValue(value.into()))
    }

    fn with_condition(&self, condition: Condition) -> Expectation {
        Expectation {
            locator: self.locator.clone(),
            condition,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// One condition bound to a locator, ready to be polled
#[derive(Debug, Clone)]
pub struct Expectation {
    locator: Locator,
    condition: Condition,
    poll_interval: Duration,
}

impl Expectation {
    /// Override the locator's timeout for this expectation
    #[must_use]
    pub fn within(mut self, timeout: Duration) -> Self {
        self.locator = self.locator.with_timeout(timeout);
        self
    }

    /// Set the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The condition being asserted
    #[must_use]
    pub const fn condition(&self) -> &Condition {
        &self.condition
    }

    /// The locator being asserted on
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Human-readable description of the expectation
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "{} should {}",
            self.locator.selector(),
            self.condition.describe()
        )
    }

    /// Poll until the condition holds or the timeout elapses.
    ///
    /// Driver errors during a poll count as a failed attempt.
    pub async fn verify<D: PageDriver + ?Sized>(&self, driver: &D) -> HarnessResult<RetryResult> {
        let config =
            RetryConfig::new(self.locator.timeout()).with_poll_interval(self.poll_interval);
        let description = self.description();
        debug!(
            expectation = %description,
            timeout_ms = config.timeout.as_millis() as u64,
            "polling"
        );

        let result = poll_until(config, Some(description.as_str()), move || async move {
            match self.condition.check(driver, &self.locator).await {
                Ok(outcome) => outcome,
                Err(e) => AssertionCheckResult::Fail(e.to_string()),
            }
        })
        .await?;

        debug!(expectation = %description, attempts = result.attempts, "satisfied");
        Ok(result)
    }
}

/// Create an expectation builder for a locator
#[must_use]
pub fn expect(locator: impl Into<Locator>) -> Expect {
    Expect::new(locator.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Selector;
    use crate::mock::{MockElement, MockPage};
    use crate::result::HarnessError;

    const FAST: Duration = Duration::from_millis(5);

    mod text_matching {
        use super::*;

        #[test]
        fn test_substring_match() {
            assert!(text_matches("Телефон указан неверно.", "Телефон указан неверно"));
        }

        #[test]
        fn test_case_insensitive() {
            assert!(text_matches("УСПЕШНО", "Успешно"));
        }

        #[test]
        fn test_whitespace_normalized() {
            assert!(text_matches(
                "Встреча  успешно\nзабронирована на 21.10.2026",
                "Встреча успешно забронирована на 21.10.2026"
            ));
        }

        #[test]
        fn test_mismatch() {
            assert!(!text_matches("Успешно", "Ошибка"));
        }
    }

    mod verification {
        use super::*;

        #[tokio::test]
        async fn test_visible_passes() {
            let page = MockPage::new().with_element(
                Selector::css(".notification__title"),
                MockElement::visible().with_text("Успешно"),
            );
            let result = expect(Selector::css(".notification__title"))
                .to_be_visible()
                .within(Duration::from_millis(100))
                .with_poll_interval(FAST)
                .verify(&page)
                .await
                .unwrap();
            assert_eq!(result.attempts, 1);
        }

        #[tokio::test]
        async fn test_missing_element_times_out() {
            let page = MockPage::new();
            let err = expect(Selector::css(".notification__title"))
                .to_have_text("Успешно")
                .within(Duration::from_millis(30))
                .with_poll_interval(FAST)
                .verify(&page)
                .await
                .unwrap_err();
            match err {
                HarnessError::Expectation(retry) => {
                    assert!(retry.message.contains("not found"));
                    assert!(retry
                        .description
                        .unwrap()
                        .contains("should have text 'Успешно'"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn test_value_condition() {
            let date = Selector::placeholder("Дата встречи");
            let page = MockPage::new()
                .with_element(date.clone(), MockElement::visible().with_value("21.10.2026"));
            expect(date.clone())
                .to_have_value("21.10.2026")
                .within(Duration::from_millis(50))
                .with_poll_interval(FAST)
                .verify(&page)
                .await
                .unwrap();
            assert!(expect(date)
                .to_have_value("22.10.2026")
                .within(Duration::from_millis(20))
                .with_poll_interval(FAST)
                .verify(&page)
                .await
                .is_err());
        }

        #[test]
        fn test_description() {
            let expectation = expect(Selector::css("button.button")).to_be_visible();
            assert_eq!(expectation.description(), "css=button.button should be visible");
            assert_eq!(expectation.condition(), &Condition::Visible);
        }
    }
}
