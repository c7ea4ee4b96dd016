//! delivery-probe: end-to-end harness for the card delivery booking form
//!
//! Drives a real Chromium page (feature `browser`) or a scripted
//! [`MockPage`] through five independent scenarios: four rejections, each
//! with exactly one defective field, and one successful booking.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌─────────────────┐    ┌──────────────────┐
//! │ SuiteRunner  │───►│ FormTestHarness │───►│ PageDriver       │
//! │ (scenarios)  │    │ (fill/submit/   │    │ CdpPage/MockPage │
//! │              │    │  expect)        │    │                  │
//! └──────────────┘    └─────────────────┘    └──────────────────┘
//!         ▲                    ▲
//!         └──── FormContext ───┘  (config + valid cities, shared)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use delivery_probe::{FormContext, HarnessConfig, MockPage, Scenario, SuiteRunner};
//!
//! # async fn run() -> delivery_probe::HarnessResult<()> {
//! let context = FormContext::load(HarnessConfig::from_env())?;
//! let results = SuiteRunner::new(context)
//!     .run(&Scenario::ALL, || async { Ok(MockPage::new()) })
//!     .await;
//! println!("{}/{} passed", results.passed_count(), results.total());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod browser;
mod config;
mod context;
mod driver;
mod expect;
mod fixture;
mod form;
mod harness;
mod locator;
/// Tracing subscriber setup
pub mod logging;
mod mock;
mod result;
mod runner;
mod scenario;
mod wait;

pub use browser::BrowserConfig;
#[cfg(feature = "browser")]
pub use browser::{Browser, CdpPage};
pub use config::{
    HarnessConfig, BASE_URL_ENV, CHROMIUM_PATH_ENV, DEFAULT_BASE_URL, DEFAULT_DAY_OFFSET,
    SUCCESS_TIMEOUT_MS,
};
pub use context::FormContext;
pub use driver::PageDriver;
pub use expect::{expect, normalize_text, text_matches, Condition, Expect, Expectation};
pub use fixture::ValidCities;
pub use form::{
    meeting_date, notification_content, notification_title, submit_button, success_message,
    ExpectedOutcome, Field, DATE_FORMAT, SUCCESS_MESSAGE_PREFIX, SUCCESS_TITLE, VALID_NAME,
    VALID_PHONE,
};
pub use harness::FormTestHarness;
pub use locator::{Locator, Selector, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
pub use mock::{MockAction, MockElement, MockPage};
pub use result::{HarnessError, HarnessResult};
pub use runner::{ScenarioResult, SuiteResults, SuiteRunner};
pub use scenario::{
    Scenario, CITY_ERROR, INVALID_CITY, INVALID_NAME, INVALID_PHONE, NAME_ERROR, PHONE_ERROR,
};
pub use wait::{poll_until, AssertionCheckResult, RetryConfig, RetryError, RetryResult};
