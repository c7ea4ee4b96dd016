//! Locator abstraction for element selection.
//!
//! A [`Locator`] pairs a [`Selector`] with the timeout used when it is the
//! subject of an expectation. Selectors render to JavaScript expressions so
//! a CDP backend can evaluate visibility, text and value in one round trip.

use std::fmt;
use std::time::Duration;

/// Default timeout for bounded waits (10 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval for bounded waits (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., "button.button")
    Css(String),
    /// XPath selector
    XPath(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Input identified by its placeholder text
    #[must_use]
    pub fn placeholder(text: &str) -> Self {
        Self::XPath(format!("//input[@placeholder='{text}']"))
    }

    /// Input identified by its `name` attribute
    #[must_use]
    pub fn name_attr(name: &str) -> Self {
        Self::Css(format!("[name='{name}']"))
    }

    /// Element identified by its `data-test-id` attribute
    #[must_use]
    pub fn test_id(id: &str) -> Self {
        Self::Css(format!("[data-test-id='{id}']"))
    }

    /// Raw selector text
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }

    /// Convert to a JavaScript expression yielding the first match or `null`
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!(
                    "document.evaluate({s:?}, document, null, \
                     XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
                )
            }
        }
    }

    /// Expression evaluating to `true` when the element exists and is rendered
    #[must_use]
    pub fn to_visible_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; \
             const style = window.getComputedStyle(el); \
             const rect = el.getBoundingClientRect(); \
             return style.display !== 'none' && style.visibility !== 'hidden' \
             && (rect.width > 0 || rect.height > 0); }})()",
            self.to_query()
        )
    }

    /// Expression evaluating to `{ found, value }` with the rendered text
    #[must_use]
    pub fn to_text_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; \
             return {{ found: !!el, value: el ? el.innerText : '' }}; }})()",
            self.to_query()
        )
    }

    /// Expression evaluating to `{ found, value }` with the input's value
    #[must_use]
    pub fn to_value_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; const ok = !!el && 'value' in el; \
             return {{ found: ok, value: ok ? String(el.value) : '' }}; }})()",
            self.to_query()
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
        }
    }
}

/// A locator for finding elements, carrying its own wait timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    timeout: Duration,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub const fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl From<Selector> for Locator {
    fn from(selector: Selector) -> Self {
        Self::from_selector(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_selector() {
            let query = Selector::css("button.button").to_query();
            assert!(query.contains("querySelector"));
            assert!(query.contains("button.button"));
        }

        #[test]
        fn test_placeholder_selector_is_xpath() {
            let selector = Selector::placeholder("Город");
            assert_eq!(selector, Selector::XPath("//input[@placeholder='Город']".into()));
            assert!(selector.to_query().contains("XPathResult"));
        }

        #[test]
        fn test_name_attr_selector() {
            assert_eq!(Selector::name_attr("phone").as_str(), "[name='phone']");
        }

        #[test]
        fn test_test_id_uses_hyphenated_attribute() {
            assert_eq!(Selector::test_id("city").as_str(), "[data-test-id='city']");
        }

        #[test]
        fn test_visible_query_checks_layout() {
            let query = Selector::css(".notification__title").to_visible_query();
            assert!(query.contains("getComputedStyle"));
            assert!(query.contains("getBoundingClientRect"));
        }

        #[test]
        fn test_text_and_value_queries() {
            let selector = Selector::name_attr("name");
            assert!(selector.to_text_query().contains("innerText"));
            assert!(selector.to_value_query().contains("el.value"));
        }

        #[test]
        fn test_display() {
            assert_eq!(Selector::css("a").to_string(), "css=a");
            assert_eq!(Selector::xpath("//a").to_string(), "xpath=//a");
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_locator_new() {
            let locator = Locator::new("button");
            assert!(matches!(locator.selector(), Selector::Css(_)));
            assert_eq!(locator.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
        }

        #[test]
        fn test_locator_timeout() {
            let locator = Locator::new("button").with_timeout(Duration::from_secs(15));
            assert_eq!(locator.timeout(), Duration::from_secs(15));
        }
    }
}
