//! PageDriver - abstract browser page automation.
//!
//! The harness only ever talks to a page through this trait. The CDP
//! backend in [`crate::browser`] drives a real Chromium page; [`crate::mock`]
//! provides a scripted in-memory page for tests that run without a browser.

use async_trait::async_trait;

use crate::locator::Selector;
use crate::result::HarnessResult;

/// Operations the harness needs from one open page.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to `url`, discarding all in-page state
    async fn goto(&mut self, url: &str) -> HarnessResult<()>;

    /// Replace the input's value with `text`, typing it key by key
    async fn fill(&mut self, selector: &Selector, text: &str) -> HarnessResult<()>;

    /// Clear an input with select-all followed by a delete key press
    async fn clear_with_keys(&mut self, selector: &Selector) -> HarnessResult<()>;

    /// Type `text` at the current caret without clearing first
    async fn type_text(&mut self, selector: &Selector, text: &str) -> HarnessResult<()>;

    /// Click the element
    async fn click(&mut self, selector: &Selector) -> HarnessResult<()>;

    /// Whether the element exists and is rendered
    async fn is_visible(&self, selector: &Selector) -> HarnessResult<bool>;

    /// Rendered text of the element, `None` when it does not exist
    async fn text_content(&self, selector: &Selector) -> HarnessResult<Option<String>>;

    /// Current `value` of an input, `None` when it does not exist
    async fn input_value(&self, selector: &Selector) -> HarnessResult<Option<String>>;

    /// Close the page; no other call is valid afterwards
    async fn close(&mut self) -> HarnessResult<()>;
}
