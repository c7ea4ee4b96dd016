//! Scripted in-memory page for exercising the harness without a browser.
//!
//! Elements are registered up front by selector. Clicking an element can
//! reveal other elements, optionally after a delay, which is how tests
//! script the application's reaction to a submit. `goto` restores the
//! registered elements to their initial state.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::driver::PageDriver;
use crate::locator::Selector;
use crate::result::{HarnessError, HarnessResult};

/// State of one mock element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElement {
    /// Whether the element is rendered
    pub visible: bool,
    /// Rendered text
    pub text: Option<String>,
    /// Input value (`None` for non-input elements)
    pub value: Option<String>,
    /// Checkbox state, toggled on click
    pub checked: bool,
}

impl MockElement {
    /// A rendered element
    #[must_use]
    pub fn visible() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    /// An element present in the DOM but not rendered
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    /// A rendered, empty input
    #[must_use]
    pub fn input() -> Self {
        Self::visible().with_value("")
    }

    /// Set the rendered text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the input value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// An action recorded by [`MockPage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAction {
    /// Navigation
    Goto(String),
    /// Fill with replacement
    Fill(Selector, String),
    /// Select-all + delete
    ClearWithKeys(Selector),
    /// Append typed text
    TypeText(Selector, String),
    /// Click
    Click(Selector),
    /// Page closed
    Close,
}

#[derive(Debug, Clone)]
struct Slot {
    element: MockElement,
    appears_at: Option<Instant>,
}

impl Slot {
    fn present(&self) -> bool {
        self.appears_at.map_or(true, |at| Instant::now() >= at)
    }
}

#[derive(Debug, Clone)]
struct Reaction {
    target: Selector,
    element: MockElement,
    delay: Duration,
}

/// Scripted page implementing [`PageDriver`]
#[derive(Debug, Default)]
pub struct MockPage {
    initial: HashMap<Selector, MockElement>,
    slots: HashMap<Selector, Slot>,
    reactions: HashMap<Selector, Vec<Reaction>>,
    actions: Vec<MockAction>,
    url: Option<String>,
    closed: Arc<AtomicBool>,
}

impl MockPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element present from page load
    #[must_use]
    pub fn with_element(mut self, selector: Selector, element: MockElement) -> Self {
        let _ = self.initial.insert(selector.clone(), element.clone());
        let _ = self.slots.insert(
            selector,
            Slot {
                element,
                appears_at: None,
            },
        );
        self
    }

    /// When `trigger` is clicked, reveal `element` at `target`
    #[must_use]
    pub fn on_click(self, trigger: Selector, target: Selector, element: MockElement) -> Self {
        self.on_click_after(trigger, target, element, Duration::ZERO)
    }

    /// When `trigger` is clicked, reveal `element` at `target` after `delay`
    #[must_use]
    pub fn on_click_after(
        mut self,
        trigger: Selector,
        target: Selector,
        element: MockElement,
        delay: Duration,
    ) -> Self {
        self.reactions.entry(trigger).or_default().push(Reaction {
            target,
            element,
            delay,
        });
        self
    }

    /// Every action performed so far, in order
    #[must_use]
    pub fn actions(&self) -> &[MockAction] {
        &self.actions
    }

    /// Flag that flips once the page is closed; stays readable after the page is dropped
    #[must_use]
    pub fn close_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    /// Whether [`PageDriver::close`] has been called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Last URL navigated to
    #[must_use]
    pub fn current_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Current value of an input
    #[must_use]
    pub fn value_of(&self, selector: &Selector) -> Option<&str> {
        self.slots
            .get(selector)
            .filter(|slot| slot.present())
            .and_then(|slot| slot.element.value.as_deref())
    }

    /// Whether a checkbox-like element has been toggled on
    #[must_use]
    pub fn is_checked(&self, selector: &Selector) -> bool {
        self.slots
            .get(selector)
            .is_some_and(|slot| slot.present() && slot.element.checked)
    }

    fn element(&self, selector: &Selector) -> Option<&MockElement> {
        self.slots
            .get(selector)
            .filter(|slot| slot.present())
            .map(|slot| &slot.element)
    }

    fn element_mut(&mut self, selector: &Selector) -> HarnessResult<&mut MockElement> {
        self.slots
            .get_mut(selector)
            .filter(|slot| slot.present())
            .map(|slot| &mut slot.element)
            .ok_or_else(|| HarnessError::ElementNotFound {
                selector: selector.to_string(),
            })
    }
}

#[async_trait]
impl PageDriver for MockPage {
    async fn goto(&mut self, url: &str) -> HarnessResult<()> {
        if self.is_closed() {
            return Err(HarnessError::PageError {
                message: "page is closed".to_string(),
            });
        }
        self.actions.push(MockAction::Goto(url.to_string()));
        self.url = Some(url.to_string());
        self.slots = self
            .initial
            .iter()
            .map(|(selector, element)| {
                (
                    selector.clone(),
                    Slot {
                        element: element.clone(),
                        appears_at: None,
                    },
                )
            })
            .collect();
        Ok(())
    }

    async fn fill(&mut self, selector: &Selector, text: &str) -> HarnessResult<()> {
        self.element_mut(selector)?.value = Some(text.to_string());
        self.actions
            .push(MockAction::Fill(selector.clone(), text.to_string()));
        Ok(())
    }

    async fn clear_with_keys(&mut self, selector: &Selector) -> HarnessResult<()> {
        self.element_mut(selector)?.value = Some(String::new());
        self.actions.push(MockAction::ClearWithKeys(selector.clone()));
        Ok(())
    }

    async fn type_text(&mut self, selector: &Selector, text: &str) -> HarnessResult<()> {
        self.element_mut(selector)?
            .value
            .get_or_insert_with(String::new)
            .push_str(text);
        self.actions
            .push(MockAction::TypeText(selector.clone(), text.to_string()));
        Ok(())
    }

    async fn click(&mut self, selector: &Selector) -> HarnessResult<()> {
        let element = self.element_mut(selector)?;
        element.checked = !element.checked;
        self.actions.push(MockAction::Click(selector.clone()));

        let now = Instant::now();
        let reactions = self.reactions.get(selector).cloned().unwrap_or_default();
        for reaction in reactions {
            let _ = self.slots.insert(
                reaction.target,
                Slot {
                    element: reaction.element,
                    appears_at: Some(now + reaction.delay),
                },
            );
        }
        Ok(())
    }

    async fn is_visible(&self, selector: &Selector) -> HarnessResult<bool> {
        Ok(self.element(selector).is_some_and(|el| el.visible))
    }

    async fn text_content(&self, selector: &Selector) -> HarnessResult<Option<String>> {
        Ok(self
            .element(selector)
            .map(|el| el.text.clone().unwrap_or_default()))
    }

    async fn input_value(&self, selector: &Selector) -> HarnessResult<Option<String>> {
        Ok(self.element(selector).and_then(|el| el.value.clone()))
    }

    async fn close(&mut self) -> HarnessResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(HarnessError::PageError {
                message: "page already closed".to_string(),
            });
        }
        self.actions.push(MockAction::Close);
        Ok(())
    }
}
