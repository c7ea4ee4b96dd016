//! Browser control over the Chrome `DevTools` Protocol.
//!
//! With the `browser` feature, [`Browser`] launches Chromium through
//! chromiumoxide and hands out one [`CdpPage`] per scenario. Without the
//! feature only [`BrowserConfig`] is available and tests run against
//! [`crate::mock::MockPage`].

/// Browser launch configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
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

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::BrowserConfig;
    use crate::driver::PageDriver;
    use crate::locator::Selector;
    use crate::result::{HarnessError, HarnessResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::element::Element;
    use chromiumoxide::handler::viewport::Viewport;
    use chromiumoxide::page::Page;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tracing::{debug, info};

    /// Browser instance with a live CDP connection.
    ///
    /// Cloning shares the same browser process.
    #[derive(Debug, Clone)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        handle: Arc<tokio::task::JoinHandle<()>>,
    }

    impl Browser {
        /// Launch a new browser instance
        pub async fn launch(config: BrowserConfig) -> HarnessResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height)
                .viewport(Viewport {
                    width: config.viewport_width,
                    height: config.viewport_height,
                    ..Viewport::default()
                });

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder
                .build()
                .map_err(|message| HarnessError::BrowserLaunchError { message })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                HarnessError::BrowserLaunchError {
                    message: e.to_string(),
                }
            })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            info!(
                headless = config.headless,
                width = config.viewport_width,
                height = config.viewport_height,
                "browser launched"
            );

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle: Arc::new(handle),
            })
        }

        /// Open a fresh blank page
        pub async fn new_page(&self) -> HarnessResult<CdpPage> {
            let browser = self.inner.lock().await;
            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| HarnessError::PageError {
                    message: e.to_string(),
                })?;
            Ok(CdpPage { inner: page })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub async fn close(self) -> HarnessResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| HarnessError::BrowserLaunchError {
                    message: e.to_string(),
                })?;
            let _ = browser.wait().await;
            self.handle.abort();
            Ok(())
        }
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        found: bool,
        value: String,
    }

    impl Probe {
        fn into_option(self) -> Option<String> {
            self.found.then_some(self.value)
        }
    }

    /// A browser page driven over CDP
    #[derive(Debug)]
    pub struct CdpPage {
        inner: Page,
    }

    impl CdpPage {
        async fn find(&self, selector: &Selector) -> HarnessResult<Element> {
            let found = match selector {
                Selector::Css(css) => self.inner.find_element(css.as_str()).await,
                Selector::XPath(xpath) => self.inner.find_xpath(xpath.as_str()).await,
            };
            found.map_err(|_| HarnessError::ElementNotFound {
                selector: selector.to_string(),
            })
        }

        async fn eval<T: DeserializeOwned>(&self, expr: String) -> HarnessResult<T> {
            let result = self
                .inner
                .evaluate(expr)
                .await
                .map_err(|e| HarnessError::EvaluationError {
                    message: e.to_string(),
                })?;
            result
                .into_value()
                .map_err(|e| HarnessError::EvaluationError {
                    message: e.to_string(),
                })
        }

        async fn select_all(&self, selector: &Selector) -> HarnessResult<()> {
            let expr = format!(
                "(() => {{ const el = {}; if (!el) return false; el.focus(); \
                 if (typeof el.select === 'function') el.select(); return true; }})()",
                selector.to_query()
            );
            if self.eval::<bool>(expr).await? {
                Ok(())
            } else {
                Err(HarnessError::ElementNotFound {
                    selector: selector.to_string(),
                })
            }
        }
    }

    fn input_error(e: impl std::fmt::Display) -> HarnessError {
        HarnessError::InputError {
            message: e.to_string(),
        }
    }

    #[async_trait]
    impl PageDriver for CdpPage {
        async fn goto(&mut self, url: &str) -> HarnessResult<()> {
            debug!(url, "navigating");
            self.inner
                .goto(url)
                .await
                .map_err(|e| HarnessError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn fill(&mut self, selector: &Selector, text: &str) -> HarnessResult<()> {
            self.clear_with_keys(selector).await?;
            self.type_text(selector, text).await
        }

        async fn clear_with_keys(&mut self, selector: &Selector) -> HarnessResult<()> {
            let element = self.find(selector).await?;
            let _ = element.click().await.map_err(input_error)?;
            self.select_all(selector).await?;
            let _ = element.press_key("Backspace").await.map_err(input_error)?;
            Ok(())
        }

        async fn type_text(&mut self, selector: &Selector, text: &str) -> HarnessResult<()> {
            let element = self.find(selector).await?;
            let _ = element.focus().await.map_err(input_error)?;
            let _ = element.type_str(text).await.map_err(input_error)?;
            Ok(())
        }

        async fn click(&mut self, selector: &Selector) -> HarnessResult<()> {
            let element = self.find(selector).await?;
            let _ = element.click().await.map_err(input_error)?;
            Ok(())
        }

        async fn is_visible(&self, selector: &Selector) -> HarnessResult<bool> {
            self.eval(selector.to_visible_query()).await
        }

        async fn text_content(&self, selector: &Selector) -> HarnessResult<Option<String>> {
            let probe: Probe = self.eval(selector.to_text_query()).await?;
            Ok(probe.into_option())
        }

        async fn input_value(&self, selector: &Selector) -> HarnessResult<Option<String>> {
            let probe: Probe = self.eval(selector.to_value_query()).await?;
            Ok(probe.into_option())
        }

        async fn close(&mut self) -> HarnessResult<()> {
            debug!("closing page");
            self.inner
                .clone()
                .close()
                .await
                .map_err(|e| HarnessError::PageError {
                    message: e.to_string(),
                })
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{Browser, CdpPage};
