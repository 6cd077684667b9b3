//! Page Object Model support.
//!
//! A page object owns the locators for one page and builds a fresh
//! [`Element`] for every access. [`BasePage`] carries what every page needs:
//! the session, the runtime configuration, the page's locators and the
//! locale strings.
//!
//! # Example
//!
//! ```ignore
//! struct LoginPage {
//!     base: BasePage,
//! }
//!
//! #[async_trait]
//! impl PageObject for LoginPage {
//!     fn page_name(&self) -> &str {
//!         "loginPage"
//!     }
//!
//!     async fn is_opened(&self, timeout: Option<Duration>) -> PomResult<bool> {
//!         self.base.all_visible(&["username", "password"], timeout).await
//!     }
//! }
//! ```

use crate::config::RuntimeConfig;
use crate::driver::PageDriver;
use crate::element::Element;
use crate::locale_store::{LocaleStrings, PageStrings};
use crate::locator_store::PageLocators;
use crate::result::PomResult;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Trait for page objects representing a page or component in the UI.
#[async_trait]
pub trait PageObject: Send + Sync {
    /// Page name as used in locator and locale definitions
    fn page_name(&self) -> &str;

    /// True once the page's landmark elements are visible.
    ///
    /// A landmark missing from the locators is an error, not `false`.
    async fn is_opened(&self, timeout: Option<Duration>) -> PomResult<bool>;
}

/// Shared state and helpers for page objects
#[derive(Clone)]
pub struct BasePage {
    session: Arc<dyn PageDriver>,
    config: Arc<RuntimeConfig>,
    locators: PageLocators,
    strings: Arc<LocaleStrings>,
}

impl std::fmt::Debug for BasePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasePage")
            .field("page", &self.locators.page())
            .field("locale", &self.config.locale)
            .finish_non_exhaustive()
    }
}

impl BasePage {
    /// Create a base page
    #[must_use]
    pub fn new(
        session: Arc<dyn PageDriver>,
        config: Arc<RuntimeConfig>,
        locators: PageLocators,
        strings: Arc<LocaleStrings>,
    ) -> Self {
        Self {
            session,
            config,
            locators,
            strings,
        }
    }

    /// Page name
    #[must_use]
    pub fn page_name(&self) -> &str {
        self.locators.page()
    }

    /// The session
    #[must_use]
    pub fn session(&self) -> &Arc<dyn PageDriver> {
        &self.session
    }

    /// The runtime configuration
    #[must_use]
    pub fn config(&self) -> &Arc<RuntimeConfig> {
        &self.config
    }

    /// The page's locators
    #[must_use]
    pub const fn locators(&self) -> &PageLocators {
        &self.locators
    }

    /// A fresh element for a named locator
    pub fn element(&self, name: &str) -> PomResult<Element> {
        let selector = self.locators.resolve(name)?.clone();
        Ok(Element::new(self.session.clone(), self.config.clone(), selector))
    }

    /// True when every named element becomes visible, checked in order.
    ///
    /// Stops at the first element that does not appear. A name missing from
    /// the locators fails with [`LocatorNotFound`](crate::PomError::LocatorNotFound).
    pub async fn all_visible(&self, names: &[&str], timeout: Option<Duration>) -> PomResult<bool> {
        for name in names {
            let element = self.element(name).map_err(|err| {
                error!(page = %self.page_name(), element = %name, error = %err, "cannot resolve element");
                err
            })?;
            if !element.wait_for_visible(timeout).await.succeeded() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Expected strings for this page in the configured locale
    pub fn strings(&self) -> PomResult<&PageStrings> {
        self.strings_for(self.locators.page())
    }

    /// Expected strings of another bundle in the configured locale, for
    /// components whose strings are filed under a different name
    pub fn strings_for(&self, page: &str) -> PomResult<&PageStrings> {
        self.strings.page_strings(&self.config.locale, page)
    }

    /// Document title
    pub async fn title(&self) -> PomResult<String> {
        info!(page = %self.page_name(), "title");
        Ok(self.session.title().await?)
    }

    /// Current URL, trimmed
    pub async fn url(&self) -> PomResult<String> {
        info!(page = %self.page_name(), "url");
        let url = self.session.current_url().await?;
        Ok(url.trim().to_string())
    }

    /// Go back `times` entries, pausing after each
    pub async fn go_back(&self, times: usize, pause: Option<Duration>) -> PomResult<()> {
        let pause = pause.unwrap_or(self.config.pause);
        info!(page = %self.page_name(), times, "go_back");
        for _ in 0..times {
            self.session.go_back().await?;
            self.session.wait_for_timeout(pause).await;
        }
        Ok(())
    }
}
