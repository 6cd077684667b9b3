//! Landing page

use crate::Site;
use async_trait::async_trait;
use pomkit::{ActionOptions, BasePage, Interaction, PageDriver, PageObject, PageStrings, PomResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Locator page name
pub const PAGE: &str = "homePage";

const LANDMARKS: [&str; 4] = ["container", "heroBanner", "heroTitle", "getStartedBtn"];

/// The playwright.dev home page
#[derive(Debug, Clone)]
pub struct HomePage {
    base: BasePage,
}

impl HomePage {
    /// Bind the home page to `session`
    pub fn new(site: &Site, session: Arc<dyn PageDriver>) -> PomResult<Self> {
        let locators = site.locators().page(PAGE)?;
        Ok(Self {
            base: BasePage::new(session, site.config().clone(), locators, site.strings().clone()),
        })
    }

    /// Shared page helpers
    #[must_use]
    pub const fn base(&self) -> &BasePage {
        &self.base
    }

    /// Expected copy in the configured locale
    pub fn strings(&self) -> PomResult<&PageStrings> {
        self.base.strings()
    }

    /// Document title
    pub async fn page_title(&self) -> PomResult<String> {
        self.base.title().await
    }

    /// Text of the hero heading
    pub async fn hero_title(&self) -> PomResult<Interaction<String>> {
        Ok(self.base.element("heroTitle")?.text().await)
    }

    /// Click "Get started"
    pub async fn click_get_started_button(&self, opts: ActionOptions) -> PomResult<Interaction<()>> {
        info!(page = PAGE, "click get started");
        Ok(self.base.element("getStartedBtn")?.click(opts).await)
    }
}

#[async_trait]
impl PageObject for HomePage {
    fn page_name(&self) -> &str {
        PAGE
    }

    async fn is_opened(&self, timeout: Option<Duration>) -> PomResult<bool> {
        info!(page = PAGE, timeout_ms = ?timeout.map(|t| t.as_millis()), "is_opened");
        self.base.all_visible(&LANDMARKS, timeout).await
    }
}
