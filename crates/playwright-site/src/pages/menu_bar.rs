//! Top navigation bar, shared by every page

use crate::Site;
use async_trait::async_trait;
use pomkit::{ActionOptions, BasePage, Interaction, PageDriver, PageObject, PageStrings, PomResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Locator page name
pub const PAGE: &str = "menuBar";
/// Locale strings page name
pub const STRINGS_PAGE: &str = "menu";

const LANDMARKS: [&str; 4] = ["container", "logo", "playwright", "menus"];

/// The navigation bar component
#[derive(Debug, Clone)]
pub struct MenuBar {
    base: BasePage,
}

impl MenuBar {
    /// Bind the menu bar to `session`
    pub fn new(site: &Site, session: Arc<dyn PageDriver>) -> PomResult<Self> {
        let locators = site.locators().page(PAGE)?;
        Ok(Self {
            base: BasePage::new(session, site.config().clone(), locators, site.strings().clone()),
        })
    }

    /// True once container, logo, title and menu list are visible
    pub async fn is_loaded(&self, timeout: Option<Duration>) -> PomResult<bool> {
        self.is_opened(timeout).await
    }

    /// Menu labels in the configured locale
    pub fn strings(&self) -> PomResult<&PageStrings> {
        self.base.strings_for(STRINGS_PAGE)
    }

    /// Open the Docs section
    pub async fn open_docs(&self, opts: ActionOptions) -> PomResult<Interaction<()>> {
        Ok(self.base.element("docs")?.click(opts).await)
    }

    /// Open the API section
    pub async fn open_api(&self, opts: ActionOptions) -> PomResult<Interaction<()>> {
        Ok(self.base.element("api")?.click(opts).await)
    }
}

#[async_trait]
impl PageObject for MenuBar {
    fn page_name(&self) -> &str {
        PAGE
    }

    async fn is_opened(&self, timeout: Option<Duration>) -> PomResult<bool> {
        info!(page = PAGE, "is_loaded");
        self.base.all_visible(&LANDMARKS, timeout).await
    }
}
