//! Home page steps

use crate::pages::{HomePage, MenuBar};
use crate::Site;
use pomkit::{ActionOptions, Expect, PageDriver, PageObject, PomResult};
use std::sync::Arc;
use tracing::info;

/// Steps for home page test cases
#[derive(Debug, Clone)]
pub struct HomeSteps {
    home: HomePage,
    menu_bar: MenuBar,
}

impl HomeSteps {
    /// Bind the steps' pages to `session`
    pub fn new(site: &Site, session: Arc<dyn PageDriver>) -> PomResult<Self> {
        Ok(Self {
            home: site.home_page(session.clone())?,
            menu_bar: site.menu_bar(session)?,
        })
    }

    /// The home page object
    #[must_use]
    pub const fn home(&self) -> &HomePage {
        &self.home
    }

    /// The menu bar object
    #[must_use]
    pub const fn menu_bar(&self) -> &MenuBar {
        &self.menu_bar
    }

    /// Home page landmarks are visible within the object load timeout
    pub async fn verify_home_page_opened(&self) -> PomResult<()> {
        info!("verify home page opened");
        let opened = self.home.is_opened(None).await?;
        Expect::boolean(opened, true)
    }

    /// Document title matches the localized title
    pub async fn verify_home_page_title(&self) -> PomResult<()> {
        info!("verify home page title");
        let title = self.home.page_title().await?;
        Expect::title(&title, self.home.strings()?.get("pageTitle")?)
    }

    /// Hero heading matches the localized copy
    pub async fn verify_hero_title(&self) -> PomResult<()> {
        let element = self.home.base().element("heroTitle")?;
        Expect::element_text(&element, self.home.strings()?.get("heroTitle")?).await
    }

    /// Navigation bar is loaded
    pub async fn verify_menu_bar_loaded(&self) -> PomResult<()> {
        info!("verify menu bar loaded");
        let loaded = self.menu_bar.is_loaded(None).await?;
        Expect::boolean(loaded, true)
    }

    /// Click "Get started", failing if the click did not happen
    pub async fn click_get_started_button(&self) -> PomResult<()> {
        info!("click get started button");
        let clicked = self
            .home
            .click_get_started_button(ActionOptions::new())
            .await?;
        clicked.into_result(self.home.base().locators().resolve("getStartedBtn")?)
    }
}
