//! Page objects and test steps for <https://playwright.dev/>.
//!
//! The crate ships its definition data next to the sources:
//!
//! - `custom.config.json` runtime configuration
//! - `locators/` page → element → selector definitions
//! - `locale-strings/` expected copy per locale and page
//!
//! [`Site`] loads all three once and hands out page objects bound to a
//! session.
//!
//! # Example
//!
//! ```ignore
//! let site = Site::load()?;
//! let session: Arc<dyn PageDriver> = Arc::new(ChromiumDriver::launch(Default::default()).await?);
//! site.hooks(session.clone()).before_each().await?;
//! HomeSteps::new(&site, session)?.verify_home_page_opened().await?;
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod pages;
pub mod steps;

use pomkit::{Hooks, LocaleStrings, LocatorIndex, PageDriver, PomResult, RuntimeConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub use pages::{HomePage, MenuBar};
pub use steps::HomeSteps;

/// Runtime configuration file name
pub const CONFIG_FILE: &str = "custom.config.json";
/// Locator definitions directory name
pub const LOCATORS_DIR: &str = "locators";
/// Locale strings directory name
pub const STRINGS_DIR: &str = "locale-strings";

/// Loaded configuration and definition stores for the site
#[derive(Debug, Clone)]
pub struct Site {
    config: Arc<RuntimeConfig>,
    locators: LocatorIndex,
    strings: Arc<LocaleStrings>,
}

impl Site {
    /// Directory holding the bundled definition data
    #[must_use]
    pub fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// Load the bundled configuration and definitions, applying
    /// `POMKIT_LOCALE` / `POMKIT_PLATFORM` overrides
    pub fn load() -> PomResult<Self> {
        let root = Self::data_dir();
        let config = RuntimeConfig::from_file(root.join(CONFIG_FILE))?.with_env_overrides()?;
        Self::load_from(&root, config)
    }

    /// Load definitions from `root` with an explicit configuration
    pub fn load_from(root: &Path, config: RuntimeConfig) -> PomResult<Self> {
        let locators = LocatorIndex::load_dir(root.join(LOCATORS_DIR), config.platform)?;
        let strings = LocaleStrings::load_dir(root.join(STRINGS_DIR))?;
        info!(
            root = %root.display(),
            locale = %config.locale,
            platform = %config.platform,
            "site definitions loaded"
        );
        Ok(Self {
            config: Arc::new(config),
            locators,
            strings: Arc::new(strings),
        })
    }

    /// The runtime configuration
    #[must_use]
    pub const fn config(&self) -> &Arc<RuntimeConfig> {
        &self.config
    }

    /// The locator index
    #[must_use]
    pub const fn locators(&self) -> &LocatorIndex {
        &self.locators
    }

    /// The locale strings
    #[must_use]
    pub const fn strings(&self) -> &Arc<LocaleStrings> {
        &self.strings
    }

    /// Lifecycle hooks for `session`
    #[must_use]
    pub fn hooks(&self, session: Arc<dyn PageDriver>) -> Hooks {
        Hooks::new(session, self.config.clone())
    }

    /// The home page bound to `session`
    pub fn home_page(&self, session: Arc<dyn PageDriver>) -> PomResult<HomePage> {
        HomePage::new(self, session)
    }

    /// The menu bar bound to `session`
    pub fn menu_bar(&self, session: Arc<dyn PageDriver>) -> PomResult<MenuBar> {
        MenuBar::new(self, session)
    }
}
