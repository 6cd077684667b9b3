//! Test lifecycle hooks around a shared session.

use crate::config::RuntimeConfig;
use crate::constants::pause;
use crate::driver::{LoadState, PageDriver};
use crate::result::PomResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Setup and teardown steps run around each test
#[derive(Clone)]
pub struct Hooks {
    session: Arc<dyn PageDriver>,
    config: Arc<RuntimeConfig>,
    viewport: (u32, u32),
    settle: Duration,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("base_url", &self.config.base_url)
            .field("viewport", &self.viewport)
            .field("settle", &self.settle)
            .finish_non_exhaustive()
    }
}

impl Hooks {
    /// Hooks with a 1920x1080 viewport and a five second settle pause
    #[must_use]
    pub fn new(session: Arc<dyn PageDriver>, config: Arc<RuntimeConfig>) -> Self {
        Self {
            session,
            config,
            viewport: (1920, 1080),
            settle: pause::FIVE_SECONDS,
        }
    }

    /// Override the viewport
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = (width, height);
        self
    }

    /// Override the pause after the page loads
    #[must_use]
    pub const fn with_settle_pause(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Once, before any test
    pub async fn before_all(&self) {
        info!(locale = %self.config.locale, platform = %self.config.platform, "before_all");
    }

    /// Open the base URL and wait for it to load
    pub async fn before_each(&self) -> PomResult<()> {
        info!(url = %self.config.base_url, "before_each: opening page");
        let (width, height) = self.viewport;
        let opened = async {
            self.session.set_viewport(width, height).await?;
            self.session.navigate(&self.config.base_url).await?;
            self.session
                .wait_for_load_state(LoadState::Load, self.config.page_load_timeout)
                .await
        }
        .await;
        if let Err(err) = opened {
            error!(url = %self.config.base_url, error = %err, "before_each: page did not open");
            return Err(err.into());
        }
        self.session.wait_for_timeout(self.settle).await;
        Ok(())
    }

    /// After a test. The session stays open for the next `before_each`.
    pub async fn after_each(&self) -> PomResult<()> {
        info!("after_each");
        Ok(())
    }

    /// Close the session after the last test
    pub async fn after_all(&self) -> PomResult<()> {
        info!("after_all");
        Ok(self.session.close().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    fn hooks(driver: &Arc<MockDriver>) -> Hooks {
        let config = RuntimeConfig::default()
            .with_base_url("https://playwright.dev/")
            .with_page_load_timeout(Duration::from_secs(30));
        Hooks::new(driver.clone(), Arc::new(config)).with_settle_pause(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_before_each_sequence() {
        let driver = Arc::new(MockDriver::new());
        hooks(&driver).before_each().await.unwrap();

        assert_eq!(
            driver.history(),
            vec![
                "set_viewport:1920x1080".to_string(),
                "navigate:https://playwright.dev/".to_string(),
                "wait_for_load_state:load:30000".to_string(),
                "wait_for_timeout:1".to_string(),
            ]
        );
        assert_eq!(driver.current_url().await.unwrap(), "https://playwright.dev/");
    }

    #[tokio::test]
    async fn test_custom_viewport() {
        let driver = Arc::new(MockDriver::new());
        hooks(&driver)
            .with_viewport(393, 852)
            .before_each()
            .await
            .unwrap();
        assert_eq!(driver.viewport(), Some((393, 852)));
    }

    #[tokio::test]
    async fn test_only_after_all_closes_session() {
        let driver = Arc::new(MockDriver::new());
        let hooks = hooks(&driver);
        hooks.before_all().await;
        hooks.after_each().await.unwrap();
        assert!(!driver.is_closed());
        hooks.after_all().await.unwrap();
        assert!(driver.is_closed());
        assert_eq!(driver.call_count("close"), 1);
    }

    #[tokio::test]
    async fn test_session_survives_between_tests() {
        let driver = Arc::new(MockDriver::new());
        let hooks = hooks(&driver);
        hooks.before_all().await;
        hooks.before_each().await.unwrap();
        hooks.after_each().await.unwrap();
        hooks.before_each().await.unwrap();
        hooks.after_all().await.unwrap();

        assert_eq!(driver.call_count("navigate"), 2);
        assert_eq!(driver.call_count("close"), 1);
        assert!(driver.is_closed());
    }

    #[tokio::test]
    async fn test_before_each_after_close_fails() {
        let driver = Arc::new(MockDriver::new());
        let hooks = hooks(&driver);
        hooks.after_all().await.unwrap();
        assert!(hooks.before_each().await.is_err());
        assert!(!driver.was_called("navigate"));
    }
}
