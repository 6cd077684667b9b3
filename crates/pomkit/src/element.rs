//! Element handle: a selector bound to a session, with bounded waits.
//!
//! An [`Element`] is cheap to build and never cached; page objects create a
//! fresh one per access. Every operation logs an `info!` line, logs failures
//! with `error!`, and reports through [`Interaction`].
//!
//! # Example
//!
//! ```ignore
//! let button = Element::new(session.clone(), config.clone(), Selector::css("button.get-started"));
//! if button.click(ActionOptions::default()).await.succeeded() {
//!     // navigated to the docs
//! }
//! ```

use crate::config::RuntimeConfig;
use crate::driver::{DriverError, DriverResult, ElementState, NodeHandle, PageDriver};
use crate::interaction::Interaction;
use crate::selector::Selector;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Per-call overrides for gated actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionOptions {
    /// Visibility gate timeout; `None` uses the configured object-load timeout
    pub timeout: Option<Duration>,
    /// Settle pause after the action; `None` uses the configured pause
    pub pause: Option<Duration>,
}

impl ActionOptions {
    /// Options that defer to the runtime configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
            pause: None,
        }
    }

    /// Override the gate timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the settle pause
    #[must_use]
    pub const fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = Some(pause);
        self
    }

    /// Skip the settle pause
    #[must_use]
    pub const fn no_pause(self) -> Self {
        self.with_pause(Duration::ZERO)
    }
}

/// A selector bound to a session and runtime configuration
#[derive(Clone)]
pub struct Element {
    session: Arc<dyn PageDriver>,
    config: Arc<RuntimeConfig>,
    selector: Selector,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("selector", &self.selector)
            .field("locale", &self.config.locale)
            .finish_non_exhaustive()
    }
}

impl Element {
    /// Bind `selector` to a session
    #[must_use]
    pub fn new(session: Arc<dyn PageDriver>, config: Arc<RuntimeConfig>, selector: Selector) -> Self {
        Self {
            session,
            config,
            selector,
        }
    }

    /// The bound selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// The runtime configuration in effect
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Waits
    // ------------------------------------------------------------------

    /// Wait until the element is present and visible
    pub async fn wait_for_visible(&self, timeout: Option<Duration>) -> Interaction<()> {
        info!(selector = %self.selector, "wait_for_visible");
        self.bounded_wait(ElementState::Visible, timeout)
            .await
            .map(|_| ())
    }

    /// Wait until the element is attached, visible or not
    pub async fn wait_for_present(&self, timeout: Option<Duration>) -> Interaction<NodeHandle> {
        info!(selector = %self.selector, "wait_for_present");
        self.wait_for_node(ElementState::Attached, timeout).await
    }

    /// Wait until the element is attached and visible, returning the node
    pub async fn wait_for_selector_visible(
        &self,
        timeout: Option<Duration>,
    ) -> Interaction<NodeHandle> {
        info!(selector = %self.selector, "wait_for_selector_visible");
        self.wait_for_node(ElementState::Visible, timeout).await
    }

    /// Wait until the element is detached or invisible
    pub async fn wait_for_hidden(&self, timeout: Option<Duration>) -> Interaction<()> {
        info!(selector = %self.selector, "wait_for_hidden");
        self.bounded_wait(ElementState::Hidden, timeout)
            .await
            .map(|_| ())
    }

    async fn wait_for_node(
        &self,
        state: ElementState,
        timeout: Option<Duration>,
    ) -> Interaction<NodeHandle> {
        match self.bounded_wait(state, timeout).await {
            Interaction::Success(Some(node)) => Interaction::Success(node),
            Interaction::Success(None) => {
                error!(selector = %self.selector, %state, "driver returned no node");
                Interaction::DriverError(format!("driver returned no node for {}", self.selector))
            }
            Interaction::Timeout { waited } => Interaction::Timeout { waited },
            Interaction::DriverError(detail) => Interaction::DriverError(detail),
        }
    }

    /// The single suspension point: the driver's wait under a hard timeout.
    async fn bounded_wait(
        &self,
        state: ElementState,
        timeout: Option<Duration>,
    ) -> Interaction<Option<NodeHandle>> {
        let timeout = timeout.unwrap_or(self.config.object_load_timeout);
        let waited = tokio::time::timeout(
            timeout,
            self.session.wait_for_state(&self.selector, state, timeout),
        )
        .await;
        let outcome = match waited {
            Ok(result) => Interaction::from_driver(result, timeout),
            Err(_) => Interaction::Timeout { waited: timeout },
        };
        match &outcome {
            Interaction::Success(_) => {}
            Interaction::Timeout { waited } => error!(
                selector = %self.selector,
                %state,
                timeout_ms = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
                "element did not reach state in time"
            ),
            Interaction::DriverError(detail) => error!(
                selector = %self.selector,
                %state,
                error = %detail,
                "wait failed"
            ),
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Gated actions
    // ------------------------------------------------------------------

    /// Click once the element is visible
    pub async fn click(&self, opts: ActionOptions) -> Interaction<()> {
        info!(selector = %self.selector, "click");
        if let Some(failed) = self.visibility_gate("click", opts.timeout).await {
            return failed;
        }
        let result = self.session.click(&self.selector).await;
        self.settle("click", result, opts.pause).await
    }

    /// Double-click once the element is visible
    pub async fn double_click(&self, opts: ActionOptions) -> Interaction<()> {
        info!(selector = %self.selector, "double_click");
        if let Some(failed) = self.visibility_gate("double_click", opts.timeout).await {
            return failed;
        }
        let result = self.session.double_click(&self.selector).await;
        self.settle("double_click", result, opts.pause).await
    }

    /// Replace the input's content with `text` once the element is visible
    pub async fn fill(&self, text: &str, opts: ActionOptions) -> Interaction<()> {
        info!(selector = %self.selector, chars = text.chars().count(), "fill");
        if let Some(failed) = self.visibility_gate("fill", opts.timeout).await {
            return failed;
        }
        let result = self.session.fill(&self.selector, text).await;
        self.settle("fill", result, opts.pause).await
    }

    /// Empty the input once the element is visible
    pub async fn clear(&self, opts: ActionOptions) -> Interaction<()> {
        info!(selector = %self.selector, "clear");
        self.fill("", opts).await
    }

    /// Returns the gate's failure when the element never became visible.
    async fn visibility_gate(
        &self,
        action: &'static str,
        timeout: Option<Duration>,
    ) -> Option<Interaction<()>> {
        let gate = self.bounded_wait(ElementState::Visible, timeout).await;
        let failed = gate.failure::<()>()?;
        error!(selector = %self.selector, action, "element not visible, action skipped");
        Some(failed)
    }

    async fn settle(
        &self,
        action: &'static str,
        result: DriverResult<()>,
        pause: Option<Duration>,
    ) -> Interaction<()> {
        let outcome = self.report(action, result);
        if outcome.succeeded() {
            let pause = pause.unwrap_or(self.config.pause);
            if !pause.is_zero() {
                self.pause(pause).await;
            }
        }
        outcome
    }

    // ------------------------------------------------------------------
    // State checks and reads
    // ------------------------------------------------------------------

    /// Is the element visible right now
    pub async fn is_visible(&self) -> Interaction<bool> {
        info!(selector = %self.selector, "is_visible");
        let result = self.session.is_visible(&self.selector).await;
        self.report("is_visible", result)
    }

    /// Is the element enabled right now
    pub async fn is_enabled(&self) -> Interaction<bool> {
        info!(selector = %self.selector, "is_enabled");
        let result = self.session.is_enabled(&self.selector).await;
        self.report("is_enabled", result)
    }

    /// Is the checkbox or radio checked right now
    pub async fn is_checked(&self) -> Interaction<bool> {
        info!(selector = %self.selector, "is_checked");
        let result = self.session.is_checked(&self.selector).await;
        self.report("is_checked", result)
    }

    /// Text content
    pub async fn text(&self) -> Interaction<String> {
        info!(selector = %self.selector, "text");
        let result = self.session.text_content(&self.selector).await;
        self.report("text", result)
    }

    /// Current input value
    pub async fn value(&self) -> Interaction<String> {
        info!(selector = %self.selector, "value");
        let result = self.session.input_value(&self.selector).await;
        self.report("value", result)
    }

    /// Attribute value; `Success(None)` when the attribute is absent
    pub async fn attribute(&self, name: &str) -> Interaction<Option<String>> {
        info!(selector = %self.selector, attribute = name, "attribute");
        let result = self.session.attribute(&self.selector, name).await;
        self.report("attribute", result)
    }

    // ------------------------------------------------------------------
    // Pass-through actions
    // ------------------------------------------------------------------

    /// Move the pointer over the element
    pub async fn hover(&self) -> Interaction<()> {
        info!(selector = %self.selector, "hover");
        let result = self.session.hover(&self.selector).await;
        self.report("hover", result)
    }

    /// Scroll the element into view if needed
    pub async fn scroll_into_view(&self) -> Interaction<()> {
        info!(selector = %self.selector, "scroll_into_view");
        let result = self.session.scroll_into_view(&self.selector).await;
        self.report("scroll_into_view", result)
    }

    /// Select a dropdown option by value
    pub async fn select_option(&self, value: &str) -> Interaction<()> {
        info!(selector = %self.selector, value, "select_option");
        let result = self.session.select_option(&self.selector, value).await;
        self.report("select_option", result)
    }

    /// Drag onto `target` after it is present
    pub async fn drag_to(&self, target: &Selector) -> Interaction<()> {
        info!(selector = %self.selector, target = %target, "drag_to");
        let target_element = Self::new(self.session.clone(), self.config.clone(), target.clone());
        let present = target_element.wait_for_present(None).await;
        if let Some(failed) = present.failure::<()>() {
            error!(selector = %self.selector, target = %target, "drag target never appeared");
            return failed;
        }
        let result = self.session.drag_to(&self.selector, target).await;
        self.report("drag_to", result)
    }

    /// Sleep through the driver
    pub async fn pause(&self, duration: Duration) {
        info!(
            selector = %self.selector,
            pause_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "pause"
        );
        self.session.wait_for_timeout(duration).await;
    }

    fn report<T>(&self, action: &'static str, result: DriverResult<T>) -> Interaction<T> {
        if let Err(err) = &result {
            error!(selector = %self.selector, action, error = %err, "interaction failed");
        }
        let waited = match &result {
            Err(DriverError::Timeout { ms }) => Duration::from_millis(*ms),
            _ => Duration::ZERO,
        };
        Interaction::from_driver(result, waited)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockNode};

    fn config() -> Arc<RuntimeConfig> {
        Arc::new(
            RuntimeConfig::default()
                .with_object_load_timeout(Duration::from_millis(50))
                .with_pause(Duration::ZERO),
        )
    }

    fn bind(driver: &Arc<MockDriver>, selector: Selector) -> Element {
        let session: Arc<dyn PageDriver> = driver.clone();
        Element::new(session, config(), selector)
    }

    fn input() -> Selector {
        Selector::css("input#search")
    }

    mod wait_tests {
        use super::*;

        #[tokio::test]
        async fn test_visible_before_timeout() {
            let driver = Arc::new(MockDriver::new().with_node(
                Selector::css(".hero"),
                MockNode::new("section").visible_after(Duration::from_millis(5)),
            ));
            let hero = bind(&driver, Selector::css(".hero"));
            assert_eq!(
                hero.wait_for_visible(Some(Duration::from_millis(200))).await,
                Interaction::Success(())
            );
        }

        #[tokio::test]
        async fn test_never_visible_times_out() {
            let driver = Arc::new(
                MockDriver::new().with_node(Selector::css(".hero"), MockNode::new("section").hidden()),
            );
            let hero = bind(&driver, Selector::css(".hero"));
            let outcome = hero.wait_for_visible(Some(Duration::from_millis(20))).await;
            assert_eq!(
                outcome,
                Interaction::Timeout {
                    waited: Duration::from_millis(20)
                }
            );
        }

        #[tokio::test]
        async fn test_default_timeout_from_config() {
            let driver = Arc::new(MockDriver::new());
            let missing = bind(&driver, Selector::css("#nope"));
            assert_eq!(
                missing.wait_for_visible(None).await,
                Interaction::Timeout {
                    waited: Duration::from_millis(50)
                }
            );
        }

        #[tokio::test]
        async fn test_stalled_driver_is_bounded() {
            let driver = Arc::new(
                MockDriver::new().with_node(Selector::css(".hero"), MockNode::new("section").stalled()),
            );
            let hero = bind(&driver, Selector::css(".hero"));
            assert!(hero
                .wait_for_visible(Some(Duration::from_millis(20)))
                .await
                .timed_out());
        }

        #[tokio::test]
        async fn test_driver_failure_is_not_timeout() {
            let driver = Arc::new(MockDriver::new().with_node(
                Selector::css(".hero"),
                MockNode::new("section").failing(DriverError::protocol("target closed")),
            ));
            let hero = bind(&driver, Selector::css(".hero"));
            assert_eq!(
                hero.wait_for_visible(Some(Duration::from_millis(20))).await,
                Interaction::DriverError("Protocol error: target closed".into())
            );
        }

        #[tokio::test]
        async fn test_present_and_hidden() {
            let driver = Arc::new(
                MockDriver::new().with_node(Selector::css(".toast"), MockNode::new("div").hidden()),
            );
            let toast = bind(&driver, Selector::css(".toast"));
            let node = toast.wait_for_present(None).await.ok().unwrap();
            assert_eq!(node.tag_name, "div");
            assert!(!node.is_visible());
            assert!(toast.wait_for_hidden(None).await.succeeded());
            assert!(toast.wait_for_selector_visible(None).await.timed_out());
        }
    }

    mod action_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_dispatched_after_gate() {
            let button = Selector::css("button.get-started");
            let driver = Arc::new(MockDriver::new().with_node(button.clone(), MockNode::new("button")));
            let element = bind(&driver, button);
            assert!(element.click(ActionOptions::new()).await.succeeded());
            assert!(driver.was_called("click"));
        }

        #[tokio::test]
        async fn test_click_skipped_when_gate_fails() {
            let button = Selector::css("button.get-started");
            let driver =
                Arc::new(MockDriver::new().with_node(button.clone(), MockNode::new("button").hidden()));
            let element = bind(&driver, button);
            let outcome = element
                .click(ActionOptions::new().with_timeout(Duration::from_millis(10)))
                .await;
            assert!(outcome.timed_out());
            assert!(!driver.was_called("click"));
        }

        #[tokio::test]
        async fn test_double_click_skipped_when_absent() {
            let driver = Arc::new(MockDriver::new());
            let element = bind(&driver, Selector::css("#tile"));
            assert!(!element.double_click(ActionOptions::new()).await.succeeded());
            assert!(!driver.was_called("double_click"));
        }

        #[tokio::test]
        async fn test_fill_then_value_ascii() {
            let driver = Arc::new(MockDriver::new().with_node(input(), MockNode::new("input")));
            let element = bind(&driver, input());
            assert!(element.fill("locator", ActionOptions::new()).await.succeeded());
            assert_eq!(element.value().await, Interaction::Success("locator".into()));
        }

        #[tokio::test]
        async fn test_fill_then_value_multibyte() {
            let driver = Arc::new(MockDriver::new().with_node(input(), MockNode::new("input")));
            let element = bind(&driver, input());
            let text = "テスト 🎭 ünïcödé";
            assert!(element.fill(text, ActionOptions::new()).await.succeeded());
            assert_eq!(element.value().await, Interaction::Success(text.to_string()));
        }

        #[tokio::test]
        async fn test_clear_then_value_is_empty() {
            let driver = Arc::new(
                MockDriver::new().with_node(input(), MockNode::new("input").with_value("old query")),
            );
            let element = bind(&driver, input());
            assert!(element.clear(ActionOptions::new()).await.succeeded());
            assert_eq!(element.value().await, Interaction::Success(String::new()));
        }

        #[tokio::test]
        async fn test_pause_applied_after_success() {
            let button = Selector::css("button");
            let driver = Arc::new(MockDriver::new().with_node(button.clone(), MockNode::new("button")));
            let element = bind(&driver, button);
            let _ = element
                .click(ActionOptions::new().with_pause(Duration::from_millis(1)))
                .await;
            assert!(driver.history().iter().any(|c| c == "wait_for_timeout:1"));
        }

        #[tokio::test]
        async fn test_no_pause_after_failed_action() {
            let button = Selector::css("button");
            let driver = Arc::new(MockDriver::new().with_node(
                button.clone(),
                MockNode::new("button").failing(DriverError::Detached {
                    selector: "button".into(),
                }),
            ));
            let element = bind(&driver, button);
            let outcome = element
                .click(ActionOptions::new().with_pause(Duration::from_millis(1)))
                .await;
            assert!(matches!(outcome, Interaction::DriverError(_)));
            assert!(!driver.was_called("wait_for_timeout"));
        }

        #[tokio::test]
        async fn test_drag_waits_for_target() {
            let card = Selector::css("#card");
            let driver = Arc::new(MockDriver::new().with_node(card.clone(), MockNode::new("div")));
            let element = bind(&driver, card);
            assert!(element.drag_to(&Selector::css("#lane")).await.timed_out());
            assert!(!driver.was_called("drag_to"));

            driver.add_node(Selector::css("#lane"), MockNode::new("div").hidden());
            assert!(element.drag_to(&Selector::css("#lane")).await.succeeded());
        }

        #[tokio::test]
        async fn test_pass_through_not_gated() {
            let menu = Selector::css("select#lang");
            let driver = Arc::new(MockDriver::new().with_node(menu.clone(), MockNode::new("select").hidden()));
            let element = bind(&driver, menu.clone());
            assert!(element.hover().await.succeeded());
            assert!(element.scroll_into_view().await.succeeded());
            assert!(element.select_option("python").await.succeeded());
            assert_eq!(driver.value_of(&menu).as_deref(), Some("python"));
            assert!(!driver.was_called("wait_for_state"));
        }
    }

    mod state_tests {
        use super::*;

        #[tokio::test]
        async fn test_state_checks() {
            let toggle = Selector::css("input#dark-mode");
            let driver = Arc::new(
                MockDriver::new().with_node(toggle.clone(), MockNode::new("input").checked().disabled()),
            );
            let element = bind(&driver, toggle);
            assert_eq!(element.is_visible().await, Interaction::Success(true));
            assert_eq!(element.is_enabled().await, Interaction::Success(false));
            assert_eq!(element.is_checked().await, Interaction::Success(true));
        }

        #[tokio::test]
        async fn test_state_check_on_missing_element() {
            let driver = Arc::new(MockDriver::new());
            let element = bind(&driver, Selector::css("#gone"));
            assert_eq!(element.is_visible().await, Interaction::Success(false));
            assert!(matches!(element.is_enabled().await, Interaction::DriverError(_)));
        }

        #[tokio::test]
        async fn test_driver_timeout_keeps_waited_duration() {
            let banner = Selector::css(".hero");
            let driver = Arc::new(MockDriver::new().with_node(
                banner.clone(),
                MockNode::new("section").failing(DriverError::Timeout { ms: 1500 }),
            ));
            let element = bind(&driver, banner);
            assert_eq!(
                element.text().await,
                Interaction::Timeout {
                    waited: Duration::from_millis(1500)
                }
            );
            assert_eq!(
                element.is_visible().await,
                Interaction::Timeout {
                    waited: Duration::from_millis(1500)
                }
            );
        }

        #[tokio::test]
        async fn test_reads() {
            let link = Selector::css("a.getStarted");
            let driver = Arc::new(MockDriver::new().with_node(
                link.clone(),
                MockNode::new("a")
                    .with_text("Get started")
                    .with_attribute("href", "/docs/intro"),
            ));
            let element = bind(&driver, link);
            assert_eq!(element.text().await, Interaction::Success("Get started".into()));
            assert_eq!(
                element.attribute("href").await,
                Interaction::Success(Some("/docs/intro".into()))
            );
            assert_eq!(element.attribute("target").await, Interaction::Success(None));
        }

        #[tokio::test]
        async fn test_handles_are_interchangeable() {
            let hero = Selector::css(".hero");
            let driver = Arc::new(MockDriver::new().with_node(hero.clone(), MockNode::new("section")));
            let a = bind(&driver, hero.clone());
            let b = a.clone();
            assert_eq!(a.is_visible().await, b.is_visible().await);
            assert_eq!(a.selector(), &hero);
        }
    }
}
