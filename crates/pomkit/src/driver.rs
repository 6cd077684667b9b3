//! PageDriver - the boundary between page objects and an automation backend.
//!
//! Everything above this trait speaks in [`Selector`]s and [`Duration`]s;
//! everything below it speaks a concrete protocol. Two implementations ship:
//!
//! - [`MockDriver`] - scriptable in-memory session used by every test
//! - `ChromiumDriver` - CDP via chromiumoxide (feature `chromium`)

use crate::selector::Selector;
use async_trait::async_trait;
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type for driver calls
pub type DriverResult<T> = Result<T, DriverError>;

/// Failures reported by a driver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The driver gave up waiting
    #[error("Timeout after {ms}ms")]
    Timeout {
        /// Milliseconds waited
        ms: u64,
    },

    /// Nothing matches the selector
    #[error("No element matches {selector}")]
    NotFound {
        /// Selector written form
        selector: String,
    },

    /// The element left the document mid-interaction
    #[error("Element {selector} is detached from the document")]
    Detached {
        /// Selector written form
        selector: String,
    },

    /// Transport or protocol failure
    #[error("Protocol error: {message}")]
    Protocol {
        /// Backend message
        message: String,
    },
}

impl DriverError {
    /// Create a timeout error from a duration
    #[must_use]
    pub fn timeout(waited: Duration) -> Self {
        Self::Timeout {
            ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Create a not-found error
    #[must_use]
    pub fn not_found(selector: &Selector) -> Self {
        Self::NotFound {
            selector: selector.to_string(),
        }
    }

    /// Create a protocol error
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

/// Element state a wait can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementState {
    /// In the document, visible or not
    Attached,
    /// In the document with a non-empty box
    Visible,
    /// Detached, or attached with no box
    Hidden,
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attached => "attached",
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        })
    }
}

/// Page load milestones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// `load` event fired
    #[default]
    Load,
    /// `DOMContentLoaded` fired
    DomContentLoaded,
    /// No network activity for a while
    NetworkIdle,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "load",
            Self::DomContentLoaded => "domcontentloaded",
            Self::NetworkIdle => "networkidle",
        })
    }
}

/// Bounding box for an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if the box has area
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Snapshot of a located node, returned by waits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeHandle {
    /// Selector the node was located with
    pub selector: String,
    /// Element tag name
    pub tag_name: String,
    /// Element text content
    pub text_content: Option<String>,
    /// Bounding box if rendered
    pub bounding_box: Option<BoundingBox>,
}

impl NodeHandle {
    /// Create a new node handle
    #[must_use]
    pub fn new(selector: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            tag_name: tag_name.into(),
            text_content: None,
            bounding_box: None,
        }
    }

    /// Check if the node is rendered
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.bounding_box.is_some_and(|b| b.has_area())
    }
}

/// Abstract automation session
///
/// Element-level calls take a [`Selector`]; session-level calls act on the
/// page as a whole. All methods take `&self` so one session can be shared as
/// `Arc<dyn PageDriver>` between page objects.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Wait until the element reaches `state`, up to `timeout`.
    ///
    /// Returns the node for `Attached`/`Visible` and `None` for `Hidden`.
    async fn wait_for_state(
        &self,
        selector: &Selector,
        state: ElementState,
        timeout: Duration,
    ) -> DriverResult<Option<NodeHandle>>;

    /// Is the element visible right now
    async fn is_visible(&self, selector: &Selector) -> DriverResult<bool>;

    /// Is the element enabled right now
    async fn is_enabled(&self, selector: &Selector) -> DriverResult<bool>;

    /// Is the checkbox/radio checked right now
    async fn is_checked(&self, selector: &Selector) -> DriverResult<bool>;

    /// Click the element
    async fn click(&self, selector: &Selector) -> DriverResult<()>;

    /// Double-click the element
    async fn double_click(&self, selector: &Selector) -> DriverResult<()>;

    /// Replace the element's value with `text`
    async fn fill(&self, selector: &Selector, text: &str) -> DriverResult<()>;

    /// Text content of the element
    async fn text_content(&self, selector: &Selector) -> DriverResult<String>;

    /// Current value of an input element
    async fn input_value(&self, selector: &Selector) -> DriverResult<String>;

    /// Attribute value, `None` when absent
    async fn attribute(&self, selector: &Selector, name: &str) -> DriverResult<Option<String>>;

    /// Move the pointer over the element
    async fn hover(&self, selector: &Selector) -> DriverResult<()>;

    /// Scroll the element into the viewport
    async fn scroll_into_view(&self, selector: &Selector) -> DriverResult<()>;

    /// Select an `<option>` by value
    async fn select_option(&self, selector: &Selector, value: &str) -> DriverResult<()>;

    /// Drag the element onto `target`
    async fn drag_to(&self, selector: &Selector, target: &Selector) -> DriverResult<()>;

    /// Unconditional sleep
    async fn wait_for_timeout(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Navigate to URL
    async fn navigate(&self, url: &str) -> DriverResult<()>;

    /// Document title
    async fn title(&self) -> DriverResult<String>;

    /// Current URL
    async fn current_url(&self) -> DriverResult<String>;

    /// Go back one entry in history
    async fn go_back(&self) -> DriverResult<()>;

    /// Wait for a load milestone
    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> DriverResult<()>;

    /// Resize the viewport
    async fn set_viewport(&self, width: u32, height: u32) -> DriverResult<()>;

    /// Close the session
    async fn close(&self) -> DriverResult<()>;
}

/// Scripted state of one node in a [`MockDriver`]
#[derive(Debug, Clone)]
pub struct MockNode {
    tag_name: String,
    visible_after: Option<Duration>,
    enabled: bool,
    checked: bool,
    text: String,
    value: String,
    attributes: HashMap<String, String>,
    failure: Option<DriverError>,
    stalled: bool,
}

impl MockNode {
    /// A visible, enabled node
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            visible_after: Some(Duration::ZERO),
            enabled: true,
            checked: false,
            text: String::new(),
            value: String::new(),
            attributes: HashMap::new(),
            failure: None,
            stalled: false,
        }
    }

    /// Attached but never rendered
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible_after = None;
        self
    }

    /// Becomes visible `delay` after each wait starts
    #[must_use]
    pub const fn visible_after(mut self, delay: Duration) -> Self {
        self.visible_after = Some(delay);
        self
    }

    /// Disabled
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Checked
    #[must_use]
    pub const fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Input value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Every call on this node fails with `error`
    #[must_use]
    pub fn failing(mut self, error: DriverError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Waits on this node never return, ignoring their timeout
    #[must_use]
    pub const fn stalled(mut self) -> Self {
        self.stalled = true;
        self
    }

    fn is_visible(&self) -> bool {
        self.visible_after == Some(Duration::ZERO)
    }

    fn handle(&self, selector: &Selector) -> NodeHandle {
        let mut handle = NodeHandle::new(selector.to_string(), self.tag_name.clone());
        if !self.text.is_empty() {
            handle.text_content = Some(self.text.clone());
        }
        if self.is_visible() {
            handle.bounding_box = Some(BoundingBox::new(0.0, 0.0, 100.0, 20.0));
        }
        handle
    }
}

#[derive(Debug, Default)]
struct MockState {
    nodes: HashMap<Selector, MockNode>,
    title: String,
    url: String,
    back_stack: Vec<String>,
    viewport: Option<(u32, u32)>,
    closed: bool,
    call_history: Vec<String>,
}

enum WaitPlan {
    Ready(Option<NodeHandle>),
    After(Duration, Option<NodeHandle>),
    Never,
    Stall,
    Fail(DriverError),
}

/// Mock driver for unit testing
///
/// Nodes are keyed by selector. A selector with no node is detached.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node (builder form)
    #[must_use]
    pub fn with_node(self, selector: Selector, node: MockNode) -> Self {
        self.add_node(selector, node);
        self
    }

    /// Set the document title (builder form)
    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.state.lock().title = title.into();
        self
    }

    /// Set the current URL (builder form)
    #[must_use]
    pub fn with_url(self, url: impl Into<String>) -> Self {
        self.state.lock().url = url.into();
        self
    }

    /// Add or replace a node
    pub fn add_node(&self, selector: Selector, node: MockNode) {
        let _ = self.state.lock().nodes.insert(selector, node);
    }

    /// Detach a node
    pub fn remove_node(&self, selector: &Selector) -> Option<MockNode> {
        self.state.lock().nodes.remove(selector)
    }

    /// Current scripted state of a node
    #[must_use]
    pub fn node(&self, selector: &Selector) -> Option<MockNode> {
        self.state.lock().nodes.get(selector).cloned()
    }

    /// Current value of a node, as `fill` left it
    #[must_use]
    pub fn value_of(&self, selector: &Selector) -> Option<String> {
        self.state.lock().nodes.get(selector).map(|n| n.value.clone())
    }

    /// Last viewport set
    #[must_use]
    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.state.lock().viewport
    }

    /// Whether `close` was called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().call_history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// How many times a method was called
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        let prefix = format!("{method}:");
        self.state
            .lock()
            .call_history
            .iter()
            .filter(|c| *c == method || c.starts_with(&prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.state.lock().call_history.push(call);
    }

    /// Record `call` and lock the state, failing once the session is closed.
    fn open_session(&self, call: String) -> DriverResult<MutexGuard<'_, MockState>> {
        let mut state = self.state.lock();
        state.call_history.push(call);
        if state.closed {
            return Err(DriverError::protocol("session is closed"));
        }
        Ok(state)
    }

    /// Apply `f` to the node behind `selector`, honoring scripted failures.
    fn with_node_mut<T>(
        &self,
        call: String,
        selector: &Selector,
        f: impl FnOnce(&mut MockNode) -> T,
    ) -> DriverResult<T> {
        let mut state = self.open_session(call)?;
        let node = state
            .nodes
            .get_mut(selector)
            .ok_or_else(|| DriverError::not_found(selector))?;
        if let Some(err) = &node.failure {
            return Err(err.clone());
        }
        Ok(f(node))
    }

    fn plan_wait(&self, selector: &Selector, state: ElementState) -> WaitPlan {
        let guard = self.state.lock();
        if guard.closed {
            return WaitPlan::Fail(DriverError::protocol("session is closed"));
        }
        let Some(node) = guard.nodes.get(selector) else {
            return match state {
                ElementState::Hidden => WaitPlan::Ready(None),
                ElementState::Attached | ElementState::Visible => WaitPlan::Never,
            };
        };
        if node.stalled {
            return WaitPlan::Stall;
        }
        if let Some(err) = &node.failure {
            return WaitPlan::Fail(err.clone());
        }
        match (state, node.visible_after) {
            (ElementState::Attached, _) => WaitPlan::Ready(Some(node.handle(selector))),
            (ElementState::Visible, Some(delay)) if delay.is_zero() => {
                WaitPlan::Ready(Some(node.handle(selector)))
            }
            (ElementState::Visible, Some(delay)) => {
                let mut handle = node.handle(selector);
                handle.bounding_box = Some(BoundingBox::new(0.0, 0.0, 100.0, 20.0));
                WaitPlan::After(delay, Some(handle))
            }
            (ElementState::Visible, None) => WaitPlan::Never,
            (ElementState::Hidden, Some(delay)) if delay.is_zero() => WaitPlan::Never,
            (ElementState::Hidden, _) => WaitPlan::Ready(None),
        }
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn wait_for_state(
        &self,
        selector: &Selector,
        state: ElementState,
        timeout: Duration,
    ) -> DriverResult<Option<NodeHandle>> {
        self.record(format!("wait_for_state:{selector}:{state}"));
        match self.plan_wait(selector, state) {
            WaitPlan::Ready(handle) => Ok(handle),
            WaitPlan::After(delay, handle) if delay < timeout => {
                tokio::time::sleep(delay).await;
                Ok(handle)
            }
            WaitPlan::After(..) | WaitPlan::Never => {
                tokio::time::sleep(timeout).await;
                Err(DriverError::timeout(timeout))
            }
            WaitPlan::Stall => std::future::pending().await,
            WaitPlan::Fail(err) => Err(err),
        }
    }

    async fn is_visible(&self, selector: &Selector) -> DriverResult<bool> {
        let state = self.open_session(format!("is_visible:{selector}"))?;
        match state.nodes.get(selector) {
            None => Ok(false),
            Some(node) => match &node.failure {
                Some(err) => Err(err.clone()),
                None => Ok(node.is_visible()),
            },
        }
    }

    async fn is_enabled(&self, selector: &Selector) -> DriverResult<bool> {
        self.with_node_mut(format!("is_enabled:{selector}"), selector, |n| n.enabled)
    }

    async fn is_checked(&self, selector: &Selector) -> DriverResult<bool> {
        self.with_node_mut(format!("is_checked:{selector}"), selector, |n| n.checked)
    }

    async fn click(&self, selector: &Selector) -> DriverResult<()> {
        self.with_node_mut(format!("click:{selector}"), selector, |_| ())
    }

    async fn double_click(&self, selector: &Selector) -> DriverResult<()> {
        self.with_node_mut(format!("double_click:{selector}"), selector, |_| ())
    }

    async fn fill(&self, selector: &Selector, text: &str) -> DriverResult<()> {
        self.with_node_mut(format!("fill:{selector}"), selector, |n| {
            n.value = text.to_string();
        })
    }

    async fn text_content(&self, selector: &Selector) -> DriverResult<String> {
        self.with_node_mut(format!("text_content:{selector}"), selector, |n| {
            n.text.clone()
        })
    }

    async fn input_value(&self, selector: &Selector) -> DriverResult<String> {
        self.with_node_mut(format!("input_value:{selector}"), selector, |n| {
            n.value.clone()
        })
    }

    async fn attribute(&self, selector: &Selector, name: &str) -> DriverResult<Option<String>> {
        self.with_node_mut(format!("attribute:{selector}:{name}"), selector, |n| {
            n.attributes.get(name).cloned()
        })
    }

    async fn hover(&self, selector: &Selector) -> DriverResult<()> {
        self.with_node_mut(format!("hover:{selector}"), selector, |_| ())
    }

    async fn scroll_into_view(&self, selector: &Selector) -> DriverResult<()> {
        self.with_node_mut(format!("scroll_into_view:{selector}"), selector, |_| ())
    }

    async fn select_option(&self, selector: &Selector, value: &str) -> DriverResult<()> {
        self.with_node_mut(format!("select_option:{selector}"), selector, |n| {
            n.value = value.to_string();
        })
    }

    async fn drag_to(&self, selector: &Selector, target: &Selector) -> DriverResult<()> {
        let target_known = {
            let state = self.state.lock();
            state.closed || state.nodes.contains_key(target)
        };
        if !target_known {
            return Err(DriverError::not_found(target));
        }
        self.with_node_mut(format!("drag_to:{selector}:{target}"), selector, |_| ())
    }

    async fn wait_for_timeout(&self, duration: Duration) {
        self.record(format!("wait_for_timeout:{}", duration.as_millis()));
        tokio::time::sleep(duration).await;
    }

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        let mut state = self.open_session(format!("navigate:{url}"))?;
        let previous = std::mem::replace(&mut state.url, url.to_string());
        if !previous.is_empty() {
            state.back_stack.push(previous);
        }
        Ok(())
    }

    async fn title(&self) -> DriverResult<String> {
        let state = self.open_session("title".to_string())?;
        Ok(state.title.clone())
    }

    async fn current_url(&self) -> DriverResult<String> {
        let state = self.open_session("current_url".to_string())?;
        Ok(state.url.clone())
    }

    async fn go_back(&self) -> DriverResult<()> {
        let mut state = self.open_session("go_back".to_string())?;
        if let Some(previous) = state.back_stack.pop() {
            state.url = previous;
        }
        Ok(())
    }

    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> DriverResult<()> {
        self.open_session(format!("wait_for_load_state:{state}:{}", timeout.as_millis()))
            .map(|_| ())
    }

    async fn set_viewport(&self, width: u32, height: u32) -> DriverResult<()> {
        let mut state = self.open_session(format!("set_viewport:{width}x{height}"))?;
        state.viewport = Some((width, height));
        Ok(())
    }

    async fn close(&self) -> DriverResult<()> {
        let mut state = self.open_session("close".to_string())?;
        state.closed = true;
        Ok(())
    }
}
