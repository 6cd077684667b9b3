//! `PageDriver` over the Chrome DevTools Protocol (chromiumoxide).
//!
//! Element operations run as small scripts built from
//! [`Selector::to_query`]. Waits poll the element's state until it matches
//! or the timeout elapses.

use crate::driver::{
    BoundingBox, DriverError, DriverResult, ElementState, LoadState, NodeHandle, PageDriver,
};
use crate::selector::Selector;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Deserialize)]
struct NodeSnapshot {
    visible: bool,
    tag: String,
    text: Option<String>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Deserialize)]
struct AttributeSnapshot {
    value: Option<String>,
}

/// Launch options for [`ChromiumDriver`]
#[derive(Debug, Clone)]
pub struct ChromiumOptions {
    /// Run without a window
    pub headless: bool,
    /// Disable the sandbox (containers)
    pub sandbox: bool,
    /// Chrome executable override
    pub executable: Option<String>,
}

impl Default for ChromiumOptions {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            executable: None,
        }
    }
}

/// Chromium session with a single page
pub struct ChromiumDriver {
    browser: Mutex<Browser>,
    page: Page,
    handler: tokio::task::JoinHandle<()>,
}

impl std::fmt::Debug for ChromiumDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromiumDriver").finish_non_exhaustive()
    }
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    pub async fn launch(options: ChromiumOptions) -> DriverResult<Self> {
        let mut builder = BrowserConfig::builder();
        if !options.headless {
            builder = builder.with_head();
        }
        if !options.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = options.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(DriverError::protocol)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(protocol)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        let page = browser.new_page("about:blank").await.map_err(protocol)?;
        debug!(headless = options.headless, "chromium launched");

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler,
        })
    }

    async fn eval<T: DeserializeOwned>(&self, script: String) -> DriverResult<T> {
        self.page
            .evaluate(script)
            .await
            .map_err(protocol)?
            .into_value()
            .map_err(protocol)
    }

    /// Run `body` with `el` bound to the first match; `NotFound` if none.
    async fn on_element<T: DeserializeOwned>(
        &self,
        selector: &Selector,
        body: &str,
    ) -> DriverResult<T> {
        let script = element_script(selector, body);
        self.eval::<Option<T>>(script)
            .await?
            .ok_or_else(|| DriverError::not_found(selector))
    }

    async fn snapshot(&self, selector: &Selector) -> DriverResult<Option<NodeSnapshot>> {
        self.eval(element_script(
            selector,
            "const r = el.getBoundingClientRect(); \
             const s = getComputedStyle(el); \
             return { visible: r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none', \
                      tag: el.tagName.toLowerCase(), text: el.textContent, \
                      x: r.x, y: r.y, width: r.width, height: r.height };",
        ))
        .await
    }
}

fn protocol(err: impl std::fmt::Display) -> DriverError {
    DriverError::protocol(err.to_string())
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn element_script(selector: &Selector, body: &str) -> String {
    format!(
        "(() => {{ const el = {}; if (!el) return null; {body} }})()",
        selector.to_query()
    )
}

fn to_handle(selector: &Selector, snapshot: NodeSnapshot) -> NodeHandle {
    let mut handle = NodeHandle::new(selector.to_string(), snapshot.tag);
    handle.text_content = snapshot.text;
    if snapshot.visible {
        handle.bounding_box = Some(BoundingBox::new(
            snapshot.x,
            snapshot.y,
            snapshot.width,
            snapshot.height,
        ));
    }
    handle
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn wait_for_state(
        &self,
        selector: &Selector,
        state: ElementState,
        timeout: Duration,
    ) -> DriverResult<Option<NodeHandle>> {
        let deadline = Instant::now() + timeout;
        loop {
            let snapshot = self.snapshot(selector).await?;
            let reached = match (&snapshot, state) {
                (Some(_), ElementState::Attached) => true,
                (Some(p), ElementState::Visible) => p.visible,
                (Some(p), ElementState::Hidden) => !p.visible,
                (None, ElementState::Hidden) => true,
                (None, ElementState::Attached | ElementState::Visible) => false,
            };
            if reached {
                return Ok(match state {
                    ElementState::Hidden => None,
                    ElementState::Attached | ElementState::Visible => {
                        snapshot.map(|p| to_handle(selector, p))
                    }
                });
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(DriverError::timeout(timeout));
            }
            tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    async fn is_visible(&self, selector: &Selector) -> DriverResult<bool> {
        Ok(self.snapshot(selector).await?.is_some_and(|p| p.visible))
    }

    async fn is_enabled(&self, selector: &Selector) -> DriverResult<bool> {
        self.on_element(selector, "return !el.disabled;").await
    }

    async fn is_checked(&self, selector: &Selector) -> DriverResult<bool> {
        self.on_element(selector, "return !!el.checked;").await
    }

    async fn click(&self, selector: &Selector) -> DriverResult<()> {
        self.on_element::<bool>(selector, "el.click(); return true;")
            .await
            .map(|_| ())
    }

    async fn double_click(&self, selector: &Selector) -> DriverResult<()> {
        self.on_element::<bool>(
            selector,
            "el.dispatchEvent(new MouseEvent('dblclick', { bubbles: true, cancelable: true })); return true;",
        )
        .await
        .map(|_| ())
    }

    async fn fill(&self, selector: &Selector, text: &str) -> DriverResult<()> {
        let body = format!(
            "el.focus(); el.value = {}; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); return true;",
            js_string(text)
        );
        self.on_element::<bool>(selector, &body).await.map(|_| ())
    }

    async fn text_content(&self, selector: &Selector) -> DriverResult<String> {
        self.on_element(selector, "return el.textContent ?? '';").await
    }

    async fn input_value(&self, selector: &Selector) -> DriverResult<String> {
        self.on_element(selector, "return el.value ?? '';").await
    }

    async fn attribute(&self, selector: &Selector, name: &str) -> DriverResult<Option<String>> {
        let body = format!("return {{ value: el.getAttribute({}) }};", js_string(name));
        let attribute: AttributeSnapshot = self.on_element(selector, &body).await?;
        Ok(attribute.value)
    }

    async fn hover(&self, selector: &Selector) -> DriverResult<()> {
        self.on_element::<bool>(
            selector,
            "el.dispatchEvent(new MouseEvent('mouseover', { bubbles: true })); \
             el.dispatchEvent(new MouseEvent('mouseenter')); return true;",
        )
        .await
        .map(|_| ())
    }

    async fn scroll_into_view(&self, selector: &Selector) -> DriverResult<()> {
        self.on_element::<bool>(
            selector,
            "el.scrollIntoView({ block: 'center', inline: 'nearest' }); return true;",
        )
        .await
        .map(|_| ())
    }

    async fn select_option(&self, selector: &Selector, value: &str) -> DriverResult<()> {
        let body = format!(
            "el.value = {}; el.dispatchEvent(new Event('change', {{ bubbles: true }})); return true;",
            js_string(value)
        );
        self.on_element::<bool>(selector, &body).await.map(|_| ())
    }

    async fn drag_to(&self, selector: &Selector, target: &Selector) -> DriverResult<()> {
        let body = format!(
            "const target = {}; if (!target) return false; \
             const data = new DataTransfer(); \
             el.dispatchEvent(new DragEvent('dragstart', {{ bubbles: true, dataTransfer: data }})); \
             target.dispatchEvent(new DragEvent('dragover', {{ bubbles: true, dataTransfer: data }})); \
             target.dispatchEvent(new DragEvent('drop', {{ bubbles: true, dataTransfer: data }})); \
             el.dispatchEvent(new DragEvent('dragend', {{ bubbles: true, dataTransfer: data }})); \
             return true;",
            target.to_query()
        );
        if self.on_element::<bool>(selector, &body).await? {
            Ok(())
        } else {
            Err(DriverError::not_found(target))
        }
    }

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        self.page.goto(url).await.map_err(protocol)?;
        Ok(())
    }

    async fn title(&self) -> DriverResult<String> {
        Ok(self.page.get_title().await.map_err(protocol)?.unwrap_or_default())
    }

    async fn current_url(&self) -> DriverResult<String> {
        Ok(self.page.url().await.map_err(protocol)?.unwrap_or_default())
    }

    async fn go_back(&self) -> DriverResult<()> {
        self.eval::<bool>("(() => { history.back(); return true; })()".to_string())
            .await
            .map(|_| ())
    }

    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> DriverResult<()> {
        let ready = match state {
            LoadState::DomContentLoaded => "document.readyState !== 'loading'",
            LoadState::Load | LoadState::NetworkIdle => "document.readyState === 'complete'",
        };
        let deadline = Instant::now() + timeout;
        loop {
            if self.eval::<bool>(ready.to_string()).await? {
                return Ok(());
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(DriverError::timeout(timeout));
            }
            tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    async fn set_viewport(&self, width: u32, height: u32) -> DriverResult<()> {
        let params =
            SetDeviceMetricsOverrideParams::new(i64::from(width), i64::from(height), 1.0, false);
        self.page.execute(params).await.map_err(protocol)?;
        Ok(())
    }

    async fn close(&self) -> DriverResult<()> {
        let mut browser = self.browser.lock().await;
        if let Err(err) = browser.close().await {
            warn!(error = %err, "chromium did not close cleanly");
            return Err(protocol(err));
        }
        self.handler.abort();
        Ok(())
    }
}
