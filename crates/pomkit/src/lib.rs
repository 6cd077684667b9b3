//! Pomkit: page-object-model element interaction and resolution layer.
//!
//! Test authors describe pages declaratively and interact with them through
//! timeout-bounded element handles:
//!
//! ```text
//! ┌──────────────┐   resolve    ┌───────────────┐
//! │ Page object  │─────────────►│ Locator Store │  (page, element) → Selector
//! │              │              └───────────────┘
//! │              │   bind       ┌───────────────┐   wait/act   ┌────────────┐
//! │              │─────────────►│ Element       │─────────────►│ PageDriver │
//! │              │              └───────────────┘              └────────────┘
//! │              │   expect     ┌───────────────┐
//! │              │─────────────►│ Locale Store  │  (locale, page) → strings
//! └──────────────┘              └───────────────┘
//! ```
//!
//! Resolution and configuration problems are [`PomError`]s. Interactions
//! never raise; they report an [`Interaction`].

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_frames))]

mod config;
mod driver;
mod element;
mod expect;
mod hooks;
mod interaction;
mod locale_store;
mod locator_store;
mod page_object;
mod result;
mod selector;

/// Chrome DevTools Protocol driver
#[cfg(feature = "chromium")]
pub mod chromium;
pub mod constants;
pub mod logging;

pub use config::{Platform, RuntimeConfig, LOCALE_ENV, PLATFORM_ENV};
pub use driver::{
    BoundingBox, DriverError, DriverResult, ElementState, LoadState, MockDriver, MockNode,
    NodeHandle, PageDriver,
};
pub use element::{ActionOptions, Element};
pub use expect::Expect;
pub use hooks::Hooks;
pub use interaction::Interaction;
pub use locale_store::{LocaleDocument, LocaleStrings, PageStrings};
pub use locator_store::{LocatorDocument, LocatorIndex, PageLocators, SelectorDefinition};
pub use page_object::{BasePage, PageObject};
pub use result::{PomError, PomResult};
pub use selector::{Selector, SelectorParseError};

#[cfg(feature = "chromium")]
pub use chromium::{ChromiumDriver, ChromiumOptions};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::constants::{pause, timeout};
    pub use super::{
        ActionOptions, BasePage, Element, Expect, Hooks, Interaction, LocaleStrings,
        LocatorIndex, MockDriver, MockNode, PageDriver, PageLocators, PageObject, PageStrings,
        Platform, PomError, PomResult, RuntimeConfig, Selector,
    };
    pub use async_trait::async_trait;
}
