//! Assertion helpers for page-level and element-level checks.
//!
//! Every validator returns `PomResult<()>`, failing with
//! [`PomError::AssertionFailed`] so test steps can use `?`.

use crate::element::Element;
use crate::interaction::Interaction;
use crate::result::{PomError, PomResult};
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, error};

/// Validators for test assertions
#[derive(Debug, Clone, Copy)]
pub struct Expect;

impl Expect {
    /// Assert two values are equal
    pub fn equals<T: PartialEq + Debug>(actual: &T, expected: &T) -> PomResult<()> {
        if actual == expected {
            debug!(?actual, "assertion passed");
            Ok(())
        } else {
            fail(format!("expected {expected:?}, got {actual:?}"))
        }
    }

    /// Assert a boolean outcome
    pub fn boolean(actual: bool, expected: bool) -> PomResult<()> {
        Self::equals(&actual, &expected)
    }

    /// Assert the page title
    pub fn title(actual: &str, expected: &str) -> PomResult<()> {
        if actual == expected {
            Ok(())
        } else {
            fail(format!("expected title '{expected}', got '{actual}'"))
        }
    }

    /// Assert the page URL
    pub fn url(actual: &str, expected: &str) -> PomResult<()> {
        if actual == expected {
            Ok(())
        } else {
            fail(format!("expected url '{expected}', got '{actual}'"))
        }
    }

    /// Assert exact text
    pub fn text(actual: &str, expected: &str) -> PomResult<()> {
        if actual == expected {
            Ok(())
        } else {
            fail(format!("expected text '{expected}', got '{actual}'"))
        }
    }

    /// Assert a string contains a substring
    pub fn contains_text(haystack: &str, needle: &str) -> PomResult<()> {
        if haystack.contains(needle) {
            Ok(())
        } else {
            fail(format!("expected '{haystack}' to contain '{needle}'"))
        }
    }

    /// Assert an attribute value, `None` meaning absent
    pub fn attribute(name: &str, actual: Option<&str>, expected: &str) -> PomResult<()> {
        match actual {
            Some(value) if value == expected => Ok(()),
            Some(value) => fail(format!(
                "expected attribute {name}='{expected}', got '{value}'"
            )),
            None => fail(format!(
                "expected attribute {name}='{expected}', attribute is absent"
            )),
        }
    }

    /// Assert the element becomes visible
    pub async fn element_visible(element: &Element, timeout: Option<Duration>) -> PomResult<()> {
        match element.wait_for_visible(timeout).await {
            Interaction::Success(()) => Ok(()),
            other => fail(format!(
                "expected {} to be visible: {}",
                element.selector(),
                describe(&other)
            )),
        }
    }

    /// Assert the element is hidden or detached
    pub async fn element_hidden(element: &Element, timeout: Option<Duration>) -> PomResult<()> {
        match element.wait_for_hidden(timeout).await {
            Interaction::Success(()) => Ok(()),
            other => fail(format!(
                "expected {} to be hidden: {}",
                element.selector(),
                describe(&other)
            )),
        }
    }

    /// Assert the element's text content
    pub async fn element_text(element: &Element, expected: &str) -> PomResult<()> {
        let actual = read(element, element.text().await)?;
        Self::text(actual.trim(), expected)
    }

    /// Assert the element's attribute value
    pub async fn element_attribute(element: &Element, name: &str, expected: &str) -> PomResult<()> {
        let actual = read(element, element.attribute(name).await)?;
        Self::attribute(name, actual.as_deref(), expected)
    }

    /// Assert the element is enabled
    pub async fn element_enabled(element: &Element) -> PomResult<()> {
        if read(element, element.is_enabled().await)? {
            Ok(())
        } else {
            fail(format!("expected {} to be enabled", element.selector()))
        }
    }

    /// Assert the element is disabled
    pub async fn element_disabled(element: &Element) -> PomResult<()> {
        if read(element, element.is_enabled().await)? {
            fail(format!("expected {} to be disabled", element.selector()))
        } else {
            Ok(())
        }
    }
}

fn fail(message: String) -> PomResult<()> {
    error!(%message, "assertion failed");
    Err(PomError::assertion(message))
}

fn read<T>(element: &Element, outcome: Interaction<T>) -> PomResult<T> {
    match outcome {
        Interaction::Success(value) => Ok(value),
        other => Err(PomError::assertion(format!(
            "could not read {}: {}",
            element.selector(),
            describe(&other)
        ))),
    }
}

fn describe<T>(outcome: &Interaction<T>) -> String {
    match outcome {
        Interaction::Success(_) => "ok".to_string(),
        Interaction::Timeout { waited } => format!("timed out after {}ms", waited.as_millis()),
        Interaction::DriverError(detail) => detail.clone(),
    }
}
