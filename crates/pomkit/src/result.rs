//! Result and error types for pomkit.
//!
//! Resolution and configuration problems are `PomError`s and propagate with
//! `?`. Interaction failures never become a `PomError` unless the caller asks
//! for it through [`Interaction::into_result`](crate::Interaction::into_result).

use thiserror::Error;

/// Result type for pomkit operations
pub type PomResult<T> = Result<T, PomError>;

/// Errors that can occur in pomkit
#[derive(Debug, Error)]
pub enum PomError {
    /// No locator definitions exist for the page
    #[error("Locators for page {page} not found in the locator definitions")]
    PageLocatorsNotFound {
        /// Page name
        page: String,
    },

    /// The page is known but the element is not defined for it
    #[error("Locator for element {element} not found in the locator definitions for page {page}")]
    LocatorNotFound {
        /// Page name
        page: String,
        /// Element name
        element: String,
    },

    /// A selector definition could not be parsed
    #[error("Invalid selector for {page}.{element}: {reason}")]
    InvalidSelector {
        /// Page name
        page: String,
        /// Element name
        element: String,
        /// Why the selector was rejected
        reason: String,
    },

    /// No strings are defined for the locale
    #[error("No strings found for locale {locale}")]
    StringsNotFound {
        /// Locale tag
        locale: String,
    },

    /// The locale is known but has no bundle for the page
    #[error("No strings found for page {page} and locale {locale}")]
    PageStringsNotFound {
        /// Locale tag
        locale: String,
        /// Page name
        page: String,
    },

    /// The page bundle has no entry for the key
    #[error("No string {key} found for page {page} and locale {locale}")]
    StringKeyNotFound {
        /// Locale tag
        locale: String,
        /// Page name
        page: String,
        /// String key
        key: String,
    },

    /// A definition file could not be parsed
    #[error("Failed to parse {path}: {message}")]
    DefinitionParse {
        /// File that failed
        path: String,
        /// Parser message
        message: String,
    },

    /// Invalid argument passed to a lookup
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Runtime configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// An interaction failure surfaced on request
    #[error("Interaction with {selector} failed: {message}")]
    Interaction {
        /// Selector the interaction targeted
        selector: String,
        /// Failure detail
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Session-level driver failure (navigation, title, viewport)
    #[error("Driver error: {0}")]
    Driver(#[from] crate::driver::DriverError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl PomError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// True for locator and locale-string lookup failures.
    ///
    /// These point at broken test data rather than a flaky UI.
    #[must_use]
    pub const fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::PageLocatorsNotFound { .. }
                | Self::LocatorNotFound { .. }
                | Self::StringsNotFound { .. }
                | Self::PageStringsNotFound { .. }
                | Self::StringKeyNotFound { .. }
        )
    }
}
