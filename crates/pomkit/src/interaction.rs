//! Outcome of one element interaction.
//!
//! Waits, state checks, reads and actions all report through [`Interaction`]
//! instead of raising. A timeout and a driver failure stay distinguishable,
//! and [`Interaction::succeeded`] collapses both into the plain boolean view.

use crate::driver::{DriverError, DriverResult};
use crate::result::{PomError, PomResult};
use std::time::Duration;

/// Result of an element interaction
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Interaction<T> {
    /// The interaction completed
    Success(T),
    /// The bounded wait elapsed first
    Timeout {
        /// How long was waited
        waited: Duration,
    },
    /// The driver reported a failure
    DriverError(String),
}

impl<T> Interaction<T> {
    /// True for `Success`
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// True for `Timeout`
    #[must_use]
    pub const fn timed_out(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The success value, if any
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Timeout { .. } | Self::DriverError(_) => None,
        }
    }

    /// Map the success value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Interaction<U> {
        match self {
            Self::Success(value) => Interaction::Success(f(value)),
            Self::Timeout { waited } => Interaction::Timeout { waited },
            Self::DriverError(detail) => Interaction::DriverError(detail),
        }
    }

    /// Carry a failure over to another value type.
    ///
    /// Returns `None` for `Success`.
    pub fn failure<U>(&self) -> Option<Interaction<U>> {
        match self {
            Self::Success(_) => None,
            Self::Timeout { waited } => Some(Interaction::Timeout { waited: *waited }),
            Self::DriverError(detail) => Some(Interaction::DriverError(detail.clone())),
        }
    }

    /// Convert to a `PomResult` for fail-fast callers
    pub fn into_result(self, selector: impl ToString) -> PomResult<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Timeout { waited } => Err(PomError::Interaction {
                selector: selector.to_string(),
                message: format!("timed out after {}ms", waited.as_millis()),
            }),
            Self::DriverError(detail) => Err(PomError::Interaction {
                selector: selector.to_string(),
                message: detail,
            }),
        }
    }

    /// Fold a driver result; `waited` is reported if the driver timed out.
    pub fn from_driver(result: DriverResult<T>, waited: Duration) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(DriverError::Timeout { .. }) => Self::Timeout { waited },
            Err(err) => Self::DriverError(err.to_string()),
        }
    }
}
