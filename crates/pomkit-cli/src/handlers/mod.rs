//! Command handlers
//!
//! Each handler loads what its command needs and returns a serializable
//! report; rendering lives in [`crate::output`].

pub mod check;
pub mod locator;
pub mod strings;

pub use check::{execute_check, CheckReport, ConfigSummary, LocaleSummary, PageSummary};
pub use locator::{execute_locator, LocatorOutput};
pub use strings::{execute_strings, StringsOutput};
