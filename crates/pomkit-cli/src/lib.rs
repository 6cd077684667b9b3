//! Pomkit CLI: validate and query page-object definition sources
//!
//! ## Usage
//!
//! ```bash
//! pomkit check --config custom.config.json --locators locators --strings locale-strings
//! pomkit locator homePage heroBanner --platform web
//! pomkit strings en-US homePage --key pageTitle
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{
    CheckArgs, Cli, ColorArg, Commands, LocatorArgs, OutputFormatArg, PlatformArg, StringsArgs,
};
pub use config::{CliConfig, ColorChoice};
pub use error::{CliError, CliResult};
pub use output::{error_line, OutputFormat, Render};
