//! Log subscriber setup.
//!
//! Library code only emits `tracing` events. Binaries and test suites call
//! [`init`] once; `RUST_LOG` wins over the configured directive. Log lines go
//! to stderr so command output on stdout stays machine-readable.

use crate::config::RuntimeConfig;
use crate::result::{PomError, PomResult};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable compact lines
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Verbosity picked from `-v`/`-q` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings and errors
    Normal,
    /// Info
    Verbose,
    /// Debug
    Debug,
    /// Everything
    Trace,
}

impl Verbosity {
    /// Map CLI flags; `quiet` beats any number of `-v`
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Level for this verbosity
    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive scoped to the workspace crates
    #[must_use]
    pub fn directive(self) -> String {
        let level = self.level().as_str().to_ascii_lowercase();
        format!("pomkit={level},pomkit_cli={level},playwright_site={level}")
    }
}

/// Install the global subscriber with `directive` as the fallback filter.
///
/// Returns an error if a subscriber is already installed or the directive
/// does not parse.
pub fn init(directive: &str, format: LogFormat) -> PomResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive)
            .map_err(|e| PomError::config(format!("invalid log filter '{directive}': {e}")))?,
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    let installed = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| PomError::config(format!("logging already initialised: {e}")))
}

/// Install the subscriber using the configured `log_level`
pub fn init_from_config(config: &RuntimeConfig, format: LogFormat) -> PomResult<()> {
    init(&config.log_level, format)
}
