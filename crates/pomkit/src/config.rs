//! Runtime configuration shared by the stores, page objects and elements.
//!
//! Loaded once at process start (usually from `custom.config.json`) and then
//! shared as `Arc<RuntimeConfig>`. Nothing in the crate mutates it after boot.

use crate::constants::{DEFAULT_OBJECT_LOAD_TIMEOUT, DEFAULT_PAGE_LOAD_TIMEOUT, DEFAULT_PAUSE};
use crate::result::{PomError, PomResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable that overrides the configured locale
pub const LOCALE_ENV: &str = "POMKIT_LOCALE";

/// Environment variable that overrides the configured platform
pub const PLATFORM_ENV: &str = "POMKIT_PLATFORM";

/// Target platform, used to pick platform-specific selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Desktop or mobile web
    #[default]
    Web,
    /// Native Android app
    Android,
    /// Native iOS app
    Ios,
}

impl Platform {
    /// Lower-case key used in locator definition files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" | "browser" => Ok(Self::Web),
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            other => Err(PomError::config(format!("unknown platform '{other}'"))),
        }
    }
}

/// On-disk shape of the runtime configuration file (milliseconds)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    object_load_timeout: Option<u64>,
    page_load_timeout: Option<u64>,
    pause: Option<u64>,
    locale: Option<String>,
    platform: Option<Platform>,
    log_level: Option<String>,
    base_url: Option<String>,
}

/// Process-wide runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Active locale tag (e.g. "en-US")
    pub locale: String,
    /// Active platform
    pub platform: Platform,
    /// Default wait for an element to reach a state
    pub object_load_timeout: Duration,
    /// Default wait for a page load state
    pub page_load_timeout: Duration,
    /// Default settle pause after mutating actions
    pub pause: Duration,
    /// Log filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// URL opened by the `before_each` hook
    pub base_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            platform: Platform::Web,
            object_load_timeout: DEFAULT_OBJECT_LOAD_TIMEOUT,
            page_load_timeout: DEFAULT_PAGE_LOAD_TIMEOUT,
            pause: DEFAULT_PAUSE,
            log_level: "info".to_string(),
            base_url: String::new(),
        }
    }
}

impl RuntimeConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration document
    pub fn from_json_str(json: &str) -> PomResult<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Self::from_file_values(file)
    }

    /// Load the configuration file
    pub fn from_file(path: impl AsRef<Path>) -> PomResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            PomError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&data)?;
        tracing::debug!(
            path = %path.display(),
            locale = %config.locale,
            platform = %config.platform,
            "loaded runtime configuration"
        );
        Ok(config)
    }

    fn from_file_values(file: ConfigFile) -> PomResult<Self> {
        let defaults = Self::default();
        let locale = match file.locale {
            Some(locale) if !locale.trim().is_empty() => locale,
            Some(_) => return Err(PomError::config("locale must not be empty")),
            None => return Err(PomError::config("missing required key 'locale'")),
        };
        Ok(Self {
            locale,
            platform: file.platform.unwrap_or(defaults.platform),
            object_load_timeout: file
                .object_load_timeout
                .map_or(defaults.object_load_timeout, Duration::from_millis),
            page_load_timeout: file
                .page_load_timeout
                .map_or(defaults.page_load_timeout, Duration::from_millis),
            pause: file.pause.map_or(defaults.pause, Duration::from_millis),
            log_level: file.log_level.unwrap_or(defaults.log_level),
            base_url: file.base_url.unwrap_or(defaults.base_url),
        })
    }

    /// Apply `POMKIT_LOCALE` / `POMKIT_PLATFORM` from the process environment
    pub fn with_env_overrides(self) -> PomResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> PomResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(LOCALE_ENV).filter(|l| !l.trim().is_empty()) {
            self.locale = locale;
        }
        if let Some(platform) = lookup(PLATFORM_ENV) {
            self.platform = platform.parse()?;
        }
        Ok(self)
    }

    /// Set locale
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set platform
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the default element wait
    #[must_use]
    pub const fn with_object_load_timeout(mut self, timeout: Duration) -> Self {
        self.object_load_timeout = timeout;
        self
    }

    /// Set the default page load wait
    #[must_use]
    pub const fn with_page_load_timeout(mut self, timeout: Duration) -> Self {
        self.page_load_timeout = timeout;
        self
    }

    /// Set the default settle pause
    #[must_use]
    pub const fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the log filter directive
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}
