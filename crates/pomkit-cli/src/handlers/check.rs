//! Check command handler

use crate::error::{CliError, CliResult};
use crate::CheckArgs;
use pomkit::{LocaleStrings, LocatorIndex, Platform, RuntimeConfig};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Effective runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    /// Active locale
    pub locale: String,
    /// Active platform
    pub platform: Platform,
    /// URL opened before each test
    pub base_url: String,
    /// Element wait in milliseconds
    pub object_load_timeout_ms: u64,
    /// Page load wait in milliseconds
    pub page_load_timeout_ms: u64,
    /// Settle pause in milliseconds
    pub pause_ms: u64,
}

impl From<&RuntimeConfig> for ConfigSummary {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            locale: config.locale.clone(),
            platform: config.platform,
            base_url: config.base_url.clone(),
            object_load_timeout_ms: millis(config.object_load_timeout),
            page_load_timeout_ms: millis(config.page_load_timeout),
            pause_ms: millis(config.pause),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// One page of locators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// Page name
    pub page: String,
    /// File that defined it
    pub source: String,
    /// Elements with a selector for the active platform
    pub elements: usize,
}

/// One locale's pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleSummary {
    /// Locale tag
    pub locale: String,
    /// Pages with strings
    pub pages: Vec<String>,
}

/// Result of a successful check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Effective configuration
    pub config: ConfigSummary,
    /// Locator pages
    pub pages: Vec<PageSummary>,
    /// Locale string bundles
    pub locales: Vec<LocaleSummary>,
}

/// Execute the check command
///
/// Fails when any source does not load, when no locator pages exist or
/// when the configured locale has no strings.
pub fn execute_check(args: &CheckArgs) -> CliResult<CheckReport> {
    let mut config = RuntimeConfig::from_file(&args.config)?.with_env_overrides()?;
    if let Some(platform) = args.platform {
        config = config.with_platform(platform.into());
    }
    debug!(config = %args.config.display(), platform = %config.platform, "checking sources");

    let index = LocatorIndex::load_dir(&args.locators, config.platform)?;
    let strings = LocaleStrings::load_dir(&args.strings)?;
    check_sources(&config, &index, &strings)
}

/// Validate already-loaded sources against `config`
pub fn check_sources(
    config: &RuntimeConfig,
    index: &LocatorIndex,
    strings: &LocaleStrings,
) -> CliResult<CheckReport> {
    let pages = index
        .pages()
        .map(|name| {
            index.page(name).map(|locators| PageSummary {
                page: name.to_string(),
                source: locators.source().to_string(),
                elements: locators.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if pages.is_empty() {
        return Err(CliError::check("no locator pages defined"));
    }

    let locales = strings
        .locales()
        .map(|locale| {
            strings.pages(locale).map(|names| LocaleSummary {
                locale: locale.to_string(),
                pages: names.into_iter().map(str::to_string).collect(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if !locales.iter().any(|l| l.locale == config.locale) {
        return Err(CliError::check(format!(
            "no strings for configured locale '{}'",
            config.locale
        )));
    }

    info!(pages = pages.len(), locales = locales.len(), "sources check out");
    Ok(CheckReport {
        config: ConfigSummary::from(config),
        pages,
        locales,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pomkit::{LocaleDocument, LocatorDocument};

    fn index() -> LocatorIndex {
        let doc = LocatorDocument::from_json_str(
            "home.json",
            r##"{"homePage": {"container": "#root", "appLogo": {"android": "accessibility_id=logo"}}}"##,
        )
        .unwrap();
        LocatorIndex::from_documents([doc], Platform::Web).unwrap()
    }

    fn strings(locale: &str) -> LocaleStrings {
        let json = format!(
            r#"[{{"locale": "{locale}", "strings": [{{"page": "homePage", "strings": {{"pageTitle": "Playwright"}}}}]}}]"#
        );
        LocaleStrings::from_documents([LocaleDocument::from_json_str("strings.json", &json).unwrap()])
    }

    #[test]
    fn test_report_counts_platform_elements() {
        let config = RuntimeConfig::default();
        let report = check_sources(&config, &index(), &strings("en-US")).unwrap();
        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.pages[0].page, "homePage");
        assert_eq!(report.pages[0].source, "home.json");
        assert_eq!(report.pages[0].elements, 1);
        assert_eq!(report.locales[0].pages, vec!["homePage".to_string()]);
        assert_eq!(report.config.locale, "en-US");
    }

    #[test]
    fn test_missing_configured_locale_fails() {
        let config = RuntimeConfig::default().with_locale("fr-FR");
        let err = check_sources(&config, &index(), &strings("en-US")).unwrap_err();
        assert!(matches!(err, CliError::Check { .. }));
        assert!(err.to_string().contains("fr-FR"));
    }

    #[test]
    fn test_empty_locators_fail() {
        let empty = LocatorIndex::from_documents([], Platform::Web).unwrap();
        let err = check_sources(&RuntimeConfig::default(), &empty, &strings("en-US")).unwrap_err();
        assert!(err.to_string().contains("no locator pages"));
    }

    #[test]
    fn test_summary_in_milliseconds() {
        let config = RuntimeConfig::default()
            .with_object_load_timeout(Duration::from_secs(10))
            .with_pause(Duration::from_millis(250));
        let summary = ConfigSummary::from(&config);
        assert_eq!(summary.object_load_timeout_ms, 10_000);
        assert_eq!(summary.pause_ms, 250);
    }
}
