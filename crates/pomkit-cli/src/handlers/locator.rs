//! Locator command handler

use crate::error::CliResult;
use crate::LocatorArgs;
use pomkit::{LocatorIndex, Platform};
use serde::Serialize;

/// A resolved selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatorOutput {
    /// Page name
    pub page: String,
    /// Element name
    pub element: String,
    /// Platform it was resolved for
    pub platform: Platform,
    /// Selector strategy (css, xpath, accessibility_id, text)
    pub strategy: String,
    /// Selector expression without its prefix
    pub expression: String,
}

/// Execute the locator command
pub fn execute_locator(args: &LocatorArgs) -> CliResult<LocatorOutput> {
    let platform = Platform::from(args.platform);
    let index = LocatorIndex::load_dir(&args.locators, platform)?;
    resolve(&index, &args.page, &args.element)
}

/// Resolve one element in an already-loaded index
pub fn resolve(index: &LocatorIndex, page: &str, element: &str) -> CliResult<LocatorOutput> {
    let selector = index.resolve(page, element)?;
    Ok(LocatorOutput {
        page: page.to_string(),
        element: element.to_string(),
        platform: index.platform(),
        strategy: selector.strategy().to_string(),
        expression: selector.expression().to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use pomkit::{LocatorDocument, PomError};

    fn index(platform: Platform) -> LocatorIndex {
        let doc = LocatorDocument::from_json_str(
            "menu.json",
            r#"{"menuBar": {"docs": "text=Docs", "logo": {"web": "img.logo", "ios": "accessibility_id=logo"}}}"#,
        )
        .unwrap();
        LocatorIndex::from_documents([doc], platform).unwrap()
    }

    #[test]
    fn test_resolve_text_selector() {
        let out = resolve(&index(Platform::Web), "menuBar", "docs").unwrap();
        assert_eq!(out.strategy, "text");
        assert_eq!(out.expression, "Docs");
    }

    #[test]
    fn test_resolve_per_platform() {
        let out = resolve(&index(Platform::Ios), "menuBar", "logo").unwrap();
        assert_eq!(out.platform, Platform::Ios);
        assert_eq!(out.strategy, "accessibility_id");
        assert_eq!(out.expression, "logo");
    }

    #[test]
    fn test_missing_element() {
        let err = resolve(&index(Platform::Web), "menuBar", "search").unwrap_err();
        assert!(matches!(
            err,
            CliError::Pom(PomError::LocatorNotFound { ref element, .. }) if element == "search"
        ));
    }
}
