//! Selector strategies for locating elements.
//!
//! Locator definition files hold selectors as strings. They are parsed into a
//! [`Selector`] when the definitions load, so a malformed entry fails the
//! load instead of the first test that touches it.
//!
//! | Written form                          | Strategy          |
//! |---------------------------------------|-------------------|
//! | `css=<expr>` or anything else         | [`Selector::Css`] |
//! | `xpath=<expr>`, `/…`, `//…`, `(//…)`  | [`Selector::XPath`] |
//! | `~<id>`, `accessibility_id=<id>`      | [`Selector::AccessibilityId`] |
//! | `text=<text>`                         | [`Selector::Text`] |

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CSS_PREFIX: &str = "css=";
const XPATH_PREFIX: &str = "xpath=";
const TEXT_PREFIX: &str = "text=";
const ACCESSIBILITY_PREFIX: &str = "accessibility_id=";

/// Why a selector string was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SelectorParseError {
    /// Human-readable reason
    pub reason: String,
}

impl SelectorParseError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., "button.get-started")
    Css(String),
    /// XPath expression
    XPath(String),
    /// Platform accessibility identifier (content-desc / accessibilityIdentifier / aria-label)
    AccessibilityId(String),
    /// Visible text content
    Text(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create an accessibility-id selector
    #[must_use]
    pub fn accessibility_id(id: impl Into<String>) -> Self {
        Self::AccessibilityId(id.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Classify and validate a written selector
    pub fn parse(raw: &str) -> Result<Self, SelectorParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SelectorParseError::new("selector is empty"));
        }

        if let Some(expr) = trimmed.strip_prefix(XPATH_PREFIX) {
            return Self::parse_xpath(expr.trim());
        }
        if let Some(expr) = trimmed.strip_prefix(CSS_PREFIX) {
            return Self::parse_css(expr.trim());
        }
        if let Some(text) = trimmed.strip_prefix(TEXT_PREFIX) {
            if text.is_empty() {
                return Err(SelectorParseError::new("text selector is empty"));
            }
            return Ok(Self::Text(text.to_string()));
        }
        if let Some(id) = trimmed
            .strip_prefix(ACCESSIBILITY_PREFIX)
            .or_else(|| trimmed.strip_prefix('~'))
        {
            let id = id.trim();
            if id.is_empty() {
                return Err(SelectorParseError::new("accessibility id is empty"));
            }
            return Ok(Self::AccessibilityId(id.to_string()));
        }
        if trimmed.starts_with('/') || trimmed.starts_with("(/") {
            return Self::parse_xpath(trimmed);
        }
        Self::parse_css(trimmed)
    }

    fn parse_css(expr: &str) -> Result<Self, SelectorParseError> {
        if expr.is_empty() {
            return Err(SelectorParseError::new("css selector is empty"));
        }
        check_balanced(expr)?;
        Ok(Self::Css(expr.to_string()))
    }

    fn parse_xpath(expr: &str) -> Result<Self, SelectorParseError> {
        if !(expr.starts_with('/') || expr.starts_with('(')) {
            return Err(SelectorParseError::new(format!(
                "xpath '{expr}' must start with '/' or '('"
            )));
        }
        check_balanced(expr)?;
        Ok(Self::XPath(expr.to_string()))
    }

    /// Strategy name, for logs
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::AccessibilityId(_) => "accessibility_id",
            Self::Text(_) => "text",
        }
    }

    /// The expression without its strategy marker
    #[must_use]
    pub fn expression(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) | Self::AccessibilityId(s) | Self::Text(s) => s,
        }
    }

    /// Convert to a JavaScript expression yielding the first matching node
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::AccessibilityId(id) => {
                format!("document.querySelector('[aria-label=' + JSON.stringify({id:?}) + ']')")
            }
            Self::Text(t) => {
                format!("Array.from(document.querySelectorAll('body *')).find(el => el.children.length === 0 && el.textContent.trim() === {t:?})")
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) | Self::XPath(s) => f.write_str(s),
            Self::AccessibilityId(id) => write!(f, "~{id}"),
            Self::Text(t) => write!(f, "{TEXT_PREFIX}{t}"),
        }
    }
}

impl FromStr for Selector {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Brackets and parentheses must nest and quotes must close.
fn check_balanced(expr: &str) -> Result<(), SelectorParseError> {
    let mut stack: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in expr.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
            continue;
        }
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '[' | '(' => stack.push(ch),
            ']' | ')' => {
                let open = if ch == ']' { '[' } else { '(' };
                if stack.pop() != Some(open) {
                    return Err(SelectorParseError::new(format!(
                        "unbalanced '{ch}' in '{expr}'"
                    )));
                }
            }
            _ => {}
        }
    }

    if let Some(q) = quote {
        return Err(SelectorParseError::new(format!(
            "unterminated {q} quote in '{expr}'"
        )));
    }
    if let Some(open) = stack.pop() {
        return Err(SelectorParseError::new(format!(
            "unclosed '{open}' in '{expr}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod classification_tests {
        use super::*;

        #[test]
        fn test_plain_css() {
            assert_eq!(Selector::parse("#root").unwrap(), Selector::css("#root"));
            assert_eq!(
                Selector::parse("button.get-started").unwrap(),
                Selector::css("button.get-started")
            );
        }

        #[test]
        fn test_prefixed_css() {
            assert_eq!(
                Selector::parse("css=nav a[href='/docs']").unwrap(),
                Selector::css("nav a[href='/docs']")
            );
        }

        #[test]
        fn test_xpath_forms() {
            assert_eq!(
                Selector::parse("//h1[@class='hero']").unwrap(),
                Selector::xpath("//h1[@class='hero']")
            );
            assert_eq!(
                Selector::parse("(//a)[2]").unwrap(),
                Selector::xpath("(//a)[2]")
            );
            assert_eq!(
                Selector::parse("xpath=/html/body").unwrap(),
                Selector::xpath("/html/body")
            );
        }

        #[test]
        fn test_accessibility_id_forms() {
            assert_eq!(
                Selector::parse("~login-button").unwrap(),
                Selector::accessibility_id("login-button")
            );
            assert_eq!(
                Selector::parse("accessibility_id=Search").unwrap(),
                Selector::accessibility_id("Search")
            );
        }

        #[test]
        fn test_text_selector_keeps_inner_spacing() {
            assert_eq!(
                Selector::parse("text=Get started").unwrap(),
                Selector::text("Get started")
            );
        }

        #[test]
        fn test_surrounding_whitespace_trimmed() {
            assert_eq!(Selector::parse("  .hero  ").unwrap(), Selector::css(".hero"));
        }
    }

    mod rejection_tests {
        use super::*;

        #[test]
        fn test_empty() {
            assert!(Selector::parse("").is_err());
            assert!(Selector::parse("   ").is_err());
            assert!(Selector::parse("css=").is_err());
            assert!(Selector::parse("~").is_err());
            assert!(Selector::parse("text=").is_err());
        }

        #[test]
        fn test_unbalanced_css() {
            let err = Selector::parse("a[href='/docs'").unwrap_err();
            assert!(err.reason.contains("unclosed"));
            assert!(Selector::parse("div)").is_err());
            assert!(Selector::parse("li:nth-child(2]").is_err());
        }

        #[test]
        fn test_unterminated_quote() {
            let err = Selector::parse("a[title=\"x]").unwrap_err();
            assert!(err.reason.contains("unterminated"));
        }

        #[test]
        fn test_brackets_inside_quotes_ignored() {
            assert!(Selector::parse("a[title='[not a bracket']").is_ok());
        }

        #[test]
        fn test_escaped_characters() {
            assert!(Selector::parse(r"#id\:with\[colon").is_ok());
        }

        #[test]
        fn test_unrooted_xpath() {
            let err = Selector::parse("xpath=h1").unwrap_err();
            assert!(err.reason.contains("must start"));
        }
    }

    #[test]
    fn test_display_matches_written_form() {
        assert_eq!(Selector::css(".hero").to_string(), ".hero");
        assert_eq!(Selector::xpath("//h1").to_string(), "//h1");
        assert_eq!(Selector::accessibility_id("menu").to_string(), "~menu");
        assert_eq!(Selector::text("Docs").to_string(), "text=Docs");
    }

    #[test]
    fn test_strategy_and_expression() {
        let sel = Selector::accessibility_id("menu");
        assert_eq!(sel.strategy(), "accessibility_id");
        assert_eq!(sel.expression(), "menu");
    }

    #[test]
    fn test_to_query() {
        assert_eq!(
            Selector::css("#root").to_query(),
            "document.querySelector(\"#root\")"
        );
        assert!(Selector::xpath("//h1").to_query().contains("document.evaluate"));
        assert!(Selector::text("Docs").to_query().contains("textContent"));
    }

    proptest! {
        #[test]
        fn prop_identifier_classes_are_css(name in "[a-z][a-z0-9-]{0,20}") {
            let sel = Selector::parse(&format!(".{name}")).unwrap();
            prop_assert_eq!(sel, Selector::css(format!(".{name}")));
        }

        #[test]
        fn prop_rooted_paths_are_xpath(tag in "[a-z]{1,8}") {
            let raw = format!("//{tag}");
            let sel = Selector::parse(&raw).unwrap();
            prop_assert_eq!(sel.strategy(), "xpath");
            prop_assert_eq!(sel.to_string(), raw);
        }

        #[test]
        fn prop_parser_never_panics(raw in ".{0,40}") {
            let _ = Selector::parse(&raw);
        }
    }
}
