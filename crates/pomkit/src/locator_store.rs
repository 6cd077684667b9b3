//! Locator Store: page-keyed element selectors loaded from definition files.
//!
//! A definition file maps page names to element names to selectors:
//!
//! ```json
//! {
//!   "homePage": {
//!     "container": "#root",
//!     "getStartedBtn": { "web": "a.getStarted_Sjon", "android": "~get-started" }
//!   }
//! }
//! ```
//!
//! Files are read in file-name order. When two files define the same page the
//! first one wins. Every selector is parsed while loading, so a malformed
//! entry is reported before any test runs.

use crate::config::Platform;
use crate::result::{PomError, PomResult};
use crate::selector::Selector;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions recognised as definition sources
pub(crate) const DEFINITION_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// One selector definition: shared by all platforms or keyed per platform
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SelectorDefinition {
    /// Same selector on every platform
    Shared(String),
    /// Platform key (`web`, `android`, `ios`) to selector
    PerPlatform(BTreeMap<String, String>),
}

impl SelectorDefinition {
    /// Parse every selector in the definition and pick the one for `platform`
    fn select(
        &self,
        page: &str,
        element: &str,
        platform: Platform,
    ) -> PomResult<Option<Selector>> {
        let invalid = |reason: String| PomError::InvalidSelector {
            page: page.to_string(),
            element: element.to_string(),
            reason,
        };

        match self {
            Self::Shared(raw) => Selector::parse(raw)
                .map(Some)
                .map_err(|e| invalid(e.reason)),
            Self::PerPlatform(by_platform) => {
                let mut chosen = None;
                for (key, raw) in by_platform {
                    let key_platform: Platform = key
                        .parse()
                        .map_err(|_| invalid(format!("unknown platform key '{key}'")))?;
                    let selector = Selector::parse(raw).map_err(|e| invalid(e.reason))?;
                    if key_platform == platform {
                        chosen = Some(selector);
                    }
                }
                Ok(chosen)
            }
        }
    }
}

type PageDefinitions = BTreeMap<String, BTreeMap<String, SelectorDefinition>>;

/// A parsed locator definition source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorDocument {
    source: String,
    pages: PageDefinitions,
}

impl LocatorDocument {
    /// Parse a JSON definition
    pub fn from_json_str(source: impl Into<String>, json: &str) -> PomResult<Self> {
        let source = source.into();
        let pages = DefinitionFormat::Json.parse(&source, json)?;
        Ok(Self { source, pages })
    }

    /// Parse a YAML definition
    pub fn from_yaml_str(source: impl Into<String>, yaml: &str) -> PomResult<Self> {
        let source = source.into();
        let pages = DefinitionFormat::Yaml.parse(&source, yaml)?;
        Ok(Self { source, pages })
    }

    /// Read and parse a definition file, picking the format by extension
    pub fn from_file(path: impl AsRef<Path>) -> PomResult<Self> {
        let (source, pages) = read_definition(path.as_ref())?;
        Ok(Self { source, pages })
    }

    /// Where this document came from
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Page names defined in this document
    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

/// Selectors for one page, resolved for one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocators {
    page: String,
    source: String,
    selectors: BTreeMap<String, Selector>,
}

impl PageLocators {
    /// Load the definitions for `page` from every source in `dir`
    pub fn load(dir: impl AsRef<Path>, page: &str, platform: Platform) -> PomResult<Self> {
        LocatorIndex::load_dir(dir, platform)?.page(page)
    }

    /// Page name
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Source file the page came from
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Resolve an element name to its selector
    pub fn resolve(&self, element: &str) -> PomResult<&Selector> {
        if element.trim().is_empty() {
            return Err(PomError::invalid_argument("element name must not be empty"));
        }
        self.selectors
            .get(element)
            .ok_or_else(|| PomError::LocatorNotFound {
                page: self.page.clone(),
                element: element.to_string(),
            })
    }

    /// Element names defined for this page
    pub fn element_names(&self) -> impl Iterator<Item = &str> {
        self.selectors.keys().map(String::as_str)
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// True if the page defines no elements for the platform
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// In-memory index of every page's locators
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorIndex {
    platform: Platform,
    pages: BTreeMap<String, PageLocators>,
}

impl LocatorIndex {
    /// Scan `dir` for definition files and index them
    pub fn load_dir(dir: impl AsRef<Path>, platform: Platform) -> PomResult<Self> {
        let dir = dir.as_ref();
        let documents = definition_files(dir)?
            .iter()
            .map(LocatorDocument::from_file)
            .collect::<PomResult<Vec<_>>>()?;
        debug!(
            dir = %dir.display(),
            files = documents.len(),
            platform = %platform,
            "loaded locator definitions"
        );
        Self::from_documents(documents, platform)
    }

    /// Build an index from parsed documents, first document wins per page
    pub fn from_documents(
        documents: impl IntoIterator<Item = LocatorDocument>,
        platform: Platform,
    ) -> PomResult<Self> {
        let mut pages = BTreeMap::new();
        for document in documents {
            for (page, elements) in &document.pages {
                if pages.contains_key(page) {
                    debug!(
                        page = %page,
                        source = %document.source,
                        "page already defined by an earlier source, skipping"
                    );
                    continue;
                }
                let mut selectors = BTreeMap::new();
                for (element, definition) in elements {
                    if let Some(selector) = definition.select(page, element, platform)? {
                        let _ = selectors.insert(element.clone(), selector);
                    }
                }
                let _ = pages.insert(
                    page.clone(),
                    PageLocators {
                        page: page.clone(),
                        source: document.source.clone(),
                        selectors,
                    },
                );
            }
        }
        Ok(Self { platform, pages })
    }

    /// Platform the index was resolved for
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// The sub-mapping for one page
    pub fn page(&self, page: &str) -> PomResult<PageLocators> {
        self.page_ref(page).cloned()
    }

    fn page_ref(&self, page: &str) -> PomResult<&PageLocators> {
        if page.trim().is_empty() {
            return Err(PomError::invalid_argument("page name must not be empty"));
        }
        self.pages
            .get(page)
            .ok_or_else(|| PomError::PageLocatorsNotFound {
                page: page.to_string(),
            })
    }

    /// Resolve `(page, element)` to a selector
    pub fn resolve(&self, page: &str, element: &str) -> PomResult<&Selector> {
        self.page_ref(page)?.resolve(element)
    }

    /// Known page names
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

/// Serialization format of a definition source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefinitionFormat {
    Json,
    Yaml,
}

impl DefinitionFormat {
    /// `.yaml` and `.yml` are YAML, anything else is JSON
    pub(crate) fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    /// Deserialize `data`, naming `source` in the parse error
    pub(crate) fn parse<T: DeserializeOwned>(self, source: &str, data: &str) -> PomResult<T> {
        let parsed = match self {
            Self::Json => serde_json::from_str(data).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml_ng::from_str(data).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| PomError::DefinitionParse {
            path: source.to_string(),
            message,
        })
    }
}

/// Read a definition file in the format its extension names
pub(crate) fn read_definition<T: DeserializeOwned>(path: &Path) -> PomResult<(String, T)> {
    let data = std::fs::read_to_string(path)?;
    let source = path.display().to_string();
    let parsed = DefinitionFormat::of(path).parse(&source, &data)?;
    Ok((source, parsed))
}

/// Definition files in `dir`, sorted by file name
pub(crate) fn definition_files(dir: &Path) -> PomResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let recognised = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| DEFINITION_EXTENSIONS.contains(&ext));
        if path.is_file() && recognised {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const HOME_JSON: &str = r##"{
        "homePage": {
            "container": "#root",
            "heroBanner": ".hero",
            "heroTitle": "h1.hero-title",
            "getStartedBtn": "button.get-started"
        }
    }"##;

    fn index(platform: Platform) -> LocatorIndex {
        let home = LocatorDocument::from_json_str("home.json", HOME_JSON).unwrap();
        let menu = LocatorDocument::from_yaml_str(
            "menu.yaml",
            r#"
menuBar:
  container: nav.navbar
  logo:
    web: "img.navbar__logo"
    android: "~logo"
  search:
    ios: "~search"
"#,
        )
        .unwrap();
        LocatorIndex::from_documents([home, menu], platform).unwrap()
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_resolves_exact_stored_selector() {
            let idx = index(Platform::Web);
            assert_eq!(idx.resolve("homePage", "container").unwrap(), &Selector::css("#root"));
            assert_eq!(idx.resolve("homePage", "heroBanner").unwrap(), &Selector::css(".hero"));
            assert_eq!(
                idx.resolve("homePage", "getStartedBtn").unwrap(),
                &Selector::css("button.get-started")
            );
        }

        #[test]
        fn test_absent_element_names_page_and_element() {
            let err = index(Platform::Web)
                .resolve("homePage", "footer")
                .unwrap_err();
            match err {
                PomError::LocatorNotFound { page, element } => {
                    assert_eq!(page, "homePage");
                    assert_eq!(element, "footer");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_absent_page() {
            let err = index(Platform::Web).resolve("checkout", "pay").unwrap_err();
            assert!(matches!(err, PomError::PageLocatorsNotFound { page } if page == "checkout"));
        }

        #[test]
        fn test_empty_names_rejected() {
            let idx = index(Platform::Web);
            assert!(matches!(
                idx.resolve("", "container"),
                Err(PomError::InvalidArgument { .. })
            ));
            assert!(matches!(
                idx.resolve("homePage", " "),
                Err(PomError::InvalidArgument { .. })
            ));
        }
    }

    mod platform_tests {
        use super::*;

        #[test]
        fn test_per_platform_selection() {
            assert_eq!(
                index(Platform::Web).resolve("menuBar", "logo").unwrap(),
                &Selector::css("img.navbar__logo")
            );
            assert_eq!(
                index(Platform::Android).resolve("menuBar", "logo").unwrap(),
                &Selector::accessibility_id("logo")
            );
        }

        #[test]
        fn test_missing_platform_entry_is_absent_element() {
            let idx = index(Platform::Web);
            assert!(matches!(
                idx.resolve("menuBar", "search"),
                Err(PomError::LocatorNotFound { .. })
            ));
            assert!(index(Platform::Ios).resolve("menuBar", "search").is_ok());
        }

        #[test]
        fn test_shared_selector_on_every_platform() {
            for platform in [Platform::Web, Platform::Android, Platform::Ios] {
                assert_eq!(
                    index(platform).resolve("menuBar", "container").unwrap(),
                    &Selector::css("nav.navbar")
                );
            }
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_invalid_selector_fails_at_load() {
            let doc =
                LocatorDocument::from_json_str("bad.json", r#"{"p": {"x": "a[href"}}"#).unwrap();
            let err = LocatorIndex::from_documents([doc], Platform::Web).unwrap_err();
            assert!(matches!(
                err,
                PomError::InvalidSelector { ref page, ref element, .. } if page == "p" && element == "x"
            ));
        }

        #[test]
        fn test_invalid_selector_for_other_platform_still_fails() {
            let doc = LocatorDocument::from_json_str(
                "bad.json",
                r#"{"p": {"x": {"web": ".ok", "ios": "~"}}}"#,
            )
            .unwrap();
            assert!(LocatorIndex::from_documents([doc], Platform::Web).is_err());
        }

        #[test]
        fn test_unknown_platform_key_fails() {
            let doc =
                LocatorDocument::from_json_str("bad.json", r#"{"p": {"x": {"tv": ".ok"}}}"#)
                    .unwrap();
            assert!(LocatorIndex::from_documents([doc], Platform::Web).is_err());
        }

        #[test]
        fn test_malformed_document_reports_source() {
            let err = LocatorDocument::from_json_str("broken.json", "{").unwrap_err();
            assert!(matches!(err, PomError::DefinitionParse { path, .. } if path == "broken.json"));
        }

        #[test]
        fn test_first_file_wins_for_same_page() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("a.json"), r##"{"homePage": {"container": "#first"}}"##)
                .unwrap();
            std::fs::write(dir.path().join("b.json"), r##"{"homePage": {"container": "#second"}}"##)
                .unwrap();
            std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

            let page = PageLocators::load(dir.path(), "homePage", Platform::Web).unwrap();
            assert_eq!(page.resolve("container").unwrap(), &Selector::css("#first"));
            assert!(page.source().ends_with("a.json"));
        }

        #[test]
        fn test_pages_spread_across_files() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("home.json"), HOME_JSON).unwrap();
            std::fs::write(dir.path().join("menu.yml"), "menuBar:\n  logo: img.logo\n").unwrap();

            let idx = LocatorIndex::load_dir(dir.path(), Platform::Web).unwrap();
            assert_eq!(idx.pages().collect::<Vec<_>>(), vec!["homePage", "menuBar"]);
            assert_eq!(idx.resolve("menuBar", "logo").unwrap(), &Selector::css("img.logo"));
        }

        #[test]
        fn test_format_follows_extension() {
            assert_eq!(DefinitionFormat::of(Path::new("home.yaml")), DefinitionFormat::Yaml);
            assert_eq!(DefinitionFormat::of(Path::new("home.yml")), DefinitionFormat::Yaml);
            assert_eq!(DefinitionFormat::of(Path::new("home.json")), DefinitionFormat::Json);
            assert_eq!(DefinitionFormat::of(Path::new("home")), DefinitionFormat::Json);
        }

        #[test]
        fn test_yaml_parse_error_names_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("menu.yml");
            std::fs::write(&path, "menuBar: [unclosed\n").unwrap();
            let err = LocatorDocument::from_file(&path).unwrap_err();
            assert!(matches!(
                err,
                PomError::DefinitionParse { path: ref source, .. } if source.ends_with("menu.yml")
            ));
        }

        #[test]
        fn test_missing_directory_is_io_error() {
            let err = LocatorIndex::load_dir("/nonexistent/locators", Platform::Web).unwrap_err();
            assert!(matches!(err, PomError::Io(_)));
        }
    }

    #[test]
    fn test_page_view_lists_elements() {
        let page = index(Platform::Web).page("homePage").unwrap();
        assert_eq!(page.page(), "homePage");
        assert_eq!(page.len(), 4);
        assert!(!page.is_empty());
        assert_eq!(
            page.element_names().collect::<Vec<_>>(),
            vec!["container", "getStartedBtn", "heroBanner", "heroTitle"]
        );
    }
}
