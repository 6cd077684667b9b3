//! Locale String Store: expected display text keyed by locale and page.
//!
//! A definition file holds a list of locale records:
//!
//! ```yaml
//! - locale: en-US
//!   strings:
//!     - page: homePage
//!       strings:
//!         pageTitle: "Fast and reliable end-to-end testing for modern web apps | Playwright"
//! ```
//!
//! Every file is read before [`LocaleStrings::load_dir`] returns. Files are
//! merged in file-name order; a later file overwrites an earlier one only for
//! the same `(locale, page, key)`.

use crate::locator_store::{definition_files, read_definition, DefinitionFormat};
use crate::result::{PomError, PomResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Deserialize)]
struct LocaleRecord {
    locale: String,
    strings: Vec<PageBundle>,
}

#[derive(Debug, Clone, Deserialize)]
struct PageBundle {
    page: String,
    strings: BTreeMap<String, String>,
}

/// A parsed locale definition source
#[derive(Debug, Clone)]
pub struct LocaleDocument {
    source: String,
    records: Vec<LocaleRecord>,
}

impl LocaleDocument {
    /// Parse a JSON definition
    pub fn from_json_str(source: impl Into<String>, json: &str) -> PomResult<Self> {
        let source = source.into();
        let records = DefinitionFormat::Json.parse(&source, json)?;
        Ok(Self { source, records })
    }

    /// Parse a YAML definition
    pub fn from_yaml_str(source: impl Into<String>, yaml: &str) -> PomResult<Self> {
        let source = source.into();
        let records = DefinitionFormat::Yaml.parse(&source, yaml)?;
        Ok(Self { source, records })
    }

    /// Read and parse a definition file, picking the format by extension
    pub fn from_file(path: impl AsRef<Path>) -> PomResult<Self> {
        let (source, records) = read_definition(path.as_ref())?;
        Ok(Self { source, records })
    }

    /// Where this document came from
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// The key→text bundle for one page in one locale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageStrings {
    locale: String,
    page: String,
    strings: BTreeMap<String, String>,
}

impl PageStrings {
    /// Look up one string
    pub fn get(&self, key: &str) -> PomResult<&str> {
        self.strings
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| PomError::StringKeyNotFound {
                locale: self.locale.clone(),
                page: self.page.clone(),
                key: key.to_string(),
            })
    }

    /// The full mapping
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, String> {
        &self.strings
    }

    /// Locale tag
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Page name
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Number of strings
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// True if the bundle is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Merged locale strings from every definition source
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    locales: BTreeMap<String, BTreeMap<String, PageStrings>>,
}

impl LocaleStrings {
    /// Load and merge every definition file in `dir`
    pub fn load_dir(dir: impl AsRef<Path>) -> PomResult<Self> {
        let dir = dir.as_ref();
        let documents = definition_files(dir)?
            .iter()
            .map(LocaleDocument::from_file)
            .collect::<PomResult<Vec<_>>>()?;
        let store = Self::from_documents(documents);
        debug!(
            dir = %dir.display(),
            locales = store.locales.len(),
            "loaded locale strings"
        );
        Ok(store)
    }

    /// Merge parsed documents in order, last writer wins per key
    #[must_use]
    pub fn from_documents(documents: impl IntoIterator<Item = LocaleDocument>) -> Self {
        let mut locales: BTreeMap<String, BTreeMap<String, PageStrings>> = BTreeMap::new();
        for document in documents {
            for record in document.records {
                let pages = locales.entry(record.locale.clone()).or_default();
                for bundle in record.strings {
                    let entry = pages
                        .entry(bundle.page.clone())
                        .or_insert_with(|| PageStrings {
                            locale: record.locale.clone(),
                            page: bundle.page.clone(),
                            strings: BTreeMap::new(),
                        });
                    for (key, text) in bundle.strings {
                        if let Some(previous) = entry.strings.insert(key.clone(), text) {
                            warn!(
                                locale = %record.locale,
                                page = %bundle.page,
                                key = %key,
                                previous = %previous,
                                source = %document.source,
                                "locale string overridden by later source"
                            );
                        }
                    }
                }
            }
        }
        Self { locales }
    }

    /// The full bundle for `(locale, page)`
    pub fn page_strings(&self, locale: &str, page: &str) -> PomResult<&PageStrings> {
        let pages = self
            .locales
            .get(locale)
            .ok_or_else(|| PomError::StringsNotFound {
                locale: locale.to_string(),
            })?;
        pages.get(page).ok_or_else(|| PomError::PageStringsNotFound {
            locale: locale.to_string(),
            page: page.to_string(),
        })
    }

    /// Resolve one `(locale, page, key)` string
    pub fn resolve(&self, locale: &str, page: &str, key: &str) -> PomResult<&str> {
        self.page_strings(locale, page)?.get(key)
    }

    /// Known locale tags
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Pages with bundles in `locale`
    pub fn pages(&self, locale: &str) -> PomResult<Vec<&str>> {
        self.locales
            .get(locale)
            .map(|pages| pages.keys().map(String::as_str).collect())
            .ok_or_else(|| PomError::StringsNotFound {
                locale: locale.to_string(),
            })
    }
}
