//! Strings command handler

use crate::error::CliResult;
use crate::StringsArgs;
use pomkit::LocaleStrings;
use serde::Serialize;
use std::collections::BTreeMap;

/// Strings of one page, possibly narrowed to one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringsOutput {
    /// Locale tag
    pub locale: String,
    /// Page name
    pub page: String,
    /// Key to text
    pub strings: BTreeMap<String, String>,
}

/// Execute the strings command
pub fn execute_strings(args: &StringsArgs) -> CliResult<StringsOutput> {
    let store = LocaleStrings::load_dir(&args.strings)?;
    lookup(&store, &args.locale, &args.page, args.key.as_deref())
}

/// Look up a page bundle, or a single key of it
pub fn lookup(
    store: &LocaleStrings,
    locale: &str,
    page: &str,
    key: Option<&str>,
) -> CliResult<StringsOutput> {
    let bundle = store.page_strings(locale, page)?;
    let strings = match key {
        Some(key) => BTreeMap::from([(key.to_string(), bundle.get(key)?.to_string())]),
        None => bundle.as_map().clone(),
    };
    Ok(StringsOutput {
        locale: locale.to_string(),
        page: page.to_string(),
        strings,
    })
}
