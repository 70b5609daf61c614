//! URL query rewriting for the home-page filters.
//!
//! Filters live only in the URL. Setting one parameter keeps every other
//! parameter, drops empty values and sorts keys, so the same filter state
//! always produces the same URL.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Rewrite `key` in the query string `search` (with or without the leading
/// `?`) and return `path` plus the resulting query. `None` or an empty value
/// removes the parameter.
pub fn with_query_param(path: &str, search: &str, key: &str, value: Option<&str>) -> String {
    let mut params: BTreeMap<String, String> = form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .into_owned()
        .filter(|(k, v)| k != key && !v.is_empty())
        .collect();
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.insert(key.to_owned(), value.to_owned());
    }

    if params.is_empty() {
        return path.to_owned();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&params)
        .finish();
    format!("{path}?{query}")
}

/// Read `key` from `search`, treating an empty value as absent.
pub fn query_value(search: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
