//! Declared endpoint headers and case-insensitive lookup.

use std::collections::HashMap;

use indexmap::IndexMap;

/// Header name to value, in declaration order.
pub type Headers = IndexMap<String, String>;

/// Lower-cased header-name index over a [`Headers`] map.
///
/// Built once per call so that every lookup is a single map access. When the
/// same name is declared with different casing, the first declared one wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex<'a> {
    by_name: HashMap<String, &'a str>,
}

impl<'a> HeaderIndex<'a> {
    /// Index the given headers.
    #[must_use]
    pub fn new(headers: &'a Headers) -> Self {
        let mut by_name = HashMap::with_capacity(headers.len());
        for (name, value) in headers {
            by_name
                .entry(name.to_ascii_lowercase())
                .or_insert(value.as_str());
        }
        Self { by_name }
    }

    /// Value of a header, matched case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.by_name.get(&name.to_ascii_lowercase()).copied()
    }

    /// Value of the `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&'a str> {
        self.get("content-type")
    }

    /// Returns `true` if a header with this name is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// First value declared under `name`, ignoring case.
#[must_use]
pub fn find_header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Remove every header whose name matches case-insensitively.
pub fn remove_header(headers: &mut Headers, name: &str) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
}

/// Returns `true` if `headers` declares `name`, ignoring case.
#[must_use]
pub fn has_header(headers: &Headers, name: &str) -> bool {
    find_header(headers, name).is_some()
}
