//! Named request parameters.
//!
//! # Responsibilities
//! - Hold captured path segments and query-string pairs
//! - Parse raw query strings into key/value pairs
//!
//! # Design Decisions
//! - One type for both path and query values; the two are never merged
//! - Query values are taken verbatim (no percent-decoding)
//! - A piece without `=` is kept as a key with an empty value

use std::collections::hash_map::{self, HashMap};
use std::ops::Index;

use serde::Serialize;

/// A flat mapping from parameter name to string value.
///
/// Built fresh for every dispatched request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params {
    inner: HashMap<String, String>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (the part after `?`, without the `?`).
    ///
    /// Pieces are split on `&` and each non-empty piece on its first `=`.
    /// Later duplicates overwrite earlier ones. A piece lacking `=` becomes
    /// a key with an empty value.
    pub fn from_query(raw: &str) -> Self {
        let mut params = Self::new();
        for piece in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
            params.insert(key, value);
        }
        params
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Insert or overwrite a parameter, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.inner.insert(name.into(), value.into())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(name, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Missing names index to the empty string, so handlers can read optional
/// values without unwrapping.
impl Index<&str> for Params {
    type Output = str;

    fn index(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
