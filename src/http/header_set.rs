// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header set configured for injection
//!
//! Names are case-insensitive: `X-Api-Key` and `x-api-key` are the same
//! entry and the later write wins. The caller's spelling of the most recent
//! write is kept for display.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::headers::AUTHORIZATION;

/// A single header name/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Headers to inject, keyed case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "BTreeMap<String, String>")]
pub struct HeaderSet {
    /// Lowercased name -> entry
    entries: BTreeMap<String, HeaderEntry>,
}

impl HeaderSet {
    /// Create an empty header set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a header
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let entry = HeaderEntry::new(name, value);
        self.entries.insert(entry.name.to_ascii_lowercase(), entry);
    }

    /// Add a header (builder style)
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add an `Authorization: Bearer` header
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.header(AUTHORIZATION, format!("Bearer {}", token.into()))
    }

    /// Add an `Authorization: Basic` header
    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        let encoded = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{}:{}", username, password),
        );
        self.header(AUTHORIZATION, format!("Basic {}", encoded))
    }

    /// Remove a header by name
    pub fn remove(&mut self, name: &str) -> Option<HeaderEntry> {
        self.entries.remove(&name.to_ascii_lowercase())
    }

    /// Look up a header value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|e| e.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries ordered by lowercased name
    pub fn iter(&self) -> impl Iterator<Item = &HeaderEntry> {
        self.entries.values()
    }

    /// Header names as the caller spelled them
    pub fn names(&self) -> Vec<&str> {
        self.entries.values().map(|e| e.name.as_str()).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

/// Inserts entries in document order so a later key wins over an
/// earlier one that differs only in case
struct HeaderSetVisitor;

impl<'de> Visitor<'de> for HeaderSetVisitor {
    type Value = HeaderSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of header names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HeaderSet, A::Error> {
        let mut set = HeaderSet::new();
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            set.insert(name, value);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for HeaderSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HeaderSetVisitor)
    }
}

impl From<HeaderSet> for BTreeMap<String, String> {
    fn from(set: HeaderSet) -> Self {
        set.entries
            .into_values()
            .map(|e| (e.name, e.value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = &'a HeaderEntry;
    type IntoIter = std::collections::btree_map::Values<'a, String, HeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_last_write_wins() {
        let set = HeaderSet::new()
            .header("X-Api-Key", "first")
            .header("x-api-key", "second");

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("X-API-KEY"), Some("second"));
        assert_eq!(set.names(), vec!["x-api-key"]);
    }

    #[test]
    fn test_auth_helpers() {
        let set = HeaderSet::new().basic_auth("user", "pass");
        assert_eq!(set.get("authorization"), Some("Basic dXNlcjpwYXNz"));

        let set = set.bearer_token("tok");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_remove() {
        let mut set = HeaderSet::new().header("X-One", "1").header("X-Two", "2");
        let removed = set.remove("x-one").unwrap();

        assert_eq!(removed, HeaderEntry::new("X-One", "1"));
        assert!(!set.contains("X-One"));
        assert!(set.contains("x-two"));
    }

    #[test]
    fn test_json_object_form() {
        let set: HeaderSet =
            serde_json::from_str(r#"{"X-Api-Key":"abc","Referer":"https://app"}"#).unwrap();
        assert_eq!(set.get("x-api-key"), Some("abc"));
        assert_eq!(set.get("referer"), Some("https://app"));

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"Referer":"https://app","X-Api-Key":"abc"}"#);
    }

    #[test]
    fn test_json_later_key_wins_across_case() {
        for _ in 0..50 {
            let set: HeaderSet =
                serde_json::from_str(r#"{"X-Api-Key":"first","x-api-key":"second"}"#).unwrap();
            assert_eq!(set.len(), 1);
            assert_eq!(set.get("X-Api-Key"), Some("second"));
            assert_eq!(set.names(), vec!["x-api-key"]);
        }

        let set: HeaderSet =
            serde_json::from_str(r#"{"x-api-key":"first","X-API-KEY":"second"}"#).unwrap();
        assert_eq!(set.get("x-api-key"), Some("second"));
    }

    #[test]
    fn test_json_rejects_non_map() {
        assert!(serde_json::from_str::<HeaderSet>(r#"["X-Api-Key"]"#).is_err());
        assert!(serde_json::from_str::<HeaderSet>(r#"{"X-Api-Key":1}"#).is_err());
    }

    #[test]
    fn test_values_pass_through_unvalidated() {
        let set = HeaderSet::new().header("Bad Name", "line\nbreak");
        assert_eq!(set.get("bad name"), Some("line\nbreak"));
    }
}
