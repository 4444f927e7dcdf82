// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Hook configuration
//!
//! JSON form, as handed over by the platform layer:
//!
//! ```json
//! { "headers": { "X-Api-Key": "abc" }, "filter": ["tiles.example.com"], "log_requests": false }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, Result};
use crate::http::HeaderSet;
use crate::network::{self, HeaderRegistry};

/// Environment variable the CLI reads a config path from
pub const CONFIG_ENV: &str = "MAPHOOK_CONFIG";

/// Headers, filter and logging switch for the interception hook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Headers to inject; `None` injects nothing
    pub headers: Option<HeaderSet>,
    /// URL substrings; `None` matches every request
    pub filter: Option<Vec<String>>,
    /// Also log every request passing the hook
    pub log_requests: bool,
}

impl HookConfig {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing hook config")
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .context(&format!("reading {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers = Some(self.headers.take().unwrap_or_default().header(name, value));
        self
    }

    /// Add an `Authorization: Bearer` header
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.headers = Some(self.headers.take().unwrap_or_default().bearer_token(token));
        self
    }

    /// Add an `Authorization: Basic` header
    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        self.headers = Some(
            self.headers
                .take()
                .unwrap_or_default()
                .basic_auth(username, password),
        );
        self
    }

    /// Restrict injection to URLs containing `pattern` (additive)
    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter.get_or_insert_with(Vec::new).push(pattern.into());
        self
    }

    /// Apply headers to every request
    pub fn match_all(mut self) -> Self {
        self.filter = None;
        self
    }

    /// Enable/disable request logging
    pub fn log_requests(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    /// Write headers and filter into `registry`
    pub fn apply_to(&self, registry: &HeaderRegistry) {
        registry.configure(self.headers.clone(), self.filter.clone());
    }

    /// Install the global hook and configure the global registry
    pub fn apply(&self) {
        network::install();
        if self.log_requests {
            network::install_logger();
        }
        self.apply_to(&HeaderRegistry::global());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full() {
        let config = HookConfig::from_json_str(
            r#"{"headers":{"X-Api-Key":"abc"},"filter":["tiles.example.com"],"log_requests":true}"#,
        )
        .unwrap();

        assert_eq!(config.headers.as_ref().unwrap().get("x-api-key"), Some("abc"));
        assert_eq!(config.filter, Some(vec!["tiles.example.com".to_string()]));
        assert!(config.log_requests);
    }

    #[test]
    fn test_null_and_missing_fields() {
        let config = HookConfig::from_json_str(r#"{"headers":null}"#).unwrap();
        assert_eq!(config, HookConfig::default());

        let config = HookConfig::from_json_str(r#"{"filter":[]}"#).unwrap();
        assert_eq!(config.filter, Some(vec![]));
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_bad_json() {
        let err = HookConfig::from_json_str(r#"{"headers":["not","a","map"]}"#).unwrap_err();
        assert!(err.to_string().starts_with("parsing hook config"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"headers":{{"Referer":"https://app"}}}}"#).unwrap();

        let config = HookConfig::from_file(file.path()).unwrap();
        assert_eq!(config.headers.unwrap().get("referer"), Some("https://app"));
        assert!(config.filter.is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = HookConfig::from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_builder_and_apply_to() {
        let config = HookConfig::new()
            .header("X-Api-Key", "abc")
            .bearer_token("tok")
            .filter("tiles.example.com")
            .filter("/styles/");

        let registry = HeaderRegistry::new();
        config.apply_to(&registry);

        let state = registry.snapshot();
        assert_eq!(state.headers().len(), 2);
        assert!(state.applies_to("https://api.example.com/styles/v1"));
        assert!(!state.applies_to("https://other.example.com/"));

        config.match_all().apply_to(&registry);
        assert!(registry.snapshot().applies_to("https://other.example.com/"));
    }
}
