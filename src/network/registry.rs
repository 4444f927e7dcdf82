// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header registry
//!
//! Holds the active (headers, URL filter) pair. Each configuration call
//! builds a complete [`InterceptionState`] and swaps it in under the write
//! lock, so readers always see both fields from the same call.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::http::HeaderSet;

lazy_static! {
    static ref GLOBAL_REGISTRY: Arc<HeaderRegistry> = Arc::new(HeaderRegistry::new());
}

/// URL substrings restricting which requests receive headers
///
/// `None` matches every request, an empty list matches none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFilter {
    patterns: Option<Vec<String>>,
}

impl UrlFilter {
    /// Filter that matches every URL
    pub fn all() -> Self {
        Self { patterns: None }
    }

    /// Filter that matches URLs containing at least one of `patterns`
    pub fn only<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: Some(patterns.into_iter().map(Into::into).collect()),
        }
    }

    /// Case-sensitive substring match against the serialized URL
    pub fn matches(&self, url: &str) -> bool {
        match &self.patterns {
            None => true,
            Some(patterns) => patterns.iter().any(|p| url.contains(p.as_str())),
        }
    }

    pub fn is_match_all(&self) -> bool {
        self.patterns.is_none()
    }

    /// Configured substrings, `None` when matching everything
    pub fn patterns(&self) -> Option<&[String]> {
        self.patterns.as_deref()
    }
}

impl From<Option<Vec<String>>> for UrlFilter {
    fn from(patterns: Option<Vec<String>>) -> Self {
        Self { patterns }
    }
}

/// Immutable snapshot of the configured headers and filter
#[derive(Debug, Clone, Default)]
pub struct InterceptionState {
    headers: HeaderSet,
    filter: UrlFilter,
    /// Headers pre-parsed for the request path
    compiled: Vec<(HeaderName, HeaderValue)>,
}

impl InterceptionState {
    pub fn new(headers: HeaderSet, filter: UrlFilter) -> Self {
        let compiled = compile_headers(&headers);
        Self {
            headers,
            filter,
            compiled,
        }
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn filter(&self) -> &UrlFilter {
        &self.filter
    }

    /// Whether a request to `url` should receive the configured headers
    pub fn applies_to(&self, url: &str) -> bool {
        !self.compiled.is_empty() && self.filter.matches(url)
    }

    /// Merge the configured headers into `headers` if `url` is in scope
    ///
    /// Configured values replace any existing values for the same name.
    /// Returns whether anything was written.
    pub fn apply(&self, url: &str, headers: &mut HeaderMap) -> bool {
        if !self.applies_to(url) {
            return false;
        }
        self.merge_into(headers);
        true
    }

    /// Write every configured header into `headers`, ignoring the filter
    pub fn merge_into(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.compiled {
            headers.insert(name.clone(), value.clone());
        }
    }

    /// Number of headers that will actually be written on a match
    pub fn injectable_count(&self) -> usize {
        self.compiled.len()
    }
}

/// Parse configured headers into protocol types, skipping ones HTTP cannot carry
fn compile_headers(headers: &HeaderSet) -> Vec<(HeaderName, HeaderValue)> {
    headers
        .iter()
        .filter_map(|entry| {
            match (
                HeaderName::try_from(entry.name.as_str()),
                HeaderValue::try_from(entry.value.as_str()),
            ) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (Err(_), _) => {
                    tracing::warn!(header = %entry.name, "Skipping header with invalid name");
                    None
                }
                (_, Err(_)) => {
                    tracing::warn!(header = %entry.name, "Skipping header with invalid value");
                    None
                }
            }
        })
        .collect()
}

/// Process-wide store for the injection configuration
#[derive(Debug, Default)]
pub struct HeaderRegistry {
    state: RwLock<Arc<InterceptionState>>,
}

impl HeaderRegistry {
    /// Create a standalone registry with no headers and a match-all filter
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry the installed hook reads from
    pub fn global() -> Arc<HeaderRegistry> {
        GLOBAL_REGISTRY.clone()
    }

    /// Replace both headers and filter
    ///
    /// `headers = None` clears injection, `filter = None` matches every URL.
    pub fn configure(&self, headers: Option<HeaderSet>, filter: Option<Vec<String>>) {
        let state = InterceptionState::new(headers.unwrap_or_default(), filter.into());
        self.publish(state);
    }

    /// Replace the headers, keeping the current filter
    pub fn update_headers(&self, headers: Option<HeaderSet>) {
        let mut guard = self.state.write();
        let state = InterceptionState::new(headers.unwrap_or_default(), guard.filter.clone());
        log_state("Headers updated", &state);
        *guard = Arc::new(state);
    }

    /// Replace the filter, keeping the current headers
    pub fn update_filter(&self, filter: Option<Vec<String>>) {
        let mut guard = self.state.write();
        let state = InterceptionState {
            headers: guard.headers.clone(),
            filter: filter.into(),
            compiled: guard.compiled.clone(),
        };
        log_state("Filter updated", &state);
        *guard = Arc::new(state);
    }

    /// Drop all headers and reset the filter to match-all
    pub fn clear(&self) {
        self.publish(InterceptionState::default());
    }

    /// Consistent view of headers and filter
    pub fn snapshot(&self) -> Arc<InterceptionState> {
        self.state.read().clone()
    }

    /// Currently configured headers (possibly empty)
    pub fn current_headers(&self) -> HeaderSet {
        self.snapshot().headers.clone()
    }

    /// Currently configured filter
    pub fn current_filter(&self) -> UrlFilter {
        self.snapshot().filter.clone()
    }

    fn publish(&self, state: InterceptionState) {
        log_state("Header registry configured", &state);
        *self.state.write() = Arc::new(state);
    }
}

fn log_state(msg: &str, state: &InterceptionState) {
    tracing::info!(
        headers = state.headers.len(),
        injectable = state.compiled.len(),
        filter = ?state.filter.patterns().map(<[String]>::len),
        "{}",
        msg
    );
}
