// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interceptor trait and the interceptors shipped with maphook
//!
//! Interceptors run synchronously on the thread that builds the request.
//! They must not block or do I/O.

use std::sync::Arc;

use crate::http::Request;

use super::registry::HeaderRegistry;

/// Request interceptor trait
///
/// Called once for every request the host stack constructs, before dispatch.
///
/// # Example
///
/// ```rust
/// use maphook::network::RequestInterceptor;
/// use maphook::http::Request;
///
/// struct Referer;
///
/// impl RequestInterceptor for Referer {
///     fn name(&self) -> &str {
///         "referer"
///     }
///
///     fn intercept(&self, mut request: Request) -> Request {
///         request
///             .headers
///             .insert("referer", "https://app.example.com".parse().unwrap());
///         request
///     }
/// }
/// ```
pub trait RequestInterceptor: Send + Sync {
    /// Stable identifier, used to keep installs idempotent
    fn name(&self) -> &str;

    /// Rewrite (or pass through) the request
    fn intercept(&self, request: Request) -> Request;

    /// Filter - return true if this interceptor should handle the request
    fn should_intercept(&self, _request: &Request) -> bool {
        true
    }

    /// Priority - higher priority interceptors run first
    fn priority(&self) -> i32 {
        0
    }
}

/// Injects the headers held by a [`HeaderRegistry`]
///
/// Scope and headers come from one registry snapshot per request, so the
/// decision and the merge never straddle a reconfiguration.
pub struct HeaderInjector {
    registry: Arc<HeaderRegistry>,
}

impl HeaderInjector {
    pub const NAME: &'static str = "header-injector";

    pub fn new(registry: Arc<HeaderRegistry>) -> Self {
        Self { registry }
    }

    /// Injector bound to the process-wide registry
    pub fn global() -> Self {
        Self::new(HeaderRegistry::global())
    }

    pub fn registry(&self) -> &Arc<HeaderRegistry> {
        &self.registry
    }
}

impl RequestInterceptor for HeaderInjector {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn intercept(&self, mut request: Request) -> Request {
        let state = self.registry.snapshot();
        if state.apply(request.url.as_str(), &mut request.headers) {
            tracing::trace!(
                url = %request.url,
                injected = state.injectable_count(),
                "Injected headers"
            );
        }
        request
    }

    fn priority(&self) -> i32 {
        100 // Run before anything that inspects final headers
    }
}

/// Request logger interceptor
#[derive(Debug, Clone, Default)]
pub struct RequestLogger {
    /// Filter by URL substring
    pub url_filter: Option<String>,
}

impl RequestLogger {
    pub const NAME: &'static str = "request-logger";

    pub fn new() -> Self {
        Self::default()
    }

    /// Only log requests whose URL contains `filter`
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            url_filter: Some(filter.into()),
        }
    }
}

impl RequestInterceptor for RequestLogger {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn should_intercept(&self, request: &Request) -> bool {
        if let Some(ref filter) = self.url_filter {
            request.url.as_str().contains(filter.as_str())
        } else {
            true
        }
    }

    fn intercept(&self, request: Request) -> Request {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            headers = request.headers.len(),
            "Request"
        );
        request
    }

    fn priority(&self) -> i32 {
        -100 // Low priority - run logging last
    }
}

/// Interceptor chain - manages multiple interceptors
///
/// Cloning shares the interceptors, it does not copy them.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor
    pub fn add<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.add_shared(Arc::new(interceptor));
    }

    /// Add an already shared interceptor
    pub fn add_shared(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptors.push(interceptor);
        // Stable sort keeps insertion order among equal priorities
        self.interceptors.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Add an interceptor unless one with the same name is present
    ///
    /// Returns whether it was added.
    pub fn add_once<I: RequestInterceptor + 'static>(&mut self, interceptor: I) -> bool {
        if self.contains(interceptor.name()) {
            return false;
        }
        self.add(interceptor);
        true
    }

    /// Remove interceptors by name, returning how many were removed
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.interceptors.len();
        self.interceptors.retain(|i| i.name() != name);
        before - self.interceptors.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.interceptors.iter().any(|i| i.name() == name)
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Interceptor names in execution order
    pub fn names(&self) -> Vec<&str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Process request through all interceptors
    pub fn process(&self, mut request: Request) -> Request {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(&request) {
                continue;
            }
            request = interceptor.intercept(request);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HeaderSet;

    struct Tagger(&'static str, i32);

    impl RequestInterceptor for Tagger {
        fn name(&self) -> &str {
            self.0
        }

        fn intercept(&self, mut request: Request) -> Request {
            let mut trail = request.header_str("x-trail").unwrap_or("").to_string();
            trail.push_str(self.0);
            request.headers.insert("x-trail", trail.parse().unwrap());
            request
        }

        fn priority(&self) -> i32 {
            self.1
        }
    }

    fn tile_registry() -> Arc<HeaderRegistry> {
        let registry = Arc::new(HeaderRegistry::new());
        registry.configure(
            Some(HeaderSet::new().header("X-Api-Key", "abc")),
            Some(vec!["tiles.example.com".to_string()]),
        );
        registry
    }

    #[test]
    fn test_injector_in_scope() {
        let injector = HeaderInjector::new(tile_registry());
        let request = Request::get("https://tiles.example.com/1/2/3.png").unwrap();

        let out = injector.intercept(request);
        assert_eq!(out.header_str("x-api-key"), Some("abc"));
    }

    #[test]
    fn test_injector_out_of_scope_is_identity() {
        let injector = HeaderInjector::new(tile_registry());
        let request = Request::builder(reqwest::Method::GET, "https://other.example.com/")
            .unwrap()
            .header("accept", "*/*")
            .build();

        let out = injector.intercept(request.clone());
        assert_eq!(out, request);
    }

    #[test]
    fn test_injector_overrides_request_header() {
        let injector = HeaderInjector::new(tile_registry());
        let request = Request::builder(reqwest::Method::GET, "https://tiles.example.com/a")
            .unwrap()
            .header("x-api-key", "stale")
            .header("accept", "image/png")
            .build();

        let out = injector.intercept(request);
        assert_eq!(out.header_str("x-api-key"), Some("abc"));
        assert_eq!(out.header_str("accept"), Some("image/png"));
    }

    #[test]
    fn test_injector_follows_reconfiguration() {
        let registry = tile_registry();
        let injector = HeaderInjector::new(registry.clone());

        registry.configure(Some(HeaderSet::new().header("X-Api-Key", "abc")), Some(vec![]));
        let out = injector.intercept(Request::get("https://tiles.example.com/").unwrap());
        assert!(out.headers.is_empty());

        registry.configure(Some(HeaderSet::new().header("X-Api-Key", "abc")), None);
        let out = injector.intercept(Request::get("https://anywhere.test/").unwrap());
        assert_eq!(out.header_str("x-api-key"), Some("abc"));
    }

    #[test]
    fn test_chain_priority_order() {
        let mut chain = InterceptorChain::new();
        chain.add(Tagger("b", 0));
        chain.add(Tagger("a", 10));
        chain.add(Tagger("c", -10));

        assert_eq!(chain.names(), vec!["a", "b", "c"]);

        let out = chain.process(Request::get("https://example.com/").unwrap());
        assert_eq!(out.header_str("x-trail"), Some("abc"));
    }

    #[test]
    fn test_chain_add_once_and_remove() {
        let mut chain = InterceptorChain::new();
        assert!(chain.add_once(HeaderInjector::new(tile_registry())));
        assert!(!chain.add_once(HeaderInjector::new(tile_registry())));
        assert!(chain.add_once(RequestLogger::new()));

        assert_eq!(chain.names(), vec![HeaderInjector::NAME, RequestLogger::NAME]);
        assert_eq!(chain.remove(RequestLogger::NAME), 1);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_logger_filter_and_passthrough() {
        let logger = RequestLogger::with_filter("tiles");
        let tile = Request::get("https://tiles.example.com/").unwrap();
        let other = Request::get("https://other.example.com/").unwrap();

        assert!(logger.should_intercept(&tile));
        assert!(!logger.should_intercept(&other));
        assert_eq!(logger.intercept(tile.clone()), tile);
    }
}
