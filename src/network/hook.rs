// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Process-wide interception hook
//!
//! The host networking stack calls [`intercept`] (directly, or through
//! [`RequestBuilder::build`](crate::http::RequestBuilder::build)) for every
//! request it constructs. Until [`install`] runs the global chain is empty
//! and requests pass through untouched.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::http::{HeaderSet, Request};

use super::interceptor_trait::{HeaderInjector, InterceptorChain, RequestInterceptor, RequestLogger};
use super::registry::HeaderRegistry;

lazy_static! {
    static ref GLOBAL_CHAIN: RwLock<Arc<InterceptorChain>> =
        RwLock::new(Arc::new(InterceptorChain::new()));
}

/// Add `interceptor` to a copy of the global chain and publish it
///
/// Interceptors run on a released snapshot, so they may call back into
/// this module without deadlocking.
fn add_global<I: RequestInterceptor + 'static>(interceptor: I) -> bool {
    let mut guard = GLOBAL_CHAIN.write();
    if guard.contains(interceptor.name()) {
        return false;
    }
    let mut chain = InterceptorChain::clone(&guard);
    chain.add(interceptor);
    *guard = Arc::new(chain);
    true
}

/// Activate header injection for this process
///
/// Idempotent: returns `true` only for the call that installed the hook.
pub fn install() -> bool {
    let installed = add_global(HeaderInjector::global());
    if installed {
        tracing::info!("Header interception hook installed");
    }
    installed
}

/// Whether [`install`] has run
pub fn is_installed() -> bool {
    GLOBAL_CHAIN.read().contains(HeaderInjector::NAME)
}

/// Add request logging to the global chain (idempotent)
pub fn install_logger() -> bool {
    add_global(RequestLogger::new())
}

/// Register a custom interceptor on the global chain
///
/// Returns `false` if an interceptor with the same name is already present.
pub fn register<I: RequestInterceptor + 'static>(interceptor: I) -> bool {
    add_global(interceptor)
}

/// Names of the interceptors on the global chain, in execution order
pub fn installed_interceptors() -> Vec<String> {
    GLOBAL_CHAIN
        .read()
        .names()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Replace the injected headers and URL filter
///
/// `headers = None` injects nothing; `filter = None` applies to every URL,
/// `Some(vec![])` to none.
pub fn configure(headers: Option<HeaderSet>, filter: Option<Vec<String>>) {
    HeaderRegistry::global().configure(headers, filter);
}

/// Headers currently configured for injection
pub fn current_headers() -> HeaderSet {
    HeaderRegistry::global().current_headers()
}

/// Run a freshly constructed request through the global chain
pub fn intercept(request: Request) -> Request {
    let chain = GLOBAL_CHAIN.read().clone();
    if chain.is_empty() {
        return request;
    }
    chain.process(request)
}

/// Apply the installed header injection to a `reqwest` request
///
/// For hosts that build `reqwest::Request`s themselves. A no-op until
/// [`install`] has run.
pub fn intercept_reqwest(mut request: reqwest::Request) -> reqwest::Request {
    if !is_installed() {
        return request;
    }
    let state = HeaderRegistry::global().snapshot();
    if !state.applies_to(request.url().as_str()) {
        return request;
    }
    state.merge_into(request.headers_mut());
    tracing::trace!(url = %request.url(), "Injected headers");
    request
}
