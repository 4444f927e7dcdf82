// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interception
//!
//! Registry of the headers to inject and the hook that applies them to
//! every outgoing request.

mod hook;
mod interceptor_trait;
mod registry;

pub use hook::{
    configure, current_headers, install, install_logger, installed_interceptors, intercept,
    intercept_reqwest, is_installed, register,
};
pub use interceptor_trait::{HeaderInjector, InterceptorChain, RequestInterceptor, RequestLogger};
pub use registry::{HeaderRegistry, InterceptionState, UrlFilter};
