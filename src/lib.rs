// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # maphook - Header Injection for Map Renderers
//!
//! Injects caller-supplied HTTP headers into every request an embedded map
//! renderer issues for tiles, styles, glyphs and sprites, optionally limited
//! to URLs matching a substring filter.
//!
//! ## Features
//!
//! - Process-wide registry: one (headers, filter) pair, swapped atomically
//! - Idempotent hook install on the host's request-construction path
//! - Substring URL filter: absent = every request, empty = no request
//! - Configured headers override request-intrinsic ones
//! - Interceptor chain for hosts that need their own rewrites
//! - `reqwest` adapter for hosts built on reqwest
//!
//! ## Example
//!
//! ```rust
//! use maphook::{HeaderSet, Request};
//!
//! maphook::install();
//! maphook::configure(
//!     Some(HeaderSet::new().header("X-Api-Key", "abc")),
//!     Some(vec!["tiles.example.com".to_string()]),
//! );
//!
//! let tile = Request::get("https://tiles.example.com/1/2/3.png").unwrap();
//! assert_eq!(tile.header_str("x-api-key"), Some("abc"));
//!
//! let other = Request::get("https://other.example.com/").unwrap();
//! assert!(other.headers.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod network;

// Re-exports for convenience

// Configuration
pub use config::HookConfig;

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{HeaderEntry, HeaderSet, Request, RequestBuilder};

// Network
pub use network::{
    configure, current_headers, install, install_logger, intercept, intercept_reqwest,
    is_installed,
};
pub use network::{HeaderInjector, HeaderRegistry, InterceptionState, UrlFilter};
pub use network::{InterceptorChain, RequestInterceptor, RequestLogger};

/// maphook version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
