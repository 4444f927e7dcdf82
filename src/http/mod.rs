// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request model for the host networking stack
//!
//! Provides the request type the map renderer builds for tile, style,
//! glyph and sprite fetches, plus the header set configured for injection.

mod header_set;
mod request;

pub use header_set::{HeaderEntry, HeaderSet};
pub use request::{Request, RequestBuilder};

/// Common HTTP headers
pub mod headers {
    pub const AUTHORIZATION: &str = "authorization";
}
