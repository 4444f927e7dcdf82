// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types and builder
//!
//! Every constructor ends in [`RequestBuilder::build`], which hands the
//! finished request to the global interceptor chain. That is the single
//! construction path the header hook sits on.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use crate::error::Result;
use crate::network;

/// Outgoing HTTP request as seen by the host networking stack
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl Request {
    /// Build a GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Ok(RequestBuilder::new(Method::GET, url)?.build())
    }

    /// Build a POST request with a body
    pub fn post(url: impl AsRef<str>, body: impl Into<Bytes>) -> Result<Self> {
        Ok(RequestBuilder::new(Method::POST, url)?.body(body).build())
    }

    /// Build a request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(RequestBuilder::new(method, url)?.build())
    }

    /// Start a builder for a request that needs headers, body or timeout
    pub fn builder(method: Method, url: impl AsRef<str>) -> Result<RequestBuilder> {
        RequestBuilder::new(method, url)
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get the host
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Get a header value as string, if present and valid UTF-8
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl From<Request> for reqwest::Request {
    fn from(request: Request) -> Self {
        let mut out = reqwest::Request::new(request.method, request.url);
        *out.headers_mut() = request.headers;
        *out.timeout_mut() = request.timeout;
        if let Some(body) = request.body {
            *out.body_mut() = Some(body.into());
        }
        out
    }
}

/// Request builder
#[derive(Debug)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Create a new request builder
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            request: Request {
                method,
                url: Url::parse(url.as_ref())?,
                headers: HeaderMap::new(),
                body: None,
                timeout: Some(Duration::from_secs(30)),
            },
        })
    }

    /// Set a header
    ///
    /// Names or values the protocol cannot carry are dropped.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.request.headers.insert(name, value);
        }
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    /// Disable timeout
    pub fn no_timeout(mut self) -> Self {
        self.request.timeout = None;
        self
    }

    /// Finish the request and pass it through the installed interceptors
    pub fn build(self) -> Request {
        network::intercept(self.request)
    }
}
