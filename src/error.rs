// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for maphook
//!
//! Header injection itself never fails. Errors only come from the edges:
//! building a request from a URL string and loading hook configuration.

use thiserror::Error;

/// Result type alias for maphook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for maphook
#[derive(Error, Debug)]
pub enum Error {
    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check if this came from reading or parsing hook configuration
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Serialization(_) | Error::Io(_))
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", msg, e.into())))
    }
}
