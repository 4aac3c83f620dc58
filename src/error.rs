// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for http-session
//!
//! Each variant names the phase of a request that failed, so callers can
//! tell a request that never left from one that died on the wire or while
//! its body was being read.

use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for session operations
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be built (bad method, URL or header)
    #[error("failed to build {method} request for {url}: {reason}")]
    RequestConstruction {
        method: String,
        url: String,
        reason: String,
    },

    /// Transport failure before a response head arrived
    #[error("failed to execute {method} request to {url}: {source}")]
    RequestExecution {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Transport failure while draining the response body
    #[error("failed to read response body from {url}: {source}")]
    ResponseRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Proxy string was not a usable proxy URL
    #[error("invalid proxy URL '{proxy}': {reason}")]
    InvalidProxy { proxy: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a request construction error
    pub fn construction(
        method: impl Into<String>,
        url: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Error::RequestConstruction {
            method: method.into(),
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid proxy error
    pub fn invalid_proxy(proxy: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidProxy {
            proxy: proxy.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::RequestExecution { source, .. } | Error::ResponseRead { source, .. } => {
                source.is_timeout()
            }
            _ => false,
        }
    }

    /// Check if the request never reached the network
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Error::RequestConstruction { .. } | Error::InvalidProxy { .. }
        )
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::RequestConstruction { url, .. }
            | Error::RequestExecution { url, .. }
            | Error::ResponseRead { url, .. } => Some(url),
            _ => None,
        }
    }
}
