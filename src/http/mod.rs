// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP session layer
//!
//! Provides a thin HTTP client that keeps cookies between calls, can route
//! individual requests through a proxy and never follows redirects.

mod blocking;
mod client;
mod config;
mod cookie;
mod request;
mod response;

pub use blocking::BlockingSession;
pub use client::Session;
pub use config::{SessionConfig, DEFAULT_TIMEOUT};
pub use cookie::{Cookie, CookieJar, SameSite};
pub use request::{parse_proxy, Headers, Request};
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("http-session/", env!("CARGO_PKG_VERSION"));
