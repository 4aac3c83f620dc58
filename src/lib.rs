// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # http-session - Session-aware HTTP client helper
//!
//! Issues GET, POST, PUT, DELETE, OPTIONS and custom-method requests,
//! keeps cookies between calls in a per-session jar, optionally routes a
//! request through an HTTP proxy and returns a normalized [`Response`].
//!
//! - Redirects are returned, never followed
//! - One timeout (30 seconds by default) for every call
//! - Cookie scoping follows RFC 6265 domain and path rules
//! - Errors name the phase that failed: building, sending or reading
//!
//! ## Example
//!
//! ```rust,no_run
//! use http_session::{Headers, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new()?;
//!
//!     let mut headers = Headers::new();
//!     headers.insert("Accept".to_string(), "text/html".to_string());
//!
//!     session.post("https://example.com/login", "user=me", &headers).await?;
//!     let page = session.get("https://example.com/account", &headers).await?;
//!     println!("{} ({} bytes)", page.status, page.body.len());
//!
//!     session.delete_cookies();
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{BlockingSession, Session, SessionConfig};
pub use http::{Cookie, CookieJar, SameSite};
pub use http::{Headers, Request, Response};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
