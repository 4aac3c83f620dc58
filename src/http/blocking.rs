// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Blocking wrapper around [`Session`]
//!
//! Each call parks the calling thread until the request completes, fails or
//! times out. Do not use it from inside an async runtime; use [`Session`]
//! there instead.

use std::future::Future;

use tokio::runtime::{Builder, Runtime};

use super::client::Session;
use super::config::SessionConfig;
use super::cookie::{Cookie, CookieJar};
use super::request::{Headers, Request};
use super::response::Response;
use crate::error::{Error, Result};

/// Session whose calls block the current thread
pub struct BlockingSession {
    inner: Session,
    runtime: Runtime,
}

impl BlockingSession {
    /// Create a new blocking session with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(SessionConfig::default())
    }

    /// Create a new blocking session with custom configuration
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("failed to start runtime: {}", e)))?;

        Ok(Self {
            inner: Session::with_config(config)?,
            runtime,
        })
    }

    /// Get the underlying async session
    pub fn session(&self) -> &Session {
        &self.inner
    }

    /// Get a handle to the current cookie jar
    pub fn cookie_jar(&self) -> CookieJar {
        self.inner.cookie_jar()
    }

    /// Cookies that matched the most recent non-302 request
    pub fn last_cookies(&self) -> Vec<Cookie> {
        self.inner.last_cookies()
    }

    /// Discard all cookies
    pub fn delete_cookies(&self) {
        self.inner.delete_cookies()
    }

    pub fn get(&self, url: &str, headers: &Headers) -> Result<Response> {
        self.block_on(self.inner.get(url, headers))
    }

    pub fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response> {
        self.block_on(self.inner.post(url, body, headers))
    }

    pub fn put(&self, url: &str, headers: &Headers) -> Result<Response> {
        self.block_on(self.inner.put(url, headers))
    }

    pub fn delete(&self, url: &str, headers: &Headers) -> Result<Response> {
        self.block_on(self.inner.delete(url, headers))
    }

    pub fn options(&self, url: &str, headers: &Headers) -> Result<Response> {
        self.block_on(self.inner.options(url, headers))
    }

    /// See [`Session::execute`]
    pub fn execute(
        &self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
        proxy: Option<&str>,
    ) -> Result<Response> {
        self.block_on(self.inner.execute(method, url, body, headers, proxy))
    }

    /// Execute a prepared request
    pub fn send(&self, request: Request) -> Result<Response> {
        self.block_on(self.inner.send(request))
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_blocking_round_trip() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/login"))
                .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "sid=xyz"))
                .mount(&server)
                .await;
            Mock::given(method("DELETE"))
                .and(path("/session"))
                .and(header("cookie", "sid=xyz"))
                .respond_with(ResponseTemplate::new(204))
                .expect(1)
                .mount(&server)
                .await;
            server
        });

        let session = BlockingSession::new().unwrap();
        let none = Headers::new();

        let resp = session.get(&format!("{}/login", server.uri()), &none).unwrap();
        assert_eq!(resp.status_code, 200);
        assert_eq!(session.last_cookies().len(), 1);

        let resp = session
            .delete(&format!("{}/session", server.uri()), &none)
            .unwrap();
        assert_eq!(resp.status, "204 No Content");

        rt.block_on(async move { drop(server) });
    }
}
