// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session-aware HTTP client

use std::time::Instant;

use dashmap::DashMap;
use hyper::ext::ReasonPhrase;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, SET_COOKIE};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use url::Url;

use super::config::SessionConfig;
use super::cookie::{Cookie, CookieJar};
use super::request::{Headers, Request};
use super::response::Response;
use crate::error::{Error, Result};

/// HTTP client that keeps cookies between calls.
///
/// Redirects are never followed; a redirect response is returned as-is.
/// Every request carries the session timeout.
pub struct Session {
    config: SessionConfig,
    /// Client for direct connections
    client: Client,
    /// Clients for proxied connections, keyed by proxy URL
    proxied: DashMap<String, Client>,
    /// Current jar; replaced wholesale by `delete_cookies`
    jar: RwLock<CookieJar>,
    /// Cookies matching the last requested URL
    last_cookies: RwLock<Vec<Cookie>>,
}

impl Session {
    /// Create a new session with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(SessionConfig::default())
    }

    /// Create a new session with custom configuration
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        let client = build_client(&config, None)?;

        Ok(Self {
            client,
            config,
            proxied: DashMap::new(),
            jar: RwLock::new(CookieJar::new()),
            last_cookies: RwLock::new(Vec::new()),
        })
    }

    /// Get session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get a handle to the current cookie jar
    pub fn cookie_jar(&self) -> CookieJar {
        self.jar.read().clone()
    }

    /// Cookies that matched the most recent non-302 request
    pub fn last_cookies(&self) -> Vec<Cookie> {
        self.last_cookies.read().clone()
    }

    /// Discard all cookies. Requests already in flight keep the old jar.
    pub fn delete_cookies(&self) {
        *self.jar.write() = CookieJar::new();
        self.last_cookies.write().clear();
        tracing::debug!("Cookie jar reset");
    }

    /// Execute a GET request
    pub async fn get(&self, url: &str, headers: &Headers) -> Result<Response> {
        self.send(Request::get(url)?.headers(headers)?).await
    }

    /// Execute a POST request
    pub async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response> {
        self.send(Request::post(url)?.body(body).headers(headers)?)
            .await
    }

    /// Execute a PUT request without a body. Use [`Session::execute`] to send
    /// a PUT payload.
    pub async fn put(&self, url: &str, headers: &Headers) -> Result<Response> {
        self.send(Request::new("PUT", url)?.headers(headers)?).await
    }

    /// Execute a DELETE request
    pub async fn delete(&self, url: &str, headers: &Headers) -> Result<Response> {
        self.send(Request::new("DELETE", url)?.headers(headers)?)
            .await
    }

    /// Execute an OPTIONS request
    pub async fn options(&self, url: &str, headers: &Headers) -> Result<Response> {
        self.send(Request::new("OPTIONS", url)?.headers(headers)?)
            .await
    }

    /// Execute a request with any method, optionally through a proxy.
    ///
    /// The method is upper-cased. An empty body sends no payload. `proxy`
    /// must be an absolute http(s) URL when given; a malformed one fails
    /// with [`Error::InvalidProxy`] and nothing is sent.
    pub async fn execute(
        &self,
        method: &str,
        url: &str,
        body: &str,
        headers: &Headers,
        proxy: Option<&str>,
    ) -> Result<Response> {
        let request = Request::new(method, url)?
            .proxy(proxy)?
            .body(body)
            .headers(headers)?;
        self.send(request).await
    }

    /// Execute a prepared request
    pub async fn send(&self, request: Request) -> Result<Response> {
        let start = Instant::now();
        let Request {
            method,
            url,
            mut headers,
            body,
            proxy,
        } = request;

        // Later requests may reset the jar; this one keeps the jar it started with
        let jar = self.cookie_jar();
        let client = self.client_for(proxy.as_ref())?;

        if let Some(jar_cookies) = jar.get_cookie_header(&url) {
            let value = match headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
                Some(existing) if !existing.is_empty() => format!("{}; {}", existing, jar_cookies),
                _ => jar_cookies,
            };
            let value = HeaderValue::from_str(&value)
                .map_err(|e| Error::construction(method.as_str(), url.as_str(), e))?;
            headers.insert(COOKIE, value);
        }

        let mut builder = client.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let outgoing = builder
            .build()
            .map_err(|e| Error::construction(method.as_str(), url.as_str(), e))?;

        tracing::debug!(%method, %url, proxied = proxy.is_some(), "Dispatching request");

        let response = client
            .execute(outgoing)
            .await
            .map_err(|source| Error::RequestExecution {
                method: method.to_string(),
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
        let response_headers = response.headers().clone();

        for value in response_headers.get_all(SET_COOKIE) {
            jar.add_from_header(&String::from_utf8_lossy(value.as_bytes()), &url);
        }

        let body = response.text().await.map_err(|source| Error::ResponseRead {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!(
            %method,
            %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Received response"
        );

        if status != StatusCode::FOUND {
            let mut snapshot = self.last_cookies.write();
            // Skip if delete_cookies swapped the jar while this request was in flight
            if self.jar.read().same_jar(&jar) {
                *snapshot = jar.get_cookies(&url);
            }
        }

        Ok(Response::new(
            status,
            reason.as_deref(),
            &response_headers,
            body,
            url,
        ))
    }

    fn client_for(&self, proxy: Option<&Url>) -> Result<Client> {
        let Some(proxy) = proxy else {
            return Ok(self.client.clone());
        };

        if let Some(client) = self.proxied.get(proxy.as_str()) {
            return Ok(client.clone());
        }

        let client = build_client(&self.config, Some(proxy))?;
        self.proxied.insert(proxy.to_string(), client.clone());
        Ok(client)
    }
}

fn build_client(config: &SessionConfig, proxy: Option<&Url>) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout)
        .redirect(Policy::none())
        .default_headers(default_headers(config)?);

    builder = match proxy {
        Some(proxy) => builder.proxy(
            reqwest::Proxy::all(proxy.clone()).map_err(|e| Error::invalid_proxy(proxy.as_str(), e))?,
        ),
        // Ignore HTTP_PROXY and friends; direct means direct
        None => builder.no_proxy(),
    };

    builder
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))
}

fn default_headers(config: &SessionConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.default_headers {
        let name = HeaderName::try_from(name.as_str())
            .map_err(|e| Error::Config(format!("invalid default header name '{}': {}", name, e)))?;
        let value = HeaderValue::try_from(value.as_str())
            .map_err(|e| Error::Config(format!("invalid default header value for '{}': {}", name, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}
