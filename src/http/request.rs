// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use crate::error::{Error, Result};

/// Caller-supplied header mapping, one value per name
pub type Headers = HashMap<String, String>;

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<String>,
    /// Proxy to route this request through
    pub proxy: Option<Url>,
}

impl Request {
    /// Create a request with an arbitrary method. The method is upper-cased;
    /// an empty or blank method means GET.
    pub fn new(method: &str, url: &str) -> Result<Self> {
        let normalized = match method.trim() {
            "" => Method::GET.to_string(),
            _ => method.to_uppercase(),
        };
        let method = Method::from_bytes(normalized.as_bytes())
            .map_err(|e| Error::construction(&normalized, url, e))?;

        Ok(Self {
            url: parse_target(&normalized, url)?,
            method,
            headers: HeaderMap::new(),
            body: None,
            proxy: None,
        })
    }

    /// Create a new GET request
    pub fn get(url: &str) -> Result<Self> {
        Self::new("GET", url)
    }

    /// Create a new POST request
    pub fn post(url: &str) -> Result<Self> {
        Self::new("POST", url)
    }

    /// Set a header, replacing any earlier value of the same name
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let header_name = HeaderName::try_from(name)
            .map_err(|e| Error::construction(self.method.as_str(), self.url.as_str(), e))?;
        let header_value = HeaderValue::try_from(value)
            .map_err(|e| Error::construction(self.method.as_str(), self.url.as_str(), e))?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Set multiple headers
    pub fn headers(self, headers: &Headers) -> Result<Self> {
        headers
            .iter()
            .try_fold(self, |req, (name, value)| req.header(name, value))
    }

    /// Set the request body. An empty body sends no payload.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    /// Route the request through a proxy. `None` or an empty string means a
    /// direct connection.
    pub fn proxy(mut self, proxy: Option<&str>) -> Result<Self> {
        self.proxy = match proxy {
            Some(proxy) if !proxy.is_empty() => Some(parse_proxy(proxy)?),
            _ => None,
        };
        Ok(self)
    }
}

fn parse_target(method: &str, url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| Error::construction(method, url, e))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        "http" | "https" => Err(Error::construction(method, url, "URL has no host")),
        scheme => Err(Error::construction(
            method,
            url,
            format!("unsupported URL scheme '{}'", scheme),
        )),
    }
}

/// Parse a proxy URL. Only absolute http(s) URLs with a host are accepted.
pub fn parse_proxy(proxy: &str) -> Result<Url> {
    let parsed = Url::parse(proxy).map_err(|e| Error::invalid_proxy(proxy, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::invalid_proxy(
            proxy,
            format!("unsupported proxy scheme '{}'", parsed.scheme()),
        ));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(Error::invalid_proxy(proxy, "proxy URL has no host"));
    }
    Ok(parsed)
}
