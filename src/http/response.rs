// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use std::collections::HashMap;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// Normalized HTTP response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Status line, e.g. `200 OK`, with the reason phrase the server sent
    pub status: String,
    /// Numeric status code
    pub status_code: u16,
    /// Response body decoded as text
    pub body: String,
    /// Header values by name, in the order received. Names are lower-case
    /// (`content-type`, not `Content-Type`); use [`Response::header`] for
    /// case-insensitive lookups.
    pub headers: HashMap<String, Vec<String>>,
    /// URL that was requested
    pub url: Url,
}

impl Response {
    /// Create a new response. `reason` is the phrase from the status line
    /// when the server sent a non-canonical one.
    pub fn new(
        status: StatusCode,
        reason: Option<&str>,
        headers: &HeaderMap,
        body: String,
        url: Url,
    ) -> Self {
        Self {
            status: status_line(status, reason),
            status_code: status.as_u16(),
            body,
            headers: collect_headers(headers),
            url,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Check if status is redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    /// Get the first value of a header, name matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Get all values for a header
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get redirect target, if any
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// Get Set-Cookie headers
    pub fn set_cookies(&self) -> Vec<&str> {
        self.header_all("set-cookie")
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Status line for a code: `<code> <reason>`, preferring the server's own
/// phrase over the canonical one, or the bare code when neither exists
fn status_line(status: StatusCode, reason: Option<&str>) -> String {
    match reason.filter(|r| !r.is_empty()).or(status.canonical_reason()) {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

fn collect_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
    let mut collected: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers.iter() {
        collected
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    collected
}
