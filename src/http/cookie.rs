// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie jar implementation for session cookie storage
//!
//! Scoping follows RFC 6265: cookies without a `Domain` attribute are
//! host-only, a `Domain` attribute must cover the host that set it, and
//! paths match on `/` boundaries.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use url::Url;

/// Upper bound for `Max-Age`, in seconds (400 days)
const MAX_AGE_CAP: i64 = 400 * 24 * 60 * 60;

/// A single HTTP cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to, lower-case, without a leading dot
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Only sent to exactly `domain`, never to its subdomains
    pub host_only: bool,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameSite {
    #[default]
    None,
    Lax,
    Strict,
}

impl Cookie {
    /// Create a new host-only session cookie with path `/`
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            host_only: true,
            expires: None,
            secure: false,
            http_only: false,
            same_site: SameSite::default(),
        }
    }

    /// Set the domain. The cookie becomes a domain cookie, sent to subdomains too.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into().trim_start_matches('.').to_ascii_lowercase();
        self.host_only = false;
        self
    }

    /// Restrict the cookie to exactly this host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.domain = host.into().to_ascii_lowercase();
        self.host_only = true;
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set secure flag
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set http_only flag
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set same_site attribute
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp <= Utc::now())
    }

    /// Check if the cookie may be sent with a request to the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = match url.host_str() {
            Some(host) => host.to_ascii_lowercase(),
            None => return false,
        };

        let domain_ok = if self.host_only {
            host == self.domain
        } else {
            domain_match(&host, &self.domain)
        };
        if !domain_ok {
            return false;
        }

        if !path_match(url.path(), &self.path) {
            return false;
        }

        if self.secure && url.scheme() != "https" {
            return false;
        }

        !self.is_expired()
    }

    /// Parse a Set-Cookie header value received from `url`.
    ///
    /// Returns `None` for malformed headers and for cookies whose `Domain`
    /// attribute does not cover the URL's host.
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_ascii_lowercase();

        let mut parts = header.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Cookie::new(name, value.trim());
        let mut domain_attr: Option<String> = None;
        let mut path_attr: Option<String> = None;
        let mut max_age: Option<i64> = None;
        let mut expires: Option<DateTime<Utc>> = None;

        for part in parts {
            let part = part.trim();
            let (attr, val) = match part.split_once('=') {
                Some((attr, val)) => (attr.trim().to_ascii_lowercase(), val.trim()),
                None => (part.to_ascii_lowercase(), ""),
            };

            match attr.as_str() {
                "domain" => {
                    let domain = val.trim_start_matches('.').to_ascii_lowercase();
                    if !domain.is_empty() {
                        domain_attr = Some(domain);
                    }
                }
                "path" => {
                    if val.starts_with('/') {
                        path_attr = Some(val.to_string());
                    }
                }
                "expires" => expires = parse_cookie_date(val),
                "max-age" => {
                    if let Ok(secs) = val.parse::<i64>() {
                        max_age = Some(secs);
                    }
                }
                "samesite" => {
                    cookie.same_site = match val.to_ascii_lowercase().as_str() {
                        "strict" => SameSite::Strict,
                        "lax" => SameSite::Lax,
                        _ => SameSite::None,
                    };
                }
                "secure" => cookie.secure = true,
                "httponly" => cookie.http_only = true,
                _ => {}
            }
        }

        match domain_attr {
            Some(domain) => {
                if !domain_match(&host, &domain) {
                    return None;
                }
                cookie.domain = domain;
                cookie.host_only = false;
            }
            None => {
                cookie.domain = host;
                cookie.host_only = true;
            }
        }

        cookie.path = path_attr.unwrap_or_else(|| default_path(url.path()));

        // Max-Age wins over Expires
        cookie.expires = match max_age {
            Some(secs) if secs <= 0 => Some(Utc::now() - chrono::Duration::seconds(1)),
            Some(secs) => Some(Utc::now() + chrono::Duration::seconds(secs.min(MAX_AGE_CAP))),
            None => expires,
        };

        Some(cookie)
    }

    /// Convert to cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    fn same_slot(&self, other: &Cookie) -> bool {
        self.name == other.name && self.path == other.path && self.domain == other.domain
    }
}

/// RFC 6265 domain-match: identical, or a subdomain of a non-IP host
fn domain_match(host: &str, domain: &str) -> bool {
    if host == domain {
        return true;
    }
    if is_ip_host(host) {
        return false;
    }
    host.len() > domain.len()
        && host.ends_with(domain)
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
}

fn is_ip_host(host: &str) -> bool {
    host.starts_with('[') || host.parse::<IpAddr>().is_ok()
}

/// RFC 6265 path-match
fn path_match(request_path: &str, cookie_path: &str) -> bool {
    let request_path = if request_path.is_empty() { "/" } else { request_path };
    if request_path == cookie_path {
        return true;
    }
    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/') || request_path[cookie_path.len()..].starts_with('/'))
}

/// Default cookie path: the directory of the request path
fn default_path(request_path: &str) -> String {
    if !request_path.starts_with('/') {
        return "/".to_string();
    }
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => request_path[..idx].to_string(),
    }
}

/// Parse an `Expires` value in the formats servers actually send
fn parse_cookie_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%a, %d-%b-%Y %H:%M:%S GMT", "%A, %d-%b-%y %H:%M:%S GMT"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Thread-safe cookie storage
#[derive(Debug, Clone)]
pub struct CookieJar {
    /// Cookies stored by domain
    cookies: Arc<DashMap<String, Vec<Cookie>>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self {
            cookies: Arc::new(DashMap::new()),
        }
    }

    /// Add a cookie to the jar, replacing the one with the same name, domain
    /// and path. An already expired cookie deletes that slot instead.
    pub fn add(&self, cookie: Cookie) {
        let mut slot = self.cookies.entry(cookie.domain.clone()).or_default();
        slot.retain(|c| !c.same_slot(&cookie));
        if !cookie.is_expired() {
            slot.push(cookie);
        }
    }

    /// Add a cookie from a Set-Cookie header. Returns whether it was accepted.
    pub fn add_from_header(&self, header: &str, url: &Url) -> bool {
        match Cookie::parse(header, url) {
            Some(cookie) => {
                tracing::trace!(name = %cookie.name, domain = %cookie.domain, path = %cookie.path, "Storing cookie");
                self.add(cookie);
                true
            }
            None => {
                tracing::trace!(%url, header, "Rejected Set-Cookie header");
                false
            }
        }
    }

    /// Get all cookies for a URL, longest path first
    pub fn get_cookies(&self, url: &Url) -> Vec<Cookie> {
        let mut result: Vec<Cookie> = self
            .cookies
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|c| c.matches(url))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();

        self.remove_expired();

        result.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
        result
    }

    /// Get Cookie header value for a URL
    pub fn get_cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.get_cookies(url);
        if cookies.is_empty() {
            return None;
        }

        Some(
            cookies
                .iter()
                .map(|c| c.to_header_value())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Remove a specific cookie
    pub fn remove(&self, name: &str, domain: &str, path: &str) {
        if let Some(mut cookies) = self.cookies.get_mut(domain) {
            cookies.retain(|c| c.name != name || c.path != path);
        }
    }

    /// Check whether both handles point at the same storage
    pub fn same_jar(&self, other: &CookieJar) -> bool {
        Arc::ptr_eq(&self.cookies, &other.cookies)
    }

    /// Clear all cookies
    pub fn clear(&self) {
        self.cookies.clear();
    }

    fn remove_expired(&self) {
        for mut entry in self.cookies.iter_mut() {
            entry.value_mut().retain(|c| !c.is_expired());
        }
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.iter().map(|e| e.value().len()).sum()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export all cookies as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        let all_cookies: Vec<Cookie> = self
            .cookies
            .iter()
            .flat_map(|e| e.value().clone())
            .collect();
        serde_json::to_string(&all_cookies)
    }

    /// Import cookies from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let cookies: Vec<Cookie> = serde_json::from_str(json)?;
        let jar = CookieJar::new();
        for cookie in cookies {
            jar.add(cookie);
        }
        Ok(jar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_cookie_parsing() {
        let header = "session=abc123; Domain=example.com; Path=/; Secure; HttpOnly; SameSite=Lax";
        let cookie = Cookie::parse(header, &url("https://example.com/path")).unwrap();

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "example.com");
        assert!(!cookie.host_only);
        assert_eq!(cookie.path, "/");
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.same_site, SameSite::Lax);
        assert!(cookie.expires.is_none());
    }

    #[test]
    fn test_malformed_headers_rejected() {
        let origin = url("http://example.com/");
        assert!(Cookie::parse("novalue", &origin).is_none());
        assert!(Cookie::parse("=value", &origin).is_none());
        assert!(Cookie::parse("", &origin).is_none());
    }

    #[test]
    fn test_host_only_cookie() {
        let jar = CookieJar::new();
        assert!(jar.add_from_header("id=1", &url("http://example.com/")));

        assert!(jar.get_cookie_header(&url("http://example.com/a")).is_some());
        assert!(jar.get_cookie_header(&url("http://sub.example.com/")).is_none());
        assert!(jar.get_cookie_header(&url("http://other.com/")).is_none());
    }

    #[test]
    fn test_domain_cookie_reaches_subdomains() {
        let jar = CookieJar::new();
        assert!(jar.add_from_header("id=1; Domain=.example.com", &url("http://www.example.com/")));

        assert_eq!(
            jar.get_cookie_header(&url("http://api.example.com/")),
            Some("id=1".to_string())
        );
        assert!(jar.get_cookie_header(&url("http://badexample.com/")).is_none());
    }

    #[test]
    fn test_foreign_domain_rejected() {
        let jar = CookieJar::new();
        assert!(!jar.add_from_header("id=1; Domain=evil.com", &url("http://example.com/")));
        assert!(!jar.add_from_header("id=1; Domain=www.example.com", &url("http://example.com/")));
        assert!(jar.is_empty());
    }

    #[test]
    fn test_ip_host_has_no_subdomains() {
        let jar = CookieJar::new();
        assert!(!jar.add_from_header("id=1; Domain=0.0.1", &url("http://127.0.0.1/")));
        assert!(jar.add_from_header("id=1; Domain=127.0.0.1", &url("http://127.0.0.1/")));
        assert!(jar.get_cookie_header(&url("http://127.0.0.1:8080/")).is_some());
    }

    #[test]
    fn test_path_matching() {
        let jar = CookieJar::new();
        jar.add_from_header("a=1; Path=/docs", &url("http://example.com/"));

        assert!(jar.get_cookie_header(&url("http://example.com/docs")).is_some());
        assert!(jar.get_cookie_header(&url("http://example.com/docs/page")).is_some());
        assert!(jar.get_cookie_header(&url("http://example.com/docsearch")).is_none());
        assert!(jar.get_cookie_header(&url("http://example.com/")).is_none());
    }

    #[test]
    fn test_default_path() {
        assert_eq!(default_path("/"), "/");
        assert_eq!(default_path("/login"), "/");
        assert_eq!(default_path("/account/login"), "/account");
        assert_eq!(default_path(""), "/");

        let cookie = Cookie::parse("a=1", &url("http://example.com/account/login")).unwrap();
        assert_eq!(cookie.path, "/account");
    }

    #[test]
    fn test_longer_paths_first() {
        let jar = CookieJar::new();
        let origin = url("http://example.com/");
        jar.add_from_header("root=1; Path=/", &origin);
        jar.add_from_header("deep=2; Path=/a/b", &origin);

        assert_eq!(
            jar.get_cookie_header(&url("http://example.com/a/b/c")),
            Some("deep=2; root=1".to_string())
        );
    }

    #[test]
    fn test_secure_cookie_needs_https() {
        let jar = CookieJar::new();
        jar.add_from_header("s=1; Secure", &url("https://example.com/"));

        assert!(jar.get_cookie_header(&url("https://example.com/")).is_some());
        assert!(jar.get_cookie_header(&url("http://example.com/")).is_none());
    }

    #[test]
    fn test_replace_and_delete() {
        let jar = CookieJar::new();
        let origin = url("http://example.com/");

        jar.add_from_header("token=old", &origin);
        jar.add_from_header("token=new", &origin);
        assert_eq!(jar.len(), 1);
        assert_eq!(jar.get_cookie_header(&origin), Some("token=new".to_string()));

        jar.add_from_header("token=; Max-Age=0", &origin);
        assert!(jar.get_cookie_header(&origin).is_none());
        assert!(jar.is_empty());
    }

    #[test]
    fn test_remove_cookie() {
        let jar = CookieJar::new();
        let origin = url("http://example.com/");
        jar.add_from_header("keep=1", &origin);
        jar.add_from_header("drop=1", &origin);
        jar.add_from_header("drop=2; Path=/admin", &origin);

        jar.remove("drop", "example.com", "/");
        assert_eq!(jar.len(), 2);
        assert_eq!(jar.get_cookie_header(&origin), Some("keep=1".to_string()));

        // Unknown domain is a no-op
        jar.remove("keep", "other.com", "/");
        assert_eq!(jar.len(), 2);
    }

    #[test]
    fn test_same_jar() {
        let jar = CookieJar::new();
        assert!(jar.same_jar(&jar.clone()));
        assert!(!jar.same_jar(&CookieJar::new()));
    }

    #[test]
    fn test_expires_in_the_past_deletes() {
        let jar = CookieJar::new();
        let origin = url("http://example.com/");

        jar.add_from_header("token=abc", &origin);
        jar.add_from_header("token=abc; Expires=Thu, 01 Jan 1970 00:00:00 GMT", &origin);
        assert!(jar.is_empty());
    }

    #[test]
    fn test_max_age_wins_over_expires() {
        let cookie = Cookie::parse(
            "a=1; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=3600",
            &url("http://example.com/"),
        )
        .unwrap();
        assert!(!cookie.is_expired());
        assert!(cookie.expires.is_some());
    }

    #[test]
    fn test_cookie_date_formats() {
        assert!(parse_cookie_date("Wed, 21 Oct 2015 07:28:00 GMT").is_some());
        assert!(parse_cookie_date("Wed, 21-Oct-2015 07:28:00 GMT").is_some());
        assert!(parse_cookie_date("not a date").is_none());
    }

    #[test]
    fn test_json_export() {
        let jar = CookieJar::new();
        jar.add(Cookie::new("test", "value").host("example.com"));

        let json = jar.to_json().unwrap();
        let restored = CookieJar::from_json(&json).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(
            restored.get_cookies(&url("http://example.com/"))[0].name,
            "test"
        );
    }
}
