// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session configuration

use std::time::Duration;

use super::DEFAULT_USER_AGENT;

/// Default timeout applied to every request of a session
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// User agent string
    pub user_agent: String,
    /// Timeout for the whole request, connect through body
    pub timeout: Duration,
    /// Headers sent with every request unless the call overrides them
    pub default_headers: Vec<(String, String)>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![],
        }
    }
}

impl SessionConfig {
    /// Create a new session config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}
