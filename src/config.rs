//! SDK Configuration

use std::time::Duration;

/// Configuration for the Warden SDK
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the Warden API
    pub base_url: String,

    /// Static API key sent as a bearer token on every request
    pub api_key: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Config {
    /// Create a new configuration with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("Warden-Rust-SDK/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:5601")
    }
}
