//! HTTP client configuration.
//!
//! The browser build has no process environment, so overrides are read at
//! compile time from `PRACTICE_API_BASE_URL`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:6565";
pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the practice API, without a trailing slash.
    pub api_base_url: String,
    /// Whether cross-origin requests carry cookies. Auth uses bearer tokens.
    pub with_credentials: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None)
    }
}

impl ClientConfig {
    /// Build config from values baked in at compile time.
    ///
    /// Optional:
    /// - `PRACTICE_API_BASE_URL`: default `http://localhost:6565`
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("PRACTICE_API_BASE_URL"))
    }

    pub fn from_values(base_url: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        Self { api_base_url, with_credentials: false }
    }

    /// Absolute URL for an API path such as `/auth/login`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.api_base_url)
        } else {
            format!("{}/{path}", self.api_base_url)
        }
    }
}
