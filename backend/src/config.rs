//! Catalog API settings read from the environment.

use std::time::Duration;

use anyhow::Context;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Catalog origin, without a trailing slash.
    pub base_url: String,
    pub api_version: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Reads `DDI_API_URL`, `DDI_API_VERSION` and `DDI_API_TIMEOUT_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let base_url = lookup("DDI_API_URL").unwrap_or(DEFAULT_API_URL.to_string());
        let api_version = lookup("DDI_API_VERSION").unwrap_or(DEFAULT_API_VERSION.to_string());
        let timeout_secs = match lookup("DDI_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("DDI_API_TIMEOUT_SECS is not a number of seconds: {:?}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            anyhow::bail!("DDI_API_URL is empty");
        }
        Ok(Self {
            base_url,
            api_version: api_version.trim().trim_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
