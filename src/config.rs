//! Configuration types.

use crate::error::ConfigError;

/// Default base URL of the recommendation service.
pub const DEFAULT_API_BASE_URL: &str = "https://timesinternet.onrender.com";

/// Environment variable overriding the service base URL.
pub const API_URL_ENV: &str = "CARD_ADVISOR_API_URL";

/// Environment variable overriding the banner name.
pub const NAME_ENV: &str = "CARD_ADVISOR_NAME";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Display name printed in the banner.
    pub name: String,
    /// Base URL hosting the `/ask` and `/recommend` endpoints.
    pub api_base_url: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            name: "Credit Card Chat Assistant".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl AdvisorConfig {
    /// Build configuration from the process environment, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(NAME_ENV).filter(|n| !n.trim().is_empty()) {
            config.name = name;
        }

        if let Some(url) = lookup(API_URL_ENV) {
            config.api_base_url = validate_base_url(&url)?;
        }

        Ok(config)
    }
}

/// Check that `raw` is an absolute http(s) URL and strip any trailing slash.
fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        key: API_URL_ENV.to_string(),
        message: format!("'{}' is not a valid URL: {}", trimmed, e),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        other => Err(ConfigError::InvalidValue {
            key: API_URL_ENV.to_string(),
            message: format!("unsupported scheme '{}', expected http or https", other),
        }),
    }
}
