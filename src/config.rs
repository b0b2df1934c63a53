//! Client configuration
//!
//! Sources, lowest to highest priority: built-in defaults, a TOML file,
//! the `MARKETPLACE_BASE_URL` and `MARKETPLACE_LOCALE` environment
//! variables, then the `with_*` builder methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::interceptor::DEFAULT_CSRF_HEADER;

pub const ENV_BASE_URL: &str = "MARKETPLACE_BASE_URL";
pub const ENV_LOCALE: &str = "MARKETPLACE_LOCALE";

/// Error type for configuration loading and validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Marketplace client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the marketplace server (default: http://localhost:8080)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Keep session cookies between requests
    #[serde(default = "default_with_credentials")]
    pub with_credentials: bool,

    /// CSRF header name used when the server has not sent one
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    /// Locale for server configuration requests
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Default catalogue page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_with_credentials() -> bool {
    true
}

fn default_csrf_header() -> String {
    DEFAULT_CSRF_HEADER.to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_page_size() -> u32 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            with_credentials: default_with_credentials(),
            csrf_header: default_csrf_header(),
            locale: default_locale(),
            page_size: default_page_size(),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `MARKETPLACE_BASE_URL` and `MARKETPLACE_LOCALE` when set
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(locale) = lookup(ENV_LOCALE).filter(|v| !v.is_empty()) {
            self.locale = locale;
        }
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    pub fn with_csrf_header(mut self, header: impl Into<String>) -> Self {
        self.csrf_header = header.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url cannot be empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.csrf_header.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "csrf_header cannot be empty".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.with_credentials);
        assert_eq!(config.csrf_header, "X-CSRF-TOKEN");
        assert_eq!(config.locale, "en");
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = ClientConfig::default().with_overrides_from(|key| match key {
            ENV_BASE_URL => Some("https://market.example.com".to_string()),
            ENV_LOCALE => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.base_url, "https://market.example.com");
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default().with_base_url("ftp://x").validate().is_err());
        assert!(ClientConfig::default().with_csrf_header(" ").validate().is_err());
        assert!(ClientConfig::default().with_page_size(0).validate().is_err());
    }
}
