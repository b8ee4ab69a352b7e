//! Client Configuration

use serde::Deserialize;

use crate::domain::DEFAULT_COLOR;
use crate::error::BoardError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_NOTICE_TTL_MS: u32 = 3000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL every API path is appended to
    pub api_base_url: String,
    /// How long a notification stays on screen
    pub notice_ttl_ms: u32,
    /// Color preselected in the category form
    pub default_category_color: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            notice_ttl_ms: DEFAULT_NOTICE_TTL_MS,
            default_category_color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Parse a JSON override document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        serde_json::from_str(json).map_err(|e| BoardError::Validation(format!("Invalid client config: {e}")))
    }

    /// Base URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.notice_ttl_ms, 3000);
        assert_eq!(config.default_category_color, "#007bff");
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = ClientConfig::from_json(r#"{"apiBaseUrl": "https://tasks.example.com/api/"}"#).unwrap();
        assert_eq!(config.base_url(), "https://tasks.example.com/api");
        assert_eq!(config.notice_ttl_ms, DEFAULT_NOTICE_TTL_MS);

        assert!(ClientConfig::from_json("{not json").is_err());
    }
}
