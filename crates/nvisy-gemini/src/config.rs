//! Gemini client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default API root for the generative language service.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default multimodal model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Configuration for the Gemini client.
///
/// The API key is sent as the `key` query parameter and is never logged
/// or serialized.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct GeminiConfig {
    /// Gemini API key
    #[cfg_attr(
        feature = "config",
        arg(long = "api-key", env = "GEMINI_API_KEY", hide_env_values = true, default_value = "")
    )]
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Model used for image analysis
    #[cfg_attr(
        feature = "config",
        arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)
    )]
    #[serde(default = "default_model")]
    pub model: String,

    /// API root the model path is appended to
    #[cfg_attr(
        feature = "config",
        arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds (no timeout when unset)
    #[cfg_attr(feature = "config", arg(long = "http-timeout", env = "HTTP_TIMEOUT"))]
    #[serde(default)]
    pub http_timeout: Option<u64>,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            http_timeout: None,
            user_agent: None,
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GeminiConfig {
    /// Create a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = Some(timeout_secs);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.http_timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(Self::default_user_agent)
    }

    fn default_user_agent() -> String {
        format!("nvisy-gemini/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Returns whether an API key is present.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Returns the `generateContent` URL for the configured model, without the key.
    pub fn endpoint(&self) -> Result<Url> {
        let base_url = self.base_url.trim_end_matches('/');
        let url = format!("{base_url}/models/{}:generateContent", self.model);
        Ok(Url::parse(&url)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.has_api_key() {
            return Err(Error::configuration()
                .with_message("API key is missing; set GEMINI_API_KEY or pass --api-key"));
        }

        if self.model.trim().is_empty() {
            return Err(Error::configuration().with_message("Model cannot be empty"));
        }

        self.endpoint()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout().is_none());
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_endpoint() {
        let config = GeminiConfig::new("key").with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash-image-preview:generateContent"
        );
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeminiConfig::new("key")
            .with_model("gemini-2.5-flash")
            .with_timeout(45)
            .with_user_agent("custom-agent/1.0");

        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout(), Some(Duration::from_secs(45)));
        assert_eq!(config.effective_user_agent(), "custom-agent/1.0");
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config = GeminiConfig::new("key").with_timeout(0);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_validate() {
        assert!(GeminiConfig::new("key").validate().is_ok());

        let error = GeminiConfig::new("  ").validate().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Configuration);

        let error = GeminiConfig::new("key")
            .with_base_url("not a url")
            .validate()
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_api_key_is_hidden() {
        let config = GeminiConfig::new("super-secret");

        assert!(!format!("{config:?}").contains("super-secret"));
        assert!(!serde_json::to_string(&config).unwrap().contains("super-secret"));
    }
}
