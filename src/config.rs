use std::env;
use std::fmt;

use tracing::warn;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Process-wide settings, resolved once at startup and then shared read-only.
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub api_base: String,
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &if self.is_configured() { "<set>" } else { "<empty>" })
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("api_base", &self.api_base)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GATEWAY_PORT must be a port number, got {value:?}")]
    InvalidPort { value: String },
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves settings through `lookup`, so tests can supply a map instead
    /// of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str, default: String| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
        };

        let port = match lookup("GATEWAY_PORT") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw.clone() })?,
            _ => defaults.port,
        };

        let config = Self {
            api_key: read("GEMINI_API_KEY", String::new()),
            text_model: read("GEMINI_MODEL", defaults.text_model),
            image_model: read("GEMINI_IMAGE_MODEL", defaults.image_model),
            api_base: read("GEMINI_API_BASE", defaults.api_base)
                .trim_end_matches('/')
                .to_string(),
            host: read("GATEWAY_HOST", defaults.host),
            port,
        };

        if !config.is_configured() {
            warn!("GEMINI_API_KEY is not configured. AI features will use fallback responses.");
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into().trim().to_string();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
