//! Configuration management for tickerchat.
//!
//! Configuration can be set via environment variables:
//! - `GEMINI_API_KEY` - Required. Your Gemini API key.
//! - `GEMINI_BASE_URL` - Optional. OpenAI-compatible base URL for the model
//!   endpoint. Defaults to `https://generativelanguage.googleapis.com/v1beta/openai/`.
//! - `MODEL` - Optional. The model identifier to use. Defaults to `gemini-2.0-flash`.
//! - `TICKER_BASE_URL` - Optional. Base URL of the ticker-price API. Defaults
//!   to `https://api.binance.com`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations. Defaults to `10`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
///
/// Built once at process start and shared read-only across all chat
/// invocations; there is no runtime reconfiguration path.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key
    pub gemini_api_key: String,

    /// OpenAI-compatible base URL of the model endpoint
    pub gemini_base_url: String,

    /// Model identifier
    pub model: String,

    /// Base URL of the ticker-price API
    pub ticker_base_url: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let gemini_base_url = std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| {
            "https://generativelanguage.googleapis.com/v1beta/openai/".to_string()
        });

        let model = std::env::var("MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let ticker_base_url = std::env::var("TICKER_BASE_URL")
            .unwrap_or_else(|_| "https://api.binance.com".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            gemini_api_key,
            gemini_base_url,
            model,
            ticker_base_url,
            host,
            port,
            max_iterations,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(gemini_api_key: String, gemini_base_url: String, model: String) -> Self {
        Self {
            gemini_api_key,
            gemini_base_url,
            model,
            ticker_base_url: "https://api.binance.com".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_iterations: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-wide, so missing-key and present-key
    // cases run inside a single test.
    #[test]
    fn from_env_requires_api_key() {
        std::env::remove_var("GEMINI_API_KEY");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "GEMINI_API_KEY"));

        std::env::set_var("GEMINI_API_KEY", "test-key");
        let config = Config::from_env().unwrap();
        assert_eq!(config.gemini_api_key, "test-key");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(
            config.gemini_base_url,
            "https://generativelanguage.googleapis.com/v1beta/openai/"
        );
        assert_eq!(config.ticker_base_url, "https://api.binance.com");
        assert_eq!(config.max_iterations, 10);
        std::env::remove_var("GEMINI_API_KEY");
    }
}
