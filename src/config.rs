//! Configuration for the `AeroCast` service
//!
//! The only secret is the generative-provider API key, read from the
//! environment at process start. Everything else has a sensible default and
//! an optional environment override.

use crate::AeroCastError;
use anyhow::{Context, Result};
use std::env;

const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
const DEFAULT_PORT: u16 = 8080;

/// Root configuration for the `AeroCast` service
#[derive(Debug, Clone)]
pub struct AeroCastConfig {
    /// Generative-provider API key (the single required secret)
    pub api_key: String,
    /// Provider model identifier
    pub model: String,
    /// HTTP listen port
    pub port: u16,
}

impl AeroCastConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("AEROCAST_API_KEY").context("Missing AEROCAST_API_KEY env var")?;

        let model = env::var("AEROCAST_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let port = match env::var("AEROCAST_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid AEROCAST_PORT value '{raw}'"))?,
            Err(_) => DEFAULT_PORT,
        };

        let config = Self {
            api_key,
            model,
            port,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(AeroCastError::config(
                "Provider API key cannot be empty. Set AEROCAST_API_KEY to a valid key.",
            )
            .into());
        }

        if self.model.trim().is_empty() {
            return Err(AeroCastError::config(
                "Provider model cannot be empty. Unset AEROCAST_MODEL to use the default.",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AeroCastConfig {
        AeroCastConfig {
            api_key: "test_api_key_123".to_string(),
            model: DEFAULT_MODEL.to_string(),
            port: DEFAULT_PORT,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut config = test_config();
        config.api_key = "   ".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("API key cannot be empty")
        );
    }

    #[test]
    fn test_empty_model_rejected() {
        let mut config = test_config();
        config.model = String::new();
        assert!(config.validate().is_err());
    }
}
