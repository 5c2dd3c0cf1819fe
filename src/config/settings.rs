//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// OpenAI API configuration
    pub openai: OpenAIConfig,
    /// Cost estimation configuration
    pub pricing: PricingConfig,
    /// Usage ledger configuration
    pub ledger: LedgerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// OpenAI API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// API key; absence is reported per request, not at startup
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Model used when the caller does not name one
    pub default_model: String,
}

/// Cost estimation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Cost per estimated token, in USD
    pub cost_per_token: f64,
    /// Token surcharge applied in deep search mode
    pub deep_search_extra_tokens: u32,
    /// Token ceiling passed to the downstream API
    pub max_response_tokens: u32,
}

/// Usage ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Append-only charge log path
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_env_or_default("SERVER_PORT", "8082")
                    .parse()
                    .context("Invalid port number")?,
            },
            openai: OpenAIConfig {
                api_key: std::env::var("OPENAI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                base_url: get_env_or_default("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                timeout: get_env_or_default("REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid timeout value")?,
                default_model: get_env_or_default("OPENAI_DEFAULT_MODEL", "gpt-4"),
            },
            pricing: PricingConfig {
                cost_per_token: get_env_or_default("COST_PER_TOKEN", "0.00006")
                    .parse()
                    .context("Invalid cost per token")?,
                deep_search_extra_tokens: get_env_or_default("DEEP_SEARCH_EXTRA_TOKENS", "50")
                    .parse()
                    .context("Invalid deep search token surcharge")?,
                max_response_tokens: get_env_or_default("MAX_RESPONSE_TOKENS", "500")
                    .parse()
                    .context("Invalid maximum response tokens")?,
            },
            ledger: LedgerConfig {
                path: get_env_or_default("CHARGES_LOG_PATH", "/tmp/charges.log").into(),
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        // Validate API key format when one is supplied
        if let Some(api_key) = &self.openai.api_key {
            if api_key.contains(char::is_whitespace) {
                anyhow::bail!("OpenAI API key cannot contain whitespace characters");
            }
        }

        // Validate URL format
        if !self.openai.base_url.starts_with("http") {
            anyhow::bail!("Invalid OpenAI base URL format, should start with 'http'");
        }

        // Validate timeout value
        if self.openai.timeout == 0 {
            anyhow::bail!("Timeout value cannot be 0");
        }

        // Validate default model
        if self.openai.default_model.is_empty() {
            anyhow::bail!("Default model cannot be empty");
        }

        // Validate pricing values
        if !(self.pricing.cost_per_token > 0.0) {
            anyhow::bail!("Cost per token must be greater than 0");
        }

        if self.pricing.max_response_tokens == 0 {
            anyhow::bail!("Maximum response tokens cannot be 0");
        }

        // Validate ledger path
        if self.ledger.path.as_os_str().is_empty() {
            anyhow::bail!("Charges log path cannot be empty");
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
