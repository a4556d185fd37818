//! Process configuration from environment variables

use crate::brand::{Brand, SecretSource};
use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not found in the environment. Add it to the host's secret settings.")]
    MissingApiKey,
    #[error("OPENAI_API_KEY not found. Put it in a .env file next to the binary or export it.")]
    MissingApiKeyDotEnv,
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub brand: Brand,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub port: u16,
    pub request_timeout: Duration,
    /// Idle time after which a session is ended
    pub session_ttl: Duration,
}

impl Config {
    /// Read configuration from the process environment. The generic brand
    /// loads `.env` first.
    ///
    /// # Errors
    ///
    /// Fails when the API key is missing or a variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let brand = parse_brand(std::env::var("OFFICEWHIZ_BRAND").ok())?;
        if brand.secret_source() == SecretSource::DotEnv {
            match dotenv::dotenv() {
                Ok(path) => tracing::info!(path = %path.display(), "Loaded .env"),
                Err(e) => tracing::debug!(error = %e, "No .env loaded"),
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Fails when the API key is missing or a variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let brand = parse_brand(lookup("OFFICEWHIZ_BRAND"))?;

        let api_key = lookup("OPENAI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(match brand.secret_source() {
                SecretSource::Environment => ConfigError::MissingApiKey,
                SecretSource::DotEnv => ConfigError::MissingApiKeyDotEnv,
            })?;

        let port = match lookup("OFFICEWHIZ_PORT") {
            Some(value) => match value.trim().parse::<u16>() {
                Ok(port) => port,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "OFFICEWHIZ_PORT",
                        value,
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_PORT,
        };

        let request_timeout =
            positive_secs(&lookup, "OFFICEWHIZ_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let session_ttl =
            positive_secs(&lookup, "OFFICEWHIZ_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;

        Ok(Self {
            brand,
            api_key,
            model: lookup("OFFICEWHIZ_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("OPENAI_BASE_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port,
            request_timeout,
            session_ttl,
        })
    }
}

/// Whole seconds greater than zero, or `default` when unset
fn positive_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(Duration::from_secs(default));
    };
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            value,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

fn parse_brand(value: Option<String>) -> Result<Brand, ConfigError> {
    match value {
        Some(value) => value.parse().map_err(|e: crate::brand::UnknownBrand| {
            ConfigError::Invalid {
                var: "OFFICEWHIZ_BRAND",
                value,
                reason: e.to_string(),
            }
        }),
        None => Ok(Brand::default()),
    }
}
