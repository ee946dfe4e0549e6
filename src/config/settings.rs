//! Process settings, read from the environment (and `.env`)

use super::{ConfigError, SecretSource, SECRET_MANAGER_ENDPOINT};
use crate::increase::IncreaseEnvironment;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SecretSourceKind {
    #[default]
    Gcp,
    Env,
    File,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_address: String,
    pub port: u16,
    pub increase_base_url: String,
    pub secret_source: SecretSource,
    pub http_timeout: Duration,
    pub log_level: Level,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = parse_or(&lookup, "PORT", 8080)?;

        let increase_base_url = match lookup("INCREASE_BASE_URL") {
            Some(url) => url,
            None => parse_or(&lookup, "INCREASE_ENVIRONMENT", IncreaseEnvironment::default())?
                .base_url()
                .to_string(),
        };

        let source_kind = parse_or(&lookup, "ROUND_UP_CONFIG_SOURCE", SecretSourceKind::default())?;
        let secret_source = match source_kind {
            SecretSourceKind::Gcp => SecretSource::GoogleSecretManager {
                endpoint: lookup("SECRET_MANAGER_ENDPOINT")
                    .unwrap_or_else(|| SECRET_MANAGER_ENDPOINT.to_string()),
                resource: lookup("ROUND_UP_SECRET_NAME")
                    .ok_or(ConfigError::MissingEnv("ROUND_UP_SECRET_NAME"))?,
                access_token: lookup("GOOGLE_ACCESS_TOKEN"),
            },
            SecretSourceKind::Env => SecretSource::Env {
                var: "ROUND_UP_CONFIG".to_string(),
            },
            SecretSourceKind::File => SecretSource::File {
                path: lookup("ROUND_UP_CONFIG_FILE")
                    .map(PathBuf::from)
                    .ok_or(ConfigError::MissingEnv("ROUND_UP_CONFIG_FILE"))?,
            },
        };

        let http_timeout = Duration::from_secs(parse_or(&lookup, "HTTP_TIMEOUT_SECS", 10)?);

        let log_level = parse_or(&lookup, "LOG_LEVEL", Level::INFO)?;

        Ok(Self {
            bind_address,
            port,
            increase_base_url,
            secret_source,
            http_timeout,
            log_level,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue(key)),
        None => Ok(default),
    }
}
