mod secret_store;
mod settings;

pub use self::secret_store::*;
pub use self::settings::*;

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// Secret blob shared by all requests, fetched once from the secret store.
#[derive(Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(rename = "webhookSharedSecret")]
    pub webhook_shared_secret: String,
    #[serde(rename = "apiToken")]
    pub api_token: String,
    /// Accounts watched for new transactions. `None` or empty watches every account.
    #[serde(rename = "sourceAccountIDs", default)]
    pub source_account_ids: Option<Vec<String>>,
    #[serde(rename = "savingsAccountID")]
    pub savings_account_id: String,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn monitors(&self, account_id: &str) -> bool {
        match &self.source_account_ids {
            Some(ids) if !ids.is_empty() => ids.iter().any(|id| id == account_id),
            _ => true,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("webhook_shared_secret", &"<redacted>")
            .field("api_token", &"<redacted>")
            .field("source_account_ids", &self.source_account_ids)
            .field("savings_account_id", &self.savings_account_id)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),

    #[error("Secrets unavailable: {0}")]
    SecretsUnavailable(String),

    #[error("Malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

/**
Lazily loads the [`Config`] from its [`SecretSource`] and keeps it for the process lifetime.

Concurrent first calls wait on the same fetch. A failed fetch leaves the cell empty so the next
call tries again.
*/
#[derive(Clone)]
pub struct ConfigLoader {
    source: Option<Arc<SecretSource>>,
    client: reqwest::Client,
    cell: Arc<OnceCell<Config>>,
}

impl ConfigLoader {
    pub fn new(source: SecretSource, client: reqwest::Client) -> Self {
        Self {
            source: Some(Arc::new(source)),
            client,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// A loader that already holds its configuration and never hits a secret store.
    pub fn preloaded(config: Config) -> Self {
        Self {
            source: None,
            client: reqwest::Client::new(),
            cell: Arc::new(OnceCell::new_with(Some(config))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> Result<&Config, ConfigError> {
        self.cell
            .get_or_try_init(|| async {
                let source = self.source.as_deref().ok_or_else(|| {
                    ConfigError::SecretsUnavailable("no secret source configured".to_string())
                })?;
                let config = source.fetch(&self.client).await?;
                info!("Configuration loaded from {}.", source);
                Ok::<_, ConfigError>(config)
            })
            .await
    }
}
