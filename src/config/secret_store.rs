//! Where the configuration blob is read from

use super::{Config, ConfigError};
use base64::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error};

pub const SECRET_MANAGER_ENDPOINT: &str = "https://secretmanager.googleapis.com";

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

#[derive(Debug, Clone, PartialEq)]
pub enum SecretSource {
    /// A Secret Manager version, like `projects/1234/secrets/increase-round-up/versions/1`.
    ///
    /// Without an `access_token`, one is requested from the GCE metadata server.
    GoogleSecretManager {
        endpoint: String,
        resource: String,
        access_token: Option<String>,
    },
    /// JSON held directly in an environment variable.
    Env { var: String },
    /// JSON read from a file.
    File { path: PathBuf },
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::GoogleSecretManager { resource, .. } => {
                write!(f, "Secret Manager ({resource})")
            }
            SecretSource::Env { var } => write!(f, "environment variable {var}"),
            SecretSource::File { path } => write!(f, "file {}", path.display()),
        }
    }
}

impl SecretSource {
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<Config, ConfigError> {
        let payload = match self {
            SecretSource::GoogleSecretManager {
                endpoint,
                resource,
                access_token,
            } => access_secret_version(client, endpoint, resource, access_token.as_deref()).await?,
            SecretSource::Env { var } => dotenv::var(var).map_err(|e| {
                ConfigError::SecretsUnavailable(format!("cannot read {var}: {e}"))
            })?,
            SecretSource::File { path } => tokio::fs::read_to_string(path).await.map_err(|e| {
                ConfigError::SecretsUnavailable(format!("cannot read {}: {e}", path.display()))
            })?,
        };

        Config::from_json(&payload)
    }
}

/// Response of `GET /v1/{name}:access`.
#[derive(Debug, Deserialize)]
struct AccessSecretVersionResponse {
    payload: SecretPayload,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    /// Base64 of the secret bytes.
    data: String,
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

fn unavailable(e: impl fmt::Display) -> ConfigError {
    ConfigError::SecretsUnavailable(e.to_string())
}

async fn access_secret_version(
    client: &reqwest::Client,
    endpoint: &str,
    resource: &str,
    access_token: Option<&str>,
) -> Result<String, ConfigError> {
    let token = match access_token {
        Some(token) => token.to_string(),
        None => metadata_access_token(client).await?,
    };

    let url = format!("{}/v1/{}:access", endpoint.trim_end_matches('/'), resource);
    debug!("Accessing secret version: {}", resource);

    let response = client
        .get(&url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(unavailable)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("Secret Manager call failed with status: {} {}", status, body);
        return Err(ConfigError::SecretsUnavailable(format!(
            "{resource} returned {status}"
        )));
    }

    let access: AccessSecretVersionResponse = response.json().await.map_err(unavailable)?;
    let bytes = BASE64_STANDARD
        .decode(access.payload.data)
        .map_err(unavailable)?;

    String::from_utf8(bytes).map_err(unavailable)
}

async fn metadata_access_token(client: &reqwest::Client) -> Result<String, ConfigError> {
    let response = client
        .get(METADATA_TOKEN_URL)
        .header("Metadata-Flavor", "Google")
        .send()
        .await
        .map_err(unavailable)?
        .error_for_status()
        .map_err(unavailable)?;

    let token: MetadataToken = response.json().await.map_err(unavailable)?;
    Ok(token.access_token)
}
