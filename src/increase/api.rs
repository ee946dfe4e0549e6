//! Struct and methods to call Increase's APIs

use super::{Account, AccountTransferRequest};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

pub const PRODUCTION_BASE_URL: &str = "https://api.increase.com";
pub const SANDBOX_BASE_URL: &str = "https://sandbox.increase.com";

/// Which Increase deployment to talk to.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IncreaseEnvironment {
    #[default]
    Production,
    Sandbox,
}

impl IncreaseEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            IncreaseEnvironment::Production => PRODUCTION_BASE_URL,
            IncreaseEnvironment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IncreaseError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode response of {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct IncreaseApi {
    client: reqwest::Client,
    base_url: String,
}

impl IncreaseApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, IncreaseError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IncreaseError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T>(&self, token: &str, path: &str) -> Result<T, IncreaseError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let api = format!("{}{}", self.base_url, path);

        debug!("Calling Increase API: GET {}", api);

        let response = self
            .client
            .get(&api)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| IncreaseError::Transport {
                url: api.clone(),
                source,
            })?;
        let text = Self::successful_text(&api, response).await?;

        serde_json::from_str::<T>(&text).map_err(|source| {
            error!("Failed to decode Increase API response: {:?}", &text);
            IncreaseError::Decode { url: api, source }
        })
    }

    async fn post<B>(&self, token: &str, path: &str, body: &B) -> Result<(), IncreaseError>
    where
        B: Serialize,
    {
        let api = format!("{}{}", self.base_url, path);

        debug!("Calling Increase API: POST {}", api);

        let response = self
            .client
            .post(&api)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|source| IncreaseError::Transport {
                url: api.clone(),
                source,
            })?;
        Self::successful_text(&api, response).await?;

        Ok(())
    }

    /// Reads the whole body, failing on any non-2xx status.
    async fn successful_text(api: &str, response: Response) -> Result<String, IncreaseError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| IncreaseError::Transport {
                url: api.to_string(),
                source,
            })?;

        if status.is_success() {
            Ok(text)
        } else {
            error!("Increase API call failed with status: {} {}", status, text);
            Err(IncreaseError::Status {
                url: api.to_string(),
                status,
                body: text,
            })
        }
    }

    pub async fn get_account(
        &self,
        token: &str,
        account_id: &str,
    ) -> Result<Account, IncreaseError> {
        self.get::<Account>(token, &format!("/accounts/{account_id}"))
            .await
    }

    pub async fn create_account_transfer(
        &self,
        token: &str,
        account_id: &str,
        request: &AccountTransferRequest,
    ) -> Result<(), IncreaseError> {
        self.post(token, &format!("/accounts/{account_id}/transfers/accounts"), request)
            .await
    }
}
