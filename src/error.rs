//! Errors raised while handling a webhook delivery, and how they map to HTTP.

use crate::config::ConfigError;
use crate::increase::IncreaseError;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

pub type RoundUpResult<T> = Result<T, RoundUpError>;

#[derive(Debug, thiserror::Error)]
pub enum RoundUpError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Increase API error: {0}")]
    Increase(#[from] IncreaseError),

    #[error("Cannot read webhook body: {0}")]
    UnreadableBody(#[from] BytesRejection),

    #[error("Invalid webhook body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(&'static str),
}

/// Every processing failure is a bare 500. The webhook sender owns redelivery.
impl IntoResponse for RoundUpError {
    fn into_response(self) -> Response {
        error!("Error handling webhook: {}", self);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
