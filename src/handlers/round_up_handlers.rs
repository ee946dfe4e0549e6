use crate::app_state::AppState;
use crate::error::RoundUpResult;
use crate::increase::{WebhookEvent, SIGNATURE_HEADER};
use crate::round_up;
use crate::signature;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

/**
Webhook endpoint: `200` once the delivery is handled (including every no-op), `401` on a bad
signature, `500` on any failure while processing, including a body that cannot be read.

The body is taken as raw bytes because the signature covers them exactly.
*/
pub async fn round_up_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> RoundUpResult<StatusCode> {
    let body = body?;

    if !app_state.config.is_loaded() {
        debug!("Configuration not loaded yet, fetching it.");
    }
    let config = app_state.config.get().await?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    if !signature::verify(&body, signature, &config.webhook_shared_secret) {
        warn!("Rejected webhook with invalid signature.");
        return Ok(StatusCode::UNAUTHORIZED);
    }

    let event = WebhookEvent::from(serde_json::from_slice::<Value>(&body)?);
    let outcome = round_up::process(&app_state.increase_api, config, &event).await?;
    debug!("Webhook handled: {:?}", outcome);

    Ok(StatusCode::OK)
}
