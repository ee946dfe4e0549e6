#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use increase_round_up::app_state::AppState;
use increase_round_up::config::{Config, ConfigLoader};
use increase_round_up::handlers::router;
use increase_round_up::increase::{IncreaseApi, SIGNATURE_HEADER};
use increase_round_up::signature::sign;
use serde_json::Value;
use std::time::Duration;

pub const SECRET: &str = "whsec_test";
pub const API_TOKEN: &str = "test_api_token";
pub const SOURCE_ACCOUNT: &str = "account_source";
pub const SAVINGS_ACCOUNT: &str = "account_sav";

pub fn test_config() -> Config {
    Config {
        webhook_shared_secret: SECRET.to_string(),
        api_token: API_TOKEN.to_string(),
        source_account_ids: Some(vec![SOURCE_ACCOUNT.to_string()]),
        savings_account_id: SAVINGS_ACCOUNT.to_string(),
    }
}

pub fn app(base_url: &str) -> Router {
    app_with_config(base_url, test_config())
}

pub fn app_with_config(base_url: &str, config: Config) -> Router {
    router(AppState {
        config: ConfigLoader::preloaded(config),
        increase_api: IncreaseApi::new(base_url, Duration::from_secs(5)).unwrap(),
    })
}

pub fn signed_request(body: &Value) -> Request<Body> {
    let raw = serde_json::to_vec(body).unwrap();
    let signature = sign(&raw, SECRET).unwrap();
    request_with_signature(raw, Some(&signature))
}

pub fn request_with_signature(raw: Vec<u8>, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header(SIGNATURE_HEADER, signature);
    }
    builder.body(Body::from(raw)).unwrap()
}

/// Webhook responses carry only a status.
pub async fn assert_empty_body(response: Response<Body>) {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty(), "unexpected body {:?}", body);
}
