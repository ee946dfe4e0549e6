//! What `process` reports for each kind of delivery.

use increase_round_up::increase::{IncreaseApi, WebhookEvent};
use increase_round_up::round_up::{process, Ineligible, Outcome};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::*;

fn api(server: &MockServer) -> IncreaseApi {
    IncreaseApi::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn created(id: &str, account_id: &str) -> WebhookEvent {
    WebhookEvent::from(json!({
        "event": "created",
        "data": { "id": id, "account_id": account_id, "description": "Coffee" }
    }))
}

async fn mock_balance(server: &MockServer, balance: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{SOURCE_ACCOUNT}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": SOURCE_ACCOUNT,
            "balance": balance
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn transferred() {
    let server = MockServer::start().await;
    mock_balance(&server, 345).await;
    Mock::given(method("POST"))
        .and(path(format!("/accounts/{SOURCE_ACCOUNT}/transfers/accounts")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "t" })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = process(&api(&server), &test_config(), &created("transaction_1", SOURCE_ACCOUNT))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Transferred {
            account_id: SOURCE_ACCOUNT.to_string(),
            amount: 45
        }
    );
}

#[tokio::test]
async fn nothing_to_round_up() {
    let server = MockServer::start().await;
    mock_balance(&server, 300).await;

    let outcome = process(&api(&server), &test_config(), &created("transaction_1", SOURCE_ACCOUNT))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::NothingToRoundUp {
            account_id: SOURCE_ACCOUNT.to_string()
        }
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn ignored_events_make_no_calls() {
    let server = MockServer::start().await;
    let api = api(&server);
    let config = test_config();

    let outcome = process(&api, &config, &WebhookEvent::from(json!({ "event": "updated" })))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Ignored(Ineligible::NotCreated(Some("updated".to_string())))
    );

    let outcome = process(&api, &config, &created("transaction_1", "account_other"))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Ignored(Ineligible::UnmonitoredAccount(Some(
            "account_other".to_string()
        )))
    );

    let outcome = process(&api, &config, &created("declined_transaction_1", SOURCE_ACCOUNT))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Ignored(Ineligible::NotATransaction(
            "declined_transaction_1".to_string()
        ))
    );

    assert!(server.received_requests().await.unwrap().is_empty());
}
