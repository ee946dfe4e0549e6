//! Structs related to Increase's webhook requests

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header carrying `sha256=<hex hmac of the raw body>`.
pub const SIGNATURE_HEADER: &str = "x-bank-webhook-signature";

/// The only event kind the round-up acts on.
pub const CREATED_EVENT: &str = "created";

/**
Body of a webhook delivery.

`event` is the lifecycle verb (`created`, `updated`, ...) and `data` the object it applies to.
Both stay untyped until the event is known to be a creation, so deliveries of any shape can be
ignored without failing.
*/
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub event: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// The object attached to a webhook event. For transactions, `id` starts with `transaction` or
/// `pending_transaction`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEventData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<Value> for WebhookEvent {
    /// Any JSON value is a delivery; a non-object simply has no `event`.
    fn from(body: Value) -> Self {
        Self {
            event: body.get("event").cloned(),
            data: body.get("data").cloned(),
        }
    }
}

impl WebhookEvent {
    pub fn is_created(&self) -> bool {
        self.event.as_ref().and_then(Value::as_str) == Some(CREATED_EVENT)
    }

    /// The event name for logs: bare if it is a string, its JSON otherwise.
    pub fn event_name(&self) -> Option<String> {
        self.event.as_ref().map(|event| match event {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        })
    }

    /// Reads `data` as a transaction. `null` counts as absent.
    pub fn transaction_data(&self) -> Result<Option<WebhookEventData>, serde_json::Error> {
        self.data
            .clone()
            .filter(|data| !data.is_null())
            .map(serde_json::from_value)
            .transpose()
    }
}
