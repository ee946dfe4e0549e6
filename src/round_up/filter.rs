use crate::config::Config;
use crate::error::{RoundUpError, RoundUpResult};
use crate::increase::WebhookEvent;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static TRANSACTION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(pending_)?transaction").unwrap());

/// The transaction a round-up is computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleTransaction {
    pub id: String,
    pub account_id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligible {
    NotCreated(Option<String>),
    NotATransaction(String),
    UnmonitoredAccount(Option<String>),
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligible::NotCreated(Some(event)) => write!(f, "event {event} is not a creation"),
            Ineligible::NotCreated(None) => write!(f, "no event"),
            Ineligible::NotATransaction(id) => write!(f, "{id} is not a transaction"),
            Ineligible::UnmonitoredAccount(Some(account_id)) => {
                write!(f, "{account_id} not in source accounts")
            }
            Ineligible::UnmonitoredAccount(None) => write!(f, "no account_id in source accounts"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible(EligibleTransaction),
    Ineligible(Ineligible),
}

/**
Decides whether a webhook event is a newly created transaction on a monitored account.

Checks, in order: the event is `created`; `data.id` starts with `transaction` or
`pending_transaction`; the account is among the configured source accounts, if any.
A `created` event without `data.id`, or whose `data` fields are not strings, is malformed
rather than ineligible.
*/
pub fn is_eligible(event: &WebhookEvent, config: &Config) -> RoundUpResult<Eligibility> {
    if !event.is_created() {
        return Ok(Eligibility::Ineligible(Ineligible::NotCreated(event.event_name())));
    }

    let data = event
        .transaction_data()
        .map_err(|_| RoundUpError::MalformedPayload("created event data is not a transaction"))?
        .ok_or(RoundUpError::MalformedPayload("created event has no data"))?;
    let id = data
        .id
        .as_deref()
        .ok_or(RoundUpError::MalformedPayload("created event has no data.id"))?;

    if !TRANSACTION_ID.is_match(id) {
        return Ok(Eligibility::Ineligible(Ineligible::NotATransaction(id.to_string())));
    }

    let account_id = match data.account_id.as_deref() {
        Some(account_id) if config.monitors(account_id) => account_id,
        Some(account_id) => {
            return Ok(Eligibility::Ineligible(Ineligible::UnmonitoredAccount(
                Some(account_id.to_string()),
            )));
        }
        None if has_source_accounts(config) => {
            return Ok(Eligibility::Ineligible(Ineligible::UnmonitoredAccount(None)));
        }
        None => return Err(RoundUpError::MalformedPayload("transaction has no account_id")),
    };

    Ok(Eligibility::Eligible(EligibleTransaction {
        id: id.to_string(),
        account_id: account_id.to_string(),
        description: data.description.unwrap_or_default(),
    }))
}

fn has_source_accounts(config: &Config) -> bool {
    config
        .source_account_ids
        .as_ref()
        .is_some_and(|ids| !ids.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn config(source_account_ids: Option<Vec<&str>>) -> Config {
        Config {
            webhook_shared_secret: String::new(),
            api_token: String::new(),
            source_account_ids: source_account_ids
                .map(|ids| ids.into_iter().map(str::to_string).collect()),
            savings_account_id: "account_savings".to_string(),
        }
    }

    fn created(id: &str, account_id: Option<&str>) -> WebhookEvent {
        let mut data = json!({ "id": id, "description": "Coffee" });
        if let Some(account_id) = account_id {
            data["account_id"] = json!(account_id);
        }
        WebhookEvent::from(json!({ "event": "created", "data": data }))
    }

    #[test]
    fn created_transaction_on_source_account() {
        let eligibility = is_eligible(
            &created("transaction_123", Some("account_source")),
            &config(Some(vec!["account_source"])),
        )
        .unwrap();

        assert_eq!(
            eligibility,
            Eligibility::Eligible(EligibleTransaction {
                id: "transaction_123".to_string(),
                account_id: "account_source".to_string(),
                description: "Coffee".to_string(),
            })
        );
    }

    #[test]
    fn pending_transaction_is_eligible() {
        let eligibility = is_eligible(
            &created("pending_transaction_456", Some("account_source")),
            &config(None),
        )
        .unwrap();

        assert!(matches!(eligibility, Eligibility::Eligible(_)));
    }

    #[test]
    fn other_events_are_ignored() {
        let mut event = created("transaction_123", Some("account_source"));
        event.event = Some(json!("updated"));

        assert_eq!(
            is_eligible(&event, &config(None)).unwrap(),
            Eligibility::Ineligible(Ineligible::NotCreated(Some("updated".to_string())))
        );

        let missing = WebhookEvent::default();
        assert_eq!(
            is_eligible(&missing, &config(None)).unwrap(),
            Eligibility::Ineligible(Ineligible::NotCreated(None))
        );
    }

    #[test]
    fn prefix_is_anchored() {
        for id in [
            "declined_transaction",
            "pending_declined_transaction",
            "account_transaction",
            "ach_transfer_1",
        ] {
            assert_eq!(
                is_eligible(&created(id, Some("account_source")), &config(None)).unwrap(),
                Eligibility::Ineligible(Ineligible::NotATransaction(id.to_string())),
                "{id}"
            );
        }
    }

    #[test]
    fn unmonitored_account_is_ignored() {
        assert_eq!(
            is_eligible(
                &created("transaction_123", Some("account_not_source")),
                &config(Some(vec!["account_source"]))
            )
            .unwrap(),
            Eligibility::Ineligible(Ineligible::UnmonitoredAccount(Some(
                "account_not_source".to_string()
            )))
        );
    }

    #[test]
    fn empty_source_list_monitors_everything() {
        let eligibility = is_eligible(
            &created("transaction_123", Some("account_any")),
            &config(Some(vec![])),
        )
        .unwrap();

        assert!(matches!(eligibility, Eligibility::Eligible(_)));
    }

    #[test]
    fn missing_account_id() {
        assert_eq!(
            is_eligible(
                &created("transaction_123", None),
                &config(Some(vec!["account_source"]))
            )
            .unwrap(),
            Eligibility::Ineligible(Ineligible::UnmonitoredAccount(None))
        );
        assert!(matches!(
            is_eligible(&created("transaction_123", None), &config(None)),
            Err(RoundUpError::MalformedPayload(_))
        ));
    }

    #[test]
    fn created_without_id_is_malformed() {
        let event = WebhookEvent::from(json!({ "event": "created" }));
        assert!(matches!(
            is_eligible(&event, &config(None)),
            Err(RoundUpError::MalformedPayload(_))
        ));

        let event = WebhookEvent::from(json!({ "event": "created", "data": {} }));
        assert!(matches!(
            is_eligible(&event, &config(None)),
            Err(RoundUpError::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let mut event = created("transaction_123", Some("account_source"));
        if let Some(Value::Object(data)) = event.data.as_mut() {
            data.remove("description");
        }

        match is_eligible(&event, &config(None)).unwrap() {
            Eligibility::Eligible(transaction) => assert_eq!(transaction.description, ""),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn non_created_events_of_any_shape_are_ignored() {
        let numeric_event = WebhookEvent::from(json!({ "event": 5 }));
        assert_eq!(
            is_eligible(&numeric_event, &config(None)).unwrap(),
            Eligibility::Ineligible(Ineligible::NotCreated(Some("5".to_string())))
        );

        let numeric_id = WebhookEvent::from(json!({ "event": "updated", "data": { "id": 42 } }));
        assert_eq!(
            is_eligible(&numeric_id, &config(None)).unwrap(),
            Eligibility::Ineligible(Ineligible::NotCreated(Some("updated".to_string())))
        );
    }

    #[test]
    fn created_with_non_string_fields_is_malformed() {
        for data in [
            json!({ "id": 42 }),
            json!({ "id": "transaction_1", "account_id": 7 }),
            json!("transaction_1"),
        ] {
            let event = WebhookEvent::from(json!({ "event": "created", "data": data }));
            assert!(
                matches!(
                    is_eligible(&event, &config(None)),
                    Err(RoundUpError::MalformedPayload(_))
                ),
                "{data}"
            );
        }
    }
}
