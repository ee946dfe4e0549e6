mod calculator;
mod filter;
mod transfer;

pub use self::calculator::*;
pub use self::filter::*;
pub use self::transfer::*;

use crate::config::Config;
use crate::error::RoundUpResult;
use crate::increase::{IncreaseApi, WebhookEvent};
use tracing::info;

/// What happened to a verified delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored(Ineligible),
    /// Balance already a whole number of currency units.
    NothingToRoundUp { account_id: String },
    Transferred { account_id: String, amount: i64 },
}

/**
Runs the round-up rule for one verified webhook event.

At most two calls are made, one after the other: the balance lookup, then the transfer when the
remainder is positive.
*/
pub async fn process(
    api: &IncreaseApi,
    config: &Config,
    event: &WebhookEvent,
) -> RoundUpResult<Outcome> {
    let transaction = match is_eligible(event, config)? {
        Eligibility::Eligible(transaction) => transaction,
        Eligibility::Ineligible(reason) => {
            info!("Ignoring webhook: {}", reason);
            return Ok(Outcome::Ignored(reason));
        }
    };

    let amount = compute_round_up(api, &config.api_token, &transaction.account_id).await?;
    if amount == 0 {
        info!(
            "Nothing to round up on {} after {}.",
            transaction.account_id, transaction.id
        );
        return Ok(Outcome::NothingToRoundUp {
            account_id: transaction.account_id,
        });
    }

    issue_transfer(
        api,
        &config.api_token,
        &transaction.account_id,
        amount,
        &transaction.description,
        &config.savings_account_id,
    )
    .await?;
    info!(
        "Transferred {} from {} to {} for {}.",
        amount, transaction.account_id, config.savings_account_id, transaction.id
    );

    Ok(Outcome::Transferred {
        account_id: transaction.account_id,
        amount,
    })
}
