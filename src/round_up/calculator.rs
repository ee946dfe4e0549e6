use crate::increase::{IncreaseApi, IncreaseError};
use tracing::debug;

/// Minor units in one whole currency unit.
pub const MINOR_UNITS_PER_UNIT: i64 = 100;

/// The part of `balance` above the last whole currency unit, in `[0, 99]`.
///
/// A balance that is zero or overdrawn has nothing to sweep.
pub fn round_up_amount(balance: i64) -> i64 {
    if balance <= 0 {
        return 0;
    }
    balance % MINOR_UNITS_PER_UNIT
}

/// Fetches the current balance of `account_id` and returns its round-up amount.
pub async fn compute_round_up(
    api: &IncreaseApi,
    token: &str,
    account_id: &str,
) -> Result<i64, IncreaseError> {
    let account = api.get_account(token, account_id).await?;
    let amount = round_up_amount(account.balance);
    debug!(
        "Balance of {} is {}, round-up is {}",
        account_id, account.balance, amount
    );
    Ok(amount)
}
