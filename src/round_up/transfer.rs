use crate::increase::{AccountTransferRequest, IncreaseApi, IncreaseError};

pub fn transfer_description(transaction_description: &str) -> String {
    format!("Round-Up for {transaction_description}")
}

/// Moves `amount` from `source_account_id` to `destination_account_id`. Sent once, never retried.
pub async fn issue_transfer(
    api: &IncreaseApi,
    token: &str,
    source_account_id: &str,
    amount: i64,
    transaction_description: &str,
    destination_account_id: &str,
) -> Result<(), IncreaseError> {
    let request = AccountTransferRequest {
        amount,
        description: transfer_description(transaction_description),
        destination_account_id: destination_account_id.to_string(),
    };
    api.create_account_transfer(token, source_account_id, &request)
        .await
}
