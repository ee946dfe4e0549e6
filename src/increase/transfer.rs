/*!
Structs related to Increase account transfers.
*/

use serde::{Deserialize, Serialize};

/**
Body of `POST /accounts/{account_id}/transfers/accounts`.

Moves `amount` minor units from the account in the path to `destination_account_id`.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransferRequest {
    /// Amount in minor units, always positive.
    pub amount: i64,
    /// Shown on both sides of the transfer.
    pub description: String,
    /// Account receiving the funds.
    pub destination_account_id: String,
}
