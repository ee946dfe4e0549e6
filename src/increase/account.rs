/*!
Structs related to Increase accounts APIs' responses.
*/

use serde::{Deserialize, Serialize};

/**
Structure representing an Increase Account.

See https://increase.com/documentation/api#accounts

Only the fields the round-up needs are kept, everything else in the response is ignored.
*/
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// ID of the account, like `account_in71c4amph0vgo2qllky`.
    #[serde(default)]
    pub id: String,
    /// Current balance of the account, in the minor unit of its currency (cents for USD).
    pub balance: i64,
    /// ISO 4217 code of the account currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// The name you choose for the account.
    #[serde(default)]
    pub name: Option<String>,
}
