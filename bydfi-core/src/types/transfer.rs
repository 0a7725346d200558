//! Internal transfer record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Transfer outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Exchange reported success
    Success,
    /// Exchange reported failure
    Error,
}

/// Movement of funds between two wallets of the same account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Transfer id
    pub id: Option<String>,
    /// Transfer time
    pub timestamp: Option<Timestamp>,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// Currency code
    pub currency: Option<String>,
    /// Amount moved
    pub amount: Option<Decimal>,
    /// Source wallet
    pub from_account: Option<String>,
    /// Destination wallet
    pub to_account: Option<String>,
    /// Outcome
    pub status: Option<TransferStatus>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}
