//! Deposit and withdrawal records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Incoming funds
    Deposit,
    /// Outgoing funds
    Withdrawal,
}

/// On-chain deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Record id
    pub id: Option<String>,
    /// Chain transaction hash
    pub txid: Option<String>,
    /// Direction
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Currency code
    pub currency: Option<String>,
    /// Amount
    pub amount: Option<Decimal>,
    /// Network name
    pub network: Option<String>,
    /// Destination or source address
    pub address: Option<String>,
    /// Native status, lower-cased
    pub status: Option<String>,
    /// Creation time
    pub timestamp: Option<Timestamp>,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// Fee charged
    pub fee: Option<Decimal>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}
