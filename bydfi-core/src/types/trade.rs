//! Public and private trade records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderSide, Symbol, Timestamp};

/// A single execution.
///
/// `cost` and `fee` cannot be derived from the exchange payload and are
/// always `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Trade id
    pub id: Option<String>,
    /// Linked order id
    pub order: Option<String>,
    /// Execution time
    pub timestamp: Option<Timestamp>,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// Canonical symbol
    pub symbol: Option<Symbol>,
    /// Taker side
    pub side: Option<OrderSide>,
    /// Execution price
    pub price: Option<Decimal>,
    /// Executed amount
    pub amount: Option<Decimal>,
    /// Always `None`
    pub cost: Option<Decimal>,
    /// Always `None`
    pub fee: Option<Decimal>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}
