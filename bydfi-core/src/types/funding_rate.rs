//! Funding rate snapshot and history entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Symbol, Timestamp};

/// Current funding rate of a perpetual market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRate {
    /// Canonical symbol
    pub symbol: Symbol,
    /// Snapshot time
    pub timestamp: Option<Timestamp>,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// Current rate
    pub funding_rate: Option<Decimal>,
    /// Next settlement time
    pub next_funding_timestamp: Option<Timestamp>,
    /// ISO 8601 of `next_funding_timestamp`
    pub next_funding_datetime: Option<String>,
    /// Settlement interval, e.g. `8h`
    pub interval: Option<String>,
    /// Mark price
    pub mark_price: Option<Decimal>,
    /// Index price
    pub index_price: Option<Decimal>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}

/// One settled funding event.
///
/// The exchange does not report a paid amount, so `amount` is zero and `id`
/// repeats the symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRateHistory {
    /// Entry id
    pub id: Option<String>,
    /// Canonical symbol
    pub symbol: Symbol,
    /// Settlement currency
    pub code: Option<String>,
    /// Settlement time
    pub timestamp: Option<Timestamp>,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// Settled rate
    pub funding_rate: Option<Decimal>,
    /// Paid amount
    pub amount: Decimal,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}
