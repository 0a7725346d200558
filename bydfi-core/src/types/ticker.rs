//! Ticker and last-price records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Symbol, Timestamp};

/// 24h statistics snapshot.
///
/// `timestamp` is the time the payload was normalized; the exchange does not
/// stamp its tickers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    /// Canonical symbol
    pub symbol: Symbol,
    /// Normalization time
    pub timestamp: Timestamp,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// 24h high
    pub high: Option<Decimal>,
    /// 24h low
    pub low: Option<Decimal>,
    /// Best bid
    pub bid: Option<Decimal>,
    /// Best ask
    pub ask: Option<Decimal>,
    /// Open price of the window
    pub open: Option<Decimal>,
    /// Close price of the window
    pub close: Option<Decimal>,
    /// Last traded price
    pub last: Option<Decimal>,
    /// 24h volume in base currency
    pub base_volume: Option<Decimal>,
    /// 24h volume in quote currency
    pub quote_volume: Option<Decimal>,
    /// Mark price
    pub mark_price: Option<Decimal>,
    /// Index price
    pub index_price: Option<Decimal>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}

/// Latest traded price of one market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPrice {
    /// Canonical symbol
    pub symbol: Symbol,
    /// Normalization time
    pub timestamp: Timestamp,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// Price; a reported zero is treated as absent
    pub price: Option<Decimal>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}
