//! Order book snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Symbol, Timestamp};

/// Price level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookEntry {
    /// Level price
    pub price: Decimal,
    /// Resting amount
    pub amount: Decimal,
}

/// Bids sorted descending, asks ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Canonical symbol
    pub symbol: Symbol,
    /// Snapshot time
    pub timestamp: Option<Timestamp>,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// Buy side
    pub bids: Vec<OrderBookEntry>,
    /// Sell side
    pub asks: Vec<OrderBookEntry>,
    /// Exchange sequence number
    pub nonce: Option<i64>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}

impl OrderBook {
    /// Best bid, if any.
    pub fn best_bid(&self) -> Option<&OrderBookEntry> {
        self.bids.first()
    }

    /// Best ask, if any.
    pub fn best_ask(&self) -> Option<&OrderBookEntry> {
        self.asks.first()
    }
}
