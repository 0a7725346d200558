//! Order types and the canonical order record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Symbol, Timestamp};
use crate::error::{Error, Result};

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy
    Buy,
    /// Sell
    Sell,
}

impl OrderSide {
    /// Native wire spelling (`BUY` / `SELL`).
    pub fn as_native(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        })
    }
}

impl FromStr for OrderSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(Error::bad_request(format!("invalid order side: {other}"))),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
    /// Stop-limit order
    Stop,
    /// Stop-market order
    StopMarket,
    /// Take-profit limit order
    TakeProfit,
    /// Take-profit market order
    TakeProfitMarket,
    /// Trailing stop market order
    TrailingStopMarket,
}

impl OrderType {
    /// Native wire spelling (`LIMIT`, `STOP_MARKET`, ...).
    pub fn as_native(self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::Stop => "STOP",
            Self::StopMarket => "STOP_MARKET",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::TakeProfitMarket => "TAKE_PROFIT_MARKET",
            Self::TrailingStopMarket => "TRAILING_STOP_MARKET",
        }
    }

    /// Order types that rest at a limit price.
    pub fn requires_price(self) -> bool {
        matches!(self, Self::Limit | Self::Stop | Self::TakeProfit)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Limit => "limit",
            Self::Market => "market",
            Self::Stop => "stop",
            Self::StopMarket => "stop_market",
            Self::TakeProfit => "take_profit",
            Self::TakeProfitMarket => "take_profit_market",
            Self::TrailingStopMarket => "trailing_stop_market",
        })
    }
}

impl FromStr for OrderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "limit" => Ok(Self::Limit),
            "market" => Ok(Self::Market),
            "stop" => Ok(Self::Stop),
            "stop_market" => Ok(Self::StopMarket),
            "take_profit" => Ok(Self::TakeProfit),
            "take_profit_market" => Ok(Self::TakeProfitMarket),
            "trailing_stop_market" => Ok(Self::TrailingStopMarket),
            other => Err(Error::bad_request(format!("invalid order type: {other}"))),
        }
    }
}

/// Time in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till cancelled
    Gtc,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
    /// Post only
    Po,
    /// Good till date
    Gtd,
}

impl TimeInForce {
    /// Native wire spelling.
    pub fn as_native(self) -> &'static str {
        match self {
            Self::Gtc => "GTC",
            Self::Ioc => "IOC",
            Self::Fok => "FOK",
            Self::Po => "PO",
            Self::Gtd => "GTD",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_native())
    }
}

impl FromStr for TimeInForce {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GTC" => Ok(Self::Gtc),
            "IOC" => Ok(Self::Ioc),
            "FOK" => Ok(Self::Fok),
            "PO" | "POST_ONLY" => Ok(Self::Po),
            "GTD" => Ok(Self::Gtd),
            other => Err(Error::bad_request(format!("invalid time in force: {other}"))),
        }
    }
}

/// Canonical order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Resting or partially filled
    Open,
    /// Fully filled
    Closed,
    /// Cancelled, possibly after partial fills
    Canceled,
    /// Expired
    Expired,
    /// Rejected by the matching engine
    Rejected,
}

impl OrderStatus {
    /// Maps a native status string; unknown values yield `None`.
    pub fn from_native(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "NEW" | "PARTIALLY_FILLED" => Some(Self::Open),
            "FILLED" => Some(Self::Closed),
            "CANCELED" | "CANCELLED" | "PARTIALLY_CANCELED" => Some(Self::Canceled),
            "REJECTED" => Some(Self::Rejected),
            "EXPIRED" => Some(Self::Expired),
            _ => None,
        }
    }
}

/// Canonical order record.
///
/// `remaining` is derived from `amount - filled` when both are known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Exchange order id
    pub id: Option<String>,
    /// Client order id
    pub client_order_id: Option<String>,
    /// Creation time
    pub timestamp: Option<Timestamp>,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// Last update time
    pub last_update_timestamp: Option<Timestamp>,
    /// Canonical symbol
    pub symbol: Option<Symbol>,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,
    /// Time in force
    pub time_in_force: Option<TimeInForce>,
    /// Order side
    pub side: Option<OrderSide>,
    /// Limit price
    pub price: Option<Decimal>,
    /// Average fill price
    pub average: Option<Decimal>,
    /// Trigger price
    pub stop_price: Option<Decimal>,
    /// Ordered amount
    pub amount: Option<Decimal>,
    /// Filled amount
    pub filled: Option<Decimal>,
    /// Unfilled amount
    pub remaining: Option<Decimal>,
    /// Canonical status
    pub status: Option<OrderStatus>,
    /// Reduce-only flag
    pub reduce_only: Option<bool>,
    /// Maker-only flag
    pub post_only: Option<bool>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Order {
    /// Recomputes `remaining` from `amount` and `filled`.
    #[must_use]
    pub fn with_remaining(mut self) -> Self {
        self.remaining = match (self.amount, self.filled) {
            (Some(amount), Some(filled)) => Some(amount - filled),
            _ => None,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_type_display_and_parse() {
        assert_eq!(OrderType::TakeProfitMarket.to_string(), "take_profit_market");
        assert_eq!("STOP_MARKET".parse::<OrderType>().unwrap(), OrderType::StopMarket);
        assert_eq!("Limit".parse::<OrderType>().unwrap(), OrderType::Limit);
        assert!("iceberg".parse::<OrderType>().is_err());
        assert_eq!(OrderType::TrailingStopMarket.as_native(), "TRAILING_STOP_MARKET");
    }

    #[test]
    fn test_requires_price() {
        assert!(OrderType::Limit.requires_price());
        assert!(OrderType::Stop.requires_price());
        assert!(!OrderType::Market.requires_price());
        assert!(!OrderType::StopMarket.requires_price());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(OrderStatus::from_native("NEW"), Some(OrderStatus::Open));
        assert_eq!(OrderStatus::from_native("PARTIALLY_FILLED"), Some(OrderStatus::Open));
        assert_eq!(OrderStatus::from_native("FILLED"), Some(OrderStatus::Closed));
        assert_eq!(OrderStatus::from_native("PARTIALLY_CANCELED"), Some(OrderStatus::Canceled));
        assert_eq!(OrderStatus::from_native("EXPIRED"), Some(OrderStatus::Expired));
        assert_eq!(OrderStatus::from_native("WHATEVER"), None);
    }

    #[test]
    fn test_remaining() {
        let order = Order {
            amount: Some(dec!(2)),
            filled: Some(dec!(0.5)),
            ..Default::default()
        }
        .with_remaining();
        assert_eq!(order.remaining, Some(dec!(1.5)));

        let order = Order {
            amount: Some(dec!(2)),
            ..Default::default()
        }
        .with_remaining();
        assert_eq!(order.remaining, None);
    }

    #[test]
    fn test_side_and_tif() {
        assert_eq!("SELL".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert_eq!(OrderSide::Buy.as_native(), "BUY");
        assert_eq!("post_only".parse::<TimeInForce>().unwrap(), TimeInForce::Po);
        assert_eq!(serde_json::to_string(&TimeInForce::Gtc).unwrap(), "\"GTC\"");
    }
}
