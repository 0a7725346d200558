//! Market type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Symbol;
use crate::precision::PrecisionMode;

/// Market type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    /// Spot market
    Spot,
    /// Perpetual swap
    #[default]
    Swap,
    /// Dated futures
    Future,
}

impl std::fmt::Display for MarketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spot => write!(f, "spot"),
            Self::Swap => write!(f, "swap"),
            Self::Future => write!(f, "future"),
        }
    }
}

/// Lower and upper bound; either side may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinMax {
    /// Lower bound
    pub min: Option<Decimal>,
    /// Upper bound
    pub max: Option<Decimal>,
}

impl MinMax {
    /// Creates a bound pair.
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }
}

/// Market precision settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrecision {
    /// Price precision (decimal places or tick size)
    pub price: Option<Decimal>,
    /// Amount precision (decimal places or step size)
    pub amount: Option<Decimal>,
    /// How `price` and `amount` are counted
    #[serde(default)]
    pub mode: PrecisionMode,
}

/// Trading limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketLimits {
    /// Order amount bounds
    pub amount: MinMax,
    /// Price bounds
    pub price: MinMax,
    /// Order cost bounds
    pub cost: MinMax,
    /// Leverage bounds
    pub leverage: MinMax,
}

/// A tradable instrument as listed by the exchange.
///
/// `symbol` is always `BASE/QUOTE:SETTLE` for contracts and is unique per
/// native `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Native instrument id (e.g. `BTC-USDT`)
    pub id: String,
    /// Alternate native spelling used to disambiguate heuristic lookups
    pub secondary_id: Option<String>,
    /// Canonical symbol
    pub symbol: Symbol,
    /// Base currency code
    pub base: String,
    /// Quote currency code
    pub quote: String,
    /// Settlement currency code
    pub settle: Option<String>,
    /// Native base asset id
    pub base_id: String,
    /// Native quote asset id
    pub quote_id: String,
    /// Native settlement asset id
    pub settle_id: Option<String>,
    /// Market type
    #[serde(rename = "type")]
    pub market_type: MarketType,
    /// Perpetual swap flag
    pub swap: bool,
    /// Contract flag
    pub contract: bool,
    /// Linear (quote-settled) contract
    pub linear: bool,
    /// Inverse (base-settled) contract
    pub inverse: bool,
    /// Whether the market currently trades
    pub active: bool,
    /// Taker fee rate
    pub taker: Option<Decimal>,
    /// Maker fee rate
    pub maker: Option<Decimal>,
    /// Contract size
    pub contract_size: Option<Decimal>,
    /// Precision settings
    pub precision: MarketPrecision,
    /// Trading limits
    pub limits: MarketLimits,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Market {
    /// Builds the canonical `BASE/QUOTE[:SETTLE]` symbol.
    pub fn canonical_symbol(base: &str, quote: &str, settle: Option<&str>) -> Symbol {
        match settle {
            Some(settle) => format!("{base}/{quote}:{settle}"),
            None => format!("{base}/{quote}"),
        }
    }
}
