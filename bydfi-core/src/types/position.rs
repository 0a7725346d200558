//! Position record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Symbol, Timestamp};
use crate::error::{Error, Result};

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Long
    Long,
    /// Short
    Short,
    /// One-way mode, net position
    Both,
}

impl PositionSide {
    /// Native wire spelling.
    pub fn as_native(self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
            Self::Both => "BOTH",
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Long => "long",
            Self::Short => "short",
            Self::Both => "both",
        })
    }
}

impl FromStr for PositionSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "long" | "buy" => Ok(Self::Long),
            "short" | "sell" => Ok(Self::Short),
            "both" => Ok(Self::Both),
            other => Err(Error::bad_request(format!("invalid position side: {other}"))),
        }
    }
}

/// Open or historical position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Position id
    pub id: Option<String>,
    /// Canonical symbol
    pub symbol: Option<Symbol>,
    /// Side, lower-cased from the native payload
    pub side: Option<String>,
    /// Creation time
    pub timestamp: Option<Timestamp>,
    /// ISO 8601 of `timestamp`
    pub datetime: Option<String>,
    /// Size in contracts
    pub contracts: Option<Decimal>,
    /// Average entry price
    pub entry_price: Option<Decimal>,
    /// Mark price
    pub mark_price: Option<Decimal>,
    /// Liquidation price
    pub liquidation_price: Option<Decimal>,
    /// Unrealized profit and loss
    pub unrealized_pnl: Option<Decimal>,
    /// Realized profit and loss
    pub realized_pnl: Option<Decimal>,
    /// Leverage
    pub leverage: Option<Decimal>,
    /// Margin mode (`isolated` / `cross`)
    pub margin_mode: Option<String>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}
