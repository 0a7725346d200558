//! Margin, position mode and leverage settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Symbol;
use crate::error::{Error, Result};

/// Margin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    /// Isolated margin
    Isolated,
    /// Cross margin
    Cross,
}

impl MarginMode {
    /// Native wire spelling.
    pub fn as_native(self) -> &'static str {
        match self {
            Self::Isolated => "ISOLATED",
            Self::Cross => "CROSSED",
        }
    }

    /// Parses the native spelling.
    pub fn from_native(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "ISOLATED" => Some(Self::Isolated),
            "CROSSED" | "CROSS" => Some(Self::Cross),
            _ => None,
        }
    }
}

impl fmt::Display for MarginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Isolated => "isolated",
            Self::Cross => "cross",
        })
    }
}

impl FromStr for MarginMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_native(s).ok_or_else(|| Error::bad_request(format!("invalid margin mode: {s}")))
    }
}

/// Position mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    /// Separate long and short positions
    Hedge,
    /// Single net position
    OneWay,
}

impl PositionMode {
    /// Native wire spelling.
    pub fn as_native(self) -> &'static str {
        match self {
            Self::Hedge => "HEDGE",
            Self::OneWay => "ONEWAY",
        }
    }

    /// Parses the native spelling.
    pub fn from_native(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "HEDGE" => Some(Self::Hedge),
            "ONEWAY" | "ONE_WAY" => Some(Self::OneWay),
            _ => None,
        }
    }
}

/// Leverage setting of one market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leverage {
    /// Canonical symbol
    pub symbol: Symbol,
    /// Margin mode
    pub margin_mode: Option<MarginMode>,
    /// Leverage for long positions
    pub long_leverage: Option<Decimal>,
    /// Leverage for short positions
    pub short_leverage: Option<Decimal>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}

/// Margin mode of one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginModeInfo {
    /// Canonical symbol
    pub symbol: Symbol,
    /// Margin mode
    pub margin_mode: Option<MarginMode>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}

/// Position mode of the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionModeInfo {
    /// `true` in hedge mode
    pub hedged: bool,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_mode_native() {
        assert_eq!(MarginMode::Cross.as_native(), "CROSSED");
        assert_eq!(MarginMode::from_native("isolated"), Some(MarginMode::Isolated));
        assert!("portfolio".parse::<MarginMode>().is_err());
    }

    #[test]
    fn test_position_mode_native() {
        assert_eq!(PositionMode::from_native("ONEWAY"), Some(PositionMode::OneWay));
        assert_eq!(PositionMode::Hedge.as_native(), "HEDGE");
        assert_eq!(PositionMode::from_native("x"), None);
    }
}
