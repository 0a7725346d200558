//! Per-operation options.
//!
//! Each operation takes its required inputs as arguments and everything
//! optional through one of the structs below. Unset fields are not sent.

use std::fmt;
use std::str::FromStr;

use bydfi_core::error::{Error, Result};
use bydfi_core::types::{MarginMode, PositionSide, TimeInForce};
use rust_decimal::Decimal;

/// Contract family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContractType {
    /// Perpetual contracts
    #[default]
    Future,
    /// Delivery contracts
    Delivery,
}

impl ContractType {
    /// Native wire spelling.
    pub fn as_native(self) -> &'static str {
        match self {
            Self::Future => "FUTURE",
            Self::Delivery => "DELIVERY",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_native())
    }
}

impl FromStr for ContractType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "FUTURE" => Ok(Self::Future),
            "DELIVERY" => Ok(Self::Delivery),
            other => Err(Error::bad_request(format!("invalid contract type: {other}"))),
        }
    }
}

/// Price source for trigger orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkingType {
    /// Trigger on the mark price
    MarkPrice,
    /// Trigger on the last traded price
    ContractPrice,
}

impl WorkingType {
    /// Native wire spelling.
    pub fn as_native(self) -> &'static str {
        match self {
            Self::MarkPrice => "MARK_PRICE",
            Self::ContractPrice => "CONTRACT_PRICE",
        }
    }
}

impl FromStr for WorkingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MARK_PRICE" => Ok(Self::MarkPrice),
            "CONTRACT_PRICE" => Ok(Self::ContractPrice),
            other => Err(Error::bad_request(format!("invalid working type: {other}"))),
        }
    }
}

/// Wallet and contract family shared by every private swap call.
///
/// Unset fields fall back to the exchange options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountScope {
    /// Wallet id, e.g. `W001`
    pub wallet: Option<String>,
    /// Contract family
    pub contract_type: Option<ContractType>,
}

/// Options for `create_order`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOrderParams {
    /// Wallet and contract family
    pub scope: AccountScope,
    /// Client order id
    pub client_order_id: Option<String>,
    /// Time in force
    pub time_in_force: Option<TimeInForce>,
    /// Only reduce an existing position
    pub reduce_only: Option<bool>,
    /// Maker only; sent as `timeInForce=PO`
    pub post_only: bool,
    /// Trigger price for stop and take-profit orders
    pub stop_price: Option<Decimal>,
    /// Trigger price source
    pub working_type: Option<WorkingType>,
    /// Hedge-mode position side
    pub position_side: Option<PositionSide>,
    /// Trailing stop callback rate, in percent
    pub callback_rate: Option<Decimal>,
    /// Trailing stop activation price
    pub activation_price: Option<Decimal>,
}

/// Options for `edit_order`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditOrderParams {
    /// Wallet and contract family
    pub scope: AccountScope,
    /// New trigger price
    pub stop_price: Option<Decimal>,
}

/// One entry of `edit_orders`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEdit {
    /// Exchange order id
    pub id: String,
    /// Canonical symbol
    pub symbol: String,
    /// New amount
    pub amount: Option<Decimal>,
    /// New price
    pub price: Option<Decimal>,
}

/// Options for cancel operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelOrderParams {
    /// Wallet and contract family
    pub scope: AccountScope,
    /// Cancel by client order id instead of exchange id
    pub client_order_id: Option<String>,
}

/// Options for order, trade and position history queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQueryParams {
    /// Wallet and contract family
    pub scope: AccountScope,
    /// Earliest time, in ms
    pub since: Option<i64>,
    /// Latest time, in ms
    pub until: Option<i64>,
    /// Maximum number of entries
    pub limit: Option<u32>,
}

/// Options for `fetch_balance`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceParams {
    /// Wallet type, e.g. `spot` or `fund`
    pub wallet_type: Option<String>,
    /// Currency code
    pub asset: Option<String>,
}

/// Paging for `fetch_transfers`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferHistoryParams {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Records per page
    pub rows: Option<u32>,
}

/// Options for candle queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OhlcvParams {
    /// Latest candle open time, in ms
    pub until: Option<i64>,
}

/// Options for funding rate history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundingHistoryParams {
    /// Latest settlement time, in ms
    pub end_time: Option<i64>,
}

/// One entry of `set_leverages`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeverageSetting {
    /// Canonical symbol
    pub symbol: String,
    /// Leverage multiplier
    pub leverage: Decimal,
    /// Optional margin mode change
    pub margin_mode: Option<MarginMode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_type_parse() {
        assert_eq!("future".parse::<ContractType>().unwrap(), ContractType::Future);
        assert_eq!("Delivery".parse::<ContractType>().unwrap(), ContractType::Delivery);
        assert!("spot".parse::<ContractType>().unwrap_err().is_bad_request());
        assert_eq!(ContractType::default().to_string(), "FUTURE");
    }

    #[test]
    fn test_working_type_parse() {
        assert_eq!(
            "mark_price".parse::<WorkingType>().unwrap().as_native(),
            "MARK_PRICE"
        );
        assert!("last".parse::<WorkingType>().is_err());
    }
}
