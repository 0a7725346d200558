//! Canonical entity records.
//!
//! Every record here is produced fresh from one raw exchange payload and is
//! never mutated afterwards. Numbers use `rust_decimal::Decimal`; attributes
//! the exchange did not report are `None` rather than zero. Each record keeps
//! the raw payload in `info` for diagnostics.

pub mod balance;
pub mod funding_rate;
pub mod margin;
pub mod market;
pub mod ohlcv;
pub mod order;
pub mod orderbook;
pub mod position;
pub mod ticker;
pub mod trade;
pub mod transaction;
pub mod transfer;

pub use balance::{Balance, BalanceEntry};
pub use funding_rate::{FundingRate, FundingRateHistory};
pub use margin::{Leverage, MarginMode, MarginModeInfo, PositionMode, PositionModeInfo};
pub use market::{Market, MarketLimits, MarketPrecision, MarketType, MinMax};
pub use ohlcv::Ohlcv;
pub use order::{Order, OrderSide, OrderStatus, OrderType, TimeInForce};
pub use orderbook::{OrderBook, OrderBookEntry};
pub use position::{Position, PositionSide};
pub use ticker::{LastPrice, Ticker};
pub use trade::Trade;
pub use transaction::{Transaction, TransactionKind};
pub use transfer::{Transfer, TransferStatus};

/// Canonical symbol, e.g. `BTC/USDT:USDT`.
pub type Symbol = String;

/// Millisecond Unix timestamp.
pub type Timestamp = i64;
