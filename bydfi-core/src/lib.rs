//! BYDFi Core Library
//!
//! Exchange-independent building blocks for the BYDFi derivatives adapter:
//! the canonical data model, the error taxonomy, configuration, logging,
//! the HTTP transport seam and the build/sign/send/classify pipeline.
//!
//! # Features
//!
//! - **Precision**: Uses `rust_decimal::Decimal` for every price and amount
//! - **Async/Await**: Built on tokio and reqwest
//! - **Error Handling**: One closed error taxonomy built with `thiserror`
//! - **Testability**: Transport and clock are traits and can be replaced
//!
//! # Example
//!
//! ```rust
//! use bydfi_core::prelude::*;
//!
//! let ctx = MarketContext::new(vec![Market {
//!     id: "BTC-USDT".to_string(),
//!     symbol: "BTC/USDT:USDT".to_string(),
//!     ..Default::default()
//! }]);
//! assert_eq!(ctx.market("BTC/USDT:USDT").unwrap().id, "BTC-USDT");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unreadable_literal)]

// Re-exports of external dependencies
pub use rust_decimal;
pub use serde;
pub use serde_json;

pub mod adapter;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod market_cache;
pub mod parser_utils;
pub mod precision;
pub mod time;
pub mod transport;
pub mod types;

pub use adapter::{Access, EndpointSpec, ExchangeAdapter, Params, dispatch};
pub use config::{ExchangeConfig, ExchangeConfigBuilder, ProxyConfig};
pub use credentials::{Credentials, SecretString};
pub use error::{ContextExt, Error, ExchangeErrorDetails, NetworkError, ParseError, Result};
pub use market_cache::{MarketContext, MarketStore};
pub use time::{Clock, FixedClock, SystemClock};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, RecordingTransport, ReqwestTransport,
};
pub use types::{
    Balance, BalanceEntry, FundingRate, FundingRateHistory, LastPrice, Leverage, MarginMode,
    MarginModeInfo, Market, MarketLimits, MarketPrecision, MarketType, MinMax, Ohlcv, Order,
    OrderBook, OrderBookEntry, OrderSide, OrderStatus, OrderType, Position, PositionMode,
    PositionModeInfo, PositionSide, Ticker, TimeInForce, Trade, Transaction, TransactionKind,
    Transfer, TransferStatus,
};

/// Prelude module for convenient imports
///
/// ```rust
/// use bydfi_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::adapter::{Access, EndpointSpec, ExchangeAdapter, Params, dispatch};
    pub use crate::config::{ExchangeConfig, ExchangeConfigBuilder, ProxyConfig};
    pub use crate::error::{ContextExt, Error, Result};
    pub use crate::logging::{LogConfig, LogFormat, LogLevel, init_logging, try_init_logging};
    pub use crate::market_cache::{MarketContext, MarketStore};
    pub use crate::precision::{PrecisionMode, RoundingMode, number_to_string, round_to_precision};
    pub use crate::time::{Clock, DAY_MS, FixedClock, SystemClock, milliseconds};
    pub use crate::transport::{
        HttpMethod, HttpRequest, HttpResponse, HttpTransport, RecordingTransport, ReqwestTransport,
    };
    pub use crate::types::*;
    pub use rust_decimal::Decimal;
}
