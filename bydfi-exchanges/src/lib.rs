//! BYDFi Exchange Implementation
//!
//! The BYDFi derivatives adapter built on top of bydfi-core: symbol
//! resolution, request construction and validation, HMAC-SHA256 signing,
//! error classification and response normalization.
//!
//! # Example
//!
//! ```rust,no_run
//! use bydfi_exchanges::bydfi::Bydfi;
//!
//! # async fn example() -> Result<(), bydfi_core::Error> {
//! let exchange = Bydfi::builder()
//!     .api_key("your_api_key")
//!     .secret("your_secret")
//!     .build()?;
//!
//! let markets = exchange.load_markets(false).await?;
//! println!("Found {} markets", markets.len());
//!
//! let ticker = exchange.fetch_ticker("BTC/USDT:USDT").await?;
//! println!("BTC last: {:?}", ticker.last);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow common patterns that are acceptable in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::struct_excessive_bools)]

// Re-export bydfi-core
pub use bydfi_core;

/// BYDFi exchange implementation
pub mod bydfi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bydfi::{
        AccountScope, BalanceParams, Bydfi, BydfiBuilder, BydfiOptions, CancelOrderParams,
        ContractType, CreateOrderParams, EditOrderParams, FundingHistoryParams, LeverageSetting,
        OhlcvParams, OrderEdit, OrderQueryParams, TransferHistoryParams, WorkingType,
    };
    pub use bydfi_core::prelude::*;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
