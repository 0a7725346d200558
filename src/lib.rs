//! # bydfi-rs
//!
//! A BYDFi derivatives exchange adapter in Rust, exposing the exchange
//! through a unified, exchange-agnostic API.
//!
//! ## Features
//!
//! - **Async/Await**: Built on tokio and reqwest
//! - **Type Safety**: Canonical symbols, sides and order types are enums
//! - **Precision**: Every price and amount is a `rust_decimal::Decimal`
//! - **Testability**: Transport and clock can be replaced for offline tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bydfi_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let _ = try_init_logging(&LogConfig::default());
//!     let exchange = Bydfi::builder().build()?;
//!     let book = exchange.fetch_order_book("BTC/USDT:USDT", Some(20)).await?;
//!     println!("best bid {:?}", book.best_bid());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Re-export core types and traits
pub use bydfi_core::{
    error::{Error, Result},
    types::*,
};

// Re-export the exchange implementation
pub use bydfi_exchanges::bydfi::{Bydfi, BydfiBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use bydfi_exchanges::prelude::*;
}
