//! BYDFi REST API operations organized by functionality.
//!
//! - `market_data`: public market data (markets, tickers, depth, trades, candles, funding)
//! - `account`: balances, transfers, deposits and withdrawals
//! - `futures`: margin mode, position mode and leverage settings
//! - `trading`: order placement, amendment, cancellation and history
//!
//! All methods are implemented directly on [`Bydfi`](super::Bydfi):
//!
//! ```no_run
//! # use bydfi_exchanges::bydfi::Bydfi;
//! # async fn example() -> bydfi_core::Result<()> {
//! let bydfi = Bydfi::builder().build()?;
//! let ticker = bydfi.fetch_ticker("BTC/USDT:USDT").await?;
//! println!("{:?}", ticker.last);
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod futures;
pub mod market_data;
pub mod trading;

use bydfi_core::error::{Error, ParseError, Result};
use serde_json::Value;

use super::parser::{response_data, response_list};

/// Returns the single entity of a response whose `data` is either the
/// object itself or a one-element list.
pub(crate) fn single_entry(response: &Value) -> Result<&Value> {
    let data = response_data(response);
    if data.is_object() {
        return Ok(data);
    }
    response_list(response)
        .first()
        .ok_or_else(|| Error::from(ParseError::missing_field("data")))
}

/// Reads the `success` flag of a write acknowledgement.
///
/// Only envelopes with `code` 200 get here, so an absent flag reads as
/// `true`.
pub(crate) fn acknowledged(response: &Value) -> bool {
    bydfi_core::parser_utils::parse_bool(response, "success")
        .or_else(|| bydfi_core::parser_utils::parse_bool(response_data(response), "success"))
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_entry_shapes() {
        let object = json!({"data": {"symbol": "BTC-USDT"}});
        assert_eq!(single_entry(&object).unwrap()["symbol"], "BTC-USDT");
        let list = json!({"data": [{"symbol": "ETH-USDT"}]});
        assert_eq!(single_entry(&list).unwrap()["symbol"], "ETH-USDT");
        assert!(single_entry(&json!({"data": []})).is_err());
    }

    #[test]
    fn test_acknowledged() {
        assert!(acknowledged(&json!({"code": 200})));
        assert!(acknowledged(&json!({"code": 200, "success": true})));
        assert!(!acknowledged(&json!({"code": 200, "success": false})));
        assert!(!acknowledged(&json!({"code": 200, "data": {"success": false}})));
    }
}
