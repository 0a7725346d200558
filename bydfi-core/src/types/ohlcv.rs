//! OHLCV (candlestick) record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// One candle: `(timestamp, open, high, low, close, volume)`.
///
/// Serializes as a 6-element JSON array.
///
/// ```rust
/// use bydfi_core::types::Ohlcv;
/// use rust_decimal_macros::dec;
///
/// let candle = Ohlcv::new(1741265880000, dec!(90156), dec!(90235), dec!(90156), dec!(90235), dec!(0.052));
/// assert_eq!(
///     serde_json::to_string(&candle).unwrap(),
///     r#"[1741265880000,"90156","90235","90156","90235","0.052"]"#
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OhlcvTuple", into = "OhlcvTuple")]
pub struct Ohlcv {
    /// Candle open time
    pub timestamp: Option<Timestamp>,
    /// Opening price
    pub open: Option<Decimal>,
    /// Highest price
    pub high: Option<Decimal>,
    /// Lowest price
    pub low: Option<Decimal>,
    /// Closing price
    pub close: Option<Decimal>,
    /// Volume in base currency
    pub volume: Option<Decimal>,
}

type OhlcvTuple = (
    Option<Timestamp>,
    Option<Decimal>,
    Option<Decimal>,
    Option<Decimal>,
    Option<Decimal>,
    Option<Decimal>,
);

impl Ohlcv {
    /// Creates a fully populated candle.
    pub fn new(
        timestamp: Timestamp,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            timestamp: Some(timestamp),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }
}

impl From<OhlcvTuple> for Ohlcv {
    fn from((timestamp, open, high, low, close, volume): OhlcvTuple) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl From<Ohlcv> for OhlcvTuple {
    fn from(c: Ohlcv) -> Self {
        (c.timestamp, c.open, c.high, c.low, c.close, c.volume)
    }
}
