//! Request construction and validation.
//!
//! Everything here runs before a request is built; failures are
//! [`Error::BadRequest`] and nothing reaches the transport.

use bydfi_core::adapter::Params;
use bydfi_core::error::{Error, Result};
use bydfi_core::precision::{RoundingMode, number_to_string, round_to_precision};
use bydfi_core::time::DAY_MS;
use bydfi_core::types::Market;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

/// Longest accepted history window.
pub const MAX_WINDOW_MS: i64 = 7 * DAY_MS;

/// Longest accepted look-back, six 30-day months.
pub const MAX_HISTORY_MS: i64 = 6 * 30 * DAY_MS;

/// Accepted order book depths.
pub const DEPTH_LIMITS: [u32; 7] = [5, 10, 20, 50, 100, 500, 1000];

/// Default order book depth and page size.
pub const DEFAULT_LIMIT: u32 = 500;

/// Fluent builder for native parameters.
///
/// ```rust
/// use bydfi_exchanges::bydfi::request::RequestParams;
/// use rust_decimal_macros::dec;
///
/// let params = RequestParams::new()
///     .param("symbol", "BTC-USDT")
///     .optional_param("limit", None::<u32>)
///     .decimal("price", dec!(90156.50))
///     .build();
/// assert_eq!(params.len(), 2);
/// assert_eq!(params["price"], "90156.5");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    params: Params,
}

impl RequestParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Adds a parameter only when `value` is set.
    pub fn optional_param<T: Into<Value>>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Adds a decimal as its plain string form.
    pub fn decimal(self, key: &str, value: Decimal) -> Self {
        self.param(key, number_to_string(value))
    }

    /// Adds a decimal only when set.
    pub fn optional_decimal(self, key: &str, value: Option<Decimal>) -> Self {
        match value {
            Some(value) => self.decimal(key, value),
            None => self,
        }
    }

    /// Returns the parameters.
    pub fn build(self) -> Params {
        self.params
    }
}

/// Rejects empty strings.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::bad_request(format!("{field} is required")));
    }
    Ok(())
}

/// Rejects zero and negative values.
pub fn require_positive(field: &str, value: Decimal) -> Result<Decimal> {
    if value <= Decimal::ZERO {
        return Err(Error::bad_request(format!(
            "{field} must be greater than zero, got {value}"
        )));
    }
    Ok(value)
}

/// Upper-cases an enumerated value given in any case.
pub fn upper_enum(field: &str, raw: &str) -> Result<String> {
    require_non_empty(field, raw)?;
    Ok(raw.trim().to_ascii_uppercase())
}

/// Validates a `[start, end]` history window.
///
/// The window may not run backwards, exceed [`MAX_WINDOW_MS`] or exceed
/// [`MAX_HISTORY_MS`]. Exactly seven days is accepted.
///
/// ```rust
/// use bydfi_exchanges::bydfi::request::{check_time_window, MAX_WINDOW_MS};
///
/// assert!(check_time_window("fetch_deposits", 0, MAX_WINDOW_MS).is_ok());
/// assert!(check_time_window("fetch_deposits", 0, MAX_WINDOW_MS + 1).is_err());
/// ```
pub fn check_time_window(operation: &str, start: i64, end: i64) -> Result<()> {
    let window = end.saturating_sub(start);
    if window < 0 {
        warn!(operation, start, end, "time range runs backwards");
        return Err(Error::bad_request(format!(
            "bydfi {operation}() endTime must not be before startTime"
        )));
    }
    if window > MAX_WINDOW_MS {
        warn!(operation, window, "time range exceeds 7 days");
        return Err(Error::bad_request(format!(
            "bydfi {operation}() time range cannot exceed 7 days"
        )));
    }
    if window > MAX_HISTORY_MS {
        warn!(operation, window, "time range exceeds 6 months");
        return Err(Error::bad_request(format!(
            "bydfi {operation}() time range cannot exceed 6 months"
        )));
    }
    Ok(())
}

/// Validates an order book depth, defaulting to [`DEFAULT_LIMIT`].
pub fn check_depth_limit(limit: Option<u32>) -> Result<u32> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if DEPTH_LIMITS.contains(&limit) {
        Ok(limit)
    } else {
        Err(Error::bad_request(format!(
            "depth limit must be one of {DEPTH_LIMITS:?}, got {limit}"
        )))
    }
}

/// Rounds `price` to the market's price precision, half away from zero.
///
/// Markets without a price precision leave the price untouched.
pub fn round_price(market: &Market, price: Decimal) -> Result<Decimal> {
    match market.precision.price {
        Some(precision) => {
            round_to_precision(price, precision, market.precision.mode, RoundingMode::Round)
        }
        None => Ok(price),
    }
}

/// Rounds `amount` to the market's amount precision, toward zero.
pub fn round_amount(market: &Market, amount: Decimal) -> Result<Decimal> {
    match market.precision.amount {
        Some(precision) => {
            round_to_precision(amount, precision, market.precision.mode, RoundingMode::RoundDown)
        }
        None => Ok(amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bydfi_core::precision::PrecisionMode;
    use bydfi_core::types::MarketPrecision;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn market(price: Option<Decimal>, amount: Option<Decimal>) -> Market {
        Market {
            precision: MarketPrecision {
                price,
                amount,
                mode: PrecisionMode::TickSize,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_request_params_optional() {
        let params = RequestParams::new()
            .param("a", 1)
            .optional_param("b", None::<String>)
            .optional_param("c", Some("x"))
            .optional_decimal("d", None)
            .optional_decimal("e", Some(dec!(1.50)))
            .build();
        assert_eq!(params.len(), 3);
        assert_eq!(params["a"], json!(1));
        assert_eq!(params["c"], json!("x"));
        assert_eq!(params["e"], json!("1.5"));
    }

    #[test]
    fn test_window_boundaries() {
        assert!(check_time_window("op", 1_000, 1_000).is_ok());
        assert!(check_time_window("op", 0, MAX_WINDOW_MS).is_ok());
        assert!(check_time_window("op", 0, MAX_WINDOW_MS + 1).unwrap_err().is_bad_request());
        assert!(check_time_window("op", 0, MAX_HISTORY_MS + 1).unwrap_err().is_bad_request());
        assert!(check_time_window("op", 10, 5).unwrap_err().is_bad_request());
    }

    #[test]
    fn test_window_messages() {
        let err = check_time_window("fetch_deposits", 0, MAX_WINDOW_MS + 1).unwrap_err();
        assert!(err.to_string().contains("cannot exceed 7 days"));
    }

    #[test]
    fn test_depth_limit() {
        assert_eq!(check_depth_limit(None).unwrap(), 500);
        assert_eq!(check_depth_limit(Some(20)).unwrap(), 20);
        assert!(check_depth_limit(Some(7)).unwrap_err().is_bad_request());
    }

    #[test]
    fn test_require_helpers() {
        assert!(require_non_empty("asset", "  ").is_err());
        assert!(require_non_empty("asset", "USDT").is_ok());
        assert!(require_positive("price", dec!(0)).is_err());
        assert!(require_positive("price", dec!(-1)).is_err());
        assert_eq!(require_positive("price", dec!(0.1)).unwrap(), dec!(0.1));
        assert_eq!(upper_enum("side", " buy ").unwrap(), "BUY");
        assert!(upper_enum("side", "").is_err());
    }

    #[test]
    fn test_round_price_follows_market_mode() {
        assert_eq!(round_price(&market(Some(dec!(0.5)), None), dec!(101.26)).unwrap(), dec!(101.5));
        assert_eq!(round_price(&market(Some(dec!(1)), None), dec!(101.26)).unwrap(), dec!(101));
        assert_eq!(round_price(&market(None, None), dec!(101.26)).unwrap(), dec!(101.26));

        let mut places = market(Some(dec!(1)), None);
        places.precision.mode = PrecisionMode::DecimalPlaces;
        assert_eq!(round_price(&places, dec!(101.26)).unwrap(), dec!(101.3));
    }

    #[test]
    fn test_round_price_overflow_is_bad_request() {
        let err = round_price(&market(Some(dec!(0.00000001)), None), Decimal::MAX).unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn test_round_amount_truncates() {
        assert_eq!(round_amount(&market(None, Some(dec!(0.001))), dec!(0.12399)).unwrap(), dec!(0.123));
    }
}
