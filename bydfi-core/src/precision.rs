//! Decimal precision helpers for outbound prices and amounts.
//!
//! A market's precision value is a count of decimal places (`2`) or a tick
//! size (`"0.01"`) depending on the [`PrecisionMode`] the exchange declares
//! for it. [`round_to_precision`] applies either one.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rounding mode for precision calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties away from zero.
    Round,
    /// Round away from zero.
    RoundUp,
    /// Round toward zero (truncate).
    RoundDown,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::Round => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::RoundUp => RoundingStrategy::AwayFromZero,
            RoundingMode::RoundDown => RoundingStrategy::ToZero,
        }
    }
}

/// How a market precision value is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrecisionMode {
    /// Number of digits after the decimal point.
    #[default]
    DecimalPlaces,
    /// Minimum increment.
    TickSize,
}

impl std::fmt::Display for PrecisionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PrecisionMode::DecimalPlaces => "DECIMAL_PLACES",
            PrecisionMode::TickSize => "TICK_SIZE",
        };
        write!(f, "{s}")
    }
}

fn overflow(value: Decimal, precision: Decimal) -> Error {
    Error::bad_request(format!(
        "{value} cannot be rounded to precision {precision}"
    ))
}

/// Rounds `value` to `precision`, read according to `mode`.
///
/// # Errors
///
/// [`Error::BadRequest`] when the precision is not valid for the mode (a
/// fractional or negative place count, a non-positive tick) or when the
/// rounded value does not fit in a `Decimal`.
///
/// ```rust
/// use bydfi_core::precision::{round_to_precision, PrecisionMode, RoundingMode};
/// use rust_decimal_macros::dec;
///
/// let tick = PrecisionMode::TickSize;
/// assert_eq!(round_to_precision(dec!(90156.46), dec!(0.1), tick, RoundingMode::Round).unwrap(), dec!(90156.5));
/// assert_eq!(round_to_precision(dec!(90156.46), dec!(1), tick, RoundingMode::Round).unwrap(), dec!(90156));
///
/// let places = PrecisionMode::DecimalPlaces;
/// assert_eq!(round_to_precision(dec!(0.123), dec!(2), places, RoundingMode::RoundDown).unwrap(), dec!(0.12));
/// ```
pub fn round_to_precision(
    value: Decimal,
    precision: Decimal,
    mode: PrecisionMode,
    rounding: RoundingMode,
) -> Result<Decimal> {
    match mode {
        PrecisionMode::DecimalPlaces => {
            if precision.is_sign_negative() || !precision.fract().is_zero() {
                return Err(Error::bad_request(format!(
                    "invalid decimal places {precision}"
                )));
            }
            let places = precision
                .to_u32()
                .ok_or_else(|| Error::bad_request(format!("precision {precision} is too large")))?;
            Ok(value.round_dp_with_strategy(places, rounding.strategy()).normalize())
        }
        PrecisionMode::TickSize => {
            if precision <= Decimal::ZERO {
                return Err(Error::bad_request(format!("invalid tick size {precision}")));
            }
            let ticks = value
                .checked_div(precision)
                .ok_or_else(|| overflow(value, precision))?
                .round_dp_with_strategy(0, rounding.strategy());
            ticks
                .checked_mul(precision)
                .map(|rounded| rounded.normalize())
                .ok_or_else(|| overflow(value, precision))
        }
    }
}

/// Formats a decimal without trailing zeros.
pub fn number_to_string(value: Decimal) -> String {
    value.normalize().to_string()
}
