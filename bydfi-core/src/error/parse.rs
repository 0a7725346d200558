//! Parsing-related error types.

use std::borrow::Cow;
use thiserror::Error;

/// Errors raised while decoding exchange payloads.
///
/// ```rust
/// use bydfi_core::error::{Error, ParseError, Result};
///
/// fn order_id(json: &serde_json::Value) -> Result<&str> {
///     json.get("orderId")
///         .and_then(|v| v.as_str())
///         .ok_or_else(|| Error::from(ParseError::missing_field("orderId")))
/// }
///
/// assert!(order_id(&serde_json::json!({})).is_err());
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// Failed to parse a decimal number.
    #[error("Failed to parse decimal: {0}")]
    Decimal(#[from] rust_decimal::Error),

    /// Failed to (de)serialize JSON.
    #[error("Failed to deserialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required field in response.
    #[error("Missing required field: {0}")]
    MissingField(Cow<'static, str>),

    /// Invalid value for a field.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: Cow<'static, str>,
        /// Error message
        message: Cow<'static, str>,
    },

    /// Invalid format for a field.
    #[error("Invalid format for '{field}': {message}")]
    InvalidFormat {
        /// Field name
        field: Cow<'static, str>,
        /// Error message
        message: Cow<'static, str>,
    },
}

impl ParseError {
    /// Creates a `MissingField` error with a static string (no allocation).
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(Cow::Borrowed(field))
    }

    /// Creates an `InvalidValue` error.
    pub fn invalid_value(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an `InvalidFormat` error.
    pub fn invalid_format(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            message: message.into(),
        }
    }
}
