//! Details carried by [`Error::Exchange`](super::Error::Exchange).

use serde_json::Value;

/// Code, message and raw body of a rejected exchange response.
///
/// ```rust
/// use bydfi_core::error::ExchangeErrorDetails;
///
/// let details = ExchangeErrorDetails::new("500", "bydfi {\"code\":500}");
/// assert_eq!(details.code, "500");
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ExchangeErrorDetails {
    /// Business code as reported by the exchange (numeric codes are stringified).
    pub code: String,
    /// Feedback string, usually `"<exchange id> <raw body>"`.
    pub message: String,
    /// Decoded response body, when one was available.
    pub data: Option<Value>,
}

impl ExchangeErrorDetails {
    /// Creates details without a raw body.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    /// Creates details keeping the decoded response body.
    pub fn with_data(code: impl Into<String>, message: impl Into<String>, data: Value) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl std::fmt::Display for ExchangeErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)
    }
}
