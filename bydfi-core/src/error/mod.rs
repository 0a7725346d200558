//! # Error Handling
//!
//! One error type for every layer of the adapter, built on `thiserror`.
//!
//! ## Error Hierarchy
//!
//! ```text
//! Error
//! ├── BadRequest        - caller input rejected locally, or request shape rejected remotely
//! ├── InvalidOrder      - order parameters rejected by exchange-side risk rules
//! ├── RateLimitExceeded - throttled by the exchange
//! ├── Exchange          - any other non-success response (carries the raw body)
//! ├── UnknownSymbol     - symbol / market id not present in the market context
//! ├── MarketsNotLoaded  - market context used before the bootstrap ran
//! ├── Authentication    - missing credentials or rejected signature
//! ├── Network           - transport failures (via NetworkError)
//! ├── Parse             - malformed payloads (via ParseError)
//! ├── Timeout           - operation timed out
//! ├── NotSupported      - operation not offered by the exchange
//! └── Context           - another error with context attached
//! ```
//!
//! Validation failures are raised before any request is built. Remote failures
//! keep the untranslated body in [`ExchangeErrorDetails::data`] or in the
//! message, so nothing reported by the exchange is lost.
//!
//! ```rust
//! use bydfi_core::error::{Error, Result};
//!
//! fn check_amount(amount: f64) -> Result<()> {
//!     if amount <= 0.0 {
//!         return Err(Error::bad_request("amount must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_amount(0.0).unwrap_err().is_bad_request());
//! ```

mod context;
mod convert;
mod details;
mod network;
mod parse;

use std::borrow::Cow;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

pub use context::ContextExt;
pub use details::ExchangeErrorDetails;
pub use network::NetworkError;
pub use parse::ParseError;

/// Result type alias for all adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type.
///
/// Large variants are boxed to keep the enum small; messages use
/// `Cow<'static, str>` so static messages do not allocate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Caller-supplied input is invalid or missing, or the exchange rejected
    /// the request shape.
    #[error("Bad request: {0}")]
    BadRequest(Cow<'static, str>),

    /// Order parameters rejected by exchange-side validation.
    #[error("Invalid order: {0}")]
    InvalidOrder(Cow<'static, str>),

    /// Rate limit exceeded with optional retry information.
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message (raw exchange feedback)
        message: Cow<'static, str>,
        /// Optional duration to wait before retrying
        retry_after: Option<Duration>,
    },

    /// Generic exchange error for any unmatched non-success response.
    #[error("Exchange error: {0}")]
    Exchange(Box<ExchangeErrorDetails>),

    /// Symbol or market id could not be resolved.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(Cow<'static, str>),

    /// The market context has not been populated yet.
    #[error("Markets not loaded: {0}")]
    MarketsNotLoaded(Cow<'static, str>),

    /// Authentication errors (missing credentials, rejected signature).
    #[error("Authentication error: {0}")]
    Authentication(Cow<'static, str>),

    /// Transport-level errors.
    #[error("Network error: {0}")]
    Network(Box<NetworkError>),

    /// Errors during response parsing.
    #[error("Parse error: {0}")]
    Parse(Box<ParseError>),

    /// Operation timeout.
    #[error("Timeout: {0}")]
    Timeout(Cow<'static, str>),

    /// Operation not offered by the exchange.
    #[error("Not supported: {0}")]
    NotSupported(Cow<'static, str>),

    /// Error with additional context, preserving the error chain.
    #[error("{context}")]
    Context {
        /// Context message describing what operation failed
        context: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    // ==================== Constructor Methods ====================

    /// Creates a bad request error.
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Creates an invalid order error.
    pub fn invalid_order(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidOrder(msg.into())
    }

    /// Creates a rate limit error with optional retry duration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bydfi_core::error::Error;
    /// use std::time::Duration;
    ///
    /// let err = Error::rate_limit("Too many requests", Some(Duration::from_secs(1)));
    /// assert_eq!(err.retry_after(), Some(Duration::from_secs(1)));
    /// ```
    pub fn rate_limit(
        message: impl Into<Cow<'static, str>>,
        retry_after: Option<Duration>,
    ) -> Self {
        Self::RateLimitExceeded {
            message: message.into(),
            retry_after,
        }
    }

    /// Creates a new exchange error.
    pub fn exchange(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Exchange(Box::new(ExchangeErrorDetails::new(code, message)))
    }

    /// Creates a new exchange error with the raw response attached.
    pub fn exchange_with_data(
        code: impl Into<String>,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self::Exchange(Box::new(ExchangeErrorDetails::with_data(
            code, message, data,
        )))
    }

    /// Creates an unknown symbol error.
    pub fn unknown_symbol(symbol: impl Into<Cow<'static, str>>) -> Self {
        Self::UnknownSymbol(symbol.into())
    }

    /// Creates a markets-not-loaded error.
    pub fn markets_not_loaded(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::MarketsNotLoaded(msg.into())
    }

    /// Creates an authentication error.
    pub fn authentication(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Creates a network error from a message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(Box::new(NetworkError::ConnectionFailed(msg.into())))
    }

    /// Creates a timeout error.
    pub fn timeout(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Creates a not supported error.
    pub fn not_supported(feature: impl Into<Cow<'static, str>>) -> Self {
        Self::NotSupported(feature.into())
    }

    // ==================== Context Methods ====================

    /// Attaches context to an existing error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bydfi_core::error::Error;
    ///
    /// let err = Error::network("Connection refused")
    ///     .context("Failed to fetch ticker for BTC/USDT:USDT");
    /// assert!(err.report().contains("Connection refused"));
    /// ```
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    fn iter_chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| match err {
            Error::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// Returns the root cause of the error, skipping Context layers.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        self.iter_chain().last().unwrap_or(self)
    }

    /// Generates a report with the full error chain.
    #[must_use]
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut report = String::new();
        report.push_str(&self.to_string());

        let mut current: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(err) = current {
            let _ = write!(report, "\nCaused by: {err}");
            current = err.source();
        }
        report
    }

    // ==================== Helper Methods (Context Penetrating) ====================

    /// Checks if the caller may reasonably retry (penetrates Context layers).
    ///
    /// Retrying is always the caller's decision; nothing in this workspace
    /// retries on its own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            Error::Network(ne) => matches!(
                ne.as_ref(),
                NetworkError::Timeout | NetworkError::ConnectionFailed(_)
            ),
            Error::RateLimitExceeded { .. } | Error::Timeout(_) => true,
            _ => false,
        }
    }

    /// Returns the retry delay if this is a rate limit error.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self.root_cause() {
            Error::RateLimitExceeded { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns `true` for [`Error::BadRequest`].
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self.root_cause(), Error::BadRequest(_))
    }

    /// Returns `true` for [`Error::InvalidOrder`].
    #[must_use]
    pub fn is_invalid_order(&self) -> bool {
        matches!(self.root_cause(), Error::InvalidOrder(_))
    }

    /// Returns `true` for [`Error::RateLimitExceeded`].
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.root_cause(), Error::RateLimitExceeded { .. })
    }

    /// Returns `true` for [`Error::UnknownSymbol`].
    #[must_use]
    pub fn is_unknown_symbol(&self) -> bool {
        matches!(self.root_cause(), Error::UnknownSymbol(_))
    }

    /// Returns the exchange error details, if this is a generic exchange error.
    #[must_use]
    pub fn as_exchange(&self) -> Option<&ExchangeErrorDetails> {
        match self.root_cause() {
            Error::Exchange(details) => Some(details),
            _ => None,
        }
    }

    /// Returns the authentication message (penetrates Context layers).
    #[must_use]
    pub fn as_authentication(&self) -> Option<&str> {
        match self.root_cause() {
            Error::Authentication(msg) => Some(msg.as_ref()),
            _ => None,
        }
    }
}
