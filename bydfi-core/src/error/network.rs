//! Network-related error types.

use std::error::Error as StdError;
use thiserror::Error;

/// Transport failures, without exposing `reqwest` types in the public API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NetworkError {
    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Opaque transport error.
    #[error("Transport error")]
    Transport(#[source] Box<dyn StdError + Send + Sync + 'static>),
}
