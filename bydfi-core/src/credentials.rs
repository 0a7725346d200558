//! API credentials with automatic memory zeroization.
//!
//! Key and secret are wrapped in [`SecretString`], which zeroes its buffer on
//! drop and never prints its content through `Debug` or `Display`.
//!
//! ```rust
//! use bydfi_core::credentials::{Credentials, SecretString};
//!
//! let creds = Credentials::new("my-api-key", "my-secret");
//! assert_eq!(creds.api_key.expose_secret(), "my-api-key");
//! assert_eq!(format!("{:?}", creds.secret), "[REDACTED]");
//! ```

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// A string that is zeroed when dropped and redacted when printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value. Use it immediately; don't store the reference.
    #[inline]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns the secret as bytes, e.g. as an HMAC key.
    #[inline]
    pub fn expose_secret_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns true if the secret string is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// API key plus shared HMAC secret.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// Public API key, sent in clear in the `X-API-KEY` header.
    pub api_key: SecretString,
    /// Shared secret used as the HMAC key. Never transmitted.
    pub secret: SecretString,
}

impl Credentials {
    /// Creates credentials from a key and a secret.
    pub fn new(api_key: impl Into<SecretString>, secret: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
        }
    }

    /// Builds credentials from optional parts.
    ///
    /// Returns an authentication error naming the first missing or empty part.
    pub fn from_parts(
        api_key: Option<&SecretString>,
        secret: Option<&SecretString>,
    ) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::authentication("apiKey credential is required"))?;
        let secret = secret
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::authentication("secret credential is required"))?;
        Ok(Self {
            api_key: api_key.clone(),
            secret: secret.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redacted() {
        let secret = SecretString::new("my-api-key");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(format!("{secret}"), "[REDACTED]");
        assert_eq!(secret.expose_secret(), "my-api-key");
    }

    #[test]
    fn test_credentials_debug_does_not_leak() {
        let creds = Credentials::new("key", "super-secret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("key\""));
    }

    #[test]
    fn test_from_parts_requires_both() {
        let key = SecretString::new("k");
        let secret = SecretString::new("s");
        assert!(Credentials::from_parts(Some(&key), Some(&secret)).is_ok());

        let err = Credentials::from_parts(Some(&key), None).unwrap_err();
        assert!(err.as_authentication().unwrap().contains("secret"));

        let empty = SecretString::new("");
        let err = Credentials::from_parts(Some(&empty), Some(&secret)).unwrap_err();
        assert!(err.as_authentication().unwrap().contains("apiKey"));
    }
}
