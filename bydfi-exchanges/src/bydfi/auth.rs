//! BYDFi API authentication.
//!
//! Private requests carry three headers:
//! - `X-API-KEY`: API key
//! - `X-API-TIMESTAMP`: Unix timestamp in milliseconds
//! - `X-API-SIGNATURE`: hex-encoded HMAC-SHA256 of the signing message
//!
//! The signing message is `api_key + timestamp`, followed by the canonical
//! parameter string for GET requests and by the JSON body for POST requests.

use bydfi_core::adapter::Params;
use bydfi_core::credentials::{Credentials, SecretString};
use bydfi_core::transport::{HttpMethod, HttpRequest};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

/// API key header.
pub const HEADER_API_KEY: &str = "X-API-KEY";
/// Timestamp header.
pub const HEADER_TIMESTAMP: &str = "X-API-TIMESTAMP";
/// Signature header.
pub const HEADER_SIGNATURE: &str = "X-API-SIGNATURE";
/// Content type header.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// BYDFi request signer.
///
/// Credentials are zeroed from memory when dropped.
#[derive(Debug, Clone)]
pub struct BydfiAuth {
    api_key: SecretString,
    secret: SecretString,
}

impl BydfiAuth {
    /// Creates a signer.
    ///
    /// # Example
    ///
    /// ```
    /// use bydfi_exchanges::bydfi::BydfiAuth;
    ///
    /// let auth = BydfiAuth::new("api-key", "secret");
    /// assert_eq!(auth.api_key(), "api-key");
    /// ```
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            secret: SecretString::new(secret),
        }
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Builds the signing message.
    ///
    /// `canonical` is appended only for GET; `body` is appended whenever present.
    pub fn build_message(
        &self,
        method: HttpMethod,
        timestamp: i64,
        canonical: &str,
        body: Option<&str>,
    ) -> String {
        let mut message = format!("{}{}", self.api_key.expose_secret(), timestamp);
        if method == HttpMethod::Get {
            message.push_str(canonical);
        }
        if let Some(body) = body {
            message.push_str(body);
        }
        message
    }

    /// Signs `message` with HMAC-SHA256 and returns lower-case hex.
    ///
    /// ```
    /// use bydfi_exchanges::bydfi::BydfiAuth;
    ///
    /// let auth = BydfiAuth::new("key", "secret");
    /// let signature = auth.sign("key1700000000000symbol=BTC-USDT");
    /// assert_eq!(signature.len(), 64);
    /// assert_eq!(signature, auth.sign("key1700000000000symbol=BTC-USDT"));
    /// ```
    pub fn sign(&self, message: &str) -> String {
        type HmacSha256 = Hmac<Sha256>;

        // HMAC accepts keys of any length
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret_bytes())
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Adds the authentication headers to `request`.
    ///
    /// `params` are the native request parameters; the body, if any, is read
    /// from the request itself.
    pub fn sign_request(&self, request: &mut HttpRequest, params: &Params, timestamp: i64) {
        let canonical = canonical_params(params);
        let message = self.build_message(
            request.method,
            timestamp,
            &canonical,
            request.body.as_deref(),
        );
        let signature = self.sign(&message);

        request.set_header(HEADER_CONTENT_TYPE, "application/json");
        request.set_header(HEADER_API_KEY, self.api_key.expose_secret());
        request.set_header(HEADER_TIMESTAMP, timestamp.to_string());
        request.set_header(HEADER_SIGNATURE, signature);
    }
}

impl From<Credentials> for BydfiAuth {
    fn from(credentials: Credentials) -> Self {
        Self {
            api_key: credentials.api_key,
            secret: credentials.secret,
        }
    }
}

/// Renders a parameter value the way it appears on the wire.
pub fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Percent-encodes every `key=value` pair, sorts the fragments and joins them with `&`.
///
/// ```
/// use bydfi_exchanges::bydfi::auth::canonical_params;
/// use std::collections::BTreeMap;
/// use serde_json::json;
///
/// let mut params = BTreeMap::new();
/// params.insert("symbol".to_string(), json!("BTC-USDT"));
/// params.insert("limit".to_string(), json!(5));
/// assert_eq!(canonical_params(&params), "limit=5&symbol=BTC-USDT");
/// ```
pub fn canonical_params(params: &Params) -> String {
    let mut fragments: Vec<String> = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&param_value(value))
            )
        })
        .collect();
    fragments.sort();
    fragments.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: &str = "8Rfw25q1uta4P8x0823KOrAQIXfWhYEh";
    const SECRET: &str = "0XUrovUtTQxfdjC6XSZeTXKU6q18UgI6dnvKf69hOru5wsmXUhWE6HXAnA7Phdck";

    fn params(pairs: &[(&str, Value)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_canonical_params_sorted_and_encoded() {
        let p = params(&[
            ("symbol", json!("BTC-USDT")),
            ("a-b", json!(1)),
            ("a", json!("x y")),
        ]);
        assert_eq!(canonical_params(&p), "a-b=1&a=x%20y&symbol=BTC-USDT");
        assert_eq!(canonical_params(&Params::new()), "");
    }

    #[test]
    fn test_message_get_includes_params() {
        let auth = BydfiAuth::new(KEY, SECRET);
        let message = auth.build_message(HttpMethod::Get, 1700000000000, "symbol=BTC-USDT", None);
        assert_eq!(message, format!("{KEY}1700000000000symbol=BTC-USDT"));
    }

    #[test]
    fn test_message_post_uses_body_only() {
        let auth = BydfiAuth::new(KEY, SECRET);
        let message = auth.build_message(
            HttpMethod::Post,
            1700000000000,
            "symbol=BTC-USDT",
            Some(r#"{"symbol":"BTC-USDT"}"#),
        );
        assert_eq!(message, format!(r#"{KEY}1700000000000{{"symbol":"BTC-USDT"}}"#));
    }

    #[test]
    fn test_sign_known_vector() {
        // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
        let auth = BydfiAuth::new("ignored", "key");
        assert_eq!(
            auth.sign("The quick brown fox jumps over the lazy dog"),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_sign_request_headers() {
        let auth = BydfiAuth::new(KEY, SECRET);
        let p = params(&[("symbol", json!("BTC-USDT"))]);
        let mut request = HttpRequest::new(HttpMethod::Get, "https://x/api/v1/account/assets");
        auth.sign_request(&mut request, &p, 1700000000000);

        assert_eq!(request.header(HEADER_API_KEY), Some(KEY));
        assert_eq!(request.header(HEADER_TIMESTAMP), Some("1700000000000"));
        assert_eq!(request.header(HEADER_CONTENT_TYPE), Some("application/json"));
        let expected = auth.sign(&format!("{KEY}1700000000000symbol=BTC-USDT"));
        assert_eq!(request.header(HEADER_SIGNATURE), Some(expected.as_str()));
    }

    #[test]
    fn test_signature_changes_with_each_input() {
        let auth = BydfiAuth::new(KEY, SECRET);
        let base = auth.sign(&auth.build_message(HttpMethod::Get, 1, "a=1", None));
        assert_ne!(base, auth.sign(&auth.build_message(HttpMethod::Get, 2, "a=1", None)));
        assert_ne!(base, auth.sign(&auth.build_message(HttpMethod::Get, 1, "a=2", None)));
        assert_ne!(base, BydfiAuth::new("other", SECRET).sign(&auth.build_message(HttpMethod::Get, 1, "a=1", None)));
        assert_ne!(base, BydfiAuth::new(KEY, "other").sign(&auth.build_message(HttpMethod::Get, 1, "a=1", None)));
    }

    #[test]
    fn test_param_value_rendering() {
        assert_eq!(param_value(&json!("x")), "x");
        assert_eq!(param_value(&json!(5)), "5");
        assert_eq!(param_value(&json!(true)), "true");
        assert_eq!(param_value(&Value::Null), "");
    }
}
