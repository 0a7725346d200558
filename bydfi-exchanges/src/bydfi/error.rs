//! BYDFi response classification.
//!
//! Every response carries an envelope `{code, data, msg|key}` with `200` as
//! the success sentinel. Anything else is mapped to a typed error by the
//! first matching rule:
//!
//! 1. broad substring match on `key` (falling back to `msg`)
//! 2. HTTP status
//! 3. business code
//! 4. generic [`Error::Exchange`]
//!
//! Each error message is `"bydfi " + raw body`.

use bydfi_core::error::{Error, Result};
use serde_json::Value;

/// Business code of a successful response.
pub const SUCCESS_CODE: i64 = 200;

/// Message fragments that mark an order the exchange refused to accept.
const BROAD_INVALID_ORDER: &[&str] = &[
    "ORDER_PRICE_MUST_GREETER_ZERO",
    "ORDER_POSSIBLE_LEAD_TO_ACCOUNT_LIQUIDATED",
    "ORDER_WITH_THIS_PRICE_CANNOT_REDUCE_POSITION_ONLY",
];

/// Known BYDFi business codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BydfiErrorCode {
    /// Too many requests (403)
    RateLimited,
    /// Invalid parameter (10001)
    InvalidParameter,
    /// API key signature rejected (20006)
    SignatureError,
    /// Request parameter error (20016)
    RequestParameterError,
    /// Unknown code
    Unknown(i64),
}

impl BydfiErrorCode {
    /// Parses a business code.
    pub fn from_code(code: i64) -> Self {
        match code {
            403 => Self::RateLimited,
            10001 => Self::InvalidParameter,
            20006 => Self::SignatureError,
            20016 => Self::RequestParameterError,
            n => Self::Unknown(n),
        }
    }

    /// Returns the numeric code.
    pub fn code(self) -> i64 {
        match self {
            Self::RateLimited => 403,
            Self::InvalidParameter => 10001,
            Self::SignatureError => 20006,
            Self::RequestParameterError => 20016,
            Self::Unknown(n) => n,
        }
    }
}

/// Reads the business code, accepting numbers and numeric strings.
pub fn response_code(body: &Value) -> Option<i64> {
    let code = body.get("code")?;
    code.as_i64()
        .or_else(|| code.as_str().and_then(|s| s.trim().parse().ok()))
}

fn response_message(body: &Value) -> Option<&str> {
    ["key", "msg"]
        .iter()
        .find_map(|field| body.get(*field).and_then(Value::as_str))
}

fn raw_body(body: &Value) -> String {
    match body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns `true` when `body` is a successful envelope.
///
/// Only an explicit `code` of `200` counts. A body with no readable code,
/// such as a gateway page served with status 200, is a failure.
pub fn is_success(body: &Value) -> bool {
    response_code(body) == Some(SUCCESS_CODE)
}

/// Maps a response to `Ok(())` or to a typed error.
///
/// # Example
///
/// ```rust
/// use bydfi_exchanges::bydfi::error::check_response;
/// use serde_json::json;
///
/// assert!(check_response(200, &json!({"code": 200, "data": []})).is_ok());
/// assert!(check_response(200, &json!({"code": 403})).unwrap_err().is_rate_limit());
/// assert!(check_response(200, &json!({"code": 10001})).unwrap_err().is_bad_request());
/// ```
pub fn check_response(status: u16, body: &Value) -> Result<()> {
    if is_success(body) {
        return Ok(());
    }
    Err(classify(status, body))
}

/// Classifies a failed response. Always returns an error.
pub fn classify(status: u16, body: &Value) -> Error {
    let feedback = format!("bydfi {}", raw_body(body));

    if let Some(message) = response_message(body)
        && BROAD_INVALID_ORDER
            .iter()
            .any(|fragment| message.contains(fragment))
    {
        return Error::invalid_order(feedback);
    }

    if status == 403 {
        return Error::rate_limit(feedback, None);
    }

    let code = response_code(body);
    match code.map(BydfiErrorCode::from_code) {
        Some(BydfiErrorCode::RateLimited) => Error::rate_limit(feedback, None),
        Some(BydfiErrorCode::InvalidParameter | BydfiErrorCode::RequestParameterError) => {
            Error::bad_request(feedback)
        }
        Some(BydfiErrorCode::SignatureError) => Error::authentication(feedback),
        Some(BydfiErrorCode::Unknown(_)) | None => {
            let code = code.map_or_else(|| status.to_string(), |c| c.to_string());
            Error::exchange_with_data(code, feedback, body.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        assert!(check_response(200, &json!({"code": 200, "data": {}})).is_ok());
        assert!(check_response(200, &json!({"code": "200"})).is_ok());
    }

    #[test]
    fn test_missing_code_is_failure() {
        let err = check_response(502, &json!("Bad Gateway")).unwrap_err();
        let details = err.as_exchange().unwrap();
        assert_eq!(details.code, "502");
        assert_eq!(details.message, "bydfi Bad Gateway");
    }

    #[test]
    fn test_envelope_without_code_on_200_is_rejected() {
        let body = json!({"data": []});
        let err = check_response(200, &body).unwrap_err();
        let details = err.as_exchange().unwrap();
        assert_eq!(details.code, "200");
        assert_eq!(details.message, r#"bydfi {"data":[]}"#);
        assert_eq!(details.data.as_ref(), Some(&body));
    }

    #[test]
    fn test_html_page_on_200_is_rejected() {
        let err = check_response(200, &json!("<html>maintenance</html>")).unwrap_err();
        let details = err.as_exchange().unwrap();
        assert_eq!(details.message, "bydfi <html>maintenance</html>");
    }

    #[test]
    fn test_non_numeric_code_is_rejected() {
        assert!(check_response(200, &json!({"code": "OK", "data": []})).is_err());
        assert!(check_response(204, &json!("")).is_err());
    }

    #[test]
    fn test_business_code_table() {
        assert!(check_response(200, &json!({"code": 403})).unwrap_err().is_rate_limit());
        assert!(check_response(200, &json!({"code": 10001})).unwrap_err().is_bad_request());
        assert!(check_response(200, &json!({"code": 20016})).unwrap_err().is_bad_request());
        assert!(
            check_response(200, &json!({"code": 20006}))
                .unwrap_err()
                .as_authentication()
                .is_some()
        );
    }

    #[test]
    fn test_http_status_table() {
        let err = check_response(403, &json!({"code": 500, "msg": "forbidden"})).unwrap_err();
        assert!(err.is_rate_limit());
    }

    #[test]
    fn test_broad_match_wins() {
        let body = json!({"code": 10001, "msg": "ORDER_PRICE_MUST_GREETER_ZERO: price 0"});
        assert!(check_response(403, &body).unwrap_err().is_invalid_order());

        let body = json!({"code": 1, "key": "ORDER_POSSIBLE_LEAD_TO_ACCOUNT_LIQUIDATED"});
        assert!(check_response(200, &body).unwrap_err().is_invalid_order());
    }

    #[test]
    fn test_key_preferred_over_msg() {
        let body = json!({
            "code": 1,
            "key": "SOMETHING_ELSE",
            "msg": "ORDER_PRICE_MUST_GREETER_ZERO"
        });
        assert!(!check_response(200, &body).unwrap_err().is_invalid_order());
    }

    #[test]
    fn test_fallback_keeps_raw_body() {
        let body = json!({"code": 99999, "msg": "boom"});
        let err = check_response(200, &body).unwrap_err();
        let details = err.as_exchange().unwrap();
        assert_eq!(details.code, "99999");
        assert!(details.message.starts_with("bydfi {"));
        assert!(details.message.contains("boom"));
        assert_eq!(details.data.as_ref(), Some(&body));
    }

    #[test]
    fn test_error_message_contains_body() {
        let err = check_response(200, &json!({"code": 10001, "msg": "bad"})).unwrap_err();
        assert!(err.to_string().contains("bydfi"));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_error_code_round_trip() {
        for code in [403, 10001, 20006, 20016, 42] {
            assert_eq!(BydfiErrorCode::from_code(code).code(), code);
        }
    }
}
