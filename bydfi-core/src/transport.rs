//! HTTP transport seam.
//!
//! Adapters produce an [`HttpRequest`] and hand it to an [`HttpTransport`].
//! The transport never interprets HTTP status codes; the status and decoded
//! body are returned as an [`HttpResponse`] so that the exchange's error
//! classifier sees every response, including 4xx and 5xx ones.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::Mutex;
use tracing::{debug, error, instrument};

use crate::config::ExchangeConfig;
use crate::error::{Error, NetworkError, Result};

const BODY_PREVIEW_SIZE: usize = 200;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// DELETE request
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Absolute URL including the query string
    pub url: String,
    /// Request headers
    pub headers: BTreeMap<String, String>,
    /// Serialized JSON body
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request without headers or body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any previous value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Returns a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Raw response: HTTP status plus decoded body.
///
/// Bodies that are not valid JSON are kept as [`Value::String`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded body
    pub body: Value,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over the wire.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Sends `request` and returns the status and body.
    ///
    /// Only transport failures (connect, timeout, unreadable body) are errors.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    verbose: bool,
}

impl ReqwestTransport {
    /// Builds a client honouring the timeouts, user agent and proxy of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or the client cannot be built.
    pub fn new(config: &ExchangeConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        if let Some(proxy_config) = &config.proxy {
            let mut proxy = reqwest::Proxy::all(&proxy_config.url)
                .map_err(|e| Error::network(format!("Invalid proxy URL: {e}")))?;
            if let (Some(username), Some(password)) =
                (&proxy_config.username, &proxy_config.password)
            {
                proxy = proxy.basic_auth(username, password);
            }
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            verbose: config.verbose,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(name = "http_send", skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            if self.verbose {
                debug!(body = %body, "HTTP request with body");
            }
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "HTTP request send failed");
            Error::from(e)
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            Error::Network(Box::new(NetworkError::Body(e.to_string())))
        })?;

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        let preview_len = bytes.len().min(BODY_PREVIEW_SIZE);
        debug!(
            status,
            body_length = bytes.len(),
            body_preview = %String::from_utf8_lossy(&bytes[..preview_len]),
            "HTTP response received"
        );

        Ok(HttpResponse { status, body })
    }
}

/// In-memory [`HttpTransport`] that records every request and replays
/// queued responses.
///
/// With the queue empty it answers `200 {"code":200,"data":[]}`.
///
/// ```rust
/// use bydfi_core::transport::{HttpMethod, HttpRequest, HttpTransport, RecordingTransport};
/// use serde_json::json;
///
/// # async fn example() -> bydfi_core::Result<()> {
/// let transport = RecordingTransport::new();
/// transport.push_response(403, json!({"code": 403}));
/// let response = transport.send(HttpRequest::new(HttpMethod::Get, "http://x/y")).await?;
/// assert_eq!(response.status, 403);
/// assert_eq!(transport.requests().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl RecordingTransport {
    /// Creates a transport with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for the next unanswered request.
    pub fn push_response(&self, status: u16, body: Value) {
        let mut queue = match self.responses.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        queue.push_back(HttpResponse::new(status, body));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        match self.requests.lock() {
            Ok(mut guard) => guard.push(request),
            Err(poisoned) => poisoned.into_inner().push(request),
        }
        let next = match self.responses.lock() {
            Ok(mut guard) => guard.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        Ok(next.unwrap_or_else(|| {
            HttpResponse::new(200, serde_json::json!({"code": 200, "data": []}))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(Method::from(HttpMethod::Post), Method::POST);
    }

    #[test]
    fn test_request_headers() {
        let mut request = HttpRequest::new(HttpMethod::Get, "https://example.com/x");
        request.set_header("X-API-KEY", "k");
        request.set_header("X-API-KEY", "k2");
        assert_eq!(request.header("X-API-KEY"), Some("k2"));
        assert_eq!(request.header("missing"), None);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_response_success() {
        assert!(HttpResponse::new(200, json!({})).is_success());
        assert!(!HttpResponse::new(403, json!({})).is_success());
    }

    #[test]
    fn test_reqwest_transport_builds() {
        let config = ExchangeConfig::default();
        assert!(ReqwestTransport::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_recording_transport_replays_in_order() {
        let transport = RecordingTransport::new();
        transport.push_response(500, json!("down"));
        let first = transport
            .send(HttpRequest::new(HttpMethod::Get, "http://a/1"))
            .await
            .unwrap();
        let second = transport
            .send(HttpRequest::new(HttpMethod::Post, "http://a/2"))
            .await
            .unwrap();
        assert_eq!(first.status, 500);
        assert_eq!(second.status, 200);
        assert_eq!(second.body["code"], 200);
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(transport.last_request().unwrap().url, "http://a/2");
    }
}
