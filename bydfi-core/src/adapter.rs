//! The request pipeline shared by every exchange operation.
//!
//! An operation names an [`EndpointSpec`] and a set of native parameters;
//! [`dispatch`] then runs build, sign (private endpoints only), send and
//! error classification, in that order. Validation failures raised while
//! building abort before anything is sent.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Native request parameters, ordered by key.
pub type Params = BTreeMap<String, Value>;

/// Whether an endpoint needs signed credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Unauthenticated
    Public,
    /// Signed with the account credentials
    Private,
}

/// Method, path and access level of one REST endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the REST base URL
    pub path: &'static str,
    /// Access level
    pub access: Access,
}

impl EndpointSpec {
    /// Public endpoint.
    pub const fn public(method: HttpMethod, path: &'static str) -> Self {
        Self {
            method,
            path,
            access: Access::Public,
        }
    }

    /// Private endpoint.
    pub const fn private(method: HttpMethod, path: &'static str) -> Self {
        Self {
            method,
            path,
            access: Access::Private,
        }
    }

    /// `true` for signed endpoints.
    pub const fn is_private(&self) -> bool {
        matches!(self.access, Access::Private)
    }
}

/// Exchange-specific stages of the pipeline.
pub trait ExchangeAdapter: Send + Sync {
    /// Exchange identifier.
    fn id(&self) -> &str;

    /// Transport used for sending.
    fn transport(&self) -> &dyn HttpTransport;

    /// Builds the unsigned request for `endpoint`.
    fn build_request(&self, endpoint: &EndpointSpec, params: &Params) -> Result<HttpRequest>;

    /// Adds authentication headers to `request`.
    fn sign(&self, request: &mut HttpRequest, endpoint: &EndpointSpec, params: &Params) -> Result<()>;

    /// Maps a non-success response to an error; `Ok(())` lets it through.
    fn classify_error(&self, response: &HttpResponse) -> Result<()>;
}

/// Builds, signs, sends and classifies one request, returning the raw body.
#[instrument(
    name = "dispatch",
    skip_all,
    fields(exchange = adapter.id(), method = %endpoint.method, path = endpoint.path)
)]
pub async fn dispatch<A>(adapter: &A, endpoint: &EndpointSpec, params: Params) -> Result<Value>
where
    A: ExchangeAdapter + ?Sized,
{
    let mut request = adapter.build_request(endpoint, &params)?;
    if endpoint.is_private() {
        adapter.sign(&mut request, endpoint, &params)?;
    }
    debug!(url = %request.url, "dispatching request");

    let response = adapter.transport().send(request).await?;
    if let Err(err) = adapter.classify_error(&response) {
        warn!(status = response.status, error = %err, "request rejected");
        return Err(err);
    }
    Ok(response.body)
}
