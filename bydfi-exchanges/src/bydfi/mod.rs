//! BYDFi exchange implementation.
//!
//! Supports USDT-margined perpetual swaps over the v1 REST API with
//! HMAC-SHA256 authentication. Every operation goes through
//! [`bydfi_core::adapter::dispatch`]: [`Bydfi`] supplies request building,
//! signing and error classification, and the transport does the I/O.

use std::collections::HashMap;
use std::sync::Arc;

use bydfi_core::adapter::{EndpointSpec, ExchangeAdapter, Params, dispatch};
use bydfi_core::error::{Error, Result};
use bydfi_core::market_cache::{MarketContext, MarketStore};
use bydfi_core::time::Clock;
use bydfi_core::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use bydfi_core::types::Market;
use bydfi_core::ExchangeConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tracing::trace;

pub mod auth;
pub mod builder;
pub mod endpoints;
pub mod error;
pub mod params;
pub mod parser;
pub mod request;
pub mod rest;
pub mod symbol;

pub use auth::BydfiAuth;
pub use builder::BydfiBuilder;
pub use endpoints::BydfiEndpoint;
pub use error::{BydfiErrorCode, check_response, classify};
pub use params::{
    AccountScope, BalanceParams, CancelOrderParams, ContractType, CreateOrderParams,
    EditOrderParams, FundingHistoryParams, LeverageSetting, OhlcvParams, OrderEdit,
    OrderQueryParams, TransferHistoryParams, WorkingType,
};

/// Candle intervals and their native spelling.
pub const TIMEFRAMES: [(&str, &str); 12] = [
    ("1m", "1"),
    ("5m", "5"),
    ("15m", "15"),
    ("30m", "30"),
    ("1h", "60"),
    ("2h", "120"),
    ("4h", "240"),
    ("6h", "360"),
    ("12h", "720"),
    ("1d", "D"),
    ("1w", "W"),
    ("1M", "M"),
];

/// BYDFi exchange structure.
#[derive(Debug)]
pub struct Bydfi {
    config: ExchangeConfig,
    options: BydfiOptions,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    markets: MarketStore,
}

/// BYDFi-specific options.
///
/// # Example
///
/// ```rust
/// use bydfi_exchanges::bydfi::BydfiOptions;
///
/// let options = BydfiOptions {
///     default_wallet: "W002".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(options.broker_id, "6956");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BydfiOptions {
    /// Wallet used when an operation does not name one.
    pub default_wallet: String,
    /// Contract family used when an operation does not name one.
    pub default_contract_type: ContractType,
    /// Price offset applied to market orders given a reference price.
    pub default_slippage: Decimal,
    /// Broker id attached to new orders.
    pub broker_id: String,
    /// Enables testnet environment.
    pub testnet: bool,
}

impl Default for BydfiOptions {
    fn default() -> Self {
        Self {
            default_wallet: "W001".to_string(),
            default_contract_type: ContractType::Future,
            default_slippage: dec!(0.05),
            broker_id: "6956".to_string(),
            testnet: false,
        }
    }
}

/// Taker and maker fee rates of the swap market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapFees {
    /// Taker rate
    pub taker: Decimal,
    /// Maker rate
    pub maker: Decimal,
}

impl Bydfi {
    /// Creates a new BYDFi instance using the builder pattern.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bydfi_exchanges::bydfi::Bydfi;
    ///
    /// let bydfi = Bydfi::builder()
    ///     .api_key("your-api-key")
    ///     .secret("your-secret")
    ///     .sandbox(true)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> BydfiBuilder {
        BydfiBuilder::new()
    }

    /// Assembles an instance from its parts. Used by [`BydfiBuilder`].
    pub fn from_parts(
        config: ExchangeConfig,
        options: BydfiOptions,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            options,
            transport,
            clock,
            markets: MarketStore::new(),
        }
    }

    /// Returns the exchange configuration.
    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Returns the BYDFi options.
    pub fn options(&self) -> &BydfiOptions {
        &self.options
    }

    /// Returns the exchange name.
    pub fn name(&self) -> &str {
        "BYDFi"
    }

    /// Returns the API version.
    pub fn version(&self) -> &str {
        "v1"
    }

    /// Returns the rate limit in requests per second.
    pub fn rate_limit(&self) -> u32 {
        20
    }

    /// Returns `true` if sandbox/testnet mode is enabled.
    pub fn is_sandbox(&self) -> bool {
        self.config.sandbox || self.options.testnet
    }

    /// Returns the supported timeframes.
    pub fn timeframes(&self) -> HashMap<String, String> {
        TIMEFRAMES
            .iter()
            .map(|(unified, native)| ((*unified).to_string(), (*native).to_string()))
            .collect()
    }

    /// Returns the swap fee schedule.
    pub fn fees(&self) -> SwapFees {
        SwapFees {
            taker: dec!(0.0005),
            maker: dec!(0.0002),
        }
    }

    /// Returns the API URLs, honouring a `"rest"` override.
    pub fn urls(&self) -> BydfiUrls {
        let mut urls = if self.is_sandbox() {
            BydfiUrls::testnet()
        } else {
            BydfiUrls::production()
        };
        if let Some(rest) = self.config.url_override("rest") {
            urls.rest = rest.to_string();
        }
        urls
    }

    /// Current snapshot of the market cache.
    pub fn markets(&self) -> MarketContext {
        self.markets.context()
    }

    /// Returns the market for a canonical symbol from the loaded snapshot.
    pub fn market(&self, symbol: &str) -> Result<Arc<Market>> {
        self.markets.context().market(symbol)
    }

    /// Loads the market listing unless already loaded.
    ///
    /// Concurrent callers share one fetch; with `reload` set the listing is
    /// fetched again.
    pub async fn load_markets(&self, reload: bool) -> Result<MarketContext> {
        self.markets
            .load_with(reload, || self.fetch_markets())
            .await
    }

    pub(crate) fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub(crate) fn wallet(&self, scope: &AccountScope) -> String {
        scope
            .wallet
            .clone()
            .unwrap_or_else(|| self.options.default_wallet.clone())
    }

    pub(crate) fn contract_type(&self, scope: &AccountScope) -> ContractType {
        scope
            .contract_type
            .unwrap_or(self.options.default_contract_type)
    }

    /// Dispatches `params` to `endpoint` and returns the raw response body.
    pub async fn request(&self, endpoint: BydfiEndpoint, params: Params) -> Result<Value> {
        dispatch(self, &endpoint.spec(), params).await
    }
}

/// Returns the native interval of a unified timeframe.
///
/// # Errors
///
/// [`Error::BadRequest`] for intervals BYDFi does not offer.
pub fn timeframe_id(timeframe: &str) -> Result<&'static str> {
    TIMEFRAMES
        .iter()
        .find(|(unified, _)| *unified == timeframe)
        .map(|(_, native)| *native)
        .ok_or_else(|| Error::bad_request(format!("unsupported timeframe {timeframe}")))
}

impl ExchangeAdapter for Bydfi {
    fn id(&self) -> &str {
        "bydfi"
    }

    fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    fn build_request(&self, endpoint: &EndpointSpec, params: &Params) -> Result<HttpRequest> {
        let base = self.urls().rest;
        let mut url = format!("{}/{}", base.trim_end_matches('/'), endpoint.path);

        let mut request = match endpoint.method {
            HttpMethod::Post => {
                let mut request = HttpRequest::new(endpoint.method, url);
                request.body = Some(serde_json::to_string(params)?);
                request
            }
            HttpMethod::Get | HttpMethod::Delete => {
                if !params.is_empty() {
                    url.push('?');
                    url.push_str(&auth::canonical_params(params));
                }
                HttpRequest::new(endpoint.method, url)
            }
        };
        request.set_header(auth::HEADER_CONTENT_TYPE, "application/json");
        Ok(request)
    }

    fn sign(&self, request: &mut HttpRequest, _endpoint: &EndpointSpec, params: &Params) -> Result<()> {
        let auth = BydfiAuth::from(self.config.credentials()?);
        let timestamp = self.clock.now_ms();
        trace!(timestamp, "signing request");
        auth.sign_request(request, params, timestamp);
        Ok(())
    }

    fn classify_error(&self, response: &HttpResponse) -> Result<()> {
        check_response(response.status, &response.body)
    }
}

/// BYDFi API URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BydfiUrls {
    /// REST API base URL.
    pub rest: String,
}

impl BydfiUrls {
    /// Returns production environment URLs.
    pub fn production() -> Self {
        Self {
            rest: "https://api.bydtms.com/api".to_string(),
        }
    }

    /// Returns testnet environment URLs.
    pub fn testnet() -> Self {
        Self {
            rest: "https://testnet.omni.bydfi.exchange/api".to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use bydfi_core::time::FixedClock;
    use bydfi_core::transport::RecordingTransport;
    use serde_json::json;

    pub const NOW: i64 = 1_700_000_000_000;

    pub fn listing() -> Value {
        json!({
            "code": 200,
            "data": [
                {
                    "symbol": "BTC-USDT", "baseAsset": "BTC", "marginAsset": "USDT",
                    "status": "NORMAL", "pricePrecision": "0.1", "volumePrecision": "0.001",
                    "minOrderSize": "0.001", "maxLeverageLevel": 125
                },
                {
                    "symbol": "ETH-USDT", "baseAsset": "ETH", "marginAsset": "USDT",
                    "status": "NORMAL", "pricePrecision": "0.01", "volumePrecision": "0.01"
                }
            ]
        })
    }

    pub fn exchange(transport: Arc<RecordingTransport>) -> Bydfi {
        Bydfi::builder()
            .api_key("test-key")
            .secret("test-secret")
            .url_override("rest", "http://bydfi.test/api")
            .transport(transport)
            .clock(Arc::new(FixedClock::new(NOW)))
            .build()
            .unwrap()
    }

    /// An exchange with markets already loaded; the listing request is the
    /// first recorded request.
    pub async fn loaded_exchange() -> (Bydfi, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(200, listing());
        let bydfi = exchange(Arc::clone(&transport));
        bydfi.load_markets(false).await.unwrap();
        (bydfi, transport)
    }
}
