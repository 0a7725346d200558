//! BYDFi exchange builder pattern implementation.
//!
//! Provides a fluent API for constructing BYDFi exchange instances with
//! type-safe configuration options.

use std::sync::Arc;
use std::time::Duration;

use super::params::ContractType;
use super::{Bydfi, BydfiOptions};
use bydfi_core::config::ProxyConfig;
use bydfi_core::time::{Clock, SystemClock};
use bydfi_core::transport::{HttpTransport, ReqwestTransport};
use bydfi_core::{ExchangeConfig, Result, SecretString};
use rust_decimal::Decimal;

/// Builder for creating BYDFi exchange instances.
///
/// Without an explicit transport the builder creates a [`ReqwestTransport`]
/// from the configured timeouts, user agent and proxy.
///
/// # Example
///
/// ```no_run
/// use bydfi_exchanges::bydfi::BydfiBuilder;
/// use std::time::Duration;
///
/// let bydfi = BydfiBuilder::new()
///     .api_key("your-api-key")
///     .secret("your-secret")
///     .sandbox(true)
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct BydfiBuilder {
    /// Exchange configuration
    config: ExchangeConfig,
    /// BYDFi-specific options
    options: BydfiOptions,
    transport: Option<Arc<dyn HttpTransport>>,
    clock: Option<Arc<dyn Clock>>,
}

impl Default for BydfiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BydfiBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig {
                id: "bydfi".to_string(),
                name: "BYDFi".to_string(),
                ..Default::default()
            },
            options: BydfiOptions::default(),
            transport: None,
            clock: None,
        }
    }

    /// Starts from an existing configuration, e.g. [`ExchangeConfig::from_env`].
    pub fn from_config(config: ExchangeConfig) -> Self {
        let options = BydfiOptions {
            testnet: config.sandbox,
            ..BydfiOptions::default()
        };
        Self {
            config,
            options,
            transport: None,
            clock: None,
        }
    }

    /// Sets the API key for authentication.
    ///
    /// # Arguments
    ///
    /// * `key` - The API key string.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(key));
        self
    }

    /// Sets the API secret for authentication.
    ///
    /// # Arguments
    ///
    /// * `secret` - The API secret string.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = Some(SecretString::new(secret));
        self
    }

    /// Enables or disables sandbox/testnet mode.
    ///
    /// # Arguments
    ///
    /// * `enabled` - Whether to enable sandbox mode.
    pub fn sandbox(mut self, enabled: bool) -> Self {
        self.config.sandbox = enabled;
        self.options.testnet = enabled;
        self
    }

    /// Sets the total request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the TCP connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Routes an API section (`"rest"`) to another base URL.
    ///
    /// # Arguments
    ///
    /// * `section` - API section name.
    /// * `url` - Base URL replacing the production or testnet host.
    pub fn url_override(mut self, section: impl Into<String>, url: impl Into<String>) -> Self {
        self.config.url_overrides.insert(section.into(), url.into());
        self
    }

    /// Sets the default wallet, e.g. `W001`.
    pub fn wallet(mut self, wallet: impl Into<String>) -> Self {
        self.options.default_wallet = wallet.into();
        self
    }

    /// Sets the default contract family.
    pub fn contract_type(mut self, contract_type: ContractType) -> Self {
        self.options.default_contract_type = contract_type;
        self
    }

    /// Sets the slippage applied to market orders given a reference price.
    pub fn slippage(mut self, slippage: Decimal) -> Self {
        self.options.default_slippage = slippage;
        self
    }

    /// Sets the broker id attached to new orders.
    pub fn broker_id(mut self, broker_id: impl Into<String>) -> Self {
        self.options.broker_id = broker_id.into();
        self
    }

    /// Sets the HTTP proxy.
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Enables or disables verbose body logging.
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.config.verbose = enabled;
        self
    }

    /// Replaces the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the clock used for signing timestamps.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Builds the BYDFi exchange instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP client cannot be created.
    pub fn build(self) -> Result<Bydfi> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.config)?),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Ok(Bydfi::from_parts(self.config, self.options, transport, clock))
    }
}
