//! Exchange configuration and its fluent builder.

use crate::credentials::{Credentials, SecretString};
use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Proxy configuration for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy URL (e.g., "http://127.0.0.1:8080").
    pub url: String,
    /// Optional username for authentication.
    pub username: Option<String>,
    /// Optional password for authentication.
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Create a new proxy configuration with just a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// Set credentials for the proxy.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

/// Exchange configuration.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Exchange identifier
    pub id: String,
    /// Exchange display name
    pub name: String,
    /// API key (zeroed on drop)
    pub api_key: Option<SecretString>,
    /// API secret (zeroed on drop)
    pub secret: Option<SecretString>,
    /// Total request timeout (default: 30 seconds)
    pub timeout: Duration,
    /// TCP connection timeout (default: 10 seconds)
    pub connect_timeout: Duration,
    /// Use the exchange's testnet hosts
    pub sandbox: bool,
    /// Custom user agent string
    pub user_agent: Option<String>,
    /// HTTP proxy configuration
    pub proxy: Option<ProxyConfig>,
    /// Log request and response bodies at debug level
    pub verbose: bool,
    /// Exchange-specific options
    pub options: HashMap<String, Value>,
    /// URL overrides, keyed by API section (`"rest"`), for mocking and testing
    pub url_overrides: HashMap<String, String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            api_key: None,
            secret: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            sandbox: false,
            user_agent: Some(format!("bydfi-rs/{}", env!("CARGO_PKG_VERSION"))),
            proxy: None,
            verbose: false,
            options: HashMap::new(),
            url_overrides: HashMap::new(),
        }
    }
}

impl ExchangeConfig {
    /// Create a new configuration builder.
    ///
    /// ```rust
    /// use bydfi_core::config::ExchangeConfig;
    ///
    /// let config = ExchangeConfig::builder()
    ///     .id("bydfi")
    ///     .api_key("your-api-key")
    ///     .secret("your-secret")
    ///     .sandbox(true)
    ///     .build();
    /// assert!(config.has_credentials());
    /// ```
    pub fn builder() -> ExchangeConfigBuilder {
        ExchangeConfigBuilder::default()
    }

    /// Builds a configuration from `BYDFI_API_KEY`, `BYDFI_SECRET` and
    /// `BYDFI_SANDBOX`, loading a `.env` file first when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut builder = Self::builder().id("bydfi").name("BYDFi");
        if let Ok(key) = std::env::var("BYDFI_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Ok(secret) = std::env::var("BYDFI_SECRET") {
            builder = builder.secret(secret);
        }
        if let Ok(flag) = std::env::var("BYDFI_SANDBOX") {
            builder = builder.sandbox(matches!(flag.as_str(), "1" | "true" | "TRUE" | "yes"));
        }
        builder.build()
    }

    /// Returns `true` when both API key and secret are set and non-empty.
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_ok()
    }

    /// Returns the configured credentials or an authentication error.
    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::from_parts(self.api_key.as_ref(), self.secret.as_ref())
    }

    /// Returns the URL override for an API section, if any.
    pub fn url_override(&self, section: &str) -> Option<&str> {
        self.url_overrides.get(section).map(String::as_str)
    }
}

/// Builder for [`ExchangeConfig`].
#[derive(Debug, Clone, Default)]
pub struct ExchangeConfigBuilder {
    config: ExchangeConfig,
}

impl ExchangeConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exchange identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.config.id = id.into();
        self
    }

    /// Set the exchange display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::new(key));
        self
    }

    /// Set the API secret.
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = Some(SecretString::new(secret));
        self
    }

    /// Set the total request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the TCP connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Enable or disable testnet hosts.
    #[must_use]
    pub fn sandbox(mut self, enabled: bool) -> Self {
        self.config.sandbox = enabled;
        self
    }

    /// Set a custom user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Set the HTTP proxy.
    #[must_use]
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Enable or disable verbose body logging.
    #[must_use]
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.config.verbose = enabled;
        self
    }

    /// Set an exchange-specific option.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.options.insert(key.into(), value);
        self
    }

    /// Override the base URL of an API section.
    #[must_use]
    pub fn url_override(mut self, section: impl Into<String>, url: impl Into<String>) -> Self {
        self.config.url_overrides.insert(section.into(), url.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ExchangeConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExchangeConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(!config.sandbox);
        assert!(!config.has_credentials());
        assert!(config.user_agent.unwrap().starts_with("bydfi-rs/"));
    }

    #[test]
    fn test_builder() {
        let config = ExchangeConfig::builder()
            .id("bydfi")
            .api_key("k")
            .secret("s")
            .timeout(Duration::from_secs(5))
            .url_override("rest", "http://127.0.0.1:9999")
            .option("wallet", serde_json::json!("W002"))
            .build();

        assert_eq!(config.id, "bydfi");
        assert!(config.has_credentials());
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.url_override("rest"), Some("http://127.0.0.1:9999"));
        assert_eq!(config.url_override("public"), None);
        assert_eq!(config.options.get("wallet"), Some(&serde_json::json!("W002")));
    }

    #[test]
    fn test_missing_secret() {
        let config = ExchangeConfig::builder().api_key("k").build();
        assert!(config.credentials().is_err());
    }
}
