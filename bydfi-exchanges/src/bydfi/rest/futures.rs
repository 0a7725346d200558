//! BYDFi swap account settings: margin mode, position mode and leverage.
//!
//! Every call is scoped to a wallet and a contract family; unset parts of the
//! [`AccountScope`] fall back to the exchange options.

use std::sync::Arc;

use bydfi_core::error::{Error, Result};
use bydfi_core::types::{Leverage, MarginMode, MarginModeInfo, Market, PositionMode, PositionModeInfo};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::info;

use super::super::Bydfi;
use super::super::endpoints::BydfiEndpoint;
use super::super::params::{AccountScope, LeverageSetting};
use super::super::parser::{self, response_data};
use super::super::request::{RequestParams, require_positive};
use super::acknowledged;

impl Bydfi {
    fn scoped_params(&self, scope: &AccountScope) -> RequestParams {
        RequestParams::new()
            .param("wallet", self.wallet(scope))
            .param("contractType", self.contract_type(scope).as_native())
    }

    /// Fetches the margin mode of one market.
    pub async fn fetch_margin_mode(&self, symbol: &str, scope: &AccountScope) -> Result<MarginModeInfo> {
        let market = self.load_markets(false).await?.market(symbol)?;
        let params = self
            .scoped_params(scope)
            .param("symbol", market.id.as_str())
            .build();
        let response = self.request(BydfiEndpoint::AssetsMargin, params).await?;
        Ok(parser::parse_margin_mode(&market.symbol, response_data(&response)))
    }

    /// Switches the margin mode of one market.
    ///
    /// Returns the exchange's `success` flag, or `true` when a `200`
    /// response leaves it out.
    pub async fn set_margin_mode(
        &self,
        symbol: &str,
        mode: MarginMode,
        scope: &AccountScope,
    ) -> Result<bool> {
        let market = self.load_markets(false).await?.market(symbol)?;
        let params = self
            .scoped_params(scope)
            .param("symbol", market.id.as_str())
            .param("marginType", mode.as_native())
            .build();
        let response = self.request(BydfiEndpoint::MarginType, params).await?;
        info!(symbol = %market.symbol, mode = %mode, "margin mode changed");
        Ok(acknowledged(&response))
    }

    /// Fetches the account position mode.
    pub async fn fetch_position_mode(&self, scope: &AccountScope) -> Result<PositionModeInfo> {
        let params = self.scoped_params(scope).build();
        let response = self.request(BydfiEndpoint::PositionSideDual, params).await?;
        Ok(parser::parse_position_mode(response_data(&response)))
    }

    /// Switches between hedge and one-way position mode.
    ///
    /// Returns the `success` flag with the same default as
    /// [`set_margin_mode`](Self::set_margin_mode).
    pub async fn set_position_mode(&self, hedged: bool, scope: &AccountScope) -> Result<bool> {
        let mode = if hedged {
            PositionMode::Hedge
        } else {
            PositionMode::OneWay
        };
        let params = self
            .scoped_params(scope)
            .param("positionType", mode.as_native())
            .build();
        let response = self.request(BydfiEndpoint::SetPositionSideDual, params).await?;
        info!(hedged, "position mode changed");
        Ok(acknowledged(&response))
    }

    /// Fetches the leverage of one market.
    pub async fn fetch_leverage(&self, symbol: &str, scope: &AccountScope) -> Result<Leverage> {
        let market = self.load_markets(false).await?.market(symbol)?;
        let params = self
            .scoped_params(scope)
            .param("symbol", market.id.as_str())
            .build();
        let response = self.request(BydfiEndpoint::Leverage, params).await?;
        Ok(parser::parse_leverage(&market.symbol, response_data(&response)))
    }

    /// Sets the leverage of one market.
    ///
    /// # Errors
    ///
    /// [`Error::BadRequest`] when `leverage` is not positive or exceeds the
    /// market's maximum.
    pub async fn set_leverage(
        &self,
        symbol: &str,
        leverage: Decimal,
        scope: &AccountScope,
    ) -> Result<Leverage> {
        require_positive("leverage", leverage)?;
        let market = self.load_markets(false).await?.market(symbol)?;
        check_leverage_limit(&market, leverage)?;

        let params = self
            .scoped_params(scope)
            .param("symbol", market.id.as_str())
            .decimal("leverage", leverage)
            .build();
        let response = self.request(BydfiEndpoint::SetLeverage, params).await?;
        info!(symbol = %market.symbol, %leverage, "leverage changed");
        Ok(parser::parse_leverage(&market.symbol, response_data(&response)))
    }

    /// Sets leverage, and optionally margin mode, for several markets at once.
    pub async fn set_leverages(
        &self,
        settings: &[LeverageSetting],
        scope: &AccountScope,
    ) -> Result<bool> {
        if settings.is_empty() {
            return Err(Error::bad_request("set_leverages requires at least one setting"));
        }
        let ctx = self.load_markets(false).await?;
        let mut entries = Vec::with_capacity(settings.len());
        let mut with_margin_mode = false;
        for setting in settings {
            require_positive("leverage", setting.leverage)?;
            let market = ctx.market(&setting.symbol)?;
            check_leverage_limit(&market, setting.leverage)?;
            entries.push(leverage_entry(&market, setting));
            with_margin_mode |= setting.margin_mode.is_some();
        }

        let endpoint = if with_margin_mode {
            BydfiEndpoint::BatchLeverageMargin
        } else {
            BydfiEndpoint::BatchLeverage
        };
        let params = self
            .scoped_params(scope)
            .param("list", Value::Array(entries))
            .build();
        let response = self.request(endpoint, params).await?;
        info!(count = settings.len(), "leverage batch submitted");
        Ok(acknowledged(&response))
    }

    /// Sets leverage and margin mode of one market in a single call.
    pub async fn set_leverage_and_margin_mode(
        &self,
        symbol: &str,
        leverage: Decimal,
        mode: MarginMode,
        scope: &AccountScope,
    ) -> Result<bool> {
        self.set_leverages(
            &[LeverageSetting {
                symbol: symbol.to_string(),
                leverage,
                margin_mode: Some(mode),
            }],
            scope,
        )
        .await
    }
}

fn check_leverage_limit(market: &Market, leverage: Decimal) -> Result<()> {
    match market.limits.leverage.max {
        Some(max) if leverage > max => Err(Error::bad_request(format!(
            "leverage {leverage} exceeds the maximum of {max} for {}",
            market.symbol
        ))),
        _ => Ok(()),
    }
}

fn leverage_entry(market: &Arc<Market>, setting: &LeverageSetting) -> Value {
    let mut entry = json!({
        "symbol": market.id,
        "leverage": bydfi_core::precision::number_to_string(setting.leverage),
    });
    if let Some(mode) = setting.margin_mode {
        entry["marginType"] = json!(mode.as_native());
    }
    entry
}
