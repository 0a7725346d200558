//! BYDFi swap trading operations.
//!
//! Order inputs are validated before the market listing is consulted, so a
//! rejected order never reaches the transport. Prices are rounded to the
//! market's tick and amounts truncated to its step before they are sent.

use std::sync::Arc;

use bydfi_core::error::{Error, Result};
use bydfi_core::market_cache::MarketContext;
use bydfi_core::types::{Market, Order, OrderSide, OrderType, Position, TimeInForce, Trade};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::super::Bydfi;
use super::super::endpoints::BydfiEndpoint;
use super::super::params::{
    AccountScope, CancelOrderParams, CreateOrderParams, EditOrderParams, OrderEdit,
    OrderQueryParams,
};
use super::super::parser::{self, response_data, response_list};
use super::super::request::{
    RequestParams, require_non_empty, require_positive, round_amount, round_price,
};

fn requires_stop_price(order_type: OrderType) -> bool {
    matches!(
        order_type,
        OrderType::Stop
            | OrderType::StopMarket
            | OrderType::TakeProfit
            | OrderType::TakeProfitMarket
    )
}

/// Checks the caller's order inputs.
fn validate_order(
    order_type: OrderType,
    amount: Decimal,
    price: Option<Decimal>,
    options: &CreateOrderParams,
) -> Result<()> {
    require_positive("amount", amount)?;
    match price {
        Some(price) => {
            require_positive("price", price)?;
        }
        None if order_type.requires_price() => {
            return Err(Error::bad_request(format!(
                "{order_type} orders require a price"
            )));
        }
        None => {}
    }
    if requires_stop_price(order_type) {
        let stop_price = options.stop_price.ok_or_else(|| {
            Error::bad_request(format!("{order_type} orders require a stop price"))
        })?;
        require_positive("stopPrice", stop_price)?;
    }
    if order_type == OrderType::TrailingStopMarket && options.callback_rate.is_none() {
        return Err(Error::bad_request(
            "trailing_stop_market orders require a callback rate",
        ));
    }
    Ok(())
}

/// Moves a reference price against the taker by `slippage`.
fn slipped_price(side: OrderSide, reference: Decimal, slippage: Decimal) -> Result<Decimal> {
    let factor = match side {
        OrderSide::Buy => Decimal::ONE.checked_add(slippage),
        OrderSide::Sell => Decimal::ONE.checked_sub(slippage),
    };
    factor
        .and_then(|factor| reference.checked_mul(factor))
        .ok_or_else(|| {
            Error::bad_request(format!(
                "price {reference} with slippage {slippage} is out of range"
            ))
        })
}

fn rounded_amount(market: &Market, amount: Decimal) -> Result<Decimal> {
    let rounded = round_amount(market, amount)?;
    if rounded.is_zero() {
        return Err(Error::bad_request(format!(
            "amount {amount} is below the amount precision of {}",
            market.symbol
        )));
    }
    Ok(rounded)
}

impl Bydfi {
    /// Places a new order.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Canonical symbol.
    /// * `order_type` - Order type.
    /// * `side` - Buy or sell.
    /// * `amount` - Order quantity in contracts.
    /// * `price` - Limit price; for market orders a reference price that is
    ///   moved by the configured slippage.
    /// * `options` - Time in force, trigger, hedge-mode and wallet options.
    ///
    /// # Errors
    ///
    /// [`Error::BadRequest`] for a missing or non-positive price on limit
    /// orders, a non-positive amount or a missing trigger price. Nothing is
    /// sent in that case.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use bydfi_exchanges::bydfi::{Bydfi, CreateOrderParams};
    /// # use bydfi_core::types::{OrderSide, OrderType};
    /// # use rust_decimal_macros::dec;
    /// # async fn example() -> bydfi_core::Result<()> {
    /// let bydfi = Bydfi::builder().api_key("k").secret("s").build()?;
    /// let order = bydfi
    ///     .create_order(
    ///         "BTC/USDT:USDT",
    ///         OrderType::Limit,
    ///         OrderSide::Buy,
    ///         dec!(0.01),
    ///         Some(dec!(90000)),
    ///         CreateOrderParams::default(),
    ///     )
    ///     .await?;
    /// println!("placed {:?}", order.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
        options: CreateOrderParams,
    ) -> Result<Order> {
        validate_order(order_type, amount, price, &options)?;

        let ctx = self.load_markets(false).await?;
        let market = ctx.market(symbol)?;

        let price = match (order_type, price) {
            (OrderType::Market, Some(reference)) => Some(slipped_price(
                side,
                reference,
                self.options().default_slippage,
            )?),
            (_, price) => price,
        };
        let price = price.map(|p| round_price(&market, p)).transpose()?;
        let stop_price = options
            .stop_price
            .map(|p| round_price(&market, p))
            .transpose()?;
        let activation_price = options
            .activation_price
            .map(|p| round_price(&market, p))
            .transpose()?;
        let quantity = rounded_amount(&market, amount)?;
        let time_in_force = if options.post_only {
            Some(TimeInForce::Po)
        } else {
            options.time_in_force
        };

        let params = RequestParams::new()
            .param("symbol", market.id.as_str())
            .param("side", side.as_native())
            .param("type", order_type.as_native())
            .decimal("quantity", quantity)
            .optional_decimal("price", price)
            .optional_param("timeInForce", time_in_force.map(TimeInForce::as_native))
            .optional_param("clientOrderId", options.client_order_id)
            .optional_param("reduceOnly", options.reduce_only)
            .optional_decimal("stopPrice", stop_price)
            .optional_param("workingType", options.working_type.map(|w| w.as_native()))
            .optional_param("positionSide", options.position_side.map(|p| p.as_native()))
            .optional_decimal("callbackRate", options.callback_rate)
            .optional_decimal("activationPrice", activation_price)
            .param("wallet", self.wallet(&options.scope))
            .param("contractType", self.contract_type(&options.scope).as_native())
            .param("brokerId", self.options().broker_id.as_str())
            .build();

        let response = self.request(BydfiEndpoint::PlaceOrder, params).await?;
        let order = parser::parse_order(&ctx, response_data(&response), Some(&market));
        info!(symbol = %market.symbol, %order_type, %side, id = ?order.id, "order placed");
        Ok(order)
    }

    /// Amends the quantity, price or trigger price of an open order.
    pub async fn edit_order(
        &self,
        id: &str,
        symbol: &str,
        amount: Option<Decimal>,
        price: Option<Decimal>,
        options: EditOrderParams,
    ) -> Result<Order> {
        require_non_empty("id", id)?;
        if amount.is_none() && price.is_none() && options.stop_price.is_none() {
            return Err(Error::bad_request(
                "edit_order requires a new amount, price or stop price",
            ));
        }

        let ctx = self.load_markets(false).await?;
        let market = ctx.market(symbol)?;
        let (quantity, price) = edit_values(&market, amount, price)?;
        let stop_price = options
            .stop_price
            .map(|p| require_positive("stopPrice", p).and_then(|p| round_price(&market, p)))
            .transpose()?;

        let params = RequestParams::new()
            .param("orderId", id)
            .param("symbol", market.id.as_str())
            .optional_decimal("quantity", quantity)
            .optional_decimal("price", price)
            .optional_decimal("stopPrice", stop_price)
            .param("wallet", self.wallet(&options.scope))
            .param("contractType", self.contract_type(&options.scope).as_native())
            .build();

        let response = self.request(BydfiEndpoint::EditOrder, params).await?;
        let mut order = parser::parse_order(&ctx, response_data(&response), Some(&market));
        order.id.get_or_insert_with(|| id.to_string());
        Ok(order)
    }

    /// Amends several orders in one call.
    pub async fn edit_orders(&self, edits: &[OrderEdit], scope: &AccountScope) -> Result<Vec<Order>> {
        if edits.is_empty() {
            return Err(Error::bad_request("edit_orders requires at least one edit"));
        }
        let ctx = self.load_markets(false).await?;
        let mut entries = Vec::with_capacity(edits.len());
        for edit in edits {
            require_non_empty("id", &edit.id)?;
            if edit.amount.is_none() && edit.price.is_none() {
                return Err(Error::bad_request(format!(
                    "edit of order {} changes nothing",
                    edit.id
                )));
            }
            let market = ctx.market(&edit.symbol)?;
            let (quantity, price) = edit_values(&market, edit.amount, edit.price)?;
            let mut entry = json!({"orderId": edit.id, "symbol": market.id});
            if let Some(quantity) = quantity {
                entry["quantity"] = json!(bydfi_core::precision::number_to_string(quantity));
            }
            if let Some(price) = price {
                entry["price"] = json!(bydfi_core::precision::number_to_string(price));
            }
            entries.push(entry);
        }

        let params = RequestParams::new()
            .param("orders", Value::Array(entries))
            .param("wallet", self.wallet(scope))
            .param("contractType", self.contract_type(scope).as_native())
            .build();
        let response = self.request(BydfiEndpoint::BatchEditOrder, params).await?;
        Ok(parse_orders(&ctx, &response, None))
    }

    /// Cancels one order by exchange id, or by client order id when `id` is empty.
    pub async fn cancel_order(
        &self,
        id: &str,
        symbol: &str,
        options: CancelOrderParams,
    ) -> Result<Order> {
        if id.trim().is_empty() && options.client_order_id.is_none() {
            return Err(Error::bad_request(
                "cancel_order requires an order id or a client order id",
            ));
        }
        let ctx = self.load_markets(false).await?;
        let market = ctx.market(symbol)?;

        let params = RequestParams::new()
            .param("symbol", market.id.as_str())
            .optional_param("orderId", Some(id).filter(|id| !id.trim().is_empty()))
            .optional_param("clientOrderId", options.client_order_id.clone())
            .param("wallet", self.wallet(&options.scope))
            .param("contractType", self.contract_type(&options.scope).as_native())
            .build();
        let response = self.request(BydfiEndpoint::CancelOrder, params).await?;
        info!(symbol = %market.symbol, id, "order canceled");

        let mut order = parser::parse_order(&ctx, response_data(&response), Some(&market));
        if order.id.is_none() && !id.trim().is_empty() {
            order.id = Some(id.to_string());
        }
        if order.client_order_id.is_none() {
            order.client_order_id = options.client_order_id;
        }
        Ok(order)
    }

    /// Cancels several orders of one market.
    pub async fn cancel_orders(
        &self,
        ids: &[&str],
        symbol: &str,
        scope: &AccountScope,
    ) -> Result<Vec<Order>> {
        if ids.is_empty() {
            return Err(Error::bad_request("cancel_orders requires at least one id"));
        }
        for id in ids {
            require_non_empty("id", id)?;
        }
        let ctx = self.load_markets(false).await?;
        let market = ctx.market(symbol)?;

        let params = RequestParams::new()
            .param("symbol", market.id.as_str())
            .param("orderIds", ids.to_vec())
            .param("wallet", self.wallet(scope))
            .param("contractType", self.contract_type(scope).as_native())
            .build();
        let response = self.request(BydfiEndpoint::BatchCancelOrder, params).await?;
        info!(symbol = %market.symbol, count = ids.len(), "orders canceled");
        Ok(parse_orders(&ctx, &response, Some(&market)))
    }

    /// Cancels every open order of one market.
    pub async fn cancel_all_orders(&self, symbol: &str, scope: &AccountScope) -> Result<Vec<Order>> {
        let ctx = self.load_markets(false).await?;
        let market = ctx.market(symbol)?;
        let params = RequestParams::new()
            .param("symbol", market.id.as_str())
            .param("wallet", self.wallet(scope))
            .param("contractType", self.contract_type(scope).as_native())
            .build();
        let response = self.request(BydfiEndpoint::CancelAllOrder, params).await?;
        info!(symbol = %market.symbol, "all orders canceled");
        Ok(parse_orders(&ctx, &response, Some(&market)))
    }

    /// Fetches open orders.
    pub async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        query: OrderQueryParams,
    ) -> Result<Vec<Order>> {
        let (ctx, market, response) = self
            .history_query(BydfiEndpoint::OpenOrder, "fetch_open_orders", symbol, &query)
            .await?;
        Ok(parse_orders(&ctx, &response, market.as_ref()))
    }

    /// Fetches open trigger orders.
    pub async fn fetch_plan_orders(
        &self,
        symbol: Option<&str>,
        query: OrderQueryParams,
    ) -> Result<Vec<Order>> {
        let (ctx, market, response) = self
            .history_query(BydfiEndpoint::PlanOrder, "fetch_plan_orders", symbol, &query)
            .await?;
        Ok(parse_orders(&ctx, &response, market.as_ref()))
    }

    /// Fetches order history.
    pub async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        query: OrderQueryParams,
    ) -> Result<Vec<Order>> {
        let (ctx, market, response) = self
            .history_query(BydfiEndpoint::HistoryOrder, "fetch_orders", symbol, &query)
            .await?;
        Ok(parse_orders(&ctx, &response, market.as_ref()))
    }

    /// Fetches the account's own trades.
    pub async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        query: OrderQueryParams,
    ) -> Result<Vec<Trade>> {
        let (ctx, market, response) = self
            .history_query(BydfiEndpoint::HistoryTrade, "fetch_my_trades", symbol, &query)
            .await?;
        Ok(response_list(&response)
            .iter()
            .map(|raw| parser::parse_trade(&ctx, raw, market.as_ref()))
            .collect())
    }

    /// Fetches closed positions.
    pub async fn fetch_positions_history(
        &self,
        symbol: Option<&str>,
        query: OrderQueryParams,
    ) -> Result<Vec<Position>> {
        let (ctx, market, response) = self
            .history_query(
                BydfiEndpoint::PositionHistory,
                "fetch_positions_history",
                symbol,
                &query,
            )
            .await?;
        Ok(response_list(&response)
            .iter()
            .map(|raw| parser::parse_position(&ctx, raw, market.as_ref()))
            .collect())
    }

    async fn history_query(
        &self,
        endpoint: BydfiEndpoint,
        operation: &str,
        symbol: Option<&str>,
        query: &OrderQueryParams,
    ) -> Result<(MarketContext, Option<Arc<Market>>, Value)> {
        let ctx = self.load_markets(false).await?;
        let market = symbol.map(|symbol| ctx.market(symbol)).transpose()?;

        let params = RequestParams::new()
            .optional_param("symbol", market.as_ref().map(|m| m.id.as_str()))
            .optional_param("startTime", query.since)
            .optional_param("endTime", query.until)
            .optional_param("limit", query.limit)
            .param("wallet", self.wallet(&query.scope))
            .param("contractType", self.contract_type(&query.scope).as_native())
            .build();
        let response = self.request(endpoint, params).await?;
        debug!(operation, entries = response_list(&response).len(), "history fetched");
        Ok((ctx, market, response))
    }
}

fn edit_values(
    market: &Market,
    amount: Option<Decimal>,
    price: Option<Decimal>,
) -> Result<(Option<Decimal>, Option<Decimal>)> {
    let quantity = amount
        .map(|a| require_positive("amount", a).and_then(|a| rounded_amount(market, a)))
        .transpose()?;
    let price = price
        .map(|p| require_positive("price", p).and_then(|p| round_price(market, p)))
        .transpose()?;
    Ok((quantity, price))
}

fn parse_orders(ctx: &MarketContext, response: &Value, hint: Option<&Arc<Market>>) -> Vec<Order> {
    response_list(response)
        .iter()
        .map(|raw| parser::parse_order(ctx, raw, hint))
        .collect()
}
