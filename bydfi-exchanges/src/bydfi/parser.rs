//! BYDFi response normalizers.
//!
//! One function per entity kind. Attributes are read through a declared lookup
//! order (first present key wins) and stay `None` when absent. Apart from
//! [`parse_market`], every normalizer accepts any JSON shape.

use std::sync::Arc;

use bydfi_core::error::{Error, ParseError, Result};
use bydfi_core::market_cache::MarketContext;
use bydfi_core::precision::PrecisionMode;
use bydfi_core::parser_utils::{
    decimal_from_value, parse_bool, parse_decimal, parse_decimal_n, parse_string,
    parse_string_n, parse_timestamp, parse_timestamp_n, timestamp_to_datetime,
};
use bydfi_core::types::{
    Balance, BalanceEntry, FundingRate, FundingRateHistory, LastPrice, Leverage, MarginMode,
    MarginModeInfo, Market, MarketLimits, MarketPrecision, MarketType, MinMax, Ohlcv, Order,
    OrderBook, OrderBookEntry, OrderSide, OrderStatus, OrderType, Position, PositionMode,
    PositionModeInfo, Ticker, TimeInForce, Trade, Transaction, TransactionKind, Transfer,
    TransferStatus,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use super::symbol::safe_symbol;

/// Funding settlement interval of every BYDFi perpetual.
pub const FUNDING_INTERVAL: &str = "8h";

/// Settlement currency reported for funding history.
pub const FUNDING_CODE: &str = "USDT";

/// Unwraps the `data` member of a response envelope.
pub fn response_data(response: &Value) -> &Value {
    response.get("data").unwrap_or(&Value::Null)
}

/// Returns the entries of a list response.
///
/// `data` is either the array itself or a page object holding it under
/// `list` or `rows`. Anything else yields no entries.
pub fn response_list(response: &Value) -> &[Value] {
    let data = response_data(response);
    data.as_array()
        .or_else(|| data.get("list").and_then(Value::as_array))
        .or_else(|| data.get("rows").and_then(Value::as_array))
        .map_or(&[], Vec::as_slice)
}

fn symbol_of(ctx: &MarketContext, data: &Value, hint: Option<&Arc<Market>>) -> Option<String> {
    match (parse_string(data, "symbol"), hint) {
        (Some(raw), _) => Some(safe_symbol(ctx, &raw, hint)),
        (None, Some(market)) => Some(market.symbol.clone()),
        (None, None) => None,
    }
}

// ============================================================================
// Market Data
// ============================================================================

/// Parses one entry of the market listing.
///
/// `id` is the native symbol, quote and settle are both the margin asset and
/// the canonical symbol is `BASE/QUOTE:SETTLE`, in the exchange's casing.
/// `secondary_id` is only set when the listing carries `id2`. Precision
/// values are tick sizes.
///
/// # Errors
///
/// Fails when `symbol`, `baseAsset` or `marginAsset` is missing.
pub fn parse_market(data: &Value) -> Result<Market> {
    let id = parse_string(data, "symbol")
        .ok_or_else(|| Error::from(ParseError::missing_field("symbol")))?;
    let base_id = parse_string(data, "baseAsset")
        .ok_or_else(|| Error::from(ParseError::missing_field("baseAsset")))?;
    let margin_id = parse_string(data, "marginAsset")
        .ok_or_else(|| Error::from(ParseError::missing_field("marginAsset")))?;

    let base = base_id.clone();
    let quote = margin_id.clone();
    let settle = quote.clone();
    let symbol = Market::canonical_symbol(&base, &quote, Some(&settle));
    let secondary_id = parse_string(data, "id2");

    Ok(Market {
        id,
        secondary_id,
        symbol,
        base,
        quote,
        settle: Some(settle),
        base_id,
        quote_id: margin_id.clone(),
        settle_id: Some(margin_id),
        market_type: MarketType::Swap,
        swap: true,
        contract: true,
        linear: true,
        inverse: false,
        active: parse_string(data, "status").as_deref() == Some("NORMAL"),
        taker: parse_decimal(data, "feeRateTaker"),
        maker: parse_decimal(data, "feeRateMaker"),
        contract_size: parse_decimal(data, "minOrderSize"),
        precision: MarketPrecision {
            price: parse_decimal(data, "pricePrecision"),
            amount: parse_decimal(data, "volumePrecision"),
            mode: PrecisionMode::TickSize,
        },
        limits: MarketLimits {
            leverage: MinMax::new(Some(Decimal::ONE), parse_decimal(data, "maxLeverageLevel")),
            ..MarketLimits::default()
        },
        info: data.clone(),
    })
}

/// Parses the market listing, skipping malformed entries.
pub fn parse_markets(list: &[Value]) -> Vec<Market> {
    list.iter()
        .filter_map(|entry| match parse_market(entry) {
            Ok(market) => Some(market),
            Err(e) => {
                warn!(error = %e, "skipping malformed market entry");
                None
            }
        })
        .collect()
}

/// Parses a 24h ticker or a mark price payload.
///
/// The exchange does not stamp tickers, so `now` becomes the timestamp.
pub fn parse_ticker(
    ctx: &MarketContext,
    data: &Value,
    hint: Option<&Arc<Market>>,
    now: i64,
) -> Ticker {
    Ticker {
        symbol: symbol_of(ctx, data, hint).unwrap_or_default(),
        timestamp: now,
        datetime: timestamp_to_datetime(now),
        high: parse_decimal(data, "high"),
        low: parse_decimal(data, "low"),
        bid: parse_decimal(data, "buy"),
        ask: parse_decimal(data, "sell"),
        open: parse_decimal(data, "open"),
        close: parse_decimal(data, "close"),
        last: parse_decimal(data, "last"),
        base_volume: parse_decimal(data, "vol"),
        quote_volume: None,
        mark_price: parse_decimal(data, "markPrice"),
        index_price: parse_decimal(data, "indexPrice"),
        info: data.clone(),
    }
}

/// Parses a public or private trade.
pub fn parse_trade(ctx: &MarketContext, data: &Value, hint: Option<&Arc<Market>>) -> Trade {
    let id = parse_string(data, "id");
    let timestamp = parse_timestamp(data, "time");
    Trade {
        order: id.clone(),
        id,
        timestamp,
        datetime: timestamp.and_then(timestamp_to_datetime),
        symbol: symbol_of(ctx, data, hint),
        side: parse_string(data, "side").and_then(|s| s.to_lowercase().parse().ok()),
        price: parse_decimal(data, "price"),
        amount: parse_decimal(data, "qty"),
        cost: None,
        fee: None,
        info: data.clone(),
    }
}

/// Parses a candle given as an object (`timestamp|t`, `open|o`, ...) or as a
/// `[t, o, h, l, c, v]` array.
///
/// ```rust
/// use bydfi_exchanges::bydfi::parser::parse_ohlcv;
/// use bydfi_core::Ohlcv;
/// use rust_decimal_macros::dec;
/// use serde_json::json;
///
/// let candle = parse_ohlcv(&json!({
///     "t": 1741265880000i64, "o": "90156", "h": "90235",
///     "l": "90156", "c": "90235", "v": "0.052"
/// }));
/// assert_eq!(
///     candle,
///     Ohlcv::new(1741265880000, dec!(90156), dec!(90235), dec!(90156), dec!(90235), dec!(0.052))
/// );
/// ```
pub fn parse_ohlcv(data: &Value) -> Ohlcv {
    if let Some(row) = data.as_array() {
        let decimal_at = |i: usize| row.get(i).and_then(decimal_from_value);
        return Ohlcv {
            timestamp: row.first().and_then(|v| {
                v.as_i64()
                    .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
            }),
            open: decimal_at(1),
            high: decimal_at(2),
            low: decimal_at(3),
            close: decimal_at(4),
            volume: decimal_at(5),
        };
    }
    Ohlcv {
        timestamp: parse_timestamp_n(data, &["timestamp", "t"]),
        open: parse_decimal_n(data, &["open", "o"]),
        high: parse_decimal_n(data, &["high", "h"]),
        low: parse_decimal_n(data, &["low", "l"]),
        close: parse_decimal_n(data, &["close", "c"]),
        volume: parse_decimal_n(data, &["volume", "v"]),
    }
}

/// Parses the order book snapshot.
///
/// Levels may be `[price, amount]` pairs, `{price, amount}` objects or lists
/// nested one level deeper. Bids are sorted descending, asks ascending.
pub fn parse_order_book(symbol: &str, data: &Value) -> OrderBook {
    let mut bids = parse_levels(data.get("bids"));
    let mut asks = parse_levels(data.get("asks"));
    bids.sort_by(|a, b| b.price.cmp(&a.price));
    asks.sort_by(|a, b| a.price.cmp(&b.price));

    let timestamp = parse_timestamp_n(data, &["E", "T", "time"]);
    OrderBook {
        symbol: symbol.to_string(),
        timestamp,
        datetime: timestamp.and_then(timestamp_to_datetime),
        bids,
        asks,
        nonce: parse_timestamp(data, "lastUpdateId"),
        info: data.clone(),
    }
}

fn parse_levels(side: Option<&Value>) -> Vec<OrderBookEntry> {
    let mut levels = Vec::new();
    if let Some(entries) = side.and_then(Value::as_array) {
        for entry in entries {
            collect_level(entry, &mut levels);
        }
    }
    levels
}

fn collect_level(entry: &Value, out: &mut Vec<OrderBookEntry>) {
    match entry {
        Value::Object(_) => {
            if let (Some(price), Some(amount)) = (
                parse_decimal_n(entry, &["price", "p"]),
                parse_decimal_n(entry, &["amount", "qty", "q"]),
            ) {
                out.push(OrderBookEntry { price, amount });
            }
        }
        Value::Array(items) => {
            let pair = (
                items.first().and_then(decimal_from_value),
                items.get(1).and_then(decimal_from_value),
            );
            if let (Some(price), Some(amount)) = pair {
                out.push(OrderBookEntry { price, amount });
            } else {
                for item in items {
                    collect_level(item, out);
                }
            }
        }
        _ => {}
    }
}

/// Parses last traded prices; a zero price is reported as absent.
pub fn parse_last_prices(ctx: &MarketContext, list: &[Value], now: i64) -> Vec<LastPrice> {
    list.iter()
        .map(|data| LastPrice {
            symbol: symbol_of(ctx, data, None).unwrap_or_default(),
            timestamp: now,
            datetime: timestamp_to_datetime(now),
            price: parse_decimal(data, "price").filter(|p| !p.is_zero()),
            info: data.clone(),
        })
        .collect()
}

/// Parses a current funding rate.
pub fn parse_funding_rate(
    ctx: &MarketContext,
    data: &Value,
    hint: Option<&Arc<Market>>,
) -> FundingRate {
    let timestamp = parse_timestamp(data, "time");
    let next = parse_timestamp(data, "nextFundingTime");
    FundingRate {
        symbol: symbol_of(ctx, data, hint).unwrap_or_default(),
        timestamp,
        datetime: timestamp.and_then(timestamp_to_datetime),
        funding_rate: parse_decimal(data, "lastFundingRate"),
        next_funding_timestamp: next,
        next_funding_datetime: next.and_then(timestamp_to_datetime),
        interval: Some(FUNDING_INTERVAL.to_string()),
        mark_price: parse_decimal(data, "markPrice"),
        index_price: parse_decimal(data, "indexPrice"),
        info: data.clone(),
    }
}

/// Parses one funding history entry.
///
/// The exchange reports no paid amount: `amount` is always zero and `id`
/// repeats the symbol.
pub fn parse_funding_rate_history(
    ctx: &MarketContext,
    data: &Value,
    hint: Option<&Arc<Market>>,
) -> FundingRateHistory {
    let symbol = symbol_of(ctx, data, hint).unwrap_or_default();
    let timestamp = parse_timestamp(data, "fundingTime");
    FundingRateHistory {
        id: Some(symbol.clone()).filter(|s| !s.is_empty()),
        symbol,
        code: Some(FUNDING_CODE.to_string()),
        timestamp,
        datetime: timestamp.and_then(timestamp_to_datetime),
        funding_rate: parse_decimal(data, "fundingRate"),
        amount: Decimal::ZERO,
        info: data.clone(),
    }
}

// ============================================================================
// Trading
// ============================================================================

/// Parses an order from any of the order endpoints.
///
/// `remaining` is always recomputed from `amount - filled`.
pub fn parse_order(ctx: &MarketContext, data: &Value, hint: Option<&Arc<Market>>) -> Order {
    let timestamp = parse_timestamp_n(data, &["createTime", "ctime"]);
    let time_in_force: Option<TimeInForce> =
        parse_string(data, "timeInForce").and_then(|s| s.parse().ok());

    Order {
        id: parse_string_n(data, &["orderId", "id"]),
        client_order_id: parse_string(data, "clientOrderId"),
        timestamp,
        datetime: timestamp.and_then(timestamp_to_datetime),
        last_update_timestamp: parse_timestamp_n(data, &["updateTime", "mtime"]),
        symbol: symbol_of(ctx, data, hint),
        order_type: parse_string_n(data, &["type", "orderType"])
            .and_then(|s| s.parse::<OrderType>().ok()),
        time_in_force,
        side: parse_string(data, "side").and_then(|s| s.parse::<OrderSide>().ok()),
        price: parse_decimal(data, "price"),
        average: parse_decimal_n(data, &["avgPrice", "avgDealPrice"]),
        stop_price: parse_decimal_n(data, &["stopPrice", "triggerPrice"]),
        amount: parse_decimal_n(data, &["origQty", "volume", "quantity"]),
        filled: parse_decimal_n(data, &["executedQty", "dealVolume"]),
        remaining: None,
        status: parse_string(data, "status").and_then(|s| OrderStatus::from_native(&s)),
        reduce_only: parse_bool(data, "reduceOnly"),
        post_only: time_in_force.map(|tif| tif == TimeInForce::Po),
        info: data.clone(),
    }
    .with_remaining()
}

/// Parses a position history entry.
pub fn parse_position(ctx: &MarketContext, data: &Value, hint: Option<&Arc<Market>>) -> Position {
    let timestamp = parse_timestamp_n(data, &["ctime", "createTime"]);
    Position {
        id: parse_string_n(data, &["positionId", "id"]),
        symbol: symbol_of(ctx, data, hint),
        side: parse_string_n(data, &["side", "positionSide"]).map(|s| s.to_lowercase()),
        timestamp,
        datetime: timestamp.and_then(timestamp_to_datetime),
        contracts: parse_decimal_n(data, &["volume", "positionAmt", "quantity"]),
        entry_price: parse_decimal_n(data, &["avgPrice", "openPrice", "entryPrice"]),
        mark_price: parse_decimal(data, "markPrice"),
        liquidation_price: parse_decimal_n(data, &["liquidationPrice", "liqPrice"]),
        unrealized_pnl: parse_decimal_n(data, &["unrealizedProfit", "unrealisedPnl"]),
        realized_pnl: parse_decimal_n(data, &["realizedProfit", "realisedPnl", "closeProfit"]),
        leverage: parse_decimal(data, "leverage"),
        margin_mode: parse_string_n(data, &["marginType", "marginMode"])
            .and_then(|s| MarginMode::from_native(&s))
            .map(|mode| mode.to_string()),
        info: data.clone(),
    }
}

// ============================================================================
// Account
// ============================================================================

/// Parses a transfer result or transfer record.
///
/// `status` follows the `success` flag; records without one fall back to a
/// `status` string.
pub fn parse_transfer(data: &Value) -> Transfer {
    let timestamp = parse_timestamp_n(data, &["timestamp", "time", "createTime"]);
    let succeeded = parse_bool(data, "success").unwrap_or_else(|| {
        parse_string(data, "status").is_some_and(|s| s.eq_ignore_ascii_case("SUCCESS"))
    });
    Transfer {
        id: parse_string_n(data, &["transferId", "id"]),
        timestamp,
        datetime: timestamp.and_then(timestamp_to_datetime),
        currency: parse_string_n(data, &["code", "asset"]),
        amount: parse_decimal(data, "amount"),
        from_account: parse_string_n(data, &["fromAccount", "fromType"]),
        to_account: parse_string_n(data, &["toAccount", "toType"]),
        status: Some(if succeeded {
            TransferStatus::Success
        } else {
            TransferStatus::Error
        }),
        info: data.clone(),
    }
}

/// Parses account assets.
///
/// Spot wallets are keyed by currency code, other wallets by
/// `CODE_walletType`.
pub fn parse_balance(list: &[Value]) -> Balance {
    let mut balance = Balance {
        info: Value::Array(list.to_vec()),
        ..Balance::default()
    };
    for entry in list {
        let Some(code) = parse_string(entry, "asset").map(|c| c.to_uppercase()) else {
            continue;
        };
        let key = match parse_string(entry, "walletType") {
            Some(wallet) if wallet != "spot" => format!("{code}_{wallet}"),
            _ => code,
        };
        balance.entries.insert(
            key,
            BalanceEntry {
                free: parse_string(entry, "available"),
                used: parse_string(entry, "frozen"),
                total: parse_string(entry, "total"),
            },
        );
    }
    balance
}

/// Parses swap wallet balances, keyed by `CODE_wallet`.
pub fn parse_swap_balance(list: &[Value], wallet: &str) -> Balance {
    let mut balance = Balance {
        info: Value::Array(list.to_vec()),
        ..Balance::default()
    };
    for entry in list {
        let Some(code) = parse_string(entry, "asset").map(|c| c.to_uppercase()) else {
            continue;
        };
        balance.entries.insert(
            format!("{code}_{wallet}"),
            BalanceEntry {
                free: parse_string_n(entry, &["available", "availableBalance"]),
                used: parse_string_n(entry, &["frozen", "frozenBalance"]),
                total: parse_string_n(entry, &["total", "balance", "walletBalance"]),
            },
        );
    }
    balance
}

/// Parses a deposit or withdrawal record.
pub fn parse_transaction(data: &Value, kind: TransactionKind) -> Transaction {
    let timestamp = parse_timestamp_n(data, &["createTime", "insertTime", "applyTime", "time"]);
    Transaction {
        id: parse_string_n(data, &["id", "orderId"]),
        txid: parse_string_n(data, &["txId", "txid", "txHash"]),
        kind,
        currency: parse_string_n(data, &["asset", "coin"]).map(|c| c.to_uppercase()),
        amount: parse_decimal(data, "amount"),
        network: parse_string_n(data, &["network", "chain"]),
        address: parse_string(data, "address"),
        status: parse_string(data, "status").map(|s| s.to_lowercase()),
        timestamp,
        datetime: timestamp.and_then(timestamp_to_datetime),
        fee: parse_decimal_n(data, &["fee", "transactionFee"]),
        info: data.clone(),
    }
}

/// Parses the margin type of one market.
pub fn parse_margin_mode(symbol: &str, data: &Value) -> MarginModeInfo {
    MarginModeInfo {
        symbol: symbol.to_string(),
        margin_mode: parse_string_n(data, &["marginType", "marginMode"])
            .and_then(|s| MarginMode::from_native(&s)),
        info: data.clone(),
    }
}

/// Parses the account position mode.
pub fn parse_position_mode(data: &Value) -> PositionModeInfo {
    let hedged = parse_string(data, "positionType")
        .and_then(|s| PositionMode::from_native(&s))
        .map(|mode| mode == PositionMode::Hedge)
        .or_else(|| parse_bool(data, "dualSidePosition"))
        .unwrap_or(false);
    PositionModeInfo {
        hedged,
        info: data.clone(),
    }
}

/// Parses a leverage setting.
pub fn parse_leverage(symbol: &str, data: &Value) -> Leverage {
    Leverage {
        symbol: symbol.to_string(),
        margin_mode: parse_string_n(data, &["marginType", "marginMode"])
            .and_then(|s| MarginMode::from_native(&s)),
        long_leverage: parse_decimal_n(data, &["longLeverage", "leverage"]),
        short_leverage: parse_decimal_n(data, &["shortLeverage", "leverage"]),
        info: data.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw_market() -> Value {
        json!({
            "symbol": "BTC-USDT",
            "baseAsset": "BTC",
            "marginAsset": "USDT",
            "status": "NORMAL",
            "feeRateTaker": "0.0006",
            "feeRateMaker": "0.0002",
            "minOrderSize": "0.001",
            "pricePrecision": "0.1",
            "volumePrecision": "0.001",
            "maxLeverageLevel": 125
        })
    }

    fn context() -> MarketContext {
        MarketContext::new(vec![parse_market(&raw_market()).unwrap()])
    }

    #[test]
    fn test_parse_market() {
        let market = parse_market(&raw_market()).unwrap();
        assert_eq!(market.id, "BTC-USDT");
        assert_eq!(market.secondary_id, None);
        assert_eq!(market.symbol, "BTC/USDT:USDT");
        assert_eq!(market.settle.as_deref(), Some("USDT"));
        assert!(market.active && market.swap && market.linear && market.contract);
        assert!(!market.inverse);
        assert_eq!(market.taker, Some(dec!(0.0006)));
        assert_eq!(market.contract_size, Some(dec!(0.001)));
        assert_eq!(market.precision.price, Some(dec!(0.1)));
        assert_eq!(market.precision.amount, Some(dec!(0.001)));
        assert_eq!(market.precision.mode, PrecisionMode::TickSize);
        assert_eq!(market.limits.leverage.min, Some(dec!(1)));
        assert_eq!(market.limits.leverage.max, Some(dec!(125)));
    }

    #[test]
    fn test_parse_market_inactive_and_id2() {
        let mut raw = raw_market();
        raw["status"] = json!("OFFLINE");
        raw["id2"] = json!("BTCUSDT_PERP");
        let market = parse_market(&raw).unwrap();
        assert!(!market.active);
        assert_eq!(market.secondary_id.as_deref(), Some("BTCUSDT_PERP"));
    }

    #[test]
    fn test_parse_market_keeps_exchange_casing() {
        let mut raw = raw_market();
        raw["symbol"] = json!("1000pepe-USDT");
        raw["baseAsset"] = json!("1000pepe");
        let market = parse_market(&raw).unwrap();
        assert_eq!(market.base, "1000pepe");
        assert_eq!(market.base_id, "1000pepe");
        assert_eq!(market.symbol, "1000pepe/USDT:USDT");
    }

    #[test]
    fn test_parse_markets_skips_malformed() {
        let markets = parse_markets(&[raw_market(), json!({"symbol": "X"})]);
        assert_eq!(markets.len(), 1);
        assert!(parse_market(&json!({})).is_err());
    }

    #[test]
    fn test_parse_ticker() {
        let ctx = context();
        let raw = json!({
            "symbol": "BTC-USDT", "open": "90000", "close": "90500", "last": "90500",
            "high": "91000", "low": "89000", "vol": "1234.5", "buy": "90499", "sell": "90501"
        });
        let ticker = parse_ticker(&ctx, &raw, None, 1_700_000_000_000);
        assert_eq!(ticker.symbol, "BTC/USDT:USDT");
        assert_eq!(ticker.timestamp, 1_700_000_000_000);
        assert_eq!(ticker.bid, Some(dec!(90499)));
        assert_eq!(ticker.ask, Some(dec!(90501)));
        assert_eq!(ticker.base_volume, Some(dec!(1234.5)));
        assert_eq!(ticker.mark_price, None);
    }

    #[test]
    fn test_parse_trade() {
        let ctx = context();
        let raw = json!({"id": 77, "symbol": "BTC-USDT", "time": 1700000000000i64,
                         "price": "90000.5", "qty": "0.01", "side": "SELL"});
        let trade = parse_trade(&ctx, &raw, None);
        assert_eq!(trade.id.as_deref(), Some("77"));
        assert_eq!(trade.order, trade.id);
        assert_eq!(trade.symbol.as_deref(), Some("BTC/USDT:USDT"));
        assert_eq!(trade.side, Some(OrderSide::Sell));
        assert_eq!(trade.amount, Some(dec!(0.01)));
        assert!(trade.cost.is_none() && trade.fee.is_none());
    }

    #[test]
    fn test_unhyphenated_symbol_resolves_only_through_id2() {
        let raw = json!({"id": 1, "symbol": "BTCUSDT", "price": "1", "qty": "1"});
        assert_eq!(parse_trade(&context(), &raw, None).symbol.as_deref(), Some("BTCUSDT"));

        let mut listed = raw_market();
        listed["id2"] = json!("BTCUSDT");
        let ctx = MarketContext::new(vec![parse_market(&listed).unwrap()]);
        assert_eq!(parse_trade(&ctx, &raw, None).symbol.as_deref(), Some("BTC/USDT:USDT"));
    }

    #[test]
    fn test_parse_ohlcv_forms() {
        let long = parse_ohlcv(&json!({
            "timestamp": 1741265880000i64, "open": 90156, "high": 90235,
            "low": 90156, "close": 90235, "volume": 0.052
        }));
        let short = parse_ohlcv(&json!({
            "t": 1741265880000i64, "o": "90156", "h": "90235",
            "l": "90156", "c": "90235", "v": "0.052"
        }));
        let array = parse_ohlcv(&json!([1741265880000i64, "90156", "90235", "90156", "90235", "0.052"]));
        let expected = Ohlcv::new(1741265880000, dec!(90156), dec!(90235), dec!(90156), dec!(90235), dec!(0.052));
        assert_eq!(long, expected);
        assert_eq!(short, expected);
        assert_eq!(array, expected);
        assert_eq!(parse_ohlcv(&json!({})), Ohlcv::default());
    }

    #[test]
    fn test_parse_order_book_nested_levels() {
        let raw = json!({
            "lastUpdateId": 1027024,
            "E": 1589436922972i64,
            "bids": [[{"price": "4.00", "amount": "431"}], [{"price": "4.10", "amount": "1"}]],
            "asks": [["5.00", "2"], ["4.90", "3"]]
        });
        let book = parse_order_book("BTC/USDT:USDT", &raw);
        assert_eq!(book.nonce, Some(1027024));
        assert_eq!(book.timestamp, Some(1589436922972));
        assert_eq!(book.best_bid().unwrap().price, dec!(4.10));
        assert_eq!(book.best_ask().unwrap().price, dec!(4.90));
        assert_eq!(book.bids.len(), 2);
    }

    #[test]
    fn test_parse_last_prices_omits_zero() {
        let ctx = context();
        let prices = parse_last_prices(
            &ctx,
            &[json!({"symbol": "BTC-USDT", "price": "0"}), json!({"symbol": "BTC-USDT", "price": "1.5"})],
            5,
        );
        assert_eq!(prices[0].price, None);
        assert_eq!(prices[1].price, Some(dec!(1.5)));
        assert_eq!(prices[1].symbol, "BTC/USDT:USDT");
    }

    #[test]
    fn test_parse_funding_rate() {
        let ctx = context();
        let raw = json!({"symbol": "BTC-USDT", "lastFundingRate": "0.0001",
                         "time": 1700000000000i64, "nextFundingTime": 1700028800000i64});
        let rate = parse_funding_rate(&ctx, &raw, None);
        assert_eq!(rate.symbol, "BTC/USDT:USDT");
        assert_eq!(rate.funding_rate, Some(dec!(0.0001)));
        assert_eq!(rate.next_funding_timestamp, Some(1700028800000));
        assert_eq!(rate.interval.as_deref(), Some("8h"));
    }

    #[test]
    fn test_parse_funding_history_synthetic_amount() {
        let ctx = context();
        let raw = json!({"symbol": "BTC-USDT", "fundingRate": "-0.0002", "fundingTime": 1700000000000i64});
        let entry = parse_funding_rate_history(&ctx, &raw, None);
        assert_eq!(entry.amount, Decimal::ZERO);
        assert_eq!(entry.code.as_deref(), Some("USDT"));
        assert_eq!(entry.id.as_deref(), Some("BTC/USDT:USDT"));
        assert_eq!(entry.funding_rate, Some(dec!(-0.0002)));
    }

    #[test]
    fn test_parse_order_field_fallbacks() {
        let ctx = context();
        let raw = json!({
            "id": "123", "symbol": "BTC-USDT", "ctime": 1700000000000i64, "mtime": 1700000001000i64,
            "type": "LIMIT", "side": "BUY", "price": "90000", "volume": "2",
            "dealVolume": "0.5", "avgDealPrice": "89999", "status": "PARTIALLY_FILLED",
            "timeInForce": "PO"
        });
        let order = parse_order(&ctx, &raw, None);
        assert_eq!(order.id.as_deref(), Some("123"));
        assert_eq!(order.symbol.as_deref(), Some("BTC/USDT:USDT"));
        assert_eq!(order.order_type, Some(OrderType::Limit));
        assert_eq!(order.side, Some(OrderSide::Buy));
        assert_eq!(order.amount, Some(dec!(2)));
        assert_eq!(order.filled, Some(dec!(0.5)));
        assert_eq!(order.remaining, Some(dec!(1.5)));
        assert_eq!(order.average, Some(dec!(89999)));
        assert_eq!(order.status, Some(OrderStatus::Open));
        assert_eq!(order.post_only, Some(true));
        assert_eq!(order.last_update_timestamp, Some(1700000001000));
    }

    #[test]
    fn test_parse_order_unknown_status_is_none() {
        let order = parse_order(&MarketContext::empty(), &json!({"status": "WEIRD"}), None);
        assert_eq!(order.status, None);
        assert_eq!(order.remaining, None);
    }

    #[test]
    fn test_parse_position() {
        let ctx = context();
        let raw = json!({"positionId": "p1", "symbol": "BTC-USDT", "side": "LONG",
                         "ctime": 1700000000000i64, "marginType": "CROSSED"});
        let position = parse_position(&ctx, &raw, None);
        assert_eq!(position.id.as_deref(), Some("p1"));
        assert_eq!(position.side.as_deref(), Some("long"));
        assert_eq!(position.timestamp, Some(1700000000000));
        assert_eq!(position.margin_mode.as_deref(), Some("cross"));
    }

    #[test]
    fn test_parse_transfer_status() {
        let ok = parse_transfer(&json!({"transferId": "t1", "success": true, "amount": "10"}));
        assert_eq!(ok.id.as_deref(), Some("t1"));
        assert_eq!(ok.status, Some(TransferStatus::Success));
        assert_eq!(ok.amount, Some(dec!(10)));

        let failed = parse_transfer(&json!({"id": "t2", "success": false}));
        assert_eq!(failed.status, Some(TransferStatus::Error));

        let missing = parse_transfer(&json!({"id": "t3"}));
        assert_eq!(missing.status, Some(TransferStatus::Error));
    }

    #[test]
    fn test_parse_balance_keys() {
        let list = vec![
            json!({"walletType": "spot", "asset": "USDT", "available": "10", "frozen": "1", "total": "11"}),
            json!({"walletType": "fund", "asset": "usdt", "available": "5", "frozen": "0", "total": "5"}),
        ];
        let balance = parse_balance(&list);
        let spot = balance.get("USDT").unwrap();
        assert_eq!(spot.free.as_deref(), Some("10"));
        assert_eq!(spot.used.as_deref(), Some("1"));
        assert_eq!(spot.total.as_deref(), Some("11"));
        assert!(balance.get("USDT_fund").is_some());
    }

    #[test]
    fn test_parse_swap_balance() {
        let list = vec![json!({"asset": "USDT", "availableBalance": "3", "walletBalance": "4"})];
        let balance = parse_swap_balance(&list, "W001");
        let entry = balance.get("USDT_W001").unwrap();
        assert_eq!(entry.free.as_deref(), Some("3"));
        assert_eq!(entry.total.as_deref(), Some("4"));
        assert_eq!(entry.used, None);
    }

    #[test]
    fn test_parse_transaction() {
        let raw = json!({"id": 9, "txId": "0xabc", "asset": "usdt", "amount": "100",
                         "status": "SUCCESS", "createTime": 1700000000000i64});
        let tx = parse_transaction(&raw, TransactionKind::Deposit);
        assert_eq!(tx.id.as_deref(), Some("9"));
        assert_eq!(tx.currency.as_deref(), Some("USDT"));
        assert_eq!(tx.status.as_deref(), Some("success"));
        assert_eq!(tx.kind, TransactionKind::Deposit);
    }

    #[test]
    fn test_parse_modes_and_leverage() {
        let info = parse_margin_mode("BTC/USDT:USDT", &json!({"marginType": "ISOLATED"}));
        assert_eq!(info.margin_mode, Some(MarginMode::Isolated));

        assert!(parse_position_mode(&json!({"positionType": "HEDGE"})).hedged);
        assert!(!parse_position_mode(&json!({"positionType": "ONEWAY"})).hedged);
        assert!(parse_position_mode(&json!({"dualSidePosition": true})).hedged);

        let leverage = parse_leverage("BTC/USDT:USDT", &json!({"leverage": 20}));
        assert_eq!(leverage.long_leverage, Some(dec!(20)));
        assert_eq!(leverage.short_leverage, Some(dec!(20)));
    }

    #[test]
    fn test_response_helpers() {
        let response = json!({"code": 200, "data": [1, 2]});
        assert_eq!(response_list(&response).len(), 2);
        assert!(response_list(&json!({"code": 200, "data": {}})).is_empty());
        assert_eq!(response_list(&json!({"data": {"rows": [1], "total": 1}})).len(), 1);
        assert_eq!(response_list(&json!({"data": {"list": [1, 2, 3]}})).len(), 3);
        assert_eq!(response_data(&json!({})), &Value::Null);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_remaining_is_amount_minus_filled(
            amount in 0i64..1_000_000_000,
            filled in 0i64..1_000_000_000,
            scale in 0u32..8,
        ) {
            let amount = Decimal::new(amount, scale);
            let filled = Decimal::new(filled, scale);
            let raw = json!({
                "orderId": "1",
                "origQty": amount.to_string(),
                "executedQty": filled.to_string(),
            });
            let order = parse_order(&MarketContext::empty(), &raw, None);
            prop_assert_eq!(order.remaining, Some(amount - filled));
        }
    }
}
