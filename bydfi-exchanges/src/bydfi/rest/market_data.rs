//! BYDFi public market data operations.
//!
//! None of these calls are signed. Everything except [`Bydfi::fetch_markets`]
//! loads the market listing first so that symbols can be translated.

use std::sync::Arc;

use bydfi_core::adapter::Params;
use bydfi_core::error::Result;
use bydfi_core::market_cache::MarketContext;
use bydfi_core::types::{
    FundingRate, FundingRateHistory, LastPrice, Market, Ohlcv, OrderBook, Ticker, Trade,
};
use tracing::debug;

use super::super::endpoints::BydfiEndpoint;
use super::super::params::{FundingHistoryParams, OhlcvParams};
use super::super::parser::{self, response_list};
use super::super::request::{DEFAULT_LIMIT, RequestParams, check_depth_limit};
use super::super::{Bydfi, timeframe_id};
use super::single_entry;

impl Bydfi {
    /// Fetches the market listing.
    ///
    /// Malformed entries are skipped with a warning.
    pub async fn fetch_markets(&self) -> Result<Vec<Market>> {
        let response = self.request(BydfiEndpoint::ExchangeInfo, Params::new()).await?;
        let markets = parser::parse_markets(response_list(&response));
        debug!(count = markets.len(), "fetched markets");
        Ok(markets)
    }

    async fn symbol_params(&self, symbol: &str) -> Result<(MarketContext, Arc<Market>, RequestParams)> {
        let ctx = self.load_markets(false).await?;
        let market = ctx.market(symbol)?;
        let params = RequestParams::new().param("symbol", market.id.as_str());
        Ok((ctx, market, params))
    }

    /// Fetches 24h statistics for one market.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use bydfi_exchanges::bydfi::Bydfi;
    /// # async fn example() -> bydfi_core::Result<()> {
    /// let bydfi = Bydfi::builder().build()?;
    /// let ticker = bydfi.fetch_ticker("BTC/USDT:USDT").await?;
    /// println!("bid {:?} ask {:?}", ticker.bid, ticker.ask);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker> {
        let (ctx, market, params) = self.symbol_params(symbol).await?;
        let response = self.request(BydfiEndpoint::Ticker24hr, params.build()).await?;
        let raw = single_entry(&response)?;
        Ok(parser::parse_ticker(&ctx, raw, Some(&market), self.now_ms()))
    }

    /// Fetches 24h statistics for every market, or only for `symbols`.
    pub async fn fetch_tickers(&self, symbols: Option<&[&str]>) -> Result<Vec<Ticker>> {
        let ctx = self.load_markets(false).await?;
        if let Some(symbols) = symbols {
            for symbol in symbols {
                ctx.market(symbol)?;
            }
        }

        let response = self.request(BydfiEndpoint::Ticker24hr, Params::new()).await?;
        let now = self.now_ms();
        Ok(response_list(&response)
            .iter()
            .map(|raw| parser::parse_ticker(&ctx, raw, None, now))
            .filter(|ticker| symbols.is_none_or(|wanted| wanted.contains(&ticker.symbol.as_str())))
            .collect())
    }

    /// Fetches the order book.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Canonical symbol.
    /// * `limit` - Depth; one of 5, 10, 20, 50, 100, 500, 1000 (default 500).
    pub async fn fetch_order_book(&self, symbol: &str, limit: Option<u32>) -> Result<OrderBook> {
        let limit = check_depth_limit(limit)?;
        let (_, market, params) = self.symbol_params(symbol).await?;
        let response = self
            .request(BydfiEndpoint::Depth, params.param("limit", limit).build())
            .await?;
        Ok(parser::parse_order_book(
            &market.symbol,
            parser::response_data(&response),
        ))
    }

    /// Fetches recent public trades.
    ///
    /// Trades older than `since` are dropped and at most `limit` are returned.
    pub async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>> {
        let (ctx, market, params) = self.symbol_params(symbol).await?;
        let params = params
            .optional_param("since", since)
            .optional_param("limit", limit)
            .build();
        let response = self.request(BydfiEndpoint::Trades, params).await?;

        let mut trades: Vec<Trade> = response_list(&response)
            .iter()
            .map(|raw| parser::parse_trade(&ctx, raw, Some(&market)))
            .filter(|trade| match (since, trade.timestamp) {
                (Some(since), Some(timestamp)) => timestamp >= since,
                _ => true,
            })
            .collect();
        trades.sort_by_key(|trade| trade.timestamp);
        if let Some(limit) = limit {
            trades.truncate(limit as usize);
        }
        Ok(trades)
    }

    /// Fetches candles.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Canonical symbol.
    /// * `timeframe` - Unified interval, e.g. `1m` or `4h`.
    /// * `since` - Earliest candle open time.
    /// * `limit` - Number of candles (default 500).
    /// * `options` - `until` bounds the latest candle.
    pub async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        since: Option<i64>,
        limit: Option<u32>,
        options: OhlcvParams,
    ) -> Result<Vec<Ohlcv>> {
        let interval = timeframe_id(timeframe)?;
        let (_, _, params) = self.symbol_params(symbol).await?;
        let params = params
            .param("interval", interval)
            .param("limit", limit.unwrap_or(DEFAULT_LIMIT))
            .optional_param("startTime", since)
            .optional_param("end", options.until)
            .build();
        let response = self.request(BydfiEndpoint::Klines, params).await?;
        Ok(response_list(&response).iter().map(parser::parse_ohlcv).collect())
    }

    /// Fetches last traded prices, for one market or all of them.
    pub async fn fetch_last_prices(&self, symbol: Option<&str>) -> Result<Vec<LastPrice>> {
        let ctx = self.load_markets(false).await?;
        let params = match symbol {
            Some(symbol) => RequestParams::new().param("symbol", ctx.market(symbol)?.id.as_str()),
            None => RequestParams::new(),
        };
        let response = self.request(BydfiEndpoint::TickerPrice, params.build()).await?;
        Ok(parser::parse_last_prices(
            &ctx,
            response_list(&response),
            self.now_ms(),
        ))
    }

    /// Fetches the mark price, reported as a ticker.
    pub async fn fetch_mark_price(&self, symbol: &str) -> Result<Ticker> {
        let (ctx, market, params) = self.symbol_params(symbol).await?;
        let response = self.request(BydfiEndpoint::MarkPrice, params.build()).await?;
        let raw = single_entry(&response)?;
        Ok(parser::parse_ticker(&ctx, raw, Some(&market), self.now_ms()))
    }

    /// Fetches the current funding rate of one market.
    pub async fn fetch_funding_rate(&self, symbol: &str) -> Result<FundingRate> {
        let (ctx, market, params) = self.symbol_params(symbol).await?;
        let response = self.request(BydfiEndpoint::FundingRate, params.build()).await?;
        let raw = single_entry(&response)?;
        Ok(parser::parse_funding_rate(&ctx, raw, Some(&market)))
    }

    /// Fetches current funding rates of every market, or only of `symbols`.
    pub async fn fetch_funding_rates(&self, symbols: Option<&[&str]>) -> Result<Vec<FundingRate>> {
        let ctx = self.load_markets(false).await?;
        let response = self.request(BydfiEndpoint::FundingRate, Params::new()).await?;
        Ok(response_list(&response)
            .iter()
            .map(|raw| parser::parse_funding_rate(&ctx, raw, None))
            .filter(|rate| symbols.is_none_or(|wanted| wanted.contains(&rate.symbol.as_str())))
            .collect())
    }

    /// Fetches settled funding rates.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Canonical symbol, or `None` for every market.
    /// * `since` - Earliest settlement time.
    /// * `limit` - Maximum entries (exchange default 100, maximum 1000).
    /// * `options` - `end_time` bounds the latest settlement.
    pub async fn fetch_funding_rate_history(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        options: FundingHistoryParams,
    ) -> Result<Vec<FundingRateHistory>> {
        let ctx = self.load_markets(false).await?;
        let market = symbol.map(|symbol| ctx.market(symbol)).transpose()?;
        let params = RequestParams::new()
            .optional_param("symbol", market.as_ref().map(|m| m.id.as_str()))
            .optional_param("startTime", since)
            .optional_param("limit", limit)
            .optional_param("endTime", options.end_time)
            .build();
        let response = self.request(BydfiEndpoint::FundingRateHistory, params).await?;
        Ok(response_list(&response)
            .iter()
            .map(|raw| parser::parse_funding_rate_history(&ctx, raw, market.as_ref()))
            .collect())
    }
}
