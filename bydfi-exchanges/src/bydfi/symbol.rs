//! Symbol resolution between canonical and native notation.
//!
//! BYDFi lists its perpetuals as `BTC-USDT`; the canonical symbol is
//! `BTC/USDT:USDT`. Some payloads drop the hyphen (`BTCUSDT`), which is
//! recovered by [`add_hyphen_before_usdt`] and accepted only when the market's
//! `secondary_id` confirms the spelling.
//!
//! # Example
//!
//! ```rust
//! use bydfi_core::{Market, MarketContext};
//! use bydfi_exchanges::bydfi::symbol::{resolve, to_native_id};
//!
//! let ctx = MarketContext::new(vec![Market {
//!     id: "BTC-USDT".to_string(),
//!     secondary_id: Some("BTCUSDT".to_string()),
//!     symbol: "BTC/USDT:USDT".to_string(),
//!     ..Default::default()
//! }]);
//!
//! assert_eq!(to_native_id(&ctx, "BTC/USDT:USDT").unwrap(), "BTC-USDT");
//! assert_eq!(resolve(&ctx, "BTCUSDT", None).unwrap().symbol, "BTC/USDT:USDT");
//! ```

use std::sync::Arc;

use bydfi_core::error::{Error, Result};
use bydfi_core::market_cache::MarketContext;
use bydfi_core::types::Market;
use tracing::warn;

/// Returns the native id of a canonical symbol.
///
/// # Errors
///
/// [`Error::MarketsNotLoaded`] before markets are loaded, [`Error::UnknownSymbol`]
/// for symbols that are not listed.
pub fn to_native_id(ctx: &MarketContext, symbol: &str) -> Result<String> {
    ctx.market(symbol).map(|market| market.id.clone())
}

/// Resolves a native id or canonical symbol to a market.
///
/// Attempts, in order: the hint, the symbol table, the id table, then the
/// hyphen heuristic.
pub fn resolve(
    ctx: &MarketContext,
    raw: &str,
    hint: Option<&Arc<Market>>,
) -> Result<Arc<Market>> {
    if let Some(market) = hint {
        return Ok(Arc::clone(market));
    }
    if !ctx.is_loaded() {
        return Err(Error::markets_not_loaded(format!(
            "markets must be loaded before resolving {raw}"
        )));
    }
    if let Some(market) = ctx.get(raw) {
        return Ok(Arc::clone(market));
    }
    if let Some(market) = ctx.markets_by_id(raw).first() {
        return Ok(Arc::clone(market));
    }

    let candidate_id = add_hyphen_before_usdt(raw);
    if candidate_id != raw {
        let confirmed: Vec<&Arc<Market>> = ctx
            .markets_by_id(&candidate_id)
            .iter()
            .filter(|market| market.secondary_id.as_deref() == Some(raw))
            .collect();
        match confirmed.as_slice() {
            [market] => return Ok(Arc::clone(market)),
            [] => {}
            many => {
                warn!(
                    raw,
                    candidate_id = %candidate_id,
                    matches = many.len(),
                    "ambiguous symbol match rejected"
                );
            }
        }
    }

    Err(Error::unknown_symbol(raw.to_string()))
}

/// Resolves `raw` to its canonical symbol, keeping `raw` when it is unknown.
pub fn safe_symbol(ctx: &MarketContext, raw: &str, hint: Option<&Arc<Market>>) -> String {
    resolve(ctx, raw, hint).map_or_else(|_| raw.to_string(), |market| market.symbol.clone())
}

/// Inserts `-` before the first case-insensitive `USDT` unless it starts the
/// string or is already preceded by `-`.
///
/// ```rust
/// use bydfi_exchanges::bydfi::symbol::add_hyphen_before_usdt;
///
/// assert_eq!(add_hyphen_before_usdt("BTCUSDT"), "BTC-USDT");
/// assert_eq!(add_hyphen_before_usdt("BTC-USDT"), "BTC-USDT");
/// assert_eq!(add_hyphen_before_usdt("USDTBTC"), "USDTBTC");
/// ```
pub fn add_hyphen_before_usdt(raw: &str) -> String {
    let index = raw
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| {
            raw.get(i..i + 4)
                .is_some_and(|window| window.eq_ignore_ascii_case("USDT"))
        });

    match index {
        Some(i) if i > 0 && !raw[..i].ends_with('-') => {
            format!("{}-{}", &raw[..i], &raw[i..])
        }
        _ => raw.to_string(),
    }
}
