//! Loaded market metadata.
//!
//! [`MarketContext`] is an immutable snapshot of the listed markets, indexed
//! by canonical symbol and by native id. Operations that need to resolve a
//! symbol take a `&MarketContext` explicitly. [`MarketStore`] owns the
//! current snapshot and serializes its (re)loading.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Market;

#[derive(Debug, Default)]
struct MarketCache {
    markets: HashMap<String, Arc<Market>>,
    markets_by_id: HashMap<String, Vec<Arc<Market>>>,
    symbols: Vec<String>,
    loaded: bool,
}

/// Immutable, cheaply clonable snapshot of the listed markets.
#[derive(Clone, Debug, Default)]
pub struct MarketContext {
    cache: Arc<MarketCache>,
}

impl MarketContext {
    /// Indexes `markets` by symbol and by id.
    ///
    /// A later market with an already seen symbol replaces the earlier one.
    pub fn new(markets: Vec<Market>) -> Self {
        let mut cache = MarketCache {
            loaded: true,
            ..MarketCache::default()
        };
        for market in markets {
            let market = Arc::new(market);
            if cache
                .markets
                .insert(market.symbol.clone(), Arc::clone(&market))
                .is_none()
            {
                cache.symbols.push(market.symbol.clone());
            }
            cache
                .markets_by_id
                .entry(market.id.clone())
                .or_default()
                .push(market);
        }
        cache.symbols.sort();
        Self {
            cache: Arc::new(cache),
        }
    }

    /// An empty, not-yet-loaded context.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether markets have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cache.loaded
    }

    /// Looks up a market by canonical symbol.
    ///
    /// # Errors
    ///
    /// [`Error::MarketsNotLoaded`] before the first load, otherwise
    /// [`Error::UnknownSymbol`] when the symbol is not listed.
    pub fn market(&self, symbol: &str) -> Result<Arc<Market>> {
        if !self.is_loaded() {
            return Err(Error::markets_not_loaded(format!(
                "markets must be loaded before resolving {symbol}"
            )));
        }
        self.cache
            .markets
            .get(symbol)
            .cloned()
            .ok_or_else(|| Error::unknown_symbol(symbol.to_string()))
    }

    /// Looks up a market by canonical symbol without erroring.
    pub fn get(&self, symbol: &str) -> Option<&Arc<Market>> {
        self.cache.markets.get(symbol)
    }

    /// Markets listed under a native id.
    pub fn markets_by_id(&self, id: &str) -> &[Arc<Market>] {
        self.cache
            .markets_by_id
            .get(id)
            .map_or(&[], Vec::as_slice)
    }

    /// All markets, in symbol order.
    pub fn markets(&self) -> impl Iterator<Item = &Arc<Market>> {
        self.cache
            .symbols
            .iter()
            .filter_map(|symbol| self.cache.markets.get(symbol))
    }

    /// Sorted canonical symbols.
    pub fn symbols(&self) -> &[String] {
        &self.cache.symbols
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.cache.markets.len()
    }

    /// `true` when no market is listed.
    pub fn is_empty(&self) -> bool {
        self.cache.markets.is_empty()
    }
}

/// Holder of the current [`MarketContext`].
///
/// Concurrent callers of [`MarketStore::load_with`] share one fetch: the
/// loading lock is held across the fetch and later callers see the
/// populated snapshot.
#[derive(Debug, Default)]
pub struct MarketStore {
    current: RwLock<MarketContext>,
    loading: Mutex<()>,
}

impl MarketStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot.
    pub fn context(&self) -> MarketContext {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replaces the snapshot.
    pub fn replace(&self, context: MarketContext) {
        match self.current.write() {
            Ok(mut guard) => *guard = context,
            Err(poisoned) => *poisoned.into_inner() = context,
        }
    }

    /// Loads markets through `loader` unless already loaded.
    ///
    /// With `reload` set the loader always runs. On loader failure the
    /// previous snapshot is kept.
    pub async fn load_with<F, Fut>(&self, reload: bool, loader: F) -> Result<MarketContext>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Market>>>,
    {
        let current = self.context();
        if current.is_loaded() && !reload {
            return Ok(current);
        }

        let _guard = self.loading.lock().await;

        let current = self.context();
        if current.is_loaded() && !reload {
            debug!("markets loaded by a concurrent caller");
            return Ok(current);
        }

        let context = MarketContext::new(loader().await?);
        info!(count = context.len(), "markets loaded");
        self.replace(context.clone());
        Ok(context)
    }
}
