//! Wallet balances.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One currency line of a wallet.
///
/// Amounts are kept as the exchange's decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Available amount
    pub free: Option<String>,
    /// Frozen amount
    pub used: Option<String>,
    /// Total amount
    pub total: Option<String>,
}

/// Balances keyed by account name (`USDT` for spot, `USDT_W001` otherwise).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Per-account entries
    pub entries: BTreeMap<String, BalanceEntry>,
    /// Raw exchange payload
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Balance {
    /// Looks up an account entry.
    pub fn get(&self, account: &str) -> Option<&BalanceEntry> {
        self.entries.get(account)
    }
}
