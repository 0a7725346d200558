//! BYDFi account operations: balances, internal transfers, deposit and
//! withdrawal history.

use bydfi_core::error::Result;
use bydfi_core::parser_utils::timestamp_to_datetime;
use bydfi_core::precision::number_to_string;
use bydfi_core::types::{Balance, Transaction, TransactionKind, Transfer};
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use tracing::info;

use super::super::Bydfi;
use super::super::endpoints::BydfiEndpoint;
use super::super::params::{BalanceParams, TransferHistoryParams};
use super::super::parser::{self, response_data, response_list};
use super::super::request::{
    DEFAULT_LIMIT, RequestParams, check_time_window, require_non_empty, require_positive,
    upper_enum,
};

impl Bydfi {
    /// Fetches account assets.
    ///
    /// Spot wallets are keyed by currency code, other wallets by
    /// `CODE_walletType`.
    pub async fn fetch_balance(&self, options: BalanceParams) -> Result<Balance> {
        let params = RequestParams::new()
            .optional_param("walletType", options.wallet_type)
            .optional_param("asset", options.asset)
            .build();
        let response = self.request(BydfiEndpoint::AccountAssets, params).await?;
        Ok(parser::parse_balance(response_list(&response)))
    }

    /// Fetches the balance of a swap wallet, keyed by `CODE_wallet`.
    ///
    /// # Arguments
    ///
    /// * `wallet` - Wallet id; the default wallet when `None`.
    /// * `asset` - Restrict to one currency.
    pub async fn fetch_swap_balance(
        &self,
        wallet: Option<&str>,
        asset: Option<&str>,
    ) -> Result<Balance> {
        let wallet = wallet.map_or_else(|| self.options().default_wallet.clone(), str::to_string);
        let params = RequestParams::new()
            .param("wallet", wallet.as_str())
            .optional_param("asset", asset)
            .build();
        let response = self.request(BydfiEndpoint::SwapBalance, params).await?;
        Ok(parser::parse_swap_balance(response_list(&response), &wallet))
    }

    /// Moves funds between wallets of the same account.
    ///
    /// # Arguments
    ///
    /// * `code` - Currency code.
    /// * `amount` - Positive amount.
    /// * `from_account` - Source wallet type: `SPOT`, `SWAP` or `FUND`.
    /// * `to_account` - Target wallet type.
    pub async fn transfer(
        &self,
        code: &str,
        amount: Decimal,
        from_account: &str,
        to_account: &str,
    ) -> Result<Transfer> {
        require_non_empty("code", code)?;
        require_positive("amount", amount)?;
        let from_type = upper_enum("fromAccount", from_account)?;
        let to_type = upper_enum("toAccount", to_account)?;

        let params = RequestParams::new()
            .param("asset", code)
            .param("fromType", from_type.as_str())
            .param("toType", to_type.as_str())
            .decimal("amount", amount)
            .build();
        let response = self.request(BydfiEndpoint::Transfer, params).await?;
        info!(code, from = %from_type, to = %to_type, "transfer submitted");

        // The acknowledgement carries little beyond the id and the success
        // flag; the request fills in the rest.
        let mut merged = Map::new();
        if let Value::Object(data) = response_data(&response) {
            merged.extend(data.clone());
        }
        if let Value::Object(envelope) = &response {
            for (key, value) in envelope {
                if key != "data" {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        let now = self.now_ms();
        merged.insert("timestamp".to_string(), json!(now));
        merged.insert("datetime".to_string(), json!(timestamp_to_datetime(now)));
        merged.insert("amount".to_string(), json!(number_to_string(amount)));
        merged.insert("fromAccount".to_string(), json!(from_account));
        merged.insert("toAccount".to_string(), json!(to_account));
        merged.insert("code".to_string(), json!(code));

        Ok(parser::parse_transfer(&Value::Object(merged)))
    }

    /// Fetches transfer history.
    ///
    /// # Arguments
    ///
    /// * `asset` - Currency code.
    /// * `start_time` - Window start, ms.
    /// * `end_time` - Window end, ms.
    /// * `paging` - Page (from 1) and rows per page.
    pub async fn fetch_transfers(
        &self,
        asset: &str,
        start_time: i64,
        end_time: i64,
        paging: TransferHistoryParams,
    ) -> Result<Vec<Transfer>> {
        require_non_empty("asset", asset)?;
        let params = RequestParams::new()
            .param("asset", asset)
            .param("startTime", start_time)
            .param("endTime", end_time)
            .optional_param("page", paging.page)
            .optional_param("rows", paging.rows)
            .build();
        let response = self.request(BydfiEndpoint::TransferRecords, params).await?;
        Ok(response_list(&response)
            .iter()
            .map(parser::parse_transfer)
            .collect())
    }

    /// Fetches spot deposits in a window of at most 7 days.
    pub async fn fetch_deposits(
        &self,
        asset: &str,
        start_time: i64,
        end_time: i64,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        self.fetch_transactions(
            BydfiEndpoint::DepositRecords,
            TransactionKind::Deposit,
            asset,
            start_time,
            end_time,
            limit,
        )
        .await
    }

    /// Fetches spot withdrawals in a window of at most 7 days.
    pub async fn fetch_withdrawals(
        &self,
        asset: &str,
        start_time: i64,
        end_time: i64,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        self.fetch_transactions(
            BydfiEndpoint::WithdrawRecords,
            TransactionKind::Withdrawal,
            asset,
            start_time,
            end_time,
            limit,
        )
        .await
    }

    async fn fetch_transactions(
        &self,
        endpoint: BydfiEndpoint,
        kind: TransactionKind,
        asset: &str,
        start_time: i64,
        end_time: i64,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        let operation = match kind {
            TransactionKind::Deposit => "fetch_deposits",
            TransactionKind::Withdrawal => "fetch_withdrawals",
        };
        require_non_empty("asset", asset)?;
        check_time_window(operation, start_time, end_time)?;

        let params = RequestParams::new()
            .param("asset", asset)
            .param("startTime", start_time)
            .param("endTime", end_time)
            .param("limit", limit.unwrap_or(DEFAULT_LIMIT))
            .build();
        let response = self.request(endpoint, params).await?;
        Ok(response_list(&response)
            .iter()
            .map(|raw| parser::parse_transaction(raw, kind))
            .collect())
    }
}
