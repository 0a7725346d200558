//! REST endpoint table.
//!
//! Every operation dispatches through one [`BydfiEndpoint`]; the table below
//! is the only place that knows methods, paths and access levels.

use bydfi_core::adapter::EndpointSpec;
use bydfi_core::transport::HttpMethod::{Get, Post};

/// BYDFi REST endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BydfiEndpoint {
    // Public market data
    /// Market listing
    ExchangeInfo,
    /// 24h statistics
    Ticker24hr,
    /// Order book depth
    Depth,
    /// Recent public trades
    Trades,
    /// Candles
    Klines,
    /// Last traded prices
    TickerPrice,
    /// Mark price
    MarkPrice,
    /// Current funding rates
    FundingRate,
    /// Funding rate history
    FundingRateHistory,

    // Account
    /// Account assets
    AccountAssets,
    /// Internal transfer
    Transfer,
    /// Transfer history
    TransferRecords,
    /// Spot deposit history
    DepositRecords,
    /// Spot withdrawal history
    WithdrawRecords,

    // Swap account
    /// Swap wallet balance
    SwapBalance,
    /// Margin type query
    AssetsMargin,
    /// Margin type change
    MarginType,
    /// Position mode query
    PositionSideDual,
    /// Position mode change
    SetPositionSideDual,
    /// Leverage query
    Leverage,
    /// Leverage change
    SetLeverage,
    /// Leverage change for several markets
    BatchLeverage,
    /// Leverage and margin type change
    BatchLeverageMargin,

    // Trading
    /// New order
    PlaceOrder,
    /// Amend order
    EditOrder,
    /// Amend several orders
    BatchEditOrder,
    /// Cancel order
    CancelOrder,
    /// Cancel several orders
    BatchCancelOrder,
    /// Cancel every order of a market
    CancelAllOrder,
    /// Open orders
    OpenOrder,
    /// Open trigger orders
    PlanOrder,
    /// Order history
    HistoryOrder,
    /// Own trade history
    HistoryTrade,
    /// Closed position history
    PositionHistory,
}

impl BydfiEndpoint {
    /// Method, path and access level.
    pub const fn spec(self) -> EndpointSpec {
        match self {
            Self::ExchangeInfo => EndpointSpec::public(Get, "v1/swap/market/exchange_info"),
            Self::Ticker24hr => EndpointSpec::public(Get, "v1/swap/market/ticker/24hr"),
            Self::Depth => EndpointSpec::public(Get, "v1/swap/market/depth"),
            Self::Trades => EndpointSpec::public(Get, "v1/swap/market/trades"),
            Self::Klines => EndpointSpec::public(Get, "v1/swap/market/klines"),
            Self::TickerPrice => EndpointSpec::public(Get, "v1/swap/market/ticker/price"),
            Self::MarkPrice => EndpointSpec::public(Get, "v1/swap/market/mark_price"),
            Self::FundingRate => EndpointSpec::public(Get, "v1/swap/market/funding_rate"),
            Self::FundingRateHistory => {
                EndpointSpec::public(Get, "v1/swap/market/funding_rate_history")
            }

            Self::AccountAssets => EndpointSpec::private(Get, "v1/account/assets"),
            Self::Transfer => EndpointSpec::private(Post, "v1/account/transfer"),
            Self::TransferRecords => EndpointSpec::private(Get, "v1/account/transfer_records"),
            Self::DepositRecords => EndpointSpec::private(Get, "v1/spot/deposit_records"),
            Self::WithdrawRecords => EndpointSpec::private(Get, "v1/spot/withdraw_records"),

            Self::SwapBalance => EndpointSpec::private(Get, "v1/swap/account/balance"),
            Self::AssetsMargin => EndpointSpec::private(Get, "v1/swap/user_data/assets_margin"),
            Self::MarginType => EndpointSpec::private(Post, "v1/swap/user_data/margin_type"),
            Self::PositionSideDual => {
                EndpointSpec::private(Get, "v1/swap/user_data/position_side/dual")
            }
            Self::SetPositionSideDual => {
                EndpointSpec::private(Post, "v1/swap/user_data/position_side/dual")
            }
            Self::Leverage => EndpointSpec::private(Get, "v1/swap/trade/leverage"),
            Self::SetLeverage => EndpointSpec::private(Post, "v1/swap/trade/leverage"),
            Self::BatchLeverage => EndpointSpec::private(Post, "v1/swap/trade/batch_leverage"),
            Self::BatchLeverageMargin => {
                EndpointSpec::private(Post, "v1/swap/trade/batch_leverage_margin")
            }

            Self::PlaceOrder => EndpointSpec::private(Post, "v1/swap/trade/place_order"),
            Self::EditOrder => EndpointSpec::private(Post, "v1/swap/trade/edit_order"),
            Self::BatchEditOrder => EndpointSpec::private(Post, "v1/swap/trade/batch_edit_order"),
            Self::CancelOrder => EndpointSpec::private(Post, "v1/swap/trade/cancel_order"),
            Self::BatchCancelOrder => {
                EndpointSpec::private(Post, "v1/swap/trade/batch_cancel_order")
            }
            Self::CancelAllOrder => EndpointSpec::private(Post, "v1/swap/trade/cancel_all_order"),
            Self::OpenOrder => EndpointSpec::private(Get, "v1/swap/trade/open_order"),
            Self::PlanOrder => EndpointSpec::private(Get, "v1/swap/trade/plan_order"),
            Self::HistoryOrder => EndpointSpec::private(Get, "v1/swap/trade/history_order"),
            Self::HistoryTrade => EndpointSpec::private(Get, "v1/swap/trade/history_trade"),
            Self::PositionHistory => EndpointSpec::private(Get, "v1/swap/trade/position_history"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bydfi_core::adapter::Access;
    use bydfi_core::transport::HttpMethod;

    #[test]
    fn test_market_data_is_public() {
        for endpoint in [
            BydfiEndpoint::ExchangeInfo,
            BydfiEndpoint::Ticker24hr,
            BydfiEndpoint::Depth,
            BydfiEndpoint::Klines,
            BydfiEndpoint::FundingRateHistory,
        ] {
            let spec = endpoint.spec();
            assert_eq!(spec.access, Access::Public);
            assert_eq!(spec.method, HttpMethod::Get);
            assert!(spec.path.starts_with("v1/swap/market/"));
        }
    }

    #[test]
    fn test_same_path_different_methods() {
        let get = BydfiEndpoint::PositionSideDual.spec();
        let post = BydfiEndpoint::SetPositionSideDual.spec();
        assert_eq!(get.path, post.path);
        assert_eq!(get.method, HttpMethod::Get);
        assert_eq!(post.method, HttpMethod::Post);
        assert!(get.is_private() && post.is_private());
    }

    #[test]
    fn test_order_writes_are_private_posts() {
        for endpoint in [
            BydfiEndpoint::PlaceOrder,
            BydfiEndpoint::EditOrder,
            BydfiEndpoint::CancelOrder,
            BydfiEndpoint::CancelAllOrder,
            BydfiEndpoint::BatchCancelOrder,
            BydfiEndpoint::BatchEditOrder,
        ] {
            let spec = endpoint.spec();
            assert_eq!(spec.method, HttpMethod::Post);
            assert_eq!(spec.access, Access::Private);
        }
    }
}
