//! BYDFi Integration Tests
//!
//! These tests drive the adapter through the real reqwest transport against a
//! local mock server. They can be run with:
//! cargo test --test bydfi_integration_test
//!
//! The live test is marked with #[ignore]. Run it explicitly with
//! BYDFI_API_KEY / BYDFI_SECRET set:
//! cargo test --test bydfi_integration_test -- --ignored

use std::env;
use std::sync::Arc;

use bydfi_core::time::FixedClock;
use bydfi_core::types::{OrderSide, OrderType};
use bydfi_exchanges::bydfi::{Bydfi, BydfiAuth, BydfiBuilder, CreateOrderParams};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NOW: i64 = 1_700_000_000_000;

fn listing() -> Value {
    json!({
        "code": 200,
        "data": [
            {
                "symbol": "BTC-USDT", "baseAsset": "BTC", "marginAsset": "USDT",
                "status": "NORMAL", "pricePrecision": "0.1", "volumePrecision": "0.001",
                "maxLeverageLevel": 125
            }
        ]
    })
}

fn exchange(server: &MockServer) -> Bydfi {
    BydfiBuilder::new()
        .api_key("it-key")
        .secret("it-secret")
        .url_override("rest", format!("{}/api", server.uri()))
        .clock(Arc::new(FixedClock::new(NOW)))
        .build()
        .expect("Failed to build BYDFi")
}

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/swap/market/exchange_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .expect(1)
        .mount(server)
        .await;
}

// ==================== Public Endpoints ====================

#[tokio::test]
async fn test_load_markets_then_fetch_ticker() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/swap/market/ticker/24hr"))
        .and(query_param("symbol", "BTC-USDT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [{"symbol": "BTC-USDT", "last": "90000.5", "high": "91000", "low": "88000", "vol": "12.5"}]
        })))
        .mount(&server)
        .await;

    let bydfi = exchange(&server);
    let ctx = bydfi.load_markets(false).await.expect("Failed to load markets");
    assert_eq!(ctx.len(), 1);

    let ticker = bydfi
        .fetch_ticker("BTC/USDT:USDT")
        .await
        .expect("Failed to fetch ticker");
    assert_eq!(ticker.symbol, "BTC/USDT:USDT");
    assert_eq!(ticker.last, Some(dec!(90000.5)));
    assert_eq!(ticker.base_volume, Some(dec!(12.5)));
    assert_eq!(ticker.timestamp, NOW);

    // Served from the cache; the listing mock expects exactly one call.
    bydfi.load_markets(false).await.expect("Failed to reuse markets");
}

#[tokio::test]
async fn test_public_request_is_unsigned() {
    let server = MockServer::start().await;
    mount_listing(&server).await;

    let bydfi = exchange(&server);
    bydfi.load_markets(false).await.expect("Failed to load markets");

    let received = server.received_requests().await.expect("Recording disabled");
    assert!(received[0].headers.get("X-API-SIGNATURE").is_none());
}

// ==================== Signed Endpoints ====================

#[tokio::test]
async fn test_signed_get_carries_headers() {
    let server = MockServer::start().await;
    let signature = BydfiAuth::new("it-key", "it-secret").sign(&format!(
        "it-key{NOW}asset=USDT&walletType=spot"
    ));
    Mock::given(method("GET"))
        .and(path("/api/v1/account/assets"))
        .and(query_param("walletType", "spot"))
        .and(query_param("asset", "USDT"))
        .and(header("X-API-KEY", "it-key"))
        .and(header("X-API-TIMESTAMP", NOW.to_string().as_str()))
        .and(header("X-API-SIGNATURE", signature.as_str()))
        .and(header_exists("Content-Type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [{"walletType": "spot", "asset": "USDT", "available": "10", "frozen": "1", "total": "11"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bydfi = exchange(&server);
    let balance = bydfi
        .fetch_balance(bydfi_exchanges::bydfi::BalanceParams {
            wallet_type: Some("spot".to_string()),
            asset: Some("USDT".to_string()),
        })
        .await
        .expect("Failed to fetch balance");
    let usdt = balance.get("USDT").expect("USDT entry");
    assert_eq!(usdt.total.as_deref(), Some("11"));
}

#[tokio::test]
async fn test_signed_post_sends_json_body() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/swap/trade/place_order"))
        .and(header_exists("X-API-SIGNATURE"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"orderId": "42", "symbol": "BTC-USDT", "status": "NEW", "origQty": "0.01", "executedQty": "0"}
        })))
        .mount(&server)
        .await;

    let bydfi = exchange(&server);
    let order = bydfi
        .create_order(
            "BTC/USDT:USDT",
            OrderType::Limit,
            OrderSide::Buy,
            dec!(0.01),
            Some(dec!(90000)),
            CreateOrderParams::default(),
        )
        .await
        .expect("Failed to place order");
    assert_eq!(order.id.as_deref(), Some("42"));
    assert_eq!(order.symbol.as_deref(), Some("BTC/USDT:USDT"));

    let received = server.received_requests().await.expect("Recording disabled");
    let placed = received
        .iter()
        .find(|request| request.url.path().ends_with("place_order"))
        .expect("place_order request");
    let body: Value = serde_json::from_slice(&placed.body).expect("JSON body");
    assert_eq!(body["symbol"], "BTC-USDT");
    assert_eq!(body["price"], "90000");
    assert_eq!(body["quantity"], "0.01");

    let signature = BydfiAuth::new("it-key", "it-secret").sign(&format!(
        "it-key{NOW}{}",
        String::from_utf8_lossy(&placed.body)
    ));
    assert_eq!(
        placed.headers.get("X-API-SIGNATURE").and_then(|v| v.to_str().ok()),
        Some(signature.as_str())
    );
}

// ==================== Error Classification ====================

#[tokio::test]
async fn test_http_403_is_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/swap/market/exchange_info"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let bydfi = exchange(&server);
    let err = bydfi.load_markets(false).await.unwrap_err();
    assert!(err.is_rate_limit());
    assert!(err.to_string().contains("bydfi Forbidden"));
}

#[tokio::test]
async fn test_business_code_10001_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/account/assets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 10001, "msg": "Invalid parameter"})),
        )
        .mount(&server)
        .await;

    let bydfi = exchange(&server);
    let err = bydfi
        .fetch_balance(bydfi_exchanges::bydfi::BalanceParams::default())
        .await
        .unwrap_err();
    assert!(err.is_bad_request());
}

#[tokio::test]
async fn test_maintenance_page_is_not_an_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/swap/market/exchange_info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let bydfi = exchange(&server);
    let err = bydfi.load_markets(false).await.unwrap_err();
    let details = err.as_exchange().expect("exchange error");
    assert_eq!(details.message, "bydfi <html>maintenance</html>");
}

#[tokio::test]
async fn test_envelope_without_code_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/swap/market/exchange_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let bydfi = exchange(&server);
    let err = bydfi.load_markets(false).await.unwrap_err();
    assert!(err.as_exchange().is_some());
}

#[tokio::test]
async fn test_rejected_order_is_invalid_order() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/swap/trade/place_order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"code": 500, "msg": "ORDER_POSSIBLE_LEAD_TO_ACCOUNT_LIQUIDATED"}),
        ))
        .mount(&server)
        .await;

    let bydfi = exchange(&server);
    let err = bydfi
        .create_order(
            "BTC/USDT:USDT",
            OrderType::Market,
            OrderSide::Sell,
            dec!(1),
            None,
            CreateOrderParams::default(),
        )
        .await
        .unwrap_err();
    assert!(err.is_invalid_order());
}

#[tokio::test]
async fn test_private_call_without_credentials_sends_nothing() {
    let server = MockServer::start().await;
    let bydfi = BydfiBuilder::new()
        .url_override("rest", format!("{}/api", server.uri()))
        .build()
        .expect("Failed to build BYDFi");

    let err = bydfi
        .fetch_swap_balance(None, None)
        .await
        .unwrap_err();
    assert!(err.as_authentication().is_some());
    let received = server.received_requests().await.expect("Recording disabled");
    assert!(received.is_empty());
}

// ==================== Live API ====================

/// Load API credentials from environment variables.
fn get_api_credentials() -> Option<(String, String)> {
    dotenvy::dotenv().ok();
    let api_key = env::var("BYDFI_API_KEY").ok()?;
    let secret = env::var("BYDFI_SECRET").ok()?;
    Some((api_key, secret))
}

#[tokio::test]
#[ignore = "hits the live BYDFi API"]
async fn test_live_swap_balance() -> anyhow::Result<()> {
    let Some((api_key, secret)) = get_api_credentials() else {
        println!("Skipping: BYDFI_API_KEY / BYDFI_SECRET not set");
        return Ok(());
    };
    let bydfi = Bydfi::builder().api_key(api_key).secret(secret).build()?;
    let markets = bydfi.load_markets(false).await?;
    assert!(!markets.is_empty());
    let balance = bydfi.fetch_swap_balance(None, None).await?;
    println!("{} balance entries", balance.entries.len());
    Ok(())
}
