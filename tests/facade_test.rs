// Facade tests: the exchange used through the generic pipeline and the
// crate-level re-exports, with a recording transport in place of HTTP.

use std::sync::Arc;

use bydfi_rs::prelude::*;
use rust_decimal_macros::dec;
use serde_json::json;

const NOW: i64 = 1_700_000_000_000;

fn exchange(transport: Arc<RecordingTransport>) -> Bydfi {
    Bydfi::builder()
        .api_key("facade-key")
        .secret("facade-secret")
        .transport(transport)
        .clock(Arc::new(FixedClock::new(NOW)))
        .build()
        .expect("Failed to build BYDFi")
}

fn listing() -> serde_json::Value {
    json!({
        "code": 200,
        "data": [{
            "symbol": "BTC-USDT", "baseAsset": "BTC", "marginAsset": "USDT",
            "status": "NORMAL", "pricePrecision": "0.1", "volumePrecision": "0.001"
        }]
    })
}

#[tokio::test]
async fn test_generic_dispatch_public_endpoint() {
    let transport = Arc::new(RecordingTransport::new());
    transport.push_response(200, json!({"code": 200, "data": [{"symbol": "BTC-USDT", "price": "1"}]}));
    let bydfi = exchange(Arc::clone(&transport));

    let endpoint = EndpointSpec::public(HttpMethod::Get, "v1/swap/market/ticker/price");
    let body = dispatch(&bydfi, &endpoint, Params::new())
        .await
        .expect("dispatch failed");
    assert_eq!(body["data"][0]["price"], "1");

    let request = transport.last_request().expect("request recorded");
    assert_eq!(request.url, "https://api.bydtms.com/api/v1/swap/market/ticker/price");
    assert!(request.header("X-API-SIGNATURE").is_none());
}

#[tokio::test]
async fn test_generic_dispatch_signs_private_endpoint() {
    let transport = Arc::new(RecordingTransport::new());
    let bydfi = exchange(Arc::clone(&transport));

    let mut params = Params::new();
    params.insert("wallet".to_string(), json!("W001"));
    let endpoint = EndpointSpec::private(HttpMethod::Get, "v1/swap/account/balance");
    dispatch(&bydfi, &endpoint, params).await.expect("dispatch failed");

    let request = transport.last_request().expect("request recorded");
    assert_eq!(request.header("X-API-KEY"), Some("facade-key"));
    assert_eq!(request.header("X-API-TIMESTAMP"), Some("1700000000000"));
    assert_eq!(request.header("X-API-SIGNATURE").map(str::len), Some(64));
}

#[tokio::test]
async fn test_dispatch_classifies_rejections() {
    let transport = Arc::new(RecordingTransport::new());
    transport.push_response(200, json!({"code": 20006, "msg": "signature error"}));
    let bydfi = exchange(Arc::clone(&transport));

    let endpoint = EndpointSpec::private(HttpMethod::Get, "v1/account/assets");
    let err = dispatch(&bydfi, &endpoint, Params::new()).await.unwrap_err();
    assert!(err.as_authentication().is_some());
}

#[tokio::test]
async fn test_order_round_trip_through_facade() {
    let transport = Arc::new(RecordingTransport::new());
    transport.push_response(200, listing());
    transport.push_response(
        200,
        json!({"code": 200, "data": {"orderId": "7", "symbol": "BTC-USDT", "status": "PARTIALLY_FILLED",
                                     "origQty": "2", "executedQty": "0.5", "type": "LIMIT", "side": "SELL"}}),
    );
    let bydfi = exchange(Arc::clone(&transport));

    let order = bydfi
        .create_order(
            "BTC/USDT:USDT",
            OrderType::Limit,
            OrderSide::Sell,
            dec!(2),
            Some(dec!(95000)),
            CreateOrderParams::default(),
        )
        .await
        .expect("order failed");
    assert_eq!(order.status, Some(OrderStatus::Open));
    assert_eq!(order.remaining, Some(dec!(1.5)));
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn test_version_is_set() {
    assert!(!bydfi_rs::VERSION.is_empty());
}
