//! HTTP API tests driving the router in-process

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use ozneh::config::Config;
use ozneh::types::{Candle, TickerSnapshot};
use ozneh::{api, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> (Router, AppState) {
    let state = AppState::new(Config::default());
    let router = api::router().with_state(state.clone());
    (router, state)
}

fn rising_candles() -> Vec<Candle> {
    (0..50)
        .map(|i| {
            let close = 100.0 + i as f64;
            Candle {
                time: 1_700_000_000_000 + i * 3_600_000,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            }
        })
        .collect()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_health() {
    let (router, _) = app();
    let (status, body) = get(router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["trackedSymbols"], 0);
}

#[tokio::test]
async fn test_unknown_symbol_is_404() {
    let (router, _) = app();
    let (status, body) = get(router, "/api/signals/BTCUSDT").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert!(body["error"].as_str().unwrap().contains("BTCUSDT"));
}

#[tokio::test]
async fn test_evaluate_then_query() {
    let (router, state) = app();

    let payload = json!({ "candles": rising_candles() });
    let request = Request::post("/api/signals/btcusdt/evaluate")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(router.clone(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["symbol"], "BTCUSDT");
    assert_eq!(body["data"]["signal"], "BUY");
    assert_eq!(body["data"]["indicators"]["currentPrice"], 149.0);
    assert_eq!(state.engine.get_all_signals().len(), 1);

    let (status, body) = get(router.clone(), "/api/signals/BTCUSDT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["signal"], "BUY");

    let (status, body) = get(router.clone(), "/api/signals").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 1);

    let (_, body) = get(router.clone(), "/api/signals/summary").await;
    assert_eq!(body["data"]["buySignals"], 1);
    assert_eq!(body["data"]["trend"], "bullish");

    let (_, body) = get(router, "/api/signals/accuracy").await;
    let accuracy = body["data"]["accuracy"].as_f64().unwrap();
    assert!((accuracy - 116.44).abs() < 1e-6);
}

#[tokio::test]
async fn test_evaluate_short_input_returns_insufficient_hold() {
    let (router, state) = app();

    let payload = json!({ "candles": &rising_candles()[..10] });
    let request = Request::post("/api/signals/ETHUSDT/evaluate")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["signal"], "HOLD");
    assert_eq!(body["data"]["strength"], 0.0);
    assert_eq!(body["data"]["reason"], "Insufficient data");
    assert!(body["data"].get("indicators").is_none());
    assert!(state.engine.get_history(50).is_empty());
}

#[tokio::test]
async fn test_history_limit() {
    let (router, state) = app();
    for symbol in ["A", "B", "C"] {
        state.engine.evaluate(symbol, &rising_candles());
    }

    let (status, body) = get(router.clone(), "/api/signals/history?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let symbols: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["B", "C"]);

    let (_, body) = get(router, "/api/signals/history").await;
    assert_eq!(body["meta"]["count"], 3);
}

#[tokio::test]
async fn test_malformed_evaluate_body_is_json_error() {
    let (router, state) = app();

    let request = Request::post("/api/signals/BTCUSDT/evaluate")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"candles":5}"#))
        .unwrap();
    let (status, body) = send(router.clone(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());

    let request = Request::post("/api/signals/BTCUSDT/evaluate")
        .body(Body::from(r#"{"candles":[]}"#))
        .unwrap();
    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    assert!(state.engine.get_all_signals().is_empty());
}

#[tokio::test]
async fn test_bad_query_strings_are_json_errors() {
    let (router, _) = app();

    let (status, body) = get(router.clone(), "/api/signals/history?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());

    let (status, body) = get(router, "/api/market/BTCUSDT/klines?limit=99999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_empty_accuracy_baseline() {
    let (router, _) = app();
    let (_, body) = get(router, "/api/signals/accuracy").await;
    assert_eq!(body["data"]["accuracy"], 92.4);
}

#[tokio::test]
async fn test_market_prices_and_status() {
    let (router, state) = app();
    state.price_cache.update(TickerSnapshot {
        symbol: "BTCUSDT".to_string(),
        price: 43000.0,
        change: 100.0,
        change_percent: 0.23,
        high: 43500.0,
        low: 42500.0,
        volume: 1000.0,
        updated_at: 1_700_000_000_000,
    });

    let (status, body) = get(router.clone(), "/api/market/prices").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["symbol"], "BTCUSDT");
    assert_eq!(body["data"][0]["changePercent"], 0.23);

    let (status, body) = get(router.clone(), "/api/market/btcusdt/price").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 43000.0);

    let (status, _) = get(router.clone(), "/api/market/XYZUSDT/price").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(router, "/api/market/status").await;
    assert_eq!(body["data"]["connected"], false);
    assert_eq!(body["data"]["cachedSymbols"], 1);
    assert_eq!(body["data"]["watchlist"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn test_klines_rejects_unknown_interval() {
    let (router, _) = app();
    let (status, body) = get(router, "/api/market/BTCUSDT/klines?interval=7x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("7x"));
}
