//! End-to-end pipeline tests over a mocked exchange

#[path = "test_utils.rs"]
mod test_utils;

use std::sync::Arc;
use std::time::Duration;

use spotrix::config::Config;
use spotrix::core::runtime::SignalRuntime;
use spotrix::core::scheduler::RefreshScheduler;
use spotrix::models::{Interval, Signal};
use spotrix::services::binance::BinanceMarketDataProvider;
use spotrix::signals::engine::SignalEngine;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use test_utils::{kline_rows, mock_klines};

fn engine_for(server: &MockServer) -> Arc<SignalEngine> {
    let provider = Arc::new(BinanceMarketDataProvider::with_client(
        server.uri(),
        reqwest::Client::new(),
    ));
    Arc::new(SignalEngine::new(provider, &Config::default()))
}

#[tokio::test]
async fn fetch_failure_surfaces_as_an_error_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let result = engine.generate_signal("BTCUSDT", Interval::OneHour).await;

    assert_eq!(result.signal, Signal::Error);
    assert_eq!(result.price, 0.0);
    assert_eq!(result.strength, 0);
    assert_eq!(result.recommendation, "Unable to fetch data");
}

#[tokio::test]
async fn sell_setup_flows_through_the_full_pipeline() {
    // 86 falling closes keep the 20-candle average under the 50-candle one,
    // then a 14-step bounce pins RSI to 100.
    let mut closes: Vec<f64> = (0..86).map(|i| 500.0 - i as f64).collect();
    for i in 1..=14 {
        closes.push(415.0 + i as f64 * 0.5);
    }

    let server = MockServer::start().await;
    mock_klines(&server, kline_rows(&closes)).await;

    let engine = engine_for(&server);
    let result = engine.generate_signal("BTCUSDT", Interval::OneHour).await;

    assert_eq!(result.signal, Signal::Sell);
    assert_eq!(result.strength, 2);
    assert_eq!(result.price, *closes.last().expect("closes is non-empty"));
    assert_eq!(result.rsi, 100.0);
    assert!(result.sma_20 < result.sma_50);
    assert_eq!(result.recommendation, "Strong SELL signal detected");
}

#[tokio::test]
async fn runtime_publishes_results_from_spawned_refreshes() {
    let server = MockServer::start().await;
    let closes: Vec<f64> = (0..100).map(|i| 100.0 + (i % 5) as f64).collect();
    mock_klines(&server, kline_rows(&closes)).await;

    let runtime = SignalRuntime::new(engine_for(&server));
    let mut results = runtime.subscribe();

    assert!(runtime.spawn_refresh("ADAUSDT", Interval::FifteenMinutes).await);

    let result = tokio::time::timeout(Duration::from_secs(2), results.recv())
        .await
        .expect("refresh publishes a result")
        .expect("channel open");
    assert_eq!(result.symbol, "ADAUSDT");
    assert_ne!(result.signal, Signal::Error);
}

#[tokio::test]
async fn scheduler_triggers_periodic_refreshes() {
    let server = MockServer::start().await;
    let closes: Vec<f64> = (0..100).map(|i| 100.0 + (i % 5) as f64).collect();
    mock_klines(&server, kline_rows(&closes)).await;

    let runtime = Arc::new(SignalRuntime::new(engine_for(&server)));
    let mut results = runtime.subscribe();

    let scheduler = RefreshScheduler::new(
        runtime,
        vec!["BTCUSDT".to_string()],
        Interval::OneHour,
        1,
    )
    .expect("valid cadence");
    scheduler.start().await;

    let result = tokio::time::timeout(Duration::from_secs(3), results.recv())
        .await
        .expect("scheduler tick publishes a result")
        .expect("channel open");
    assert_eq!(result.symbol, "BTCUSDT");

    scheduler.stop().await;
}
