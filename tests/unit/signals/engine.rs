//! Unit tests for the signal engine

use std::sync::Arc;

use async_trait::async_trait;
use spotrix::config::Config;
use spotrix::models::{Candle, Interval, Signal};
use spotrix::services::market_data::MarketDataProvider;
use spotrix::signals::engine::{SignalEngine, CANDLE_LIMIT};

struct FixedProvider {
    candles: Vec<Candle>,
}

#[async_trait]
impl MarketDataProvider for FixedProvider {
    async fn get_candles(
        &self,
        _symbol: &str,
        _interval: Interval,
        _limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.candles.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl MarketDataProvider for FailingProvider {
    async fn get_candles(
        &self,
        _symbol: &str,
        _interval: Interval,
        _limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("connection refused")))
    }
}

fn engine_with(provider: impl MarketDataProvider + Send + Sync + 'static) -> SignalEngine {
    SignalEngine::new(Arc::new(provider), &Config::default())
}

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(
                close,
                close + 0.5,
                close - 0.5,
                close,
                1000.0,
                i as i64 * 3_600_000,
            )
        })
        .collect()
}

#[tokio::test]
async fn empty_window_yields_an_error_result() {
    let engine = engine_with(FixedProvider { candles: Vec::new() });
    let result = engine.generate_signal("BTCUSDT", Interval::OneHour).await;

    assert_eq!(result.signal, Signal::Error);
    assert_eq!(result.price, 0.0);
    assert_eq!(result.strength, 0);
    assert_eq!(result.rsi, 0.0);
    assert_eq!(result.sma_20, 0.0);
    assert_eq!(result.sma_50, 0.0);
    assert_eq!(result.recommendation, "Unable to fetch data");
}

#[tokio::test]
async fn provider_failure_yields_an_error_result() {
    let engine = engine_with(FailingProvider);
    let result = engine.generate_signal("BTCUSDT", Interval::OneHour).await;

    assert_eq!(result.signal, Signal::Error);
    assert_eq!(result.price, 0.0);
    assert_eq!(result.recommendation, "Unable to fetch data");
}

#[tokio::test]
async fn rally_then_shallow_pullback_generates_a_buy() {
    // 86 rising closes pin the 20-candle average above the 50-candle one,
    // then a 14-step fade drives RSI to 0.
    let mut closes: Vec<f64> = (0..86).map(|i| 100.0 + i as f64).collect();
    for i in 1..=14 {
        closes.push(185.0 - i as f64 * 0.5);
    }
    let last_close = *closes.last().expect("closes is non-empty");

    let engine = engine_with(FixedProvider {
        candles: candles_from_closes(&closes),
    });
    let result = engine.generate_signal("ETHUSDT", Interval::FourHours).await;

    assert_eq!(result.symbol, "ETHUSDT");
    assert_eq!(result.signal, Signal::Buy);
    assert_eq!(result.strength, 2);
    assert_eq!(result.price, last_close);
    assert_eq!(result.rsi, 0.0);
    assert!(result.sma_20 > result.sma_50);
    assert_eq!(result.recommendation, "Strong BUY signal detected");
}

#[tokio::test]
async fn price_is_the_last_close() {
    let closes: Vec<f64> = (0..CANDLE_LIMIT).map(|i| 100.0 + (i % 7) as f64).collect();
    let engine = engine_with(FixedProvider {
        candles: candles_from_closes(&closes),
    });
    let result = engine.generate_signal("BTCUSDT", Interval::OneDay).await;

    assert_eq!(result.price, closes[CANDLE_LIMIT - 1]);
    assert_ne!(result.signal, Signal::Error);
}

#[tokio::test]
async fn timestamp_uses_the_wall_clock_format() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i % 5) as f64).collect();
    let engine = engine_with(FixedProvider {
        candles: candles_from_closes(&closes),
    });
    let result = engine.generate_signal("BTCUSDT", Interval::OneDay).await;

    assert!(
        chrono::NaiveDateTime::parse_from_str(&result.timestamp, "%Y-%m-%d %H:%M:%S").is_ok(),
        "unexpected timestamp: {}",
        result.timestamp
    );
}
