//! Fetch-compute-classify signal engine.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::config::Config;
use crate::indicators;
use crate::models::{Interval, SignalResult};
use crate::services::market_data::MarketDataProvider;
use crate::signals::classifier::SignalClassifier;

/// Candle window requested per cycle.
pub const CANDLE_LIMIT: usize = 100;

pub struct SignalEngine {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    classifier: SignalClassifier,
}

impl SignalEngine {
    pub fn new(provider: Arc<dyn MarketDataProvider + Send + Sync>, config: &Config) -> Self {
        Self {
            provider,
            classifier: SignalClassifier::new(config),
        }
    }

    /// Run one fetch-compute-classify cycle for a symbol/interval pair.
    ///
    /// A fetch failure never propagates: it is logged here and surfaces as
    /// a result with signal=ERROR for this cycle only. The caller may simply
    /// invoke again later.
    pub async fn generate_signal(&self, symbol: &str, interval: Interval) -> SignalResult {
        let candles = match self
            .provider
            .get_candles(symbol, interval, CANDLE_LIMIT)
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                warn!(
                    symbol = %symbol,
                    interval = %interval,
                    error = %e,
                    "market data fetch failed"
                );
                return SignalResult::unavailable(symbol, timestamp_now());
            }
        };

        // An empty window means data unavailable, not zero valid candles.
        let Some(last) = candles.last() else {
            warn!(
                symbol = %symbol,
                interval = %interval,
                "market data fetch returned no candles"
            );
            return SignalResult::unavailable(symbol, timestamp_now());
        };

        let snapshot = indicators::snapshot(&candles);
        let classification = self.classifier.classify(&snapshot);

        SignalResult {
            symbol: symbol.to_string(),
            price: last.close,
            signal: classification.signal,
            strength: classification.strength,
            rsi: snapshot.rsi,
            sma_20: snapshot.sma_20,
            sma_50: snapshot.sma_50,
            recommendation: classification.recommendation,
            timestamp: timestamp_now(),
        }
    }
}

fn timestamp_now() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
