//! Refresh task runtime bridging the engine and its consumers.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::models::{Interval, SignalResult};
use crate::signals::engine::SignalEngine;

const RESULT_CHANNEL_CAPACITY: usize = 64;

/// Runs refresh cycles as independent tasks and publishes each result to
/// subscribers.
///
/// Each cycle constructs fresh data and shares nothing with concurrent
/// cycles; a per-(symbol, interval) guard drops a refresh for a pair that is
/// already in flight. Results carry no ordering guarantee across pairs.
pub struct SignalRuntime {
    engine: Arc<SignalEngine>,
    results: broadcast::Sender<SignalResult>,
    in_flight: Arc<RwLock<HashSet<(String, Interval)>>>,
}

impl SignalRuntime {
    pub fn new(engine: Arc<SignalEngine>) -> Self {
        let (results, _) = broadcast::channel(RESULT_CHANNEL_CAPACITY);
        Self {
            engine,
            results,
            in_flight: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Subscribe to results published by refresh tasks.
    pub fn subscribe(&self) -> broadcast::Receiver<SignalResult> {
        self.results.subscribe()
    }

    /// Run one refresh cycle and return the result directly (manual
    /// trigger). The result is also published to subscribers. Returns None
    /// when the pair is already being refreshed.
    pub async fn refresh(&self, symbol: &str, interval: Interval) -> Option<SignalResult> {
        if !self.try_begin(symbol, interval).await {
            debug!(symbol = %symbol, interval = %interval, "refresh already in flight, skipping");
            return None;
        }

        let result = self.engine.generate_signal(symbol, interval).await;
        self.finish(symbol, interval).await;

        // A send with no live receivers is not a failure.
        let _ = self.results.send(result.clone());
        Some(result)
    }

    /// Spawn one refresh cycle as an independent background task (periodic
    /// trigger). Returns false when the pair is already being refreshed.
    pub async fn spawn_refresh(&self, symbol: &str, interval: Interval) -> bool {
        if !self.try_begin(symbol, interval).await {
            debug!(symbol = %symbol, interval = %interval, "refresh already in flight, skipping");
            return false;
        }

        let engine = self.engine.clone();
        let results = self.results.clone();
        let in_flight = self.in_flight.clone();
        let symbol = symbol.to_string();

        tokio::spawn(async move {
            let result = engine.generate_signal(&symbol, interval).await;
            {
                let mut guard = in_flight.write().await;
                guard.remove(&(symbol, interval));
            }
            debug!(
                symbol = %result.symbol,
                signal = ?result.signal,
                "refresh completed"
            );
            let _ = results.send(result);
        });

        true
    }

    async fn try_begin(&self, symbol: &str, interval: Interval) -> bool {
        let mut guard = self.in_flight.write().await;
        guard.insert((symbol.to_string(), interval))
    }

    async fn finish(&self, symbol: &str, interval: Interval) {
        let mut guard = self.in_flight.write().await;
        guard.remove(&(symbol.to_string(), interval));
    }
}
