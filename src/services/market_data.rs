//! Market data provider interface for exchange integrations.

use crate::models::{Candle, Interval};

#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Get historical candles for a symbol, oldest first.
    async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>>;
}
