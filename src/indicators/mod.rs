//! Technical indicators grouped by category.

pub mod momentum;
pub mod trend;

use crate::models::{Candle, IndicatorSnapshot};

pub const SMA_SHORT_PERIOD: usize = 20;
pub const SMA_LONG_PERIOD: usize = 50;

/// Compute the full indicator set consumed by the classifier.
pub fn snapshot(candles: &[Candle]) -> IndicatorSnapshot {
    IndicatorSnapshot {
        rsi: momentum::calculate_rsi_default(candles),
        sma_20: trend::calculate_sma(candles, SMA_SHORT_PERIOD),
        sma_50: trend::calculate_sma(candles, SMA_LONG_PERIOD),
    }
}
