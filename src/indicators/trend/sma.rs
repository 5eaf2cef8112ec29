//! SMA (Simple Moving Average) indicator

use crate::models::candle::Candle;

/// Calculate the mean of the closing prices of the last `period` candles.
///
/// Returns 0.0 when the window cannot be filled.
pub fn calculate_sma(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period {
        return 0.0;
    }

    let closes: f64 = candles[candles.len() - period..]
        .iter()
        .map(|c| c.close)
        .sum();
    closes / period as f64
}
