//! RSI (Relative Strength Index) indicator

use crate::models::candle::Candle;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Calculate RSI over the last `period` close-to-close deltas.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// The function is total: fewer than `period + 1` candles yield the neutral
/// midpoint 50.0, and an all-gain window yields 100.0.
pub fn calculate_rsi(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period + 1 {
        return 50.0;
    }

    let mut gains = Vec::new();
    let mut losses = Vec::new();

    for i in 1..candles.len() {
        let change = candles[i].close - candles[i - 1].close;
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let avg_gain: f64 = gains.iter().rev().take(period).sum::<f64>() / period as f64;
    let avg_loss: f64 = losses.iter().rev().take(period).sum::<f64>() / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Calculate RSI with the default period (14).
pub fn calculate_rsi_default(candles: &[Candle]) -> f64 {
    calculate_rsi(candles, DEFAULT_RSI_PERIOD)
}
