use serde::{Deserialize, Serialize};

/// Indicator values derived from one candle window.
///
/// Recomputed from scratch on every request, never cached or persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// RSI(14), always within [0, 100].
    pub rsi: f64,
    pub sma_20: f64,
    pub sma_50: f64,
}
