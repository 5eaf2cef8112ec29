use serde::{Deserialize, Serialize};

/// Discrete trading recommendation emitted per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    Error,
}

/// Output record of one fetch-compute-classify cycle.
///
/// Created once per cycle and owned by the caller that requested it; there
/// is no shared state behind it and no cache of prior results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub symbol: String,
    pub price: f64,
    pub signal: Signal,
    /// Number of agreeing votes behind a BUY or SELL; 0 otherwise.
    pub strength: u8,
    pub rsi: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub recommendation: String,
    /// Wall-clock stamp, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl SignalResult {
    /// Result shape for a cycle whose market data could not be fetched.
    pub fn unavailable(symbol: &str, timestamp: String) -> Self {
        Self {
            symbol: symbol.to_string(),
            price: 0.0,
            signal: Signal::Error,
            strength: 0,
            rsi: 0.0,
            sma_20: 0.0,
            sma_50: 0.0,
            recommendation: "Unable to fetch data".to_string(),
            timestamp,
        }
    }
}
