//! Threshold-vote signal classifier.

use crate::config::Config;
use crate::models::{IndicatorSnapshot, Signal};

/// Classifier decision for one indicator snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub signal: Signal,
    pub strength: u8,
    pub recommendation: String,
}

/// Agreeing votes required before a BUY or SELL is emitted. Each criterion
/// casts at most one vote, so strength tops out at the criterion count.
const DECISION_VOTES: u8 = 2;

pub struct SignalClassifier {
    rsi_oversold: f64,
    rsi_overbought: f64,
}

impl SignalClassifier {
    pub fn new(config: &Config) -> Self {
        Self {
            rsi_oversold: config.rsi_oversold,
            rsi_overbought: config.rsi_overbought,
        }
    }

    /// Combine the RSI vote and the trend vote into a discrete signal.
    pub fn classify(&self, snapshot: &IndicatorSnapshot) -> Classification {
        let mut buy_votes: u8 = 0;
        let mut sell_votes: u8 = 0;

        match self.analyze_rsi(snapshot.rsi) {
            RsiAnalysis::Oversold => buy_votes += 1,
            RsiAnalysis::Overbought => sell_votes += 1,
            RsiAnalysis::Neutral => {}
        }

        match self.analyze_trend(snapshot.sma_20, snapshot.sma_50) {
            TrendAnalysis::Bullish => buy_votes += 1,
            TrendAnalysis::Bearish => sell_votes += 1,
            TrendAnalysis::Flat => {}
        }

        if buy_votes >= DECISION_VOTES {
            Classification {
                signal: Signal::Buy,
                strength: buy_votes,
                recommendation: "Strong BUY signal detected".to_string(),
            }
        } else if sell_votes >= DECISION_VOTES {
            Classification {
                signal: Signal::Sell,
                strength: sell_votes,
                recommendation: "Strong SELL signal detected".to_string(),
            }
        } else {
            Classification {
                signal: Signal::Hold,
                strength: 0,
                recommendation: "No clear signal - HOLD position".to_string(),
            }
        }
    }

    fn analyze_rsi(&self, rsi: f64) -> RsiAnalysis {
        if rsi < self.rsi_oversold {
            RsiAnalysis::Oversold
        } else if rsi > self.rsi_overbought {
            RsiAnalysis::Overbought
        } else {
            RsiAnalysis::Neutral
        }
    }

    fn analyze_trend(&self, sma_short: f64, sma_long: f64) -> TrendAnalysis {
        if sma_short > sma_long {
            TrendAnalysis::Bullish
        } else if sma_short < sma_long {
            TrendAnalysis::Bearish
        } else {
            TrendAnalysis::Flat
        }
    }
}

enum RsiAnalysis {
    Oversold,
    Overbought,
    Neutral,
}

enum TrendAnalysis {
    Bullish,
    Bearish,
    Flat,
}
