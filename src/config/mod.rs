//! Environment-backed configuration.

use std::env;

use crate::models::Interval;
use crate::services::binance::DEFAULT_BASE_URL;

/// Deployment environment; drives log formatting.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// The symbol selection the app exposes, quoted against USDT.
const DEFAULT_SYMBOLS: [&str; 4] = ["BTCUSDT", "ETHUSDT", "SOLUSDT", "ADAUSDT"];

/// Engine configuration.
///
/// `Default` mirrors the shipped settings; `from_env` lets deployments
/// override them without code changes. The engine itself never reads the
/// environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub symbols: Vec<String>,
    pub interval: Interval,
    /// Seconds between periodic refresh cycles (0 = disabled).
    pub refresh_interval_seconds: u64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            interval: Interval::OneHour,
            refresh_interval_seconds: 300,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
        }
    }
}

impl Config {
    /// Build a config from the environment, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let symbols = env::var("SYMBOLS")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_uppercase())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|symbols| !symbols.is_empty())
            .unwrap_or_else(|| defaults.symbols.clone());

        Self {
            base_url: env::var("BINANCE_BASE_URL").unwrap_or_else(|_| defaults.base_url.clone()),
            symbols,
            interval: env::var("INTERVAL")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.interval),
            refresh_interval_seconds: env::var("REFRESH_INTERVAL_SECONDS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.refresh_interval_seconds),
            rsi_oversold: defaults.rsi_oversold,
            rsi_overbought: defaults.rsi_overbought,
        }
    }
}
