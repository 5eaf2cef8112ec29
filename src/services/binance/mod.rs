//! Binance spot REST market data integration.

pub mod provider;

pub use provider::{BinanceMarketDataProvider, DEFAULT_BASE_URL};
