//! Binance klines provider implementation

use std::time::Duration;

use serde_json::Value;

use crate::models::{Candle, Interval};
use crate::services::market_data::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

const KLINES_PATH: &str = "/api/v3/klines";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// REST client for the public klines endpoint.
///
/// One bounded-timeout GET per call, no retry. Every failure mode — network
/// error, non-2xx status, malformed payload — surfaces as an error here and
/// is collapsed into the data-unavailable result by the engine.
pub struct BinanceMarketDataProvider {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceMarketDataProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Build a provider against a custom endpoint and client (tests point
    /// this at a mock server).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

impl Default for BinanceMarketDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for BinanceMarketDataProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let url = format!("{}{}", self.base_url, KLINES_PATH);
        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("limit", limit.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Box::new(std::io::Error::other(format!(
                "klines request for {} returned status {}",
                symbol, status
            ))));
        }

        let rows: Vec<Value> = response.json().await?;

        let mut candles = Vec::with_capacity(rows.len());
        for row in &rows {
            candles.push(parse_kline_row(row)?);
        }

        Ok(candles)
    }
}

/// Parse one kline row. The first six positional fields are open time (ms),
/// open, high, low, close and volume; the exchange serializes prices as
/// decimal strings.
fn parse_kline_row(row: &Value) -> Result<Candle, ProviderError> {
    let fields = row
        .as_array()
        .ok_or_else(|| invalid_kline("kline row is not an array".to_string()))?;

    if fields.len() < 6 {
        return Err(invalid_kline(format!(
            "kline row has {} fields, expected at least 6",
            fields.len()
        )));
    }

    let timestamp = fields[0]
        .as_i64()
        .ok_or_else(|| invalid_kline("open time is not an integer".to_string()))?;

    Ok(Candle::new(
        numeric_field(&fields[1], "open")?,
        numeric_field(&fields[2], "high")?,
        numeric_field(&fields[3], "low")?,
        numeric_field(&fields[4], "close")?,
        numeric_field(&fields[5], "volume")?,
        timestamp,
    ))
}

fn numeric_field(value: &Value, name: &str) -> Result<f64, ProviderError> {
    match value {
        Value::String(raw) => raw
            .parse()
            .map_err(|e| invalid_kline(format!("invalid {} field: {}", name, e))),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid_kline(format!("invalid {} field: out of f64 range", name))),
        other => Err(invalid_kline(format!(
            "invalid {} field: unexpected value {}",
            name, other
        ))),
    }
}

fn invalid_kline(message: String) -> ProviderError {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        message,
    ))
}
