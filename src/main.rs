//! Spotrix worker
//!
//! Polls the exchange on a fixed cadence, runs the signal pipeline for each
//! watched symbol and renders every result record as a log line.

use std::sync::Arc;

use dotenvy::dotenv;
use spotrix::config::Config;
use spotrix::core::runtime::SignalRuntime;
use spotrix::core::scheduler::RefreshScheduler;
use spotrix::logging;
use spotrix::models::SignalResult;
use spotrix::services::binance::BinanceMarketDataProvider;
use spotrix::signals::engine::SignalEngine;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env();
    let env = spotrix::config::get_environment();
    info!("Starting Spotrix worker");
    info!(environment = %env, "Environment");
    info!(
        symbols = ?config.symbols,
        interval = %config.interval,
        refresh_interval = config.refresh_interval_seconds,
        "Watching {} symbols at {} every {}s",
        config.symbols.len(),
        config.interval,
        config.refresh_interval_seconds
    );

    let provider = Arc::new(BinanceMarketDataProvider::with_base_url(&config.base_url));
    let engine = Arc::new(SignalEngine::new(provider, &config));
    let runtime = Arc::new(SignalRuntime::new(engine));

    // Render each published result, the way the app screen did.
    let mut results = runtime.subscribe();
    tokio::spawn(async move {
        loop {
            match results.recv().await {
                Ok(result) => render_result(&result),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Initial load, then the periodic cadence.
    for symbol in &config.symbols {
        runtime.spawn_refresh(symbol, config.interval).await;
    }

    let scheduler = RefreshScheduler::new(
        runtime.clone(),
        config.symbols.clone(),
        config.interval,
        config.refresh_interval_seconds,
    )
    .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler.start().await;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down worker...");
    scheduler.stop().await;
    info!("Worker stopped");

    Ok(())
}

fn render_result(result: &SignalResult) {
    info!(
        symbol = %result.symbol,
        signal = ?result.signal,
        strength = result.strength,
        price = result.price,
        rsi = result.rsi,
        sma_20 = result.sma_20,
        sma_50 = result.sma_50,
        timestamp = %result.timestamp,
        "{}: {:?} - {}",
        result.symbol,
        result.signal,
        result.recommendation
    );
}
