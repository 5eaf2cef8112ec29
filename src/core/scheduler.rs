//! Cron-based scheduler for periodic signal refreshes

use std::str::FromStr;
use std::sync::Arc;

use cron::Schedule;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::core::runtime::SignalRuntime;
use crate::models::Interval;

/// Scheduler that periodically triggers a refresh for each watched symbol.
pub struct RefreshScheduler {
    runtime: Arc<SignalRuntime>,
    symbols: Vec<String>,
    interval: Interval,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl RefreshScheduler {
    /// Create a new scheduler.
    ///
    /// # Arguments
    /// * `runtime` - Runtime the refresh tasks are dispatched through
    /// * `symbols` - Symbols to refresh on every tick
    /// * `interval` - Kline interval the refreshes are evaluated at
    /// * `refresh_interval_seconds` - Cadence in seconds (0 = disabled)
    pub fn new(
        runtime: Arc<SignalRuntime>,
        symbols: Vec<String>,
        interval: Interval,
        refresh_interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if refresh_interval_seconds == 0 {
            return Err("Scheduler disabled: refresh_interval_seconds is 0".into());
        }

        // Cron format: second minute hour day month weekday
        let cron_expr = if refresh_interval_seconds >= 60 {
            let minutes = refresh_interval_seconds / 60;
            format!("0 */{} * * * *", minutes)
        } else {
            format!("*/{} * * * * *", refresh_interval_seconds)
        };

        let schedule = Schedule::from_str(&cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            refresh_interval = refresh_interval_seconds,
            cron = %cron_expr,
            symbols = ?symbols,
            "RefreshScheduler: created with cadence {}s (cron: {})",
            refresh_interval_seconds,
            cron_expr
        );

        Ok(Self {
            runtime,
            symbols,
            interval,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler loop.
    pub async fn start(&self) {
        let runtime = self.runtime.clone();
        let symbols = self.symbols.clone();
        let interval = self.interval;
        let schedule = self.schedule.clone();
        let handle_arc = self.handle.clone();

        let handle = tokio::spawn(async move {
            info!("RefreshScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                info!(
                    symbol_count = symbols.len(),
                    "RefreshScheduler: cron tick, refreshing {} symbols",
                    symbols.len()
                );

                for symbol in &symbols {
                    if runtime.spawn_refresh(symbol, interval).await {
                        debug!(symbol = %symbol, "RefreshScheduler: refresh spawned for {}", symbol);
                    } else {
                        debug!(
                            symbol = %symbol,
                            "RefreshScheduler: refresh still in flight for {}, skipping tick",
                            symbol
                        );
                    }
                }
            }
        });

        {
            let mut h = handle_arc.write().await;
            *h = Some(handle);
        }

        info!("RefreshScheduler: started successfully");
    }

    /// Stop the scheduler.
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("RefreshScheduler: stopped");
        }
    }

    /// Check if the scheduler is running.
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
