//! Darvas Box API server.
//!
//! Serves the analysis endpoint backed by the Yahoo Finance daily history
//! provider.

use std::sync::Arc;
use std::time::Instant;

use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info};

use darvas::config::{get_environment, AppConfig};
use darvas::core::http::{start_server, AppState, HealthStatus};
use darvas::logging::init_logging;
use darvas::metrics::Metrics;
use darvas::services::yahoo::YahooFinanceProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env();
    info!(
        environment = %get_environment(),
        port = config.port,
        lookback_days = config.lookback_days,
        n_up = config.params.n_up,
        n_down = config.params.n_down,
        volume_multiplier = config.params.volume_multiplier,
        "starting Darvas Box API server"
    );

    let provider = Arc::new(YahooFinanceProvider::new()?);
    let state = AppState {
        provider,
        params: config.params,
        lookback_days: config.lookback_days,
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: Arc::new(Metrics::new()?),
        start_time: Arc::new(Instant::now()),
    };

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, state).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("shutting down");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
