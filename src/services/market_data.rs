//! Market data provider interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::candle::Candle;

#[derive(Debug, Error)]
pub enum MarketDataError {
    /// The provider has no history for the symbol. Maps to a not-found
    /// response; everything else is an upstream failure.
    #[error("no data found for symbol: {symbol}")]
    NoData { symbol: String },

    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("market data provider error: {0}")]
    Upstream(String),

    #[error("malformed market data payload: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily candles for a symbol over the lookback window, in chronological
    /// order (oldest first).
    async fn daily_history(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<Candle>, MarketDataError>;
}
