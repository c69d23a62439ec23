//! Yahoo Finance chart API client.
//!
//! Fetches daily OHLCV history through the unofficial v8 chart endpoint.
//! The base URL is injectable so tests can point the client at a mock server.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::models::candle::Candle;
use crate::services::market_data::{MarketDataError, MarketDataProvider};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

/// Quote arrays are null-tolerant: Yahoo pads holidays and halted sessions
/// with nulls instead of omitting the slot.
#[derive(Debug, Deserialize)]
struct ChartQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Uppercase, whitespace-trimmed form used in request paths and error
/// reporting. Exchange suffixes like `.NS` pass through unchanged; the chart
/// API expects them verbatim.
fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

pub struct YahooFinanceProvider {
    client: Client,
    base_url: String,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn candles_from_result(result: ChartResult) -> Result<Vec<Candle>, MarketDataError> {
        let timestamps = result
            .timestamp
            .ok_or_else(|| MarketDataError::Malformed("no timestamps in response".to_string()))?;

        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::Malformed("no quote data in response".to_string()))?;

        let opens = quote.open.unwrap_or_default();
        let highs = quote.high.unwrap_or_default();
        let lows = quote.low.unwrap_or_default();
        let closes = quote.close.unwrap_or_default();
        let volumes = quote.volume.unwrap_or_default();

        let mut candles = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let open = opens.get(i).and_then(|v| *v).unwrap_or(0.0);
            let high = highs.get(i).and_then(|v| *v).unwrap_or(0.0);
            let low = lows.get(i).and_then(|v| *v).unwrap_or(0.0);
            let close = closes.get(i).and_then(|v| *v).unwrap_or(0.0);
            let volume = volumes.get(i).and_then(|v| *v).unwrap_or(0);

            // Drop padded or halted sessions.
            if close <= 0.0 {
                continue;
            }

            let Some(timestamp) = DateTime::from_timestamp(ts, 0) else {
                continue;
            };

            candles.push(Candle::new(open, high, low, close, volume, timestamp));
        }

        Ok(candles)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    async fn daily_history(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let yahoo_symbol = normalize_symbol(symbol);
        let url = format!(
            "{}/v8/finance/chart/{}?range={}d&interval=1d&includePrePost=false",
            self.base_url, yahoo_symbol, lookback_days
        );

        debug!(%url, "fetching daily history");

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(MarketDataError::NoData {
                symbol: yahoo_symbol,
            });
        }
        if !response.status().is_success() {
            return Err(MarketDataError::Upstream(format!(
                "chart API returned {}",
                response.status()
            )));
        }

        let payload: ChartResponse = response.json().await?;

        if let Some(error) = payload.chart.error {
            if error.code.eq_ignore_ascii_case("not found") {
                return Err(MarketDataError::NoData {
                    symbol: yahoo_symbol,
                });
            }
            return Err(MarketDataError::Upstream(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        let result = payload
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or(MarketDataError::NoData {
                symbol: yahoo_symbol,
            })?;

        Self::candles_from_result(result)
    }
}
