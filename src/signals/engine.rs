//! Analysis orchestrator: derives the volume baseline, locates both box
//! bounds, classifies the latest bar, and packages price-change statistics.

use thiserror::Error;

use crate::indicators::structure::darvas::{find_confirmed_high, find_confirmed_low};
use crate::indicators::volume::trailing_volume_average;
use crate::models::analysis::BoxAnalysis;
use crate::models::candle::Candle;
use crate::signals::decision::classify;

/// Window of the trailing volume average consumed by the classifier.
pub const VOLUME_BASELINE_PERIOD: usize = 20;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("not enough data for analysis: need at least {required} bars, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },
}

/// Tunables for the box scan and the volume gate.
#[derive(Debug, Clone, Copy)]
pub struct BoxParams {
    /// Bars that must fail to break a candidate high before it is confirmed.
    pub n_up: usize,
    /// Bars that must fail to break a candidate low before it is confirmed.
    pub n_down: usize,
    /// Breakout volume must exceed the 20-bar average times this factor.
    pub volume_multiplier: f64,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            n_up: 3,
            n_down: 3,
            volume_multiplier: 1.2,
        }
    }
}

/// Run a full Darvas Box analysis over a daily candle series.
///
/// Pure and deterministic: the box bounds are recomputed from scratch on
/// every call, never cached. Fails when the series is too short for the
/// confirmation lookback plus the volume baseline; an unconfirmed box is not
/// an error and simply yields an `Ignore` signal with absent bounds.
pub fn analyze(candles: &[Candle], params: &BoxParams) -> Result<BoxAnalysis, AnalysisError> {
    let required = params.n_up.max(params.n_down) + VOLUME_BASELINE_PERIOD;
    if candles.len() < required {
        return Err(AnalysisError::InsufficientHistory {
            required,
            actual: candles.len(),
        });
    }

    let volume_baseline = trailing_volume_average(candles, VOLUME_BASELINE_PERIOD);
    let box_high = find_confirmed_high(candles, params.n_up);
    let box_low = find_confirmed_low(candles, params.n_down);

    // Length precondition guarantees at least one candle.
    let last = &candles[candles.len() - 1];
    let current_price = last.close;
    let current_volume = last.volume;

    let signal = classify(
        current_price,
        current_volume,
        volume_baseline,
        box_high,
        box_low,
        params.volume_multiplier,
    );

    let previous_close = if candles.len() > 1 {
        candles[candles.len() - 2].close
    } else {
        current_price
    };
    let change = current_price - previous_close;
    let change_percent = if previous_close > 0.0 {
        change / previous_close * 100.0
    } else {
        0.0
    };

    Ok(BoxAnalysis {
        price: round2(current_price),
        box_high: box_high.map(round2),
        box_low: box_low.map(round2),
        signal,
        volume: current_volume,
        change: round2(change),
        change_percent: round2(change_percent),
        volume_avg_20: volume_baseline.map(|avg| avg as u64),
    })
}

/// Round to 2 decimals at the output boundary; internal math stays full
/// precision.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
