//! Trailing volume average used to gate breakout signals.

use crate::models::candle::Candle;

/// Simple moving average of volume over the last `period` candles.
///
/// Returns `None` when the series is shorter than the window; the average is
/// only defined once a full window of history ends at the evaluation point.
pub fn trailing_volume_average(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }

    let window = &candles[candles.len() - period..];
    let total: f64 = window.iter().map(|c| c.volume as f64).sum();
    Some(total / period as f64)
}

/// Trailing volume average with the default 20-bar window.
pub fn trailing_volume_average_default(candles: &[Candle]) -> Option<f64> {
    trailing_volume_average(candles, 20)
}
