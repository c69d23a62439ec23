//! Darvas Box signal decision table.

use crate::models::analysis::Signal;

/// Classify the latest bar against the box bounds.
///
/// Rules, first match wins:
/// - either bound unconfirmed: `Ignore`
/// - close above the box high with volume above `baseline * multiplier`: `Buy`
/// - close above the box high without volume confirmation: `Ignore`
/// - close below the box low: `Sell`
/// - close inside the box (boundary touches included): `Ignore`
///
/// Only the upside breakout is volume-gated. The breakdown fires on price
/// alone; that asymmetry is part of the strategy.
pub fn classify(
    current_price: f64,
    current_volume: u64,
    volume_baseline: Option<f64>,
    box_high: Option<f64>,
    box_low: Option<f64>,
    volume_multiplier: f64,
) -> Signal {
    let (Some(high), Some(low)) = (box_high, box_low) else {
        return Signal::Ignore;
    };

    if current_price > high {
        return match volume_baseline {
            Some(baseline) if current_volume as f64 > baseline * volume_multiplier => Signal::Buy,
            // Breakout without volume confirmation.
            _ => Signal::Ignore,
        };
    }

    if current_price < low {
        return Signal::Sell;
    }

    Signal::Ignore
}
