//! Darvas box boundary detection.
//!
//! A swing extreme is confirmed once a run of subsequent bars fails to break
//! it. The scan walks backward from the newest confirmable bar, so the result
//! is the most recent confirmed extreme, not the most extreme value overall.

use crate::models::candle::Candle;

/// Most recent confirmed swing high of the series.
///
/// A candidate high at position `i` must strictly exceed its predecessor and
/// every one of the next `n_up` highs must stay strictly below it. A bar that
/// matches the candidate exactly disqualifies it.
pub fn find_confirmed_high(candles: &[Candle], n_up: usize) -> Option<f64> {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    find_confirmed_extreme(&highs, n_up, |candidate, other| candidate > other)
}

/// Most recent confirmed swing low of the series. Mirror image of
/// [`find_confirmed_high`].
pub fn find_confirmed_low(candles: &[Candle], n_down: usize) -> Option<f64> {
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    find_confirmed_extreme(&lows, n_down, |candidate, other| candidate < other)
}

/// Backward scan for the most recent confirmed extreme.
///
/// `beats(candidate, other)` holds when the candidate strictly dominates the
/// other value in the extreme's direction. Candidate positions run from
/// `len - window - 1` down to, exclusively, `window`; the first confirmed
/// candidate wins. An empty scan range means "no confirmed extreme yet" and
/// yields `None` rather than an error.
fn find_confirmed_extreme<F>(values: &[f64], window: usize, beats: F) -> Option<f64>
where
    F: Fn(f64, f64) -> bool,
{
    let len = values.len();
    if len <= window + 1 {
        return None;
    }

    for i in (window + 1..=len - window - 1).rev() {
        let candidate = values[i];

        // A local extreme must stand out from its immediate predecessor.
        if !beats(candidate, values[i - 1]) {
            continue;
        }

        // Confirmed only when the whole follow-up run fails to reach it.
        let run = &values[i + 1..(i + 1 + window).min(len)];
        if run.iter().all(|&v| beats(candidate, v)) {
            return Some(candidate);
        }
    }

    None
}
