use serde::{Deserialize, Serialize};

/// Discrete trading signal emitted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Ignore,
}

/// Output bundle for a single Darvas Box analysis.
///
/// Prices and percentages are rounded to 2 decimals, volumes truncated to
/// integers. Box bounds stay `None` when no swing has been confirmed yet,
/// which serializes as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxAnalysis {
    pub price: f64,
    pub box_high: Option<f64>,
    pub box_low: Option<f64>,
    pub signal: Signal,
    pub volume: u64,
    pub change: f64,
    pub change_percent: f64,
    pub volume_avg_20: Option<u64>,
}
