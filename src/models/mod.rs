//! Shared data models spanning the service layers.

pub mod analysis;
pub mod candle;

pub use analysis::{BoxAnalysis, Signal};
pub use candle::Candle;
