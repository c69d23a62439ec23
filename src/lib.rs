//! Darvas Box trading signal analysis service.
//!
//! The core is a pure function over a daily candle series: locate the most
//! recent confirmed swing high and low, then classify the latest bar as a
//! breakout, breakdown, or consolidation. Everything else (data fetch, HTTP
//! surface) is plumbing around that function.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
