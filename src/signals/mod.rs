//! Signal decision and orchestration.

pub mod decision;
pub mod engine;

pub use decision::classify;
pub use engine::{analyze, AnalysisError, BoxParams};
