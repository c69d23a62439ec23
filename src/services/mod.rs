//! External data services.

pub mod market_data;
pub mod yahoo;

pub use market_data::{MarketDataError, MarketDataProvider};
pub use yahoo::YahooFinanceProvider;
