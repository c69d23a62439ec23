pub mod darvas;

pub use darvas::{find_confirmed_high, find_confirmed_low};
