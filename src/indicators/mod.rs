pub mod structure;
pub mod volume;

pub use structure::*;
pub use volume::*;
