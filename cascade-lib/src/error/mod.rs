//! Error types

mod cascade;
mod load;
mod select;

pub use cascade::*;
pub use load::*;
pub use select::*;
