//! Hierarchical dataset model

mod dataset;
mod raw;

pub use dataset::*;
pub use raw::*;
