//! Cascading selection engine for three-level geographic hierarchies
//!
//! Drives dependent selection controls over a region → sub-region → locality
//! hierarchy, resolving a postal code from the final selection. Rendering is
//! out of scope: any view subscribes to [`CascadeEvent`]s and pulls option
//! sets from the controller.

pub mod config;
pub mod error;
pub mod event;
pub mod loader;
pub mod model;

mod controller;

pub use config::CascadeConfig;
pub use config::Comparator;
pub use controller::*;
pub use event::CascadeEvent;
pub use event::Level;
