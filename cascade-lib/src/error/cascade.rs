//! Top-level error type

use super::LoadError;
use super::SelectError;

/// Any error produced by the loader/controller pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Dataset fetch or parse failure.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Selection operation failure.
    #[error(transparent)]
    Select(#[from] SelectError),
}
