//! Error types for pipeline orchestration.

use thiserror::Error;

/// Error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A core buffer operation failed.
    #[error(transparent)]
    Core(#[from] darkroom_core::Error),

    /// A kernel or registry lookup failed.
    #[error(transparent)]
    Ops(#[from] darkroom_ops::OpsError),

    /// No source image has been loaded yet.
    #[error("no source image loaded")]
    NoImage,

    /// The edit-state mutex was poisoned by a panicking holder.
    #[error("edit state lock poisoned")]
    Poisoned,
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
