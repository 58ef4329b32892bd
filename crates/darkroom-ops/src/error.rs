//! Error types for tone operations.

use crate::OperationType;
use thiserror::Error;

/// Error type for tone operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// The region handed to a kernel failed its validity check.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// Descriptor type does not match the kernel it was handed to.
    #[error("descriptor/kernel mismatch: descriptor is {descriptor:?}, kernel is {kernel:?}")]
    OperationMismatch {
        /// Type carried by the descriptor
        descriptor: OperationType,
        /// Type of the kernel that received it
        kernel: OperationType,
    },

    /// The registry has no kernel for the requested type.
    ///
    /// This is a configuration error and fails the whole request; silently
    /// skipping the operation would produce a result inconsistent with the
    /// caller's intent.
    #[error("no kernel registered for operation type {0:?}")]
    UnknownOperation(OperationType),
}

/// Result type for tone operations.
pub type OpsResult<T> = Result<T, OpsError>;
