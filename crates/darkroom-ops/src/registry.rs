//! The closed-world operation registry.
//!
//! [`OperationRegistry`] maps an [`OperationType`] to its [`Kernel`]. The
//! registry is populated once at startup with the six known types and is the
//! single seam for adding an operation type without modifying the pipeline.
//!
//! Requesting a type that was never registered is a configuration error and
//! fails the whole request ([`OpsError::UnknownOperation`]); skipping it
//! silently would produce pixels inconsistent with the caller's intent.

use crate::descriptor::OperationType;
use crate::kernel::Kernel;
use crate::{OpsError, OpsResult};
use std::collections::HashMap;
use tracing::debug;

/// The enumerable set of constructible kernels.
///
/// # Example
///
/// ```rust
/// use darkroom_ops::{OperationRegistry, OperationType};
///
/// let registry = OperationRegistry::with_builtin_ops();
/// let kernel = registry.kernel_for(OperationType::Contrast).unwrap();
/// assert_eq!(kernel.op(), OperationType::Contrast);
/// ```
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    kernels: HashMap<OperationType, Kernel>,
}

impl OperationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            kernels: HashMap::new(),
        }
    }

    /// Creates a registry with all six built-in operation types registered.
    pub fn with_builtin_ops() -> Self {
        let mut registry = Self::new();
        for op in OperationType::ALL {
            registry.register(Kernel::for_op(op));
        }
        debug!(count = registry.len(), "registered builtin operations");
        registry
    }

    /// Registers a kernel, replacing any previous kernel for the same type.
    pub fn register(&mut self, kernel: Kernel) {
        self.kernels.insert(kernel.op(), kernel);
    }

    /// Looks up the kernel for an operation type.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::UnknownOperation`] if the type was never
    /// registered.
    pub fn kernel_for(&self, op: OperationType) -> OpsResult<&Kernel> {
        self.kernels
            .get(&op)
            .ok_or(OpsError::UnknownOperation(op))
    }

    /// Returns `true` if a kernel is registered for the type.
    #[inline]
    pub fn contains(&self, op: OperationType) -> bool {
        self.kernels.contains_key(&op)
    }

    /// Returns the number of registered kernels.
    #[inline]
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// Returns `true` if no kernels are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::with_builtin_ops()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_knows_all_types() {
        let registry = OperationRegistry::with_builtin_ops();
        assert_eq!(registry.len(), 6);
        for op in OperationType::ALL {
            let kernel = registry.kernel_for(op).unwrap();
            assert_eq!(kernel.op(), op);
        }
    }

    #[test]
    fn test_empty_registry_errors() {
        let registry = OperationRegistry::new();
        assert!(registry.is_empty());
        let err = registry.kernel_for(OperationType::Whites).unwrap_err();
        assert!(matches!(
            err,
            OpsError::UnknownOperation(OperationType::Whites)
        ));
    }

    #[test]
    fn test_register_is_idempotent_per_type() {
        let mut registry = OperationRegistry::new();
        registry.register(Kernel::for_op(OperationType::Blacks));
        registry.register(Kernel::for_op(OperationType::Blacks));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(OperationType::Blacks));
    }
}
