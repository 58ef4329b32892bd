//! The cumulative edit state.
//!
//! [`OperationStateManager`] owns the single, deduplicated, ordered set of
//! currently active operation descriptors: at most one per
//! [`OperationType`](darkroom_ops::OperationType), insertion order preserved,
//! replacement keeping the original position.
//!
//! Every mutation triggers a full re-apply of the entire active set through
//! the registered [`ApplySink`] — not just the changed operation. Operations
//! are order-dependent and the downstream engine recomputes from the
//! original image each time, never incrementally.
//!
//! # Concurrency
//!
//! A single mutex serializes mutations and snapshot reads. The critical
//! section covers only the mutation and the snapshot copy; the sink runs
//! after the lock is released, so an expensive recompute never blocks
//! unrelated state reads, and the sink always sees a list that was valid at
//! a single consistent instant.

use crate::{EngineError, EngineResult};
use darkroom_ops::{OperationDescriptor, OperationType};
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

/// Downstream consumer of the full active operation set.
///
/// Invoked after every state mutation with a snapshot of the whole set; an
/// empty list must restore the pristine image.
pub trait ApplySink: Send + Sync {
    /// Replays the given operations against the original image.
    fn apply(&self, operations: &[OperationDescriptor]) -> EngineResult<()>;
}

/// Thread-safe owner of the active operation set.
///
/// # Example
///
/// ```rust
/// use darkroom_engine::OperationStateManager;
/// use darkroom_ops::{OperationDescriptor, OperationType};
///
/// let state = OperationStateManager::new();
/// state
///     .add_or_update(OperationDescriptor::with_value(OperationType::Brightness, 0.2))
///     .unwrap();
/// state
///     .add_or_update(OperationDescriptor::with_value(OperationType::Brightness, 0.5))
///     .unwrap();
///
/// // One descriptor per type; the later value wins.
/// let active = state.active_operations().unwrap();
/// assert_eq!(active.len(), 1);
/// assert_eq!(active[0].value(), 0.5);
/// ```
pub struct OperationStateManager {
    operations: Mutex<Vec<OperationDescriptor>>,
    sink: Mutex<Option<Arc<dyn ApplySink>>>,
}

impl OperationStateManager {
    /// Creates an empty state manager with no sink attached.
    pub fn new() -> Self {
        Self {
            operations: Mutex::new(Vec::new()),
            sink: Mutex::new(None),
        }
    }

    /// Creates an empty state manager with the sink already attached.
    pub fn with_sink(sink: Arc<dyn ApplySink>) -> Self {
        Self {
            operations: Mutex::new(Vec::new()),
            sink: Mutex::new(Some(sink)),
        }
    }

    /// Attaches the downstream consumer notified after each mutation.
    pub fn set_sink(&self, sink: Arc<dyn ApplySink>) -> EngineResult<()> {
        *self.sink.lock().map_err(|_| EngineError::Poisoned)? = Some(sink);
        Ok(())
    }

    /// Inserts or replaces the descriptor for its operation type.
    ///
    /// A descriptor whose type is already present replaces the existing
    /// entry in place, keeping its position; a new type is appended. The
    /// full active set is then re-applied.
    pub fn add_or_update(&self, descriptor: OperationDescriptor) -> EngineResult<()> {
        let snapshot = {
            let mut ops = self.operations.lock().map_err(|_| EngineError::Poisoned)?;
            match ops.iter_mut().find(|d| d.op() == descriptor.op()) {
                Some(slot) => {
                    trace!(op = %descriptor.op(), "replacing descriptor in place");
                    *slot = descriptor;
                }
                None => {
                    trace!(op = %descriptor.op(), "appending descriptor");
                    ops.push(descriptor);
                }
            }
            ops.clone()
        };
        self.notify(&snapshot)
    }

    /// Removes the descriptor for `op`, if present, then re-applies.
    ///
    /// Removing an absent type still triggers a re-apply; the caller asked
    /// for a state change and gets a consistent working image either way.
    pub fn remove(&self, op: OperationType) -> EngineResult<()> {
        let snapshot = {
            let mut ops = self.operations.lock().map_err(|_| EngineError::Poisoned)?;
            ops.retain(|d| d.op() != op);
            ops.clone()
        };
        self.notify(&snapshot)
    }

    /// Empties the active set and re-applies (restoring the pristine image).
    pub fn clear(&self) -> EngineResult<()> {
        {
            let mut ops = self.operations.lock().map_err(|_| EngineError::Poisoned)?;
            ops.clear();
        }
        self.notify(&[])
    }

    /// Returns a snapshot copy of the active set.
    ///
    /// Callers never observe a half-mutated list.
    pub fn active_operations(&self) -> EngineResult<Vec<OperationDescriptor>> {
        Ok(self
            .operations
            .lock()
            .map_err(|_| EngineError::Poisoned)?
            .clone())
    }

    /// Invokes the sink outside any lock on the operation list.
    fn notify(&self, snapshot: &[OperationDescriptor]) -> EngineResult<()> {
        let sink = self
            .sink
            .lock()
            .map_err(|_| EngineError::Poisoned)?
            .clone();
        match sink {
            Some(sink) => {
                debug!(ops = snapshot.len(), "re-applying active set");
                sink.apply(snapshot)
            }
            None => Ok(()),
        }
    }
}

impl Default for OperationStateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records how many times it was applied and the last list length.
    struct CountingSink {
        applies: AtomicUsize,
        last_len: AtomicUsize,
    }

    impl CountingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                applies: AtomicUsize::new(0),
                last_len: AtomicUsize::new(0),
            })
        }
    }

    impl ApplySink for CountingSink {
        fn apply(&self, operations: &[OperationDescriptor]) -> EngineResult<()> {
            self.applies.fetch_add(1, Ordering::SeqCst);
            self.last_len.store(operations.len(), Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_dedup_by_type_preserves_position() {
        let state = OperationStateManager::new();
        state
            .add_or_update(OperationDescriptor::with_value(OperationType::Brightness, 0.2))
            .unwrap();
        state
            .add_or_update(OperationDescriptor::with_value(OperationType::Shadows, 0.1))
            .unwrap();
        state
            .add_or_update(OperationDescriptor::with_value(OperationType::Brightness, 0.5))
            .unwrap();

        let active = state.active_operations().unwrap();
        assert_eq!(active.len(), 2);
        // Brightness keeps the position its first insertion occupied
        assert_eq!(active[0].op(), OperationType::Brightness);
        assert_eq!(active[0].value(), 0.5);
        assert_eq!(active[1].op(), OperationType::Shadows);
    }

    #[test]
    fn test_every_mutation_triggers_full_reapply() {
        let state = OperationStateManager::new();
        let sink = CountingSink::new();
        state.set_sink(sink.clone()).unwrap();

        state
            .add_or_update(OperationDescriptor::with_value(OperationType::Whites, 0.3))
            .unwrap();
        state
            .add_or_update(OperationDescriptor::with_value(OperationType::Blacks, -0.2))
            .unwrap();
        assert_eq!(sink.applies.load(Ordering::SeqCst), 2);
        assert_eq!(sink.last_len.load(Ordering::SeqCst), 2);

        state.remove(OperationType::Whites).unwrap();
        assert_eq!(sink.applies.load(Ordering::SeqCst), 3);
        assert_eq!(sink.last_len.load(Ordering::SeqCst), 1);

        state.clear().unwrap();
        assert_eq!(sink.applies.load(Ordering::SeqCst), 4);
        assert_eq!(sink.last_len.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_absent_type_is_noop_on_set() {
        let state = OperationStateManager::new();
        state
            .add_or_update(OperationDescriptor::with_value(OperationType::Contrast, 0.4))
            .unwrap();
        state.remove(OperationType::Whites).unwrap();

        let active = state.active_operations().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].op(), OperationType::Contrast);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let state = OperationStateManager::new();
        state
            .add_or_update(OperationDescriptor::with_value(OperationType::Shadows, 0.1))
            .unwrap();
        let snapshot = state.active_operations().unwrap();
        state.clear().unwrap();
        // The earlier snapshot is unaffected by later mutations
        assert_eq!(snapshot.len(), 1);
    }
}
