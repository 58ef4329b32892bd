//! The top-level photo engine.
//!
//! [`PhotoEngine`] wires the pieces together: it owns the source image, the
//! cumulative edit state, and the pipeline, and exposes the load/adjust/query
//! lifecycle the UI layer drives. Each state change replays the full active
//! set against the pristine original, so the working image is always the
//! result of the current edit state and nothing else.
//!
//! All methods are synchronous. The engine assumes at most one apply in
//! flight against a given source image; a UI layer typically queues calls on
//! a single worker thread, with the newest pending request superseding
//! stale ones.

use crate::pipeline::ImagePipeline;
use crate::source::SourceManager;
use crate::state::{ApplySink, OperationStateManager};
use crate::{EngineError, EngineResult};
use darkroom_core::ImageRegion;
use darkroom_ops::{OperationDescriptor, OperationType};
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

/// Shared interior: the source buffers plus the pipeline that fills them.
struct EngineCore {
    source: Mutex<Option<SourceManager>>,
    pipeline: ImagePipeline,
}

impl ApplySink for EngineCore {
    /// Full re-apply: pristine original, then every active operation in order.
    fn apply(&self, operations: &[OperationDescriptor]) -> EngineResult<()> {
        let mut guard = self.source.lock().map_err(|_| EngineError::Poisoned)?;
        let Some(source) = guard.as_mut() else {
            trace!("no image loaded, skipping re-apply");
            return Ok(());
        };
        source.reset_working();
        let (width, height) = source.dimensions();
        debug!(width, height, ops = operations.len(), "full re-apply");
        self.pipeline
            .process_region(source, 0, 0, width, height, operations)?;
        Ok(())
    }
}

/// Owns the load/apply/query lifecycle of one edited photo.
///
/// # Example
///
/// ```rust
/// use darkroom_core::ImageRegion;
/// use darkroom_engine::PhotoEngine;
/// use darkroom_ops::{OperationDescriptor, OperationType};
///
/// let engine = PhotoEngine::new();
/// engine
///     .load_image(ImageRegion::filled(4, 4, (0, 0), &[0.5, 0.5, 0.5]))
///     .unwrap();
/// engine
///     .set_operation(OperationDescriptor::with_value(OperationType::Contrast, 0.4))
///     .unwrap();
///
/// // Dropping all edits restores the pristine pixels
/// engine.reset().unwrap();
/// assert_eq!(engine.working_image().unwrap().pixel(0, 0), vec![0.5, 0.5, 0.5]);
/// ```
pub struct PhotoEngine {
    core: Arc<EngineCore>,
    state: OperationStateManager,
}

impl PhotoEngine {
    /// Creates an engine with the builtin operation registry and no image.
    pub fn new() -> Self {
        let core = Arc::new(EngineCore {
            source: Mutex::new(None),
            pipeline: ImagePipeline::new(),
        });
        let state = OperationStateManager::with_sink(core.clone());
        Self { core, state }
    }

    /// Loads a full-frame image as the new source.
    ///
    /// Any active operations are replayed against the new image so the
    /// working buffer immediately reflects the current edit state.
    ///
    /// # Errors
    ///
    /// Rejects an invalid region (zero area, bad channel count, or buffer
    /// length mismatch).
    pub fn load_image(&self, image: ImageRegion) -> EngineResult<()> {
        if !image.is_valid() {
            return Err(EngineError::Core(darkroom_core::Error::invalid_dimensions(
                image.width(),
                image.height(),
                "image failed validity check",
            )));
        }
        debug!(
            width = image.width(),
            height = image.height(),
            channels = image.channels(),
            "loading image"
        );
        {
            let mut guard = self.core.source.lock().map_err(|_| EngineError::Poisoned)?;
            *guard = Some(SourceManager::from_region(image));
        }
        let active = self.state.active_operations()?;
        self.core.apply(&active)
    }

    /// Inserts or updates one operation and re-applies the full set.
    pub fn set_operation(&self, descriptor: OperationDescriptor) -> EngineResult<()> {
        self.state.add_or_update(descriptor)
    }

    /// Removes one operation type and re-applies the full set.
    pub fn remove_operation(&self, op: OperationType) -> EngineResult<()> {
        self.state.remove(op)
    }

    /// Drops all operations, restoring the pristine image.
    pub fn reset(&self) -> EngineResult<()> {
        self.state.clear()
    }

    /// Returns a snapshot of the active operation set.
    pub fn active_operations(&self) -> EngineResult<Vec<OperationDescriptor>> {
        self.state.active_operations()
    }

    /// Returns a full-frame snapshot of the current working image.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoImage`] if nothing has been loaded.
    pub fn working_image(&self) -> EngineResult<ImageRegion> {
        let guard = self.core.source.lock().map_err(|_| EngineError::Poisoned)?;
        guard
            .as_ref()
            .map(SourceManager::working_image)
            .ok_or(EngineError::NoImage)
    }
}

impl Default for PhotoEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mixed_image() -> ImageRegion {
        ImageRegion::from_pixels(
            4,
            1,
            4,
            (0, 0),
            vec![
                0.1, 0.1, 0.1, 1.0, //
                0.4, 0.4, 0.4, 1.0, //
                0.8, 0.8, 0.8, 1.0, //
                0.95, 0.95, 0.95, 1.0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_working_image_requires_load() {
        let engine = PhotoEngine::new();
        assert!(matches!(
            engine.working_image(),
            Err(EngineError::NoImage)
        ));
    }

    #[test]
    fn test_load_rejects_invalid_image() {
        let engine = PhotoEngine::new();
        assert!(engine.load_image(ImageRegion::new(0, 0, 3, (0, 0))).is_err());
    }

    #[test]
    fn test_slider_change_updates_working_image() {
        let engine = PhotoEngine::new();
        engine.load_image(mixed_image()).unwrap();

        engine
            .set_operation(OperationDescriptor::with_value(OperationType::Shadows, -0.3))
            .unwrap();
        let working = engine.working_image().unwrap();
        // L = 0.1 -> mask 0.8 -> shift -0.24
        assert_abs_diff_eq!(working.pixel(0, 0)[0], -0.14, epsilon = 1e-6);
        // L = 0.8 above the ramp -> unchanged
        assert_abs_diff_eq!(working.pixel(2, 0)[0], 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_reapply_recomputes_from_original() {
        let engine = PhotoEngine::new();
        engine.load_image(mixed_image()).unwrap();

        // Drag the slider through several values; only the last one counts.
        for value in [0.1, 0.3, 0.5, 0.2] {
            engine
                .set_operation(OperationDescriptor::with_value(
                    OperationType::Brightness,
                    value,
                ))
                .unwrap();
        }
        let working = engine.working_image().unwrap();
        assert_abs_diff_eq!(working.pixel(0, 0)[0], 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_clear_restores_pristine_pixels() {
        let engine = PhotoEngine::new();
        let original = mixed_image();
        engine.load_image(original.clone()).unwrap();

        engine
            .set_operation(OperationDescriptor::with_value(OperationType::Whites, 0.4))
            .unwrap();
        engine
            .set_operation(OperationDescriptor::with_value(OperationType::Blacks, -0.2))
            .unwrap();
        assert_ne!(engine.working_image().unwrap(), original);

        engine.reset().unwrap();
        assert_eq!(engine.working_image().unwrap(), original);
        assert!(engine.active_operations().unwrap().is_empty());
    }

    #[test]
    fn test_remove_operation_reverts_its_effect() {
        let engine = PhotoEngine::new();
        let original = mixed_image();
        engine.load_image(original.clone()).unwrap();

        engine
            .set_operation(OperationDescriptor::with_value(OperationType::Contrast, 0.6))
            .unwrap();
        engine.remove_operation(OperationType::Contrast).unwrap();
        assert_eq!(engine.working_image().unwrap(), original);
    }

    #[test]
    fn test_disabled_operation_stays_in_set_without_effect() {
        let engine = PhotoEngine::new();
        let original = mixed_image();
        engine.load_image(original.clone()).unwrap();

        engine
            .set_operation(
                OperationDescriptor::with_value(OperationType::Brightness, 0.5)
                    .set_enabled(false),
            )
            .unwrap();
        assert_eq!(engine.working_image().unwrap(), original);
        assert_eq!(engine.active_operations().unwrap().len(), 1);
    }

    #[test]
    fn test_load_replays_existing_edits() {
        let engine = PhotoEngine::new();
        engine
            .set_operation(OperationDescriptor::with_value(
                OperationType::Brightness,
                0.2,
            ))
            .unwrap();

        engine.load_image(mixed_image()).unwrap();
        let working = engine.working_image().unwrap();
        assert_abs_diff_eq!(working.pixel(0, 0)[0], 0.3, epsilon = 1e-6);
    }
}
