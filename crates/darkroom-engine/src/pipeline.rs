//! The tile processing pipeline.
//!
//! [`ImagePipeline`] applies an ordered list of operation descriptors to a
//! rectangular region of a [`TileSource`]:
//!
//! 1. pull the clamped tile;
//! 2. run each descriptor's kernel in exact caller order — operations are
//!    not commutative, each reads the mutated output of the previous one;
//! 3. abort on the first kernel failure (the tile may be left partially
//!    transformed; nothing is written back);
//! 4. on success, optionally write the tile back to the source.
//!
//! The pipeline holds no cross-call state beyond its registry and the
//! write-back flag, so it can be invoked repeatedly with any region and
//! operation-list combination.

use crate::source::TileSource;
use crate::EngineResult;
use darkroom_core::ImageRegion;
use darkroom_ops::{OperationDescriptor, OperationRegistry};
use tracing::{debug, trace};

/// Applies ordered operation lists to source tiles.
///
/// # Example
///
/// ```rust
/// use darkroom_core::ImageRegion;
/// use darkroom_engine::{ImagePipeline, SourceManager};
/// use darkroom_ops::{OperationDescriptor, OperationType};
///
/// let image = ImageRegion::filled(8, 8, (0, 0), &[0.3, 0.3, 0.3, 1.0]);
/// let mut source = SourceManager::from_region(image);
/// let pipeline = ImagePipeline::new();
///
/// let ops = [OperationDescriptor::with_value(OperationType::Brightness, 0.2)];
/// let tile = pipeline.process_region(&mut source, 0, 0, 8, 8, &ops).unwrap();
/// assert!((tile.pixel(0, 0)[0] - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct ImagePipeline {
    registry: OperationRegistry,
    write_back: bool,
}

impl ImagePipeline {
    /// Creates a pipeline with the builtin registry and write-back enabled.
    pub fn new() -> Self {
        Self {
            registry: OperationRegistry::with_builtin_ops(),
            write_back: true,
        }
    }

    /// Creates a pipeline over a caller-supplied registry.
    pub fn with_registry(registry: OperationRegistry) -> Self {
        Self {
            registry,
            write_back: true,
        }
    }

    /// Sets whether processed tiles are written back to the source.
    ///
    /// Preview call sites turn this off and use the returned tile directly.
    pub fn set_write_back(&mut self, write_back: bool) {
        self.write_back = write_back;
    }

    /// Returns whether processed tiles are written back.
    #[inline]
    pub fn write_back(&self) -> bool {
        self.write_back
    }

    /// Applies `operations` in order to the region `[x, y, width, height]`.
    ///
    /// Returns the processed tile. On the first kernel failure the remaining
    /// operations are skipped, nothing is written back, and the error is
    /// propagated; the caller must not assume a failed tile is unchanged.
    pub fn process_region(
        &self,
        source: &mut dyn TileSource,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        operations: &[OperationDescriptor],
    ) -> EngineResult<ImageRegion> {
        let mut tile = source.get_tile(x, y, width, height)?;
        debug!(
            x,
            y,
            width = tile.width(),
            height = tile.height(),
            ops = operations.len(),
            "processing region"
        );

        for desc in operations {
            let kernel = self.registry.kernel_for(desc.op())?;
            trace!(op = %desc.op(), name = desc.name(), "applying operation");
            kernel.execute(&mut tile, desc)?;
        }

        if self.write_back {
            source.write_tile(&tile)?;
        }
        Ok(tile)
    }
}

impl Default for ImagePipeline {
    fn default() -> Self {
        Self::new()
    }
}
