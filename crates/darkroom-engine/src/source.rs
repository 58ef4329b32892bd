//! Source image ownership and tile extraction.
//!
//! [`TileSource`] is the boundary the pipeline consumes: something that can
//! hand out clamped, float-normalized tiles and accept them back. The
//! in-memory [`SourceManager`] implements it over two buffers:
//!
//! - the **original**: the pristine full-resolution pixel data, never
//!   mutated after load;
//! - the **working** buffer: the original with the active operation set
//!   replayed onto it.
//!
//! Decode, HDR-to-SDR conversion, and color-space normalization happen
//! before a region reaches this type; everything here is already `f32`
//! in [0, 1].

use crate::{EngineError, EngineResult};
use darkroom_core::{Error, ImageRegion};
use tracing::trace;

/// A supplier of image tiles and acceptor of write-back.
pub trait TileSource {
    /// Extracts the tile `[x, y, width, height]`.
    ///
    /// The rectangle is clamped to image bounds; the returned region's
    /// origin and size reflect the clamped rectangle. A rectangle entirely
    /// outside the image is an error.
    fn get_tile(&self, x: u32, y: u32, width: u32, height: u32) -> EngineResult<ImageRegion>;

    /// Merges a region back into the backing buffer.
    ///
    /// The region's origin must lie within image bounds; any part extending
    /// past the edge is ignored.
    fn write_tile(&mut self, region: &ImageRegion) -> EngineResult<()>;
}

/// In-memory owner of the full-resolution original and working buffers.
///
/// # Example
///
/// ```rust
/// use darkroom_core::ImageRegion;
/// use darkroom_engine::{SourceManager, TileSource};
///
/// let image = ImageRegion::filled(16, 16, (0, 0), &[0.5, 0.5, 0.5]);
/// let mut source = SourceManager::from_region(image);
///
/// // Requests past the edge are clamped
/// let tile = source.get_tile(12, 12, 8, 8).unwrap();
/// assert_eq!((tile.width(), tile.height()), (4, 4));
/// ```
#[derive(Debug, Clone)]
pub struct SourceManager {
    width: u32,
    height: u32,
    channels: u8,
    original: Vec<f32>,
    working: Vec<f32>,
}

impl SourceManager {
    /// Takes ownership of a full-frame region as the source image.
    ///
    /// The working buffer starts as a copy of the original.
    pub fn from_region(image: ImageRegion) -> Self {
        let width = image.width();
        let height = image.height();
        let channels = image.channels();
        let original = image.into_pixels();
        let working = original.clone();
        Self {
            width,
            height,
            channels,
            original,
            working,
        }
    }

    /// Returns (width, height) of the source image.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the channel count of the source image.
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Restores the working buffer to the pristine original.
    ///
    /// Called at the start of every full re-apply; replaying an empty
    /// operation list leaves the image in exactly this state.
    pub fn reset_working(&mut self) {
        trace!(width = self.width, height = self.height, "reset working buffer");
        self.working.copy_from_slice(&self.original);
    }

    /// Returns a full-frame snapshot of the working buffer.
    pub fn working_image(&self) -> ImageRegion {
        // Geometry is validated at load, so this cannot fail.
        ImageRegion::from_pixels(self.width, self.height, self.channels, (0, 0), self.working.clone())
            .unwrap_or_else(|_| ImageRegion::new(self.width, self.height, self.channels, (0, 0)))
    }

    /// Clamps a requested rectangle to image bounds.
    fn clamp_rect(&self, x: u32, y: u32, width: u32, height: u32) -> EngineResult<(u32, u32, u32, u32)> {
        if x >= self.width || y >= self.height || width == 0 || height == 0 {
            return Err(EngineError::Core(Error::invalid_region(
                x,
                y,
                width,
                height,
                self.width,
                self.height,
            )));
        }
        let w = width.min(self.width - x);
        let h = height.min(self.height - y);
        Ok((x, y, w, h))
    }
}

impl TileSource for SourceManager {
    fn get_tile(&self, x: u32, y: u32, width: u32, height: u32) -> EngineResult<ImageRegion> {
        let (x, y, w, h) = self.clamp_rect(x, y, width, height)?;
        let ch = self.channels as usize;
        let image_stride = self.width as usize * ch;
        let tile_stride = w as usize * ch;

        let mut pixels = Vec::with_capacity(tile_stride * h as usize);
        for row in y..y + h {
            let start = row as usize * image_stride + x as usize * ch;
            pixels.extend_from_slice(&self.working[start..start + tile_stride]);
        }
        trace!(x, y, w, h, "extracted tile");
        Ok(ImageRegion::from_pixels(w, h, self.channels, (x, y), pixels)?)
    }

    fn write_tile(&mut self, region: &ImageRegion) -> EngineResult<()> {
        let (ox, oy) = region.origin();
        if ox >= self.width || oy >= self.height {
            return Err(EngineError::Core(Error::invalid_region(
                ox,
                oy,
                region.width(),
                region.height(),
                self.width,
                self.height,
            )));
        }
        if region.channels() != self.channels {
            return Err(EngineError::Core(Error::unsupported_channels(
                region.channels(),
            )));
        }

        let ch = self.channels as usize;
        let image_stride = self.width as usize * ch;
        let w = region.width().min(self.width - ox);
        let h = region.height().min(self.height - oy);
        let copy_len = w as usize * ch;

        for row in 0..h {
            let src = region.row(row);
            let start = (oy + row) as usize * image_stride + ox as usize * ch;
            self.working[start..start + copy_len].copy_from_slice(&src[..copy_len]);
        }
        trace!(ox, oy, w, h, "merged tile");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_source() -> SourceManager {
        // 4x2 RGB where red encodes x, green encodes y
        let mut image = ImageRegion::new(4, 2, 3, (0, 0));
        for y in 0..2 {
            for x in 0..4 {
                image.set_pixel(x, y, &[x as f32 / 4.0, y as f32 / 2.0, 0.0]);
            }
        }
        SourceManager::from_region(image)
    }

    #[test]
    fn test_get_tile_reads_working_data() {
        let source = gradient_source();
        let tile = source.get_tile(1, 0, 2, 2).unwrap();
        assert_eq!(tile.origin(), (1, 0));
        assert_eq!(tile.pixel(0, 0), vec![0.25, 0.0, 0.0]);
        assert_eq!(tile.pixel(1, 1), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_get_tile_clamps_to_bounds() {
        let source = gradient_source();
        let tile = source.get_tile(3, 1, 10, 10).unwrap();
        assert_eq!((tile.width(), tile.height()), (1, 1));
        assert_eq!(tile.origin(), (3, 1));
    }

    #[test]
    fn test_get_tile_outside_bounds_fails() {
        let source = gradient_source();
        assert!(source.get_tile(4, 0, 1, 1).is_err());
        assert!(source.get_tile(0, 0, 0, 1).is_err());
    }

    #[test]
    fn test_write_tile_merges() {
        let mut source = gradient_source();
        let patch = ImageRegion::filled(2, 1, (1, 1), &[9.0, 9.0, 9.0]);
        source.write_tile(&patch).unwrap();

        let row = source.get_tile(0, 1, 4, 1).unwrap();
        assert_eq!(row.pixel(0, 0)[0], 0.0);
        assert_eq!(row.pixel(1, 0)[0], 9.0);
        assert_eq!(row.pixel(2, 0)[0], 9.0);
        assert_eq!(row.pixel(3, 0)[0], 0.75);
    }

    #[test]
    fn test_write_tile_truncates_overhang() {
        let mut source = gradient_source();
        let patch = ImageRegion::filled(3, 3, (3, 1), &[5.0, 5.0, 5.0]);
        source.write_tile(&patch).unwrap();
        assert_eq!(source.get_tile(3, 1, 1, 1).unwrap().pixel(0, 0)[0], 5.0);
    }

    #[test]
    fn test_write_tile_origin_out_of_bounds_fails() {
        let mut source = gradient_source();
        let patch = ImageRegion::filled(1, 1, (10, 0), &[1.0, 1.0, 1.0]);
        assert!(source.write_tile(&patch).is_err());
    }

    #[test]
    fn test_reset_working_restores_original() {
        let mut source = gradient_source();
        let pristine = source.working_image();
        let patch = ImageRegion::filled(4, 2, (0, 0), &[0.9, 0.9, 0.9]);
        source.write_tile(&patch).unwrap();
        assert_ne!(source.working_image(), pristine);

        source.reset_working();
        assert_eq!(source.working_image(), pristine);
    }
}
