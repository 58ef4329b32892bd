//! The [`ImageRegion`] pixel-buffer value type.
//!
//! An `ImageRegion` is a rectangular tile of pixel data plus the offset of
//! that tile within its parent image. It is the unit of work handed between
//! the source manager, the pipeline, and the kernels.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, channel-interleaved:
//!
//! ```text
//! RGB:  [R G B R G B R G B ...]  <- Row 0
//! RGBA: [R G B A R G B A ...]    <- Row 0
//! ```
//!
//! Sample index for pixel (x, y), channel c:
//! `(y * width + x) * channels + c`
//!
//! Samples are `f32` normalized to [0.0, 1.0] on input; kernels may push
//! values outside that range and downstream display/export is responsible
//! for clamping.
//!
//! # Ownership
//!
//! A region is owned exclusively by whichever component currently holds it:
//! the source manager creates it, the pipeline mutates it in place, and it is
//! handed onward by value. No two components ever mutate the same region
//! concurrently.
//!
//! # Usage
//!
//! ```rust
//! use darkroom_core::ImageRegion;
//!
//! let mut region = ImageRegion::new(4, 2, 4, (16, 32));
//! region.set_pixel(0, 0, &[0.1, 0.2, 0.3, 1.0]);
//! assert!(region.is_valid());
//! assert_eq!(region.pixel(0, 0), vec![0.1, 0.2, 0.3, 1.0]);
//! ```

use crate::{Error, Result};

/// A rectangular tile of float pixel data with its origin in a parent image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRegion {
    width: u32,
    height: u32,
    channels: u8,
    origin: (u32, u32),
    pixels: Vec<f32>,
}

impl ImageRegion {
    /// Creates a zero-filled region.
    ///
    /// # Example
    ///
    /// ```rust
    /// use darkroom_core::ImageRegion;
    ///
    /// let region = ImageRegion::new(64, 64, 3, (0, 0));
    /// assert_eq!(region.sample_count(), 64 * 64 * 3);
    /// ```
    pub fn new(width: u32, height: u32, channels: u8, origin: (u32, u32)) -> Self {
        let len = width as usize * height as usize * channels as usize;
        Self {
            width,
            height,
            channels,
            origin,
            pixels: vec![0.0; len],
        }
    }

    /// Creates a region from existing pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] if `channels` is not 3 or 4,
    /// [`Error::InvalidDimensions`] for a zero-area region, and
    /// [`Error::BufferSizeMismatch`] if the buffer length doesn't match
    /// `width * height * channels`.
    pub fn from_pixels(
        width: u32,
        height: u32,
        channels: u8,
        origin: (u32, u32),
        pixels: Vec<f32>,
    ) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(Error::unsupported_channels(channels));
        }
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "width and height must be > 0",
            ));
        }
        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected {
            return Err(Error::buffer_size_mismatch(expected, pixels.len()));
        }
        Ok(Self {
            width,
            height,
            channels,
            origin,
            pixels,
        })
    }

    /// Creates a region filled with one pixel value.
    ///
    /// The slice length must equal the channel count.
    pub fn filled(width: u32, height: u32, origin: (u32, u32), pixel: &[f32]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * pixel.len());
        for _ in 0..count {
            pixels.extend_from_slice(pixel);
        }
        Self {
            width,
            height,
            channels: pixel.len() as u8,
            origin,
            pixels,
        }
    }

    /// Returns the region width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the region height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of channels per pixel (3 = RGB, 4 = RGBA).
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Returns the origin (x, y) of this region within its parent image.
    #[inline]
    pub fn origin(&self) -> (u32, u32) {
        self.origin
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the total number of `f32` samples in the buffer.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the number of samples per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Checks the region invariants.
    ///
    /// Valid iff `width > 0`, `height > 0`, `channels` is 3 or 4, and the
    /// buffer length equals `width * height * channels`. Kernels refuse to
    /// touch an invalid region.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && (self.channels == 3 || self.channels == 4)
            && self.pixels.len()
                == self.width as usize * self.height as usize * self.channels as usize
    }

    /// Returns a reference to the raw sample buffer.
    #[inline]
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Returns a mutable reference to the raw sample buffer.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.pixels
    }

    /// Consumes the region, returning the sample buffer.
    #[inline]
    pub fn into_pixels(self) -> Vec<f32> {
        self.pixels
    }

    /// Returns the sample offset for pixel (x, y).
    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Returns the pixel at (x, y) as a channel vector.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Vec<f32> {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        self.pixels[offset..offset + self.channels as usize].to_vec()
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds or the slice length doesn't match
    /// the channel count.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[f32]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        self.pixels[offset..offset + self.channels as usize].copy_from_slice(pixel);
    }

    /// Returns a row of samples as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.row_stride();
        &self.pixels[start..start + self.row_stride()]
    }

    /// Returns a mutable row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        debug_assert!(y < self.height, "row out of bounds");
        let stride = self.row_stride();
        let start = y as usize * stride;
        &mut self.pixels[start..start + stride]
    }
}
