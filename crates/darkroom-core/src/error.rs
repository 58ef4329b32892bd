//! Error types for darkroom-core operations.
//!
//! The [`Error`] enum covers the failure modes of the core buffer types:
//! invalid dimensions, rectangles that fall outside an image, and pixel
//! buffers whose length does not match their declared geometry.
//!
//! # Usage
//!
//! ```rust
//! use darkroom_core::{Error, Result};
//!
//! fn check_channels(channels: u8) -> Result<()> {
//!     if channels != 3 && channels != 4 {
//!         return Err(Error::unsupported_channels(channels));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in core buffer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or the dimensions overflow a buffer size.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A requested region lies outside the parent image bounds.
    #[error("region ({rx}, {ry}, {rw}x{rh}) exceeds image bounds {width}x{height}")]
    InvalidRegion {
        /// Region X origin
        rx: u32,
        /// Region Y origin
        ry: u32,
        /// Region width
        rw: u32,
        /// Region height
        rh: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Channel count is not 3 (RGB) or 4 (RGBA).
    #[error("unsupported channel count: {channels} (expected 3 or 4)")]
    UnsupportedChannels {
        /// The offending channel count
        channels: u8,
    },

    /// Pixel buffer length does not match width * height * channels.
    #[error("buffer size mismatch: expected {expected} samples, got {got}")]
    BufferSizeMismatch {
        /// Expected sample count
        expected: usize,
        /// Actual sample count
        got: usize,
    },

    /// Generic error with custom message.
    ///
    /// Catch-all for errors that don't fit other categories.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(rx: u32, ry: u32, rw: u32, rh: u32, width: u32, height: u32) -> Self {
        Self::InvalidRegion {
            rx,
            ry,
            rw,
            rh,
            width,
            height,
        }
    }

    /// Creates an [`Error::UnsupportedChannels`] error.
    #[inline]
    pub fn unsupported_channels(channels: u8) -> Self {
        Self::UnsupportedChannels { channels }
    }

    /// Creates an [`Error::BufferSizeMismatch`] error.
    #[inline]
    pub fn buffer_size_mismatch(expected: usize, got: usize) -> Self {
        Self::BufferSizeMismatch { expected, got }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::InvalidRegion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_region_message() {
        let err = Error::invalid_region(10, 20, 100, 50, 64, 64);
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("100x50"));
        assert!(msg.contains("64x64"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_unsupported_channels() {
        let err = Error::unsupported_channels(2);
        assert!(err.to_string().contains('2'));
        assert!(!err.is_bounds_error());
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let err = Error::buffer_size_mismatch(300, 299);
        let msg = err.to_string();
        assert!(msg.contains("300"));
        assert!(msg.contains("299"));
    }
}
