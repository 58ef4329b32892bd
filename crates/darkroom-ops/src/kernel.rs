//! The per-operation pixel kernels.
//!
//! A [`Kernel`] is the pure pixel transform behind one [`OperationType`].
//! All six kernels share the same contract, applied in order before any
//! pixel is touched:
//!
//! 1. An invalid region fails without mutating anything.
//! 2. A disabled descriptor succeeds trivially (distinct from removal).
//! 3. The primary `"value"` parameter is read with the type's DEFAULT as
//!    fallback.
//! 4. A value exactly equal to DEFAULT succeeds trivially (no-op fast path).
//! 5. An out-of-range value is clamped to the nearest bound and logged;
//!    only invalid *input* fails, never an out-of-range *value*.
//!
//! The tone-region kernels (Blacks/Shadows/Highlights/Whites) add
//! `value * M(L)` to the RGB channels, where `M` is a saturating luminance
//! ramp and `L` the Rec.601 luminance of the original pixel. Brightness adds
//! `value` globally; Contrast scales around the 0.5 midpoint with slope
//! `1 + value`. Alpha, when present, passes through bit-identical. Kernels
//! do not clamp their output to [0, 1]; out-of-range results propagate and
//! downstream display/export clamps.
//!
//! There is no cross-pixel dependency, so rows are processed in parallel
//! with rayon when the `parallel` feature is enabled.

use crate::descriptor::{OperationDescriptor, OperationType, PARAM_VALUE};
use crate::mask::ToneRamp;
use crate::ranges::OperationRanges;
use crate::{OpsError, OpsResult};
use darkroom_core::{luminance, ImageRegion};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Blacks respond to the darkest pixels only.
const BLACKS_RAMP: ToneRamp = ToneRamp::inverted(0.0, 0.25);
/// Shadows cover the dark half of the tonal range.
const SHADOWS_RAMP: ToneRamp = ToneRamp::inverted(0.0, 0.5);
/// Highlights cover the bright tones below the shoulder.
const HIGHLIGHTS_RAMP: ToneRamp = ToneRamp::upright(0.5, 0.9);
/// Whites respond to the brightest pixels only.
const WHITES_RAMP: ToneRamp = ToneRamp::upright(0.75, 1.0);

/// Midpoint for the contrast pivot.
const CONTRAST_PIVOT: f32 = 0.5;

/// The per-pixel transform shape of a kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Transform {
    /// Additive shift weighted by a luminance ramp (tone-region kernels).
    Masked(ToneRamp),
    /// Unmasked additive shift (Brightness).
    Offset,
    /// Scale around [`CONTRAST_PIVOT`] with slope `1 + value` (Contrast).
    MidpointScale,
}

/// The pixel transform implementing one operation type.
///
/// Kernels are stateless; the registry hands out shared references to a
/// fixed set of them.
///
/// # Example
///
/// ```rust
/// use darkroom_core::ImageRegion;
/// use darkroom_ops::{Kernel, OperationDescriptor, OperationType};
///
/// let kernel = Kernel::for_op(OperationType::Brightness);
/// let mut tile = ImageRegion::filled(2, 1, (0, 0), &[0.4, 0.4, 0.4]);
/// let desc = OperationDescriptor::with_value(OperationType::Brightness, 0.1);
/// kernel.execute(&mut tile, &desc).unwrap();
/// assert!((tile.pixel(0, 0)[0] - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    op: OperationType,
    transform: Transform,
}

impl Kernel {
    /// Returns the kernel for the given operation type.
    pub fn for_op(op: OperationType) -> Self {
        let transform = match op {
            OperationType::Blacks => Transform::Masked(BLACKS_RAMP),
            OperationType::Shadows => Transform::Masked(SHADOWS_RAMP),
            OperationType::Highlights => Transform::Masked(HIGHLIGHTS_RAMP),
            OperationType::Whites => Transform::Masked(WHITES_RAMP),
            OperationType::Brightness => Transform::Offset,
            OperationType::Contrast => Transform::MidpointScale,
        };
        Self { op, transform }
    }

    /// Returns the operation type this kernel implements.
    #[inline]
    pub fn op(&self) -> OperationType {
        self.op
    }

    /// Applies this kernel to a region in place.
    ///
    /// # Errors
    ///
    /// - [`OpsError::InvalidRegion`] if the region fails [`ImageRegion::is_valid`];
    ///   the region is not mutated.
    /// - [`OpsError::OperationMismatch`] if the descriptor's type differs
    ///   from this kernel's.
    ///
    /// A disabled descriptor or a value equal to the type's DEFAULT returns
    /// `Ok` without touching any pixel.
    pub fn execute(&self, region: &mut ImageRegion, desc: &OperationDescriptor) -> OpsResult<()> {
        if !region.is_valid() {
            return Err(OpsError::InvalidRegion(format!(
                "{}x{} with {} channels and {} samples",
                region.width(),
                region.height(),
                region.channels(),
                region.sample_count()
            )));
        }
        if desc.op() != self.op {
            return Err(OpsError::OperationMismatch {
                descriptor: desc.op(),
                kernel: self.op,
            });
        }
        if !desc.enabled() {
            trace!(op = %self.op, "disabled, skipping");
            return Ok(());
        }

        let ranges = OperationRanges::for_op(self.op);
        let value = desc.param_f32(PARAM_VALUE, ranges.default);
        if value == ranges.default {
            trace!(op = %self.op, "value at default, skipping");
            return Ok(());
        }
        let value = if ranges.contains(value) {
            value
        } else {
            let clamped = ranges.clamp(value);
            debug!(op = %self.op, value, clamped, "clamping out-of-range value");
            clamped
        };

        trace!(
            op = %self.op,
            value,
            width = region.width(),
            height = region.height(),
            "executing kernel"
        );
        let channels = region.channels() as usize;
        let stride = region.row_stride();
        let transform = self.transform;
        apply_rows(region.pixels_mut(), stride, |row| {
            apply_row(transform, value, channels, row);
        });
        Ok(())
    }
}

/// Runs `f` over each row of the sample buffer, in parallel when available.
#[cfg(feature = "parallel")]
fn apply_rows(pixels: &mut [f32], stride: usize, f: impl Fn(&mut [f32]) + Send + Sync) {
    pixels.par_chunks_mut(stride).for_each(|row| f(row));
}

/// Runs `f` over each row of the sample buffer.
#[cfg(not(feature = "parallel"))]
fn apply_rows(pixels: &mut [f32], stride: usize, f: impl Fn(&mut [f32]) + Send + Sync) {
    pixels.chunks_mut(stride).for_each(|row| f(row));
}

/// Applies one transform to a single row of channel-interleaved samples.
#[inline]
fn apply_row(transform: Transform, value: f32, channels: usize, row: &mut [f32]) {
    match transform {
        Transform::Masked(ramp) => {
            for px in row.chunks_exact_mut(channels) {
                let l = luminance([px[0], px[1], px[2]]);
                let shift = value * ramp.weight(l);
                px[0] += shift;
                px[1] += shift;
                px[2] += shift;
                // channel 3 (alpha) untouched
            }
        }
        Transform::Offset => {
            for px in row.chunks_exact_mut(channels) {
                px[0] += value;
                px[1] += value;
                px[2] += value;
            }
        }
        Transform::MidpointScale => {
            let slope = 1.0 + value;
            for px in row.chunks_exact_mut(channels) {
                px[0] = CONTRAST_PIVOT + (px[0] - CONTRAST_PIVOT) * slope;
                px[1] = CONTRAST_PIVOT + (px[1] - CONTRAST_PIVOT) * slope;
                px[2] = CONTRAST_PIVOT + (px[2] - CONTRAST_PIVOT) * slope;
            }
        }
    }
}
