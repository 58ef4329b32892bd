//! Per-type validity bounds for the primary operation parameter.
//!
//! Each operation type carries a `MIN`, `MAX`, and `DEFAULT` for its primary
//! parameter. The bounds serve two purposes:
//!
//! - a descriptor whose value equals DEFAULT is a no-op and skips pixel work;
//! - an out-of-range value is clamped to the nearest bound before the kernel
//!   runs (never an error, only a diagnostic).

use crate::OperationType;

/// Validity bounds for one operation's primary parameter.
///
/// Invariant: `min <= default <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranges {
    /// Smallest accepted value.
    pub min: f32,
    /// Largest accepted value.
    pub max: f32,
    /// Identity value; the kernel is a no-op at exactly this value.
    pub default: f32,
}

impl Ranges {
    /// Clamps `value` to `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Lookup table for per-type parameter bounds.
pub struct OperationRanges;

impl OperationRanges {
    /// Returns the bounds for the given operation type.
    ///
    /// All six tone controls expose a symmetric [-1, 1] slider with identity
    /// at 0. Tone-region values are additive luminance shifts; contrast maps
    /// to a slope of `1 + value` around the midpoint.
    pub fn for_op(op: OperationType) -> Ranges {
        match op {
            OperationType::Blacks
            | OperationType::Brightness
            | OperationType::Contrast
            | OperationType::Highlights
            | OperationType::Shadows
            | OperationType::Whites => Ranges {
                min: -1.0,
                max: 1.0,
                default: 0.0,
            },
        }
    }
}
