//! Rec.601 luminance helpers.
//!
//! The tone kernels weight their adjustments by perceptual brightness. The
//! engine uses the Rec.601 luma coefficients, which match the masks used by
//! common photo-editing tone controls:
//!
//! `Y = 0.299*R + 0.587*G + 0.114*B`

/// Rec.601 luminance coefficient for the red channel.
pub const REC601_LUMA_R: f32 = 0.299;

/// Rec.601 luminance coefficient for the green channel.
pub const REC601_LUMA_G: f32 = 0.587;

/// Rec.601 luminance coefficient for the blue channel.
pub const REC601_LUMA_B: f32 = 0.114;

/// Rec.601 luminance coefficients as an array [R, G, B].
pub const REC601_LUMA: [f32; 3] = [REC601_LUMA_R, REC601_LUMA_G, REC601_LUMA_B];

/// Calculate Rec.601 luminance from RGB values.
///
/// # Example
/// ```
/// use darkroom_core::luminance;
/// let luma = luminance([0.5, 0.3, 0.2]);
/// // 0.5 * 0.299 + 0.3 * 0.587 + 0.2 * 0.114 = 0.3484
/// assert!((luma - 0.3484).abs() < 0.0001);
/// ```
#[inline]
pub fn luminance(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC601_LUMA_R + rgb[1] * REC601_LUMA_G + rgb[2] * REC601_LUMA_B
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_coefficients_sum_to_one() {
        assert_abs_diff_eq!(
            REC601_LUMA_R + REC601_LUMA_G + REC601_LUMA_B,
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_grey_is_its_own_luminance() {
        assert_abs_diff_eq!(luminance([0.5, 0.5, 0.5]), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_green_dominates() {
        let green = luminance([0.0, 1.0, 0.0]);
        let red = luminance([1.0, 0.0, 0.0]);
        let blue = luminance([0.0, 0.0, 1.0]);
        assert!(green > red);
        assert!(red > blue);
    }
}
