//! Luminance masks for tone-region adjustments.
//!
//! A [`ToneRamp`] turns per-pixel luminance into a weight in [0, 1] that
//! scopes an adjustment to one tone region. The ramp is linear between a low
//! and a high threshold and saturates at both ends:
//!
//! ```text
//! upright (whites/highlights)      inverted (shadows/blacks)
//!
//! 1 |         ____                 1 |____
//!   |        /                       |    \
//!   |       /                        |     \
//! 0 |______/                       0 |      \______
//!   +---low---high--> L              +---low---high--> L
//! ```
//!
//! Upright ramps weight toward bright pixels (mask rises with luminance);
//! inverted ramps weight toward dark pixels.

/// A saturating linear luminance ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRamp {
    low: f32,
    high: f32,
    inverted: bool,
}

impl ToneRamp {
    /// Ramp rising with luminance: 0 below `low`, 1 above `high`.
    ///
    /// Used by the Whites and Highlights kernels.
    pub const fn upright(low: f32, high: f32) -> Self {
        Self {
            low,
            high,
            inverted: false,
        }
    }

    /// Ramp falling with luminance: 1 below `low`, 0 above `high`.
    ///
    /// Used by the Shadows and Blacks kernels.
    pub const fn inverted(low: f32, high: f32) -> Self {
        Self {
            low,
            high,
            inverted: true,
        }
    }

    /// Returns the mask weight for a luminance value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use darkroom_ops::ToneRamp;
    ///
    /// let shadows = ToneRamp::inverted(0.0, 0.5);
    /// assert_eq!(shadows.weight(0.1), 0.8);
    /// assert_eq!(shadows.weight(0.8), 0.0);
    /// ```
    #[inline]
    pub fn weight(&self, luminance: f32) -> f32 {
        let t = ((luminance - self.low) / (self.high - self.low)).clamp(0.0, 1.0);
        if self.inverted { 1.0 - t } else { t }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_upright_saturates() {
        let ramp = ToneRamp::upright(0.7, 1.0);
        assert_eq!(ramp.weight(0.0), 0.0);
        assert_eq!(ramp.weight(0.7), 0.0);
        assert_eq!(ramp.weight(1.0), 1.0);
        assert_eq!(ramp.weight(1.5), 1.0);
    }

    #[test]
    fn test_upright_midpoint() {
        let ramp = ToneRamp::upright(0.5, 0.9);
        assert_abs_diff_eq!(ramp.weight(0.7), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_inverted_saturates() {
        let ramp = ToneRamp::inverted(0.0, 0.5);
        assert_eq!(ramp.weight(0.0), 1.0);
        assert_eq!(ramp.weight(0.5), 0.0);
        assert_eq!(ramp.weight(0.9), 0.0);
    }

    #[test]
    fn test_inverted_ramp_values() {
        let ramp = ToneRamp::inverted(0.0, 0.5);
        assert_abs_diff_eq!(ramp.weight(0.1), 0.8, epsilon = 1e-6);
        assert_abs_diff_eq!(ramp.weight(0.25), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(ramp.weight(0.4), 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_monotone() {
        let ramp = ToneRamp::upright(0.2, 0.8);
        let mut prev = -1.0;
        for i in 0..=100 {
            let w = ramp.weight(i as f32 / 100.0);
            assert!(w >= prev, "ramp not monotone at {i}");
            prev = w;
        }
    }
}
