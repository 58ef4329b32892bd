//! Operation identity and parameter types.
//!
//! An [`OperationDescriptor`] is the value an adjustment source (slider,
//! numeric entry, preset) produces whenever its value changes: the operation
//! type, an enabled flag, a display label, and a typed key/value parameter
//! bag. Descriptors are immutable snapshots once handed to the pipeline or
//! state manager; they are always copied, never referenced.

use crate::ranges::OperationRanges;
use std::collections::HashMap;
use std::fmt;

/// Key under which every operation stores its primary parameter.
pub const PARAM_VALUE: &str = "value";

/// The closed set of tone operation types.
///
/// Stable and ordinal-comparable; used as the deduplication key in the
/// cumulative edit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationType {
    /// Darkest tone region (toe).
    Blacks,
    /// Global additive brightness.
    Brightness,
    /// Global contrast around the midpoint.
    Contrast,
    /// Bright tone region below the shoulder.
    Highlights,
    /// Dark tone region above the toe.
    Shadows,
    /// Brightest tone region (shoulder).
    Whites,
}

impl OperationType {
    /// All known operation types, in ordinal order.
    pub const ALL: [OperationType; 6] = [
        OperationType::Blacks,
        OperationType::Brightness,
        OperationType::Contrast,
        OperationType::Highlights,
        OperationType::Shadows,
        OperationType::Whites,
    ];

    /// Human-readable display name.
    pub fn label(&self) -> &'static str {
        match self {
            OperationType::Blacks => "Blacks",
            OperationType::Brightness => "Brightness",
            OperationType::Contrast => "Contrast",
            OperationType::Highlights => "Highlights",
            OperationType::Shadows => "Shadows",
            OperationType::Whites => "Whites",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    /// Floating-point parameter (the common case).
    Float(f32),
    /// Boolean flag.
    Bool(bool),
    /// Free-form text.
    Text(String),
}

impl ParamValue {
    /// Returns the float value, if this is a [`ParamValue::Float`].
    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the bool value, if this is a [`ParamValue::Bool`].
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// A named, parameterized tone operation.
///
/// # Example
///
/// ```rust
/// use darkroom_ops::{OperationDescriptor, OperationType};
///
/// let desc = OperationDescriptor::with_value(OperationType::Shadows, -0.3);
/// assert!(desc.enabled());
/// assert_eq!(desc.value(), -0.3);
/// // An absent key yields the caller-supplied default, never an error.
/// assert_eq!(desc.param_f32("feather", 0.5), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperationDescriptor {
    op: OperationType,
    name: String,
    enabled: bool,
    params: HashMap<String, ParamValue>,
}

impl OperationDescriptor {
    /// Creates an enabled descriptor with no parameters.
    ///
    /// Kernels fall back to the per-type DEFAULT for the primary parameter,
    /// so an empty descriptor is a no-op.
    pub fn new(op: OperationType) -> Self {
        Self {
            op,
            name: op.label().to_string(),
            enabled: true,
            params: HashMap::new(),
        }
    }

    /// Creates an enabled descriptor with the primary `"value"` parameter set.
    ///
    /// The display label embeds the current value, matching what a slider
    /// readout shows.
    pub fn with_value(op: OperationType, value: f32) -> Self {
        let mut desc = Self::new(op);
        desc.name = format!("{} ({:+.2})", op.label(), value);
        desc.params
            .insert(PARAM_VALUE.to_string(), ParamValue::Float(value));
        desc
    }

    /// Returns the operation type.
    #[inline]
    pub fn op(&self) -> OperationType {
        self.op
    }

    /// Returns the display label.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this operation is enabled.
    ///
    /// Disabling an operation is distinct from removing it: a disabled
    /// descriptor stays in the active set but its kernel does no pixel work.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the enabled flag, consuming and returning self.
    pub fn set_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets a parameter, consuming and returning self.
    pub fn set_param(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Reads a float parameter, falling back to `default`.
    ///
    /// Never fails: an absent key or a type mismatch yields the
    /// caller-supplied default.
    #[inline]
    pub fn param_f32(&self, key: &str, default: f32) -> f32 {
        self.params
            .get(key)
            .and_then(ParamValue::as_f32)
            .unwrap_or(default)
    }

    /// Reads a bool parameter, falling back to `default`.
    #[inline]
    pub fn param_bool(&self, key: &str, default: bool) -> bool {
        self.params
            .get(key)
            .and_then(ParamValue::as_bool)
            .unwrap_or(default)
    }

    /// Returns the primary parameter, defaulting to the per-type DEFAULT.
    #[inline]
    pub fn value(&self) -> f32 {
        self.param_f32(PARAM_VALUE, OperationRanges::for_op(self.op).default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_ordinal() {
        assert!(OperationType::Blacks < OperationType::Whites);
        assert_eq!(OperationType::ALL.len(), 6);
    }

    #[test]
    fn test_with_value_sets_primary_param() {
        let desc = OperationDescriptor::with_value(OperationType::Brightness, 0.25);
        assert_eq!(desc.op(), OperationType::Brightness);
        assert_eq!(desc.value(), 0.25);
        assert!(desc.name().contains("Brightness"));
        assert!(desc.name().contains("0.25"));
    }

    #[test]
    fn test_param_lookup_never_fails() {
        let desc = OperationDescriptor::new(OperationType::Contrast)
            .set_param("flag", ParamValue::Bool(true));
        // Absent key
        assert_eq!(desc.param_f32("missing", 0.7), 0.7);
        // Type mismatch falls back too
        assert_eq!(desc.param_f32("flag", -1.0), -1.0);
        assert!(desc.param_bool("flag", false));
    }

    #[test]
    fn test_empty_descriptor_reads_default() {
        let desc = OperationDescriptor::new(OperationType::Whites);
        assert_eq!(desc.value(), 0.0);
    }

    #[test]
    fn test_disable() {
        let desc = OperationDescriptor::with_value(OperationType::Shadows, 0.5).set_enabled(false);
        assert!(!desc.enabled());
        assert_eq!(desc.value(), 0.5);
    }
}
