//! # darkroom-ops
//!
//! Tone operation descriptors and pixel kernels for the darkroom
//! non-destructive adjustment engine.
//!
//! This crate defines the closed set of tone operations a photo edit is made
//! of, and the pure pixel transforms that implement them.
//!
//! # Modules
//!
//! - [`descriptor`] - [`OperationType`], [`OperationDescriptor`], [`ParamValue`]
//! - [`ranges`] - Per-type min/max/default validity bounds
//! - [`mask`] - Luminance ramp used to scope an adjustment to a tone region
//! - [`kernel`] - The per-operation pixel kernels and their shared contract
//! - [`registry`] - The closed-world factory mapping a type to its kernel
//!
//! # Example
//!
//! ```rust
//! use darkroom_core::ImageRegion;
//! use darkroom_ops::{OperationDescriptor, OperationRegistry, OperationType};
//!
//! let registry = OperationRegistry::with_builtin_ops();
//! let mut tile = ImageRegion::filled(2, 2, (0, 0), &[0.2, 0.2, 0.2, 1.0]);
//!
//! // Lift the shadows by 0.1
//! let desc = OperationDescriptor::with_value(OperationType::Shadows, 0.1);
//! registry.kernel_for(desc.op()).unwrap().execute(&mut tile, &desc).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod descriptor;
mod error;
pub mod kernel;
pub mod mask;
pub mod ranges;
pub mod registry;

pub use descriptor::{OperationDescriptor, OperationType, ParamValue, PARAM_VALUE};
pub use error::{OpsError, OpsResult};
pub use kernel::Kernel;
pub use mask::ToneRamp;
pub use ranges::{OperationRanges, Ranges};
pub use registry::OperationRegistry;
