//! # darkroom-core
//!
//! Core types for the darkroom non-destructive adjustment engine.
//!
//! This crate provides the foundational types used throughout the workspace:
//!
//! - [`ImageRegion`] - A rectangular tile of float pixel data plus its offset
//!   within a larger image
//! - [`luminance`] - Rec.601 perceptual luminance used by the tone masks
//! - [`Error`], [`Result`] - Shared error types
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies. The other crates build on it:
//!
//! ```text
//! darkroom-core (this crate)
//!    ^
//!    |
//!    +-- darkroom-ops (descriptors, tone kernels, registry)
//!    +-- darkroom-engine (pipeline, state manager, engine)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod luma;
pub mod region;

pub use error::{Error, Result};
pub use luma::{luminance, REC601_LUMA, REC601_LUMA_B, REC601_LUMA_G, REC601_LUMA_R};
pub use region::ImageRegion;
