//! # darkroom-engine
//!
//! Pipeline orchestration and cumulative edit state for the darkroom
//! non-destructive adjustment engine.
//!
//! The engine holds a full-resolution source image, accepts an ordered list
//! of named tone operations, and produces an updated working image by
//! replaying the full active set against the original pixel data. Edits are
//! reversible, recomputable from scratch at any time, and cheap to re-apply
//! while a slider is being dragged.
//!
//! # Modules
//!
//! - [`source`] - [`TileSource`] trait and the in-memory [`SourceManager`]
//! - [`pipeline`] - [`ImagePipeline`]: tile extraction, ordered kernel
//!   application, write-back
//! - [`state`] - [`OperationStateManager`]: the deduplicated, ordered active
//!   operation set
//! - [`engine`] - [`PhotoEngine`]: load/apply/query lifecycle
//!
//! # Example
//!
//! ```rust
//! use darkroom_core::ImageRegion;
//! use darkroom_engine::PhotoEngine;
//! use darkroom_ops::{OperationDescriptor, OperationType};
//!
//! let source = ImageRegion::filled(8, 8, (0, 0), &[0.2, 0.2, 0.2, 1.0]);
//! let engine = PhotoEngine::new();
//! engine.load_image(source).unwrap();
//!
//! // Drag the shadows slider
//! engine
//!     .set_operation(OperationDescriptor::with_value(OperationType::Shadows, 0.1))
//!     .unwrap();
//!
//! let working = engine.working_image().unwrap();
//! assert!(working.pixel(0, 0)[0] > 0.2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod engine;
mod error;
pub mod pipeline;
pub mod source;
pub mod state;

pub use engine::PhotoEngine;
pub use error::{EngineError, EngineResult};
pub use pipeline::ImagePipeline;
pub use source::{SourceManager, TileSource};
pub use state::{ApplySink, OperationStateManager};
