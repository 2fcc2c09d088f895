#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Pixel coordinates are continuous: pixel `(x, y)` covers the unit square
//! `[x, x + 1) × [y, y + 1)`. Transforms map target pixel centers back into the
//! source and copy the source pixel containing the mapped point.

/// error types for the geometric transforms.
pub mod error;

/// points, rectangles and affine transforms.
pub mod geometry;

/// canvas sizing and padding module.
pub mod padding;

/// module containing parallelization utilities.
pub mod parallel;

/// sequential pipelines of geometric steps.
pub mod pipeline;

/// row-completion reporting.
pub mod progress;

/// image geometric transformations module.
pub mod warp;

pub use error::TransformError;
