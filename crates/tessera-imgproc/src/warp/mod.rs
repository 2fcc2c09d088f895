//! Geometric image transformations by inverse mapping.
//!
//! Every target pixel center is mapped back into the source with an
//! [`AffineTransform`](crate::geometry::AffineTransform); the source pixel whose
//! unit square contains the mapped point is copied (nearest neighbor), and
//! target pixels that map outside the source keep their initial value.
//!
//! - [`resample`]: the row-parallel engine shared by all transforms
//! - [`compose_rotation`]: builds the target-to-source map of a rotation
//! - [`rotate`] / [`rotate_into`]: rotation with optional canvas expansion
//! - [`flip`]: horizontal and vertical mirroring
//!
//! # Examples
//!
//! Rotating an image by 45 degrees on an expanded canvas:
//!
//! ```
//! use tessera_image::Image;
//! use tessera_imgproc::parallel::ExecutionStrategy;
//! use tessera_imgproc::progress::NoProgress;
//! use tessera_imgproc::warp::{rotate, RotateParams};
//!
//! let src = Image::<u8, 4>::from_size_val([16, 8].into(), 255).unwrap();
//! let params = RotateParams::new(45.0).with_expand(true);
//!
//! let dst = rotate(&src, &params, [0; 4], ExecutionStrategy::default(), &NoProgress).unwrap();
//! assert_eq!((dst.width(), dst.height()), (17, 17));
//! ```

mod flip;
mod resample;
mod rotate;

pub use flip::{flip, flip_transform, FlipMode};
pub use resample::resample;
pub use rotate::{
    compose_rotation, expanded_layout, rotate, rotate_into, rotation_transform, RotateParams,
};
