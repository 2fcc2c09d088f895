use tessera_image::{ImageError, ImageSize};

use crate::parallel::ParallelError;

/// Errors raised by the geometric transforms.
///
/// Every variant is detected before any pixel is written.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TransformError {
    /// Invalid or unallocatable image.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Invalid execution strategy.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// The rotation angle is NaN or infinite.
    #[error("Rotation angle must be finite, got {0}")]
    NonFiniteAngle(f32),
}

/// Reject sizes with a zero width or height.
pub(crate) fn ensure_non_empty(
    size: ImageSize,
    names: [&'static str; 2],
) -> Result<(), ImageError> {
    if size.width == 0 {
        return Err(ImageError::InvalidDimension(names[0], size.width));
    }
    if size.height == 0 {
        return Err(ImageError::InvalidDimension(names[1], size.height));
    }
    Ok(())
}

/// Reject images without channels.
pub(crate) fn ensure_channels<const C: usize>() -> Result<(), ImageError> {
    if C == 0 {
        return Err(ImageError::InvalidDimension("channel count", C));
    }
    Ok(())
}
