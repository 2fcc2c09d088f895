/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when a width or height is zero where a positive value is required.
    #[error("Invalid {0}: {1}, a positive value is required")]
    InvalidDimension(&'static str, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the pixel buffer could not be allocated.
    #[error("Failed to allocate a {0}x{1} image buffer")]
    AllocationFailed(usize, usize),
}
