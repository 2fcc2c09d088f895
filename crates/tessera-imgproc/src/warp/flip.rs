use log::debug;
use tessera_image::{Image, ImageSize};

use super::resample;
use crate::error::{ensure_channels, ensure_non_empty, TransformError};
use crate::geometry::AffineTransform;
use crate::parallel::ExecutionStrategy;
use crate::progress::RowObserver;

/// Mirror axis of a flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipMode {
    /// Mirror left and right.
    Horizontal,
    /// Mirror top and bottom.
    Vertical,
}

/// The target-to-source map of a flip. A flip is its own inverse.
pub fn flip_transform(size: ImageSize, mode: FlipMode) -> AffineTransform {
    match mode {
        FlipMode::Horizontal => AffineTransform::scale(-1.0, 1.0)
            .then(&AffineTransform::translation(size.width as f32, 0.0)),
        FlipMode::Vertical => AffineTransform::scale(1.0, -1.0)
            .then(&AffineTransform::translation(0.0, size.height as f32)),
    }
}

/// Flip the input image.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `mode` - The mirror axis.
/// * `strategy` - How rows are distributed over workers.
/// * `observer` - Receives row-completion events.
///
/// # Example
///
/// ```
/// use tessera_image::Image;
/// use tessera_imgproc::parallel::ExecutionStrategy;
/// use tessera_imgproc::progress::NoProgress;
/// use tessera_imgproc::warp::{flip, FlipMode};
///
/// let image = Image::<u8, 1>::new([3, 1].into(), vec![1, 2, 3]).unwrap();
/// let flipped = flip(&image, FlipMode::Horizontal, ExecutionStrategy::Serial, &NoProgress).unwrap();
///
/// assert_eq!(flipped.as_slice(), &[3, 2, 1]);
/// ```
pub fn flip<T, const C: usize, O>(
    src: &Image<T, C>,
    mode: FlipMode,
    strategy: ExecutionStrategy,
    observer: &O,
) -> Result<Image<T, C>, TransformError>
where
    T: Copy + Default + Send + Sync,
    O: RowObserver + ?Sized,
{
    ensure_channels::<C>()?;
    ensure_non_empty(src.size(), ["source width", "source height"])?;
    strategy.validate()?;

    debug!("flip {} {:?}", src.size(), mode);

    let mut dst = Image::from_size_pixel(src.size(), [T::default(); C])?;
    resample(
        src,
        &mut dst,
        &flip_transform(src.size(), mode),
        strategy,
        observer,
    )?;

    Ok(dst)
}
