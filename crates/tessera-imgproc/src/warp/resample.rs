use tessera_image::Image;

use crate::error::{ensure_channels, ensure_non_empty, TransformError};
use crate::geometry::{AffineTransform, Point2, Rect};
use crate::parallel::{self, ExecutionStrategy};
use crate::progress::RowObserver;

/// Populates `dst` by inverse-mapping every target pixel into `src`.
///
/// For each target pixel `(x, y)` the center `(x + 0.5, y + 0.5)` is mapped
/// with `transform` and the source pixel `(floor(u), floor(v))` is copied if it
/// lies inside `[0, width) × [0, height)` of the source. Pixels that map
/// outside the source are left untouched, so `dst` must be initialized with the
/// background beforehand.
///
/// Rows are distributed over workers according to `strategy`, and
/// `observer` is notified once per row after the whole row has been written.
///
/// # Arguments
///
/// * `src` - The source image, read-only during the call.
/// * `dst` - The target image.
/// * `transform` - Maps target coordinates to source coordinates.
/// * `strategy` - How rows are distributed over workers.
/// * `observer` - Receives row-completion events.
///
/// # Errors
///
/// Returns an error if either image is empty or the strategy is invalid. The
/// target is not modified in that case.
///
/// # Example
///
/// ```
/// use tessera_image::Image;
/// use tessera_imgproc::geometry::AffineTransform;
/// use tessera_imgproc::parallel::ExecutionStrategy;
/// use tessera_imgproc::progress::NoProgress;
/// use tessera_imgproc::warp::resample;
///
/// let src = Image::<u8, 1>::new([3, 1].into(), vec![1, 2, 3]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val([3, 1].into(), 0).unwrap();
///
/// // shift the content one pixel to the right
/// let m = AffineTransform::translation(-1.0, 0.0);
/// resample(&src, &mut dst, &m, ExecutionStrategy::Serial, &NoProgress).unwrap();
///
/// assert_eq!(dst.as_slice(), &[0, 1, 2]);
/// ```
pub fn resample<T, const C: usize, O>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    transform: &AffineTransform,
    strategy: ExecutionStrategy,
    observer: &O,
) -> Result<(), TransformError>
where
    T: Copy + Send + Sync,
    O: RowObserver + ?Sized,
{
    ensure_channels::<C>()?;
    ensure_non_empty(src.size(), ["source width", "source height"])?;
    ensure_non_empty(dst.size(), ["target width", "target height"])?;

    let bounds = Rect::from_size(src.size());
    let src_cols = src.cols();
    let src_data = src.as_slice();

    parallel::par_iter_rows_indexed(dst, strategy, |y, row| {
        for (x, dst_pixel) in row.chunks_exact_mut(C).enumerate() {
            let (u, v) = transform.apply(Point2::pixel_center(x, y)).floor_index();
            if bounds.contains(u, v) {
                let offset = (v as usize * src_cols + u as usize) * C;
                dst_pixel.copy_from_slice(&src_data[offset..offset + C]);
            }
        }

        observer.on_row_completed(y);
    })?;

    Ok(())
}
