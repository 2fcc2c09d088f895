//! Canvas sizing and placement for padded outputs.
//!
//! When a rotation expands the canvas, the target size comes from the
//! bounding rectangle of the rotated source and the source is centered on it
//! ([`ResizeMode::BoxPad`]). [`compute_pad_layout`] only sizes and places;
//! [`resize_pad`] produces the pixels, copying with [`box_pad`] or stretching
//! through the resampling engine.

use log::debug;
use tessera_image::{Image, ImageError, ImageSize};

use crate::error::{ensure_channels, ensure_non_empty, TransformError};
use crate::geometry::{AffineTransform, Rect};
use crate::parallel::{self, ExecutionStrategy};
use crate::progress::RowObserver;
use crate::warp::resample;

/// How the source is laid out on the target canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizeMode {
    /// Keep the source size and center it on the canvas; the margin is filled
    /// with a background value.
    ///
    /// Example: ...0 0 | a b c d | 0 0...
    #[default]
    BoxPad,

    /// Stretch the source over the whole canvas (nearest neighbor).
    Stretch,
}

/// Requested canvas size and layout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeOptions {
    /// Size of the canvas to produce.
    pub size: ImageSize,
    /// Layout policy.
    pub mode: ResizeMode,
}

/// Canvas dimensions and where the source lands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadLayout {
    /// Final canvas dimensions.
    pub canvas: ImageSize,
    /// Region of the canvas covered by the source, may extend past the canvas.
    pub placement: Rect,
}

/// Computes the canvas size and source placement for a resize request.
///
/// # Arguments
///
/// * `source` - The size of the source image.
/// * `options` - The requested canvas size and layout policy.
///
/// # Errors
///
/// Returns [`ImageError::InvalidDimension`] if the source or the requested
/// canvas has a zero width or height.
///
/// # Example
///
/// ```
/// use tessera_image::ImageSize;
/// use tessera_imgproc::geometry::Rect;
/// use tessera_imgproc::padding::{compute_pad_layout, ResizeMode, ResizeOptions};
///
/// let layout = compute_pad_layout(
///     ImageSize { width: 4, height: 2 },
///     &ResizeOptions { size: ImageSize { width: 8, height: 5 }, mode: ResizeMode::BoxPad },
/// ).unwrap();
///
/// assert_eq!(layout.canvas, ImageSize { width: 8, height: 5 });
/// assert_eq!(layout.placement, Rect::new(2, 1, 4, 2));
/// ```
pub fn compute_pad_layout(
    source: ImageSize,
    options: &ResizeOptions,
) -> Result<PadLayout, ImageError> {
    ensure_non_empty(source, ["source width", "source height"])?;
    ensure_non_empty(options.size, ["canvas width", "canvas height"])?;

    let canvas = options.size;
    let placement = match options.mode {
        ResizeMode::BoxPad => Rect::new(
            centered_offset(canvas.width, source.width),
            centered_offset(canvas.height, source.height),
            source.width,
            source.height,
        ),
        ResizeMode::Stretch => Rect::from_size(canvas),
    };

    Ok(PadLayout { canvas, placement })
}

/// Offset that centers `inner` within `outer`, rounded toward negative infinity.
fn centered_offset(outer: usize, inner: usize) -> isize {
    (outer as isize - inner as isize).div_euclid(2)
}

/// Copies `src` onto `dst` at `placement` and fills the rest with `fill`.
///
/// Only the part of the source that falls inside both the placement and the
/// canvas is copied; no resampling takes place.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The canvas to write, usually sized by [`compute_pad_layout`].
/// * `placement` - Where the source's top-left corner lands and the region it may cover.
/// * `fill` - The background pixel.
/// * `strategy` - How rows are distributed over workers.
/// * `observer` - Receives row-completion events.
///
/// # Errors
///
/// Returns an error if either image is empty or the strategy is invalid.
pub fn box_pad<T, const C: usize, O>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    placement: &Rect,
    fill: [T; C],
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

    let src_bounds = Rect::from_size(src.size());
    let src_stride = src.cols() * C;
    let src_data = src.as_slice();

    // columns of the canvas that receive source pixels
    let x_start = placement.x.max(0);
    let x_end = placement
        .right()
        .min(placement.x + src.cols() as isize)
        .min(dst.cols() as isize);

    parallel::par_iter_rows_indexed(dst, strategy, |y, row| {
        row.chunks_exact_mut(C)
            .for_each(|dst_pixel| dst_pixel.copy_from_slice(&fill));

        let sy = y as isize - placement.y;
        if x_end > x_start && sy < placement.height as isize && src_bounds.contains(0, sy) {
            let sx = (x_start - placement.x) as usize;
            let len = (x_end - x_start) as usize;
            let src_row = &src_data[sy as usize * src_stride..(sy as usize + 1) * src_stride];
            row[x_start as usize * C..(x_start as usize + len) * C]
                .copy_from_slice(&src_row[sx * C..(sx + len) * C]);
        }

        observer.on_row_completed(y);
    })?;

    Ok(())
}

/// Produces a canvas of `options.size` from `src`.
///
/// With [`ResizeMode::BoxPad`] the source is copied unscaled into the middle
/// of the canvas and the margin is `background`; a canvas smaller than the
/// source crops it symmetrically. With [`ResizeMode::Stretch`] the source is
/// scaled over the whole canvas with nearest-neighbor sampling.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `options` - The canvas size and layout policy.
/// * `background` - The margin pixel.
/// * `strategy` - How rows are distributed over workers.
/// * `observer` - Receives row-completion events.
///
/// # Errors
///
/// Returns an error if the source or the canvas is empty, the strategy is
/// invalid or the canvas cannot be allocated.
///
/// # Example
///
/// ```
/// use tessera_image::Image;
/// use tessera_imgproc::padding::{resize_pad, ResizeMode, ResizeOptions};
/// use tessera_imgproc::parallel::ExecutionStrategy;
/// use tessera_imgproc::progress::NoProgress;
///
/// let src = Image::<u8, 1>::new([2, 1].into(), vec![1, 2]).unwrap();
/// let options = ResizeOptions { size: [4, 1].into(), mode: ResizeMode::BoxPad };
/// let dst = resize_pad(&src, &options, [0], ExecutionStrategy::Serial, &NoProgress).unwrap();
///
/// assert_eq!(dst.as_slice(), &[0, 1, 2, 0]);
/// ```
pub fn resize_pad<T, const C: usize, O>(
    src: &Image<T, C>,
    options: &ResizeOptions,
    background: [T; C],
    strategy: ExecutionStrategy,
    observer: &O,
) -> Result<Image<T, C>, TransformError>
where
    T: Copy + Send + Sync,
    O: RowObserver + ?Sized,
{
    ensure_channels::<C>()?;
    strategy.validate()?;
    let layout = compute_pad_layout(src.size(), options)?;

    debug!(
        "resize {} onto {} ({:?})",
        src.size(),
        layout.canvas,
        options.mode
    );

    let mut dst = Image::from_size_pixel(layout.canvas, background)?;
    match options.mode {
        ResizeMode::BoxPad => box_pad(
            src,
            &mut dst,
            &layout.placement,
            background,
            strategy,
            observer,
        )?,
        ResizeMode::Stretch => {
            let placement = layout.placement;
            let transform = AffineTransform::translation(-placement.x as f32, -placement.y as f32)
                .then(&AffineTransform::scale(
                    src.width() as f32 / placement.width as f32,
                    src.height() as f32 / placement.height as f32,
                ));
            resample(src, &mut dst, &transform, strategy, observer)?
        }
    }

    Ok(dst)
}
