use log::{debug, trace};
use tessera_image::{Image, ImageSize};

use super::resample;
use crate::error::{ensure_channels, ensure_non_empty, TransformError};
use crate::geometry::{
    ceil_snapped, floor_snapped, transformed_extents, AffineTransform, Point2, Rect,
};
use crate::padding::PadLayout;
use crate::parallel::ExecutionStrategy;
use crate::progress::RowObserver;

/// Parameters of a rotation.
///
/// # Example
///
/// ```
/// use tessera_imgproc::geometry::Point2;
/// use tessera_imgproc::warp::RotateParams;
///
/// let params = RotateParams::new(30.0)
///     .with_center(Point2::new(8.0, 8.0))
///     .with_expand(true);
///
/// assert_eq!(params.angle_degrees, 30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotateParams {
    /// Angle in degrees, counter-clockwise in the math orientation. In image
    /// coordinates (y pointing down) positive angles turn the content clockwise.
    pub angle_degrees: f32,
    /// Center of rotation in source coordinates. `None` or [`Point2::EMPTY`]
    /// rotate about the center of the source.
    ///
    /// Coordinates are continuous: pixel `(x, y)` spans `[x, x + 1)`, so the
    /// center of pixel `(i, j)` is `(i + 0.5, j + 0.5)`. A center given as a
    /// pixel index must be shifted by `0.5` on both axes.
    ///
    /// With `expand` the rotated image is always placed in the middle of the
    /// enlarged canvas, so the center then only matters up to a translation.
    pub center: Option<Point2>,
    /// Enlarge the canvas so that the rotated corners are not clipped.
    pub expand: bool,
}

impl RotateParams {
    /// Rotation about the source center without expansion.
    pub fn new(angle_degrees: f32) -> Self {
        Self {
            angle_degrees,
            ..Default::default()
        }
    }

    /// Set the center of rotation.
    pub fn with_center(mut self, center: Point2) -> Self {
        self.center = Some(center);
        self
    }

    /// Enable or disable canvas expansion.
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// The center of rotation, derived from `source` when unset.
    pub fn resolve_center(&self, source: &Rect) -> Point2 {
        self.center
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| source.center())
    }

    pub(crate) fn validate(&self) -> Result<(), TransformError> {
        if !self.angle_degrees.is_finite() {
            return Err(TransformError::NonFiniteAngle(self.angle_degrees));
        }
        Ok(())
    }
}

/// Builds the target-to-source map of a rotation.
///
/// The composition order is fixed:
///
/// 1. translate by `-target_center`, so target coordinates are origin-centered,
/// 2. rotate about the origin by `-angle_degrees` (the inverse of the requested rotation),
/// 3. translate by `+source_center`.
///
/// Source and target may differ in size; each image rotates about its own center.
///
/// # Arguments
///
/// * `angle_degrees` - The requested rotation of the image.
/// * `source_center` - The center of rotation in source coordinates.
/// * `target_center` - Where `source_center` lands in target coordinates.
///
/// # Example
///
/// ```
/// use tessera_imgproc::geometry::Point2;
/// use tessera_imgproc::warp::compose_rotation;
///
/// let m = compose_rotation(90.0, Point2::new(2.0, 1.0), Point2::new(1.0, 2.0));
///
/// assert_eq!(m.apply(Point2::new(1.0, 2.0)), Point2::new(2.0, 1.0));
/// ```
pub fn compose_rotation(
    angle_degrees: f32,
    source_center: Point2,
    target_center: Point2,
) -> AffineTransform {
    AffineTransform::translation(-target_center.x, -target_center.y)
        .then(&AffineTransform::rotation(-angle_degrees))
        .then(&AffineTransform::translation(source_center.x, source_center.y))
}

/// The target-to-source map for rotating a `source`-sized image into a `target`-sized one.
///
/// Without `expand` the source is treated as box-padded into the target, so
/// the center of rotation keeps its position relative to the source's center.
/// With the derived center this is `compose_rotation(angle, source / 2, target / 2)`.
///
/// With `expand` the rotated source is centered on the canvas of
/// [`expanded_layout`], and that canvas is centered on `target`, so nothing
/// is clipped when `target` is the canvas.
pub fn rotation_transform(
    params: &RotateParams,
    source: ImageSize,
    target: ImageSize,
) -> AffineTransform {
    let source_rect = Rect::from_size(source);
    let target_rect = Rect::from_size(target);
    let center = params.resolve_center(&source_rect);

    let target_center = if params.expand {
        let (canvas, offset) = expanded_frame(&source_rect, center, params.angle_degrees);
        let margin = target_rect.center() - Rect::from_size(canvas).center();
        center + offset + margin
    } else {
        center + (target_rect.center() - source_rect.center())
    };

    compose_rotation(params.angle_degrees, center, target_center)
}

/// Canvas of the source rotated about `center`, and the translation that
/// moves the rotated source into the middle of it.
fn expanded_frame(source: &Rect, center: Point2, angle_degrees: f32) -> (ImageSize, Point2) {
    let rotation = AffineTransform::rotation_about(center, angle_degrees);
    let (min, max) = transformed_extents(source, &rotation);
    let extent = max - min;

    let canvas = ImageSize {
        width: ceil_snapped(extent.x).max(0.0) as usize,
        height: ceil_snapped(extent.y).max(0.0) as usize,
    };
    let offset = Point2::new(
        (canvas.width as f32 - extent.x) / 2.0 - min.x,
        (canvas.height as f32 - extent.y) / 2.0 - min.y,
    );

    (canvas, offset)
}

/// Canvas size and source placement of an expanded rotation.
///
/// The canvas is the smallest one holding the source rotated about the
/// resolved center, i.e. `ceil(W|cos| + H|sin|) × ceil(W|sin| + H|cos|)`.
/// The placement is where the unrotated source sits on the canvas before the
/// rotation is applied; for the derived center it is the box-pad placement.
///
/// # Errors
///
/// Returns an error if the angle is not finite or the source is empty.
pub fn expanded_layout(
    source: ImageSize,
    params: &RotateParams,
) -> Result<PadLayout, TransformError> {
    params.validate()?;
    ensure_non_empty(source, ["source width", "source height"])?;

    let source_rect = Rect::from_size(source);
    let center = params.resolve_center(&source_rect);
    let (canvas, offset) = expanded_frame(&source_rect, center, params.angle_degrees);
    ensure_non_empty(canvas, ["canvas width", "canvas height"])?;

    let placement = Rect::new(
        floor_snapped(offset.x) as isize,
        floor_snapped(offset.y) as isize,
        source.width,
        source.height,
    );

    Ok(PadLayout { canvas, placement })
}

/// Rotates `src` into a newly allocated image.
///
/// Without expansion the target has the size of the source; with expansion it
/// is sized by [`expanded_layout`]. Every target pixel starts as `background`,
/// which is what remains wherever the rotated source does not reach.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `params` - The rotation parameters.
/// * `background` - The value of uncovered pixels.
/// * `strategy` - How rows are distributed over workers.
/// * `observer` - Receives row-completion events.
///
/// # Errors
///
/// Returns an error if the angle is not finite, the source is empty, the
/// strategy is invalid or the target cannot be allocated.
pub fn rotate<T, const C: usize, O>(
    src: &Image<T, C>,
    params: &RotateParams,
    background: [T; C],
    strategy: ExecutionStrategy,
    observer: &O,
) -> Result<Image<T, C>, TransformError>
where
    T: Copy + Send + Sync,
    O: RowObserver + ?Sized,
{
    params.validate()?;
    ensure_channels::<C>()?;
    ensure_non_empty(src.size(), ["source width", "source height"])?;
    strategy.validate()?;

    let size = if params.expand {
        expanded_layout(src.size(), params)?.canvas
    } else {
        src.size()
    };

    let mut dst = Image::from_size_pixel(size, background)?;
    rotate_resampled(src, &mut dst, params, strategy, observer)?;

    Ok(dst)
}

/// Rotates `src` into a caller-provided target.
///
/// Without expansion the target keeps its size and contents; pixels not
/// reached by the rotated source keep their current value. With expansion the
/// target is reallocated to the expanded canvas and cleared to `T::default()`
/// first. All checks and the allocation happen before any pixel is written.
///
/// # Errors
///
/// Returns an error if the angle is not finite, an image is empty, the
/// strategy is invalid or the expanded target cannot be allocated.
pub fn rotate_into<T, const C: usize, O>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    params: &RotateParams,
    strategy: ExecutionStrategy,
    observer: &O,
) -> Result<(), TransformError>
where
    T: Copy + Default + Send + Sync,
    O: RowObserver + ?Sized,
{
    params.validate()?;
    ensure_channels::<C>()?;
    ensure_non_empty(src.size(), ["source width", "source height"])?;
    strategy.validate()?;

    if params.expand {
        let layout = expanded_layout(src.size(), params)?;
        dst.reallocate(layout.canvas, [T::default(); C])?;
    } else {
        ensure_non_empty(dst.size(), ["target width", "target height"])?;
    }

    rotate_resampled(src, dst, params, strategy, observer)
}

fn rotate_resampled<T, const C: usize, O>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    params: &RotateParams,
    strategy: ExecutionStrategy,
    observer: &O,
) -> Result<(), TransformError>
where
    T: Copy + Send + Sync,
    O: RowObserver + ?Sized,
{
    let transform = rotation_transform(params, src.size(), dst.size());

    debug!(
        "rotate {} by {} degrees into {} ({} workers)",
        src.size(),
        params.angle_degrees,
        dst.size(),
        strategy.num_workers()
    );
    trace!("target-to-source map: {:?}", transform.to_array());

    resample(src, dst, &transform, strategy, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::{compute_pad_layout, ResizeMode, ResizeOptions};
    use crate::progress::NoProgress;
    use approx::assert_relative_eq;
    use tessera_image::ImageError;

    #[test]
    fn compose_rotation_matches_centers() {
        let m = compose_rotation(37.0, Point2::new(5.0, 3.0), Point2::new(11.0, 9.5));
        let p = m.apply(Point2::new(11.0, 9.5));
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn compose_rotation_is_inverse_of_forward() {
        let (sc, tc) = (Point2::new(4.0, 2.0), Point2::new(6.0, 6.0));
        let inverse = compose_rotation(30.0, sc, tc);
        let forward = AffineTransform::translation(-sc.x, -sc.y)
            .then(&AffineTransform::rotation(30.0))
            .then(&AffineTransform::translation(tc.x, tc.y));

        let p = Point2::new(1.0, 3.0);
        let q = inverse.apply(forward.apply(p));
        assert_relative_eq!(q.x, p.x, epsilon = 1e-5);
        assert_relative_eq!(q.y, p.y, epsilon = 1e-5);
    }

    #[test]
    fn rotation_transform_default_center() {
        let params = RotateParams::new(-64.0);
        let m = rotation_transform(&params, [10, 4].into(), [12, 12].into());
        let expected = compose_rotation(-64.0, Point2::new(5.0, 2.0), Point2::new(6.0, 6.0));
        assert_eq!(m, expected);
    }

    #[test]
    fn rotation_transform_empty_center_is_unset() {
        let unset = rotation_transform(&RotateParams::new(15.0), [6, 6].into(), [6, 6].into());
        let empty = rotation_transform(
            &RotateParams::new(15.0).with_center(Point2::EMPTY),
            [6, 6].into(),
            [6, 6].into(),
        );
        assert_eq!(unset, empty);
    }

    #[test]
    fn expanded_layout_quarter_turn() -> Result<(), TransformError> {
        let layout = expanded_layout([6, 2].into(), &RotateParams::new(90.0))?;
        assert_eq!(layout.canvas, ImageSize::from([2, 6]));
        assert_eq!(layout.placement, Rect::new(-2, 2, 6, 2));
        Ok(())
    }

    #[test]
    fn expanded_layout_ignores_center_for_size() -> Result<(), TransformError> {
        let a = expanded_layout([9, 5].into(), &RotateParams::new(33.0))?;
        let b = expanded_layout(
            [9, 5].into(),
            &RotateParams::new(33.0).with_center(Point2::new(1.0, 1.0)),
        )?;
        assert!(a.canvas.width.abs_diff(b.canvas.width) <= 1);
        assert!(a.canvas.height.abs_diff(b.canvas.height) <= 1);
        Ok(())
    }

    #[test]
    fn expanded_layout_derived_center_is_box_pad() -> Result<(), TransformError> {
        for (size, angle) in [([7, 3], 90.0), ([10, 4], 30.0), ([5, 8], -135.0)] {
            let size = ImageSize::from(size);
            let layout = expanded_layout(size, &RotateParams::new(angle))?;
            let boxed = compute_pad_layout(
                size,
                &ResizeOptions {
                    size: layout.canvas,
                    mode: ResizeMode::BoxPad,
                },
            )?;
            assert_eq!(layout.placement, boxed.placement, "{angle}");
        }
        Ok(())
    }

    #[test]
    fn rotate_expand_custom_center_stays_on_canvas() -> Result<(), TransformError> {
        let src = Image::<u8, 1>::from_size_val([10, 2].into(), 1)?;

        for center in [Point2::new(1.0, 1.0), Point2::new(9.5, 0.5), Point2::new(-4.0, 30.0)] {
            let params = RotateParams::new(90.0)
                .with_center(center)
                .with_expand(true);
            let dst = rotate(&src, &params, [0], ExecutionStrategy::Serial, &NoProgress)?;

            assert_eq!(dst.size(), ImageSize::from([2, 10]));
            assert!(dst.as_slice().iter().all(|&v| v == 1), "{center:?}");
        }
        Ok(())
    }

    #[test]
    fn rotation_transform_expand_centers_canvas() {
        let params = RotateParams::new(45.0)
            .with_center(Point2::new(9.0, 1.0))
            .with_expand(true);
        let canvas = ImageSize::from([9, 9]);
        let m = rotation_transform(&params, [10, 2].into(), canvas);

        // the canvas center maps back onto the source center
        let p = m.apply(Rect::from_size(canvas).center());
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn rotate_rejects_non_finite_angle() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_size_val([2, 2].into(), 1)?;
        let res = rotate(
            &src,
            &RotateParams::new(f32::NAN),
            [0],
            ExecutionStrategy::Serial,
            &NoProgress,
        );
        assert!(matches!(res, Err(TransformError::NonFiniteAngle(a)) if a.is_nan()));
        Ok(())
    }

    #[test]
    fn rotate_into_expand_reallocates() -> Result<(), TransformError> {
        let src = Image::<u8, 1>::new([3, 1].into(), vec![1, 2, 3])?;
        let mut dst = Image::<u8, 1>::from_size_val([1, 1].into(), 7)?;

        rotate_into(
            &src,
            &mut dst,
            &RotateParams::new(90.0).with_expand(true),
            ExecutionStrategy::Serial,
            &NoProgress,
        )?;

        assert_eq!(dst.size(), ImageSize::from([1, 3]));
        assert_eq!(dst.as_slice(), &[1, 2, 3]);
        Ok(())
    }

    #[test]
    fn rotate_into_rejects_before_writing() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_size_val([2, 2].into(), 1)?;
        let mut dst = Image::<u8, 1>::from_size_val([2, 2].into(), 7)?;

        let res = rotate_into(
            &src,
            &mut dst,
            &RotateParams::new(10.0).with_expand(true),
            ExecutionStrategy::Fixed(0),
            &NoProgress,
        );

        assert!(matches!(res, Err(TransformError::Parallel(_))));
        assert_eq!(dst.size(), ImageSize::from([2, 2]));
        assert_eq!(dst.as_slice(), &[7, 7, 7, 7]);
        Ok(())
    }
}
