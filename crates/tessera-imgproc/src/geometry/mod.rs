//! Geometry primitives for pixel transforms.
//!
//! Coordinates are continuous: pixel `(x, y)` covers the unit square
//! `[x, x + 1) × [y, y + 1)`. Angles are in degrees, counter-clockwise positive
//! in the math orientation.

mod affine;
mod point;
mod rect;

pub use affine::AffineTransform;
pub use point::Point2;
pub use rect::Rect;

/// Extents closer than this to an integer are snapped before rounding.
const EXTENT_EPSILON: f32 = 1e-4;

pub(crate) fn ceil_snapped(v: f32) -> f32 {
    let r = v.round();
    if (v - r).abs() < EXTENT_EPSILON {
        r
    } else {
        v.ceil()
    }
}

pub(crate) fn floor_snapped(v: f32) -> f32 {
    let r = v.round();
    if (v - r).abs() < EXTENT_EPSILON {
        r
    } else {
        v.floor()
    }
}

/// The minimum and maximum of the four corners of `rect` after `transform`.
pub fn transformed_extents(rect: &Rect, transform: &AffineTransform) -> (Point2, Point2) {
    let corners = rect.corners().map(|p| transform.apply(p));

    let mut min = Point2::new(f32::INFINITY, f32::INFINITY);
    let mut max = Point2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for p in corners.iter() {
        min = Point2::new(min.x.min(p.x), min.y.min(p.y));
        max = Point2::new(max.x.max(p.x), max.y.max(p.y));
    }

    (min, max)
}

/// Computes the smallest pixel-aligned rectangle enclosing `rect` after `transform`.
///
/// The origin is rounded down and the far edge rounded up, so every point of
/// the transformed rectangle lies inside the result.
///
/// # Arguments
///
/// * `rect` - The rectangle to transform.
/// * `transform` - The transform applied to the four corners of `rect`.
///
/// # Example
///
/// ```
/// use tessera_imgproc::geometry::{bounding_rect, AffineTransform, Rect};
///
/// let rect = Rect::new(0, 0, 4, 2);
/// let m = AffineTransform::rotation_about(rect.center(), 90.0);
///
/// assert_eq!(bounding_rect(&rect, &m), Rect::new(1, -1, 2, 4));
/// ```
pub fn bounding_rect(rect: &Rect, transform: &AffineTransform) -> Rect {
    let (min, max) = transformed_extents(rect, transform);

    let (left, top) = (floor_snapped(min.x), floor_snapped(min.y));
    let (right, bottom) = (ceil_snapped(max.x), ceil_snapped(max.y));

    Rect::new(
        left as isize,
        top as isize,
        (right - left).max(0.0) as usize,
        (bottom - top).max(0.0) as usize,
    )
}

#[cfg(test)]
mod tests {
    use super::{bounding_rect, transformed_extents, AffineTransform, Rect};

    #[test]
    fn bounding_rect_identity() {
        let rect = Rect::new(3, -2, 7, 5);
        assert_eq!(bounding_rect(&rect, &AffineTransform::IDENTITY), rect);
        assert_eq!(
            bounding_rect(&rect, &AffineTransform::rotation_about(rect.center(), 0.0)),
            rect
        );
    }

    #[test]
    fn bounding_rect_half_turn_keeps_size() {
        let rect = Rect::new(0, 0, 7, 3);
        for angle in [180.0, -180.0, 540.0] {
            let m = AffineTransform::rotation_about(rect.center(), angle);
            assert_eq!(bounding_rect(&rect, &m), rect);
        }
    }

    #[test]
    fn bounding_rect_quarter_turn_swaps_size() {
        let rect = Rect::new(0, 0, 6, 2);
        let m = AffineTransform::rotation_about(rect.center(), 270.0);
        let b = bounding_rect(&rect, &m);
        assert_eq!((b.width, b.height), (2, 6));
        assert_eq!(b.center(), rect.center());
    }

    #[test]
    fn bounding_rect_diagonal() {
        let rect = Rect::new(0, 0, 10, 4);
        for angle in [30.0f32, 45.0, 60.0, 123.0, -17.5] {
            let m = AffineTransform::rotation_about(rect.center(), angle);
            let b = bounding_rect(&rect, &m);

            let (sin, cos) = angle.to_radians().sin_cos();
            let w = 10.0 * cos.abs() + 4.0 * sin.abs();
            let h = 10.0 * sin.abs() + 4.0 * cos.abs();
            assert!((b.width as f32 - w.ceil()).abs() <= 1.0, "{angle}: {b:?}");
            assert!((b.height as f32 - h.ceil()).abs() <= 1.0, "{angle}: {b:?}");
            assert!(b.width as f32 >= w - 1e-3);
            assert!(b.height as f32 >= h - 1e-3);
        }
    }

    #[test]
    fn bounding_rect_encloses_far_corner() {
        // x spans [0.9, 3.1]: a width of ceil(2.2) = 3 from x = 0 would miss 3.1
        let rect = Rect::new(0, 0, 2, 1);
        let m = AffineTransform::scale(1.1, 1.0).then(&AffineTransform::translation(0.9, 0.0));
        let b = bounding_rect(&rect, &m);
        let (min, max) = transformed_extents(&rect, &m);

        assert_eq!(b, Rect::new(0, 0, 4, 1));
        assert!(b.x as f32 <= min.x && b.right() as f32 >= max.x);
        assert!(b.y as f32 <= min.y && b.bottom() as f32 >= max.y);
    }
}
