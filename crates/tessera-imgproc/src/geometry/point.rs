use std::ops::{Add, Sub};

use super::AffineTransform;

/// A point in continuous 2D image space.
///
/// Pixel `(x, y)` covers the unit square `[x, x + 1) × [y, y + 1)`, so its
/// center lies at `(x + 0.5, y + 0.5)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point2 {
    /// The empty point, used as "unset" marker for rotation centers.
    pub const EMPTY: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Center of the pixel with integer index `(x, y)`.
    pub fn pixel_center(x: usize, y: usize) -> Self {
        Self::new(x as f32 + 0.5, y as f32 + 0.5)
    }

    /// Returns true for [`Point2::EMPTY`].
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Apply an affine transform to the point, `p' = M · p`.
    pub fn transform(&self, m: &AffineTransform) -> Self {
        m.apply(*self)
    }

    /// Rotate the point counter-clockwise by `angle_degrees` around `center`.
    ///
    /// # Example
    ///
    /// ```
    /// use tessera_imgproc::geometry::Point2;
    ///
    /// let p = Point2::new(2.0, 1.0).rotate(Point2::new(1.0, 1.0), 90.0);
    /// assert_eq!(p, Point2::new(1.0, 2.0));
    /// ```
    pub fn rotate(&self, center: Point2, angle_degrees: f32) -> Self {
        self.transform(&AffineTransform::rotation_about(center, angle_degrees))
    }

    /// Integer index of the pixel whose unit square contains this point.
    pub fn floor_index(&self) -> (isize, isize) {
        (self.x.floor() as isize, self.y.floor() as isize)
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Self::Output {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Self::Output {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::Point2;
    use approx::assert_relative_eq;

    #[test]
    fn point_ops() {
        let p = Point2::new(2.0, 3.0);
        let q = Point2::new(0.5, -1.0);

        assert_eq!(p + q, Point2::new(2.5, 2.0));
        assert_eq!(p - q, Point2::new(1.5, 4.0));
        assert_eq!(Point2::pixel_center(1, 2), Point2::new(1.5, 2.5));
    }

    #[test]
    fn point_empty() {
        assert!(Point2::default().is_empty());
        assert!(Point2::EMPTY.is_empty());
        assert!(!Point2::new(0.0, 1.0).is_empty());
    }

    #[test]
    fn point_rotate_about_itself() {
        let c = Point2::new(3.25, -7.5);
        for angle in [0.0, 13.0, 90.0, 211.5, -45.0] {
            let r = c.rotate(c, angle);
            assert_relative_eq!(r.x, c.x, epsilon = 1e-5);
            assert_relative_eq!(r.y, c.y, epsilon = 1e-5);
        }
    }

    #[test]
    fn point_rotate_counter_clockwise() {
        let p = Point2::new(1.0, 0.0).rotate(Point2::EMPTY, 45.0);
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(p.x, s, epsilon = 1e-6);
        assert_relative_eq!(p.y, s, epsilon = 1e-6);
    }

    #[test]
    fn point_floor_index() {
        assert_eq!(Point2::new(1.5, 0.0).floor_index(), (1, 0));
        assert_eq!(Point2::new(-0.25, 2.999).floor_index(), (-1, 2));
    }
}
