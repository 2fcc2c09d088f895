use super::Point2;

/// Sine and cosine of an angle in degrees.
///
/// Quarter turns return exact values so that 90/180/270 degree rotations are
/// lossless on the pixel grid.
fn sin_cos_degrees(angle_degrees: f32) -> (f32, f32) {
    let mut angle = angle_degrees.rem_euclid(360.0);
    if angle >= 360.0 {
        angle = 0.0;
    }

    if angle == 0.0 {
        (0.0, 1.0)
    } else if angle == 90.0 {
        (1.0, 0.0)
    } else if angle == 180.0 {
        (0.0, -1.0)
    } else if angle == 270.0 {
        (-1.0, 0.0)
    } else {
        angle.to_radians().sin_cos()
    }
}

/// A 2x3 affine transformation matrix.
///
/// The matrix is stored row-major as `[a, b, c, d, e, f]` and maps a point as
///
/// | x' |   | a  b  c |   | x |
/// | y' | = | d  e  f | · | y |
///                        | 1 |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineTransform {
    m: [f32; 6],
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    };

    /// Create a transform from its row-major coefficients `[a, b, c, d, e, f]`.
    pub const fn from_array(m: [f32; 6]) -> Self {
        Self { m }
    }

    /// The row-major coefficients `[a, b, c, d, e, f]`.
    pub fn to_array(&self) -> [f32; 6] {
        self.m
    }

    /// A pure translation by `(tx, ty)`.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::from_array([1.0, 0.0, tx, 0.0, 1.0, ty])
    }

    /// A scaling about the origin. Negative factors mirror the axis.
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::from_array([sx, 0.0, 0.0, 0.0, sy, 0.0])
    }

    /// A rotation about the coordinate origin.
    ///
    /// Positive angles rotate counter-clockwise in the math orientation:
    ///
    /// | cos  -sin  0 |
    /// | sin   cos  0 |
    ///
    /// # Arguments
    ///
    /// * `angle_degrees` - The angle of rotation in degrees.
    pub fn rotation(angle_degrees: f32) -> Self {
        let (sin, cos) = sin_cos_degrees(angle_degrees);
        Self::from_array([cos, -sin, 0.0, sin, cos, 0.0])
    }

    /// A rotation by `angle_degrees` around `center`.
    ///
    /// Rotating `center` itself is a no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use tessera_imgproc::geometry::{AffineTransform, Point2};
    ///
    /// let center = Point2::new(4.0, 2.0);
    /// let m = AffineTransform::rotation_about(center, 90.0);
    ///
    /// assert_eq!(m.apply(center), center);
    /// assert_eq!(m.apply(Point2::new(5.0, 2.0)), Point2::new(4.0, 3.0));
    /// ```
    pub fn rotation_about(center: Point2, angle_degrees: f32) -> Self {
        Self::translation(-center.x, -center.y)
            .then(&Self::rotation(angle_degrees))
            .then(&Self::translation(center.x, center.y))
    }

    /// Compose two transforms: the result applies `self` first and `next` second.
    pub fn then(&self, next: &AffineTransform) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.m;
        let [a2, b2, c2, d2, e2, f2] = next.m;

        Self::from_array([
            a2 * a1 + b2 * d1,
            a2 * b1 + b2 * e1,
            a2 * c1 + b2 * f1 + c2,
            d2 * a1 + e2 * d1,
            d2 * b1 + e2 * e1,
            d2 * c1 + e2 * f1 + f2,
        ])
    }

    /// Apply the transform to a point.
    #[inline]
    pub fn apply(&self, p: Point2) -> Point2 {
        let [a, b, c, d, e, f] = self.m;
        Point2::new(a * p.x + b * p.y + c, d * p.x + e * p.y + f)
    }

    /// Inverts the transform.
    ///
    /// A singular matrix yields the zero matrix, following OpenCV's
    /// `invertAffineTransform`.
    pub fn inverse(&self) -> Self {
        let [a, b, c, d, e, f] = self.m;

        let determinant = a * e - b * d;
        let inv_determinant = if determinant != 0.0 {
            1.0 / determinant
        } else {
            0.0
        };

        let new_a = e * inv_determinant;
        let new_b = -b * inv_determinant;
        let new_d = -d * inv_determinant;
        let new_e = a * inv_determinant;
        let new_c = -(new_a * c + new_b * f);
        let new_f = -(new_d * c + new_e * f);

        Self::from_array([new_a, new_b, new_c, new_d, new_e, new_f])
    }
}
