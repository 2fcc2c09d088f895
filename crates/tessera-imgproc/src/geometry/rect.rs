use tessera_image::ImageSize;

use super::Point2;

/// An axis-aligned rectangle on the integer pixel grid.
///
/// The position may be negative, the extent never is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: isize,
    /// Top edge.
    pub y: isize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: isize, y: isize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle at the origin covering an image of the given size.
    pub fn from_size(size: ImageSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// The extent of the rectangle.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// One past the right-most column.
    pub fn right(&self) -> isize {
        self.x + self.width as isize
    }

    /// One past the bottom-most row.
    pub fn bottom(&self) -> isize {
        self.y + self.height as isize
    }

    /// Geometric center, `(x + width / 2, y + height / 2)`.
    pub fn center(&self) -> Point2 {
        Point2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// The four corners in continuous space, clockwise from the top-left.
    pub fn corners(&self) -> [Point2; 4] {
        let (l, t) = (self.x as f32, self.y as f32);
        let (r, b) = (self.right() as f32, self.bottom() as f32);
        [
            Point2::new(l, t),
            Point2::new(r, t),
            Point2::new(r, b),
            Point2::new(l, b),
        ]
    }

    /// Whether the pixel `(x, y)` lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges exclusive.
    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
