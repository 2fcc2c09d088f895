use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use tessera_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Allocates `size.area()` copies of `pixel` without aborting on failure.
fn alloc_pixels<T: Copy, const C: usize>(
    size: ImageSize,
    pixel: [T; C],
) -> Result<Vec<T>, ImageError> {
    let len = size
        .width
        .checked_mul(size.height)
        .and_then(|n| n.checked_mul(C))
        .ok_or(ImageError::AllocationFailed(size.width, size.height))?;

    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ImageError::AllocationFailed(size.width, size.height))?;

    for _ in 0..size.area() {
        data.extend_from_slice(&pixel);
    }

    Ok(data)
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major as interleaved channels, i.e. the value of
/// channel `c` at `(x, y)` lives at `(y * width + x) * C + c`. Rows are
/// contiguous so they can be handed out as disjoint mutable slices to worker
/// threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const C: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const C: usize> Image<T, C>
where
    T: Copy,
{
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if data.len() != size.width * size.height * C {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * C,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size where every channel holds `val`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::AllocationFailed`] if the buffer cannot be allocated.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError> {
        Self::from_size_pixel(size, [val; C])
    }

    /// Create a new image with the given size where every pixel is `pixel`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::AllocationFailed`] if the buffer cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 4>::from_size_pixel([2, 1].into(), [1, 2, 3, 255]).unwrap();
    ///
    /// assert_eq!(image.as_slice(), &[1, 2, 3, 255, 1, 2, 3, 255]);
    /// ```
    pub fn from_size_pixel(size: ImageSize, pixel: [T; C]) -> Result<Self, ImageError> {
        Ok(Self {
            size,
            data: alloc_pixels(size, pixel)?,
        })
    }

    /// Replace the pixel buffer with a freshly allocated one of a new size.
    ///
    /// The image is left untouched if the allocation fails.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::AllocationFailed`] if the buffer cannot be allocated.
    pub fn reallocate(&mut self, size: ImageSize, pixel: [T; C]) -> Result<(), ImageError> {
        let data = alloc_pixels(size, pixel)?;
        self.size = size;
        self.data = data;
        Ok(())
    }

    /// Set every pixel of the image to `pixel`.
    pub fn fill(&mut self, pixel: [T; C]) {
        self.data
            .chunks_exact_mut(C)
            .for_each(|dst| dst.copy_from_slice(&pixel));
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        C
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the pixel value at the given coordinates.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate of the pixel.
    /// * `y` - The y-coordinate of the pixel.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] if the coordinates are outside the image.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<[T; C], ImageError> {
        let offset = self.offset(x, y)?;
        Ok(std::array::from_fn(|c| self.data[offset + c]))
    }

    /// Set the pixel value at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] if the coordinates are outside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [T; C]) -> Result<(), ImageError> {
        let offset = self.offset(x, y)?;
        self.data[offset..offset + C].copy_from_slice(&pixel);
        Ok(())
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        Ok((y * self.width() + x) * C)
    }
}
