use crate::error::ImageError;

/// Size of an image or plane in pixels.
///
/// # Examples
///
/// ```
/// use fademask_image::ImageSize;
///
/// let size = ImageSize { width: 1920, height: 1080 };
/// assert_eq!(size.area(), 2_073_600);
/// assert_eq!(size.to_string(), "1920x1080");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Owned, row-major pixel buffer with `CHANNELS` interleaved samples per pixel.
///
/// Video planes use a single channel; see [`crate::Plane`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Wrap `data` as an image of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidChannelShape`] if `data` does not hold
    /// exactly `width * height * CHANNELS` samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use fademask_image::{Image, ImageSize};
    ///
    /// let plane = Image::<u16, 1>::new(ImageSize { width: 3, height: 2 }, vec![0; 6]).unwrap();
    /// assert_eq!(plane.width(), 3);
    ///
    /// assert!(Image::<u16, 1>::new(ImageSize { width: 3, height: 2 }, vec![0; 5]).is_err());
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.area() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }
        Ok(Self { size, data })
    }

    /// An image filled with `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Image::new(size, vec![val; size.area() * CHANNELS])
    }

    /// Size in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of columns, same as [`Self::width`].
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Number of rows, same as [`Self::height`].
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The samples, row by row.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The samples, row by row, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// A new image with `f` applied to every sample.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Image<U, CHANNELS>
    where
        T: Copy,
    {
        Image {
            size: self.size,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }
}
