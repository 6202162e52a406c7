use crate::{
    error::ImageError,
    format::VideoFormat,
    image::{Image, ImageSize},
};

/// A single plane of a video frame.
pub type Plane = Image<u16, 1>;

/// A planar video frame.
///
/// The frame owns one [`Plane`] per plane of its [`VideoFormat`]; plane 0 has
/// the frame size and the remaining planes follow the format's subsampling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFrame {
    format: VideoFormat,
    size: ImageSize,
    planes: Vec<Plane>,
}

impl VideoFrame {
    /// Create a frame from its planes.
    ///
    /// # Errors
    ///
    /// Fails when the number of planes, a plane size or a sample value does not
    /// agree with `format`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fademask_image::{Image, ImageSize, VideoFormat, VideoFrame};
    ///
    /// let size = ImageSize { width: 4, height: 2 };
    /// let format = VideoFormat::yuv420(8).unwrap();
    /// let luma = Image::from_size_val(size, 16).unwrap();
    /// let chroma = Image::from_size_val(format.plane_size(1, size), 128).unwrap();
    ///
    /// let frame = VideoFrame::new(format, size, vec![luma, chroma.clone(), chroma]).unwrap();
    /// assert_eq!(frame.num_planes(), 3);
    /// ```
    pub fn new(format: VideoFormat, size: ImageSize, planes: Vec<Plane>) -> Result<Self, ImageError> {
        if planes.len() != format.num_planes() {
            return Err(ImageError::PlaneCountMismatch(
                planes.len(),
                format.num_planes(),
            ));
        }

        let max_value = format.max_value();
        for (i, plane) in planes.iter().enumerate() {
            let expected = format.plane_size(i, size);
            if plane.size() != expected {
                return Err(ImageError::InvalidImageSize(
                    plane.width(),
                    plane.height(),
                    expected.width,
                    expected.height,
                ));
            }
            if let Some(&v) = plane.as_slice().iter().find(|&&v| v > max_value) {
                return Err(ImageError::SampleOutOfRange(v, max_value));
            }
        }

        Ok(Self {
            format,
            size,
            planes,
        })
    }

    /// A frame with every sample set to zero.
    pub fn blank(format: VideoFormat, size: ImageSize) -> Result<Self, ImageError> {
        let planes = (0..format.num_planes())
            .map(|i| Image::from_size_val(format.plane_size(i, size), 0))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(format, size, planes)
    }

    /// The format of the frame.
    pub fn format(&self) -> VideoFormat {
        self.format
    }

    /// The size of the frame (and of plane 0).
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Width of the frame in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height of the frame in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Number of planes.
    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    /// Get plane `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ChannelIndexOutOfBounds`] for a missing plane.
    pub fn plane(&self, index: usize) -> Result<&Plane, ImageError> {
        self.planes
            .get(index)
            .ok_or(ImageError::ChannelIndexOutOfBounds(index, self.planes.len()))
    }

    /// All planes of the frame.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Consume the frame and return its planes.
    pub fn into_planes(self) -> Vec<Plane> {
        self.planes
    }
}
