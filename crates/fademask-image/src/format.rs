use crate::{error::ImageError, image::ImageSize};

/// The color family of a planar video format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorFamily {
    /// A single luma-like plane. Masks use this family.
    Gray,
    /// One luma plane followed by two chroma planes.
    Yuv,
}

impl std::fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ColorFamily::Gray => write!(f, "GRAY"),
            ColorFamily::Yuv => write!(f, "YUV"),
        }
    }
}

/// Largest supported log2 chroma subsampling factor (4:1 reduction).
const MAX_SUBSAMPLING: u32 = 2;

/// Describes the sample layout of a planar video frame.
///
/// Samples of every supported depth (8 to 16 bits) are stored as `u16`.
/// Chroma subsampling is expressed as log2 factors, e.g. 4:2:0 is
/// `subsampling_w = 1, subsampling_h = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VideoFormat {
    /// Color family of the format.
    pub color_family: ColorFamily,
    /// Bits per sample, in `8..=16`.
    pub bits_per_sample: u32,
    /// Horizontal chroma subsampling (log2).
    pub subsampling_w: u32,
    /// Vertical chroma subsampling (log2).
    pub subsampling_h: u32,
}

impl VideoFormat {
    /// Single plane gray format.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedBitDepth`] outside `8..=16`.
    pub fn gray(bits: u32) -> Result<Self, ImageError> {
        Self::validated(ColorFamily::Gray, bits, 0, 0)
    }

    /// Three plane YUV format with the given log2 subsampling factors.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedBitDepth`] outside `8..=16` and
    /// [`ImageError::UnsupportedSubsampling`] for factors above 2.
    pub fn yuv(bits: u32, subsampling_w: u32, subsampling_h: u32) -> Result<Self, ImageError> {
        Self::validated(ColorFamily::Yuv, bits, subsampling_w, subsampling_h)
    }

    /// YUV 4:2:0.
    pub fn yuv420(bits: u32) -> Result<Self, ImageError> {
        Self::yuv(bits, 1, 1)
    }

    /// YUV 4:2:2.
    pub fn yuv422(bits: u32) -> Result<Self, ImageError> {
        Self::yuv(bits, 1, 0)
    }

    /// YUV 4:4:4.
    pub fn yuv444(bits: u32) -> Result<Self, ImageError> {
        Self::yuv(bits, 0, 0)
    }

    fn validated(
        color_family: ColorFamily,
        bits_per_sample: u32,
        subsampling_w: u32,
        subsampling_h: u32,
    ) -> Result<Self, ImageError> {
        if !(8..=16).contains(&bits_per_sample) {
            return Err(ImageError::UnsupportedBitDepth(bits_per_sample));
        }
        if subsampling_w > MAX_SUBSAMPLING || subsampling_h > MAX_SUBSAMPLING {
            return Err(ImageError::UnsupportedSubsampling(
                subsampling_w,
                subsampling_h,
            ));
        }
        Ok(Self {
            color_family,
            bits_per_sample,
            subsampling_w,
            subsampling_h,
        })
    }

    /// The same layout at another bit depth.
    pub fn with_bits(&self, bits: u32) -> Result<Self, ImageError> {
        Self::validated(
            self.color_family,
            bits,
            self.subsampling_w,
            self.subsampling_h,
        )
    }

    /// Number of planes of a frame in this format.
    pub fn num_planes(&self) -> usize {
        match self.color_family {
            ColorFamily::Gray => 1,
            ColorFamily::Yuv => 3,
        }
    }

    /// Largest sample value representable at this depth.
    pub fn max_value(&self) -> u16 {
        ((1u32 << self.bits_per_sample) - 1) as u16
    }

    /// Size of plane `index` for a frame of `frame_size`.
    ///
    /// Chroma sizes round up, so odd luma sizes keep their last column/row.
    pub fn plane_size(&self, index: usize, frame_size: ImageSize) -> ImageSize {
        if index == 0 {
            return frame_size;
        }
        let round_up = |v: usize, shift: u32| v.div_ceil(1 << shift.min(usize::BITS - 1));
        ImageSize {
            width: round_up(frame_size.width, self.subsampling_w),
            height: round_up(frame_size.height, self.subsampling_h),
        }
    }
}

impl std::fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.color_family {
            ColorFamily::Gray => write!(f, "GRAY{}", self.bits_per_sample),
            ColorFamily::Yuv => {
                let layout = match (self.subsampling_w, self.subsampling_h) {
                    (0, 0) => "444".to_string(),
                    (1, 0) => "422".to_string(),
                    (1, 1) => "420".to_string(),
                    (w, h) => format!("ss{w}{h}"),
                };
                write!(f, "YUV{layout}P{}", self.bits_per_sample)
            }
        }
    }
}
