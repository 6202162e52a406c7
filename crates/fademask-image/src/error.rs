/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to share a size.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a sample cannot be cast to the target type.
    #[error("Failed to cast image data")]
    CastError,

    /// Error when the bit depth is not supported.
    #[error("Unsupported bit depth ({0}), expected 8..=16")]
    UnsupportedBitDepth(u32),

    /// Error when a chroma subsampling factor is not supported.
    #[error("Unsupported chroma subsampling (log2 {0}x{1}), expected factors up to 2")]
    UnsupportedSubsampling(u32, u32),

    /// Error when a frame does not carry the planes its format requires.
    #[error("Frame has {0} planes but its format requires {1}")]
    PlaneCountMismatch(usize, usize),

    /// Error when a sample exceeds the maximum value of the bit depth.
    #[error("Sample value {0} exceeds the maximum ({1}) of the format")]
    SampleOutOfRange(u16, u16),

    /// Error when a resampler refuses to process a plane.
    #[error("Resampler {0} rejected the operation: {1}")]
    ResizeRejected(&'static str, String),
}
