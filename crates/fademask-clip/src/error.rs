use fademask_image::ImageError;

/// An error type for clip construction and frame evaluation.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ClipError {
    /// Error when a clip would contain no frames.
    #[error("Clip has no frames")]
    Empty,

    /// Error when a frame does not share the clip's format or size.
    #[error("Frame {index} is {found} but the clip is {expected}")]
    FrameMismatch {
        /// Index of the offending frame.
        index: usize,
        /// Format and size of the clip.
        expected: String,
        /// Format and size of the frame.
        found: String,
    },

    /// Error when a frame index is past the end of the clip.
    #[error("Frame index ({0}) is out of range for a clip of {1} frames")]
    FrameOutOfRange(usize, usize),

    /// Error when a frame range is empty, reversed or past the end of the clip.
    #[error("Invalid frame range [{start}, {end}) for a clip of {len} frames")]
    InvalidRange {
        /// First frame of the range.
        start: usize,
        /// One past the last frame of the range.
        end: usize,
        /// Number of frames of the clip.
        len: usize,
    },

    /// Error when two clips are combined but do not share format and size.
    #[error("Clips do not match: {0} vs {1}")]
    Mismatch(String, String),

    /// Error raised by an image operation during frame evaluation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error raised by a user supplied frame function.
    #[error("Frame evaluation failed: {0}")]
    Eval(String),
}
