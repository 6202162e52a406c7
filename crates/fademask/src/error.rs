use fademask_clip::ClipError;
use fademask_image::{ColorFamily, ImageError};

/// Errors raised while building a fading text mask.
///
/// Every message is prefixed with the builder's name.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FadeTextMaskError {
    /// An argument has the wrong type, e.g. a non-integer fade length.
    #[error("Fade Text Mask: {0}")]
    TypeInput(String),

    /// The source clip is not in the YUV color family.
    #[error("Fade Text Mask: src should be a YUV clip, got {0}.")]
    ColorModel(ColorFamily),

    /// An argument has the right type but a malformed value.
    #[error("Fade Text Mask: {0}")]
    ValueInput(String),

    /// The apply range is empty, reversed or past the end of the clip.
    #[error("Fade Text Mask: incorrect apply range setting. Possible end less than start. [{start}, {end})")]
    InvalidRange {
        /// First frame of the rejected range.
        start: usize,
        /// One past the last frame of the rejected range.
        end: usize,
    },

    /// A clip or plane primitive failed.
    #[error("Fade Text Mask: {0}")]
    Collaborator(#[from] ClipError),
}

impl FadeTextMaskError {
    /// Whether the error belongs to the type-input class.
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::TypeInput(_) | Self::ColorModel(_))
    }

    /// Whether the error belongs to the value-input class.
    pub fn is_value_error(&self) -> bool {
        matches!(self, Self::ValueInput(_) | Self::InvalidRange { .. })
    }
}

impl From<ImageError> for FadeTextMaskError {
    fn from(err: ImageError) -> Self {
        Self::Collaborator(ClipError::Image(err))
    }
}
