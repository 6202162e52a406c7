#![deny(missing_docs)]
//! Image, plane and video frame types for the fademask crates.

/// Error types for the image module.
pub mod error;

/// Video formats: color family, bit depth and chroma subsampling.
pub mod format;

/// Planar video frames.
pub mod frame;

/// Image representation as a grid of interleaved samples.
pub mod image;

pub use crate::error::ImageError;
pub use crate::format::{ColorFamily, VideoFormat};
pub use crate::frame::{Plane, VideoFrame};
pub use crate::image::{Image, ImageSize};
