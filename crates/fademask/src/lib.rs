#![deny(missing_docs)]
//! Binary masks for fading on-screen text in planar YUV clips.
//!
//! The entry point is [`fade_text_mask`]: it thresholds bright, near-neutral
//! pixels, widens them by dilation and extends them in time so that a caption
//! stays masked while it fades in and out.
//!
//! ```
//! use fademask::{fade_text_mask, Context, FadeNums, FadeTextMaskParams};
//! use fademask::clip::Clip;
//! use fademask::image::{Image, ImageSize, VideoFormat, VideoFrame};
//!
//! let size = ImageSize { width: 8, height: 8 };
//! let format = VideoFormat::yuv420(8).unwrap();
//! let chroma = Image::from_size_val(format.plane_size(1, size), 128).unwrap();
//! let frame = |luma: u16| {
//!     let y = Image::from_size_val(size, luma).unwrap();
//!     VideoFrame::new(format, size, vec![y, chroma.clone(), chroma.clone()]).unwrap()
//! };
//!
//! // a white caption shows up on frame 3 only
//! let frames = (0..6).map(|n| frame(if n == 3 { 235 } else { 16 })).collect();
//! let clip = Clip::from_frames(frames).unwrap();
//!
//! let params = FadeTextMaskParams::default().with_fade_nums(FadeNums::Symmetric(1));
//! let mask = fade_text_mask(&Context::default(), &clip, &params).unwrap();
//!
//! let marked: Vec<bool> = mask
//!     .frames()
//!     .map(|f| f.unwrap().plane(0).unwrap().as_slice()[0] == 255)
//!     .collect();
//! assert_eq!(marked, vec![false, false, true, true, true, false]);
//! ```

/// The explicit processing context.
pub mod context;

/// Error types of the mask builder.
pub mod error;

/// The fading text mask builder.
pub mod mask;

/// Parameters of the mask builder.
pub mod params;

pub use crate::context::Context;
pub use crate::error::FadeTextMaskError;
pub use crate::mask::{bridge_fades, fade_text_mask, restore_depth, restrict_to_range, text_mask};
pub use crate::params::{ApplyRange, FadeNums, FadeTextMaskParams};

#[doc(inline)]
pub use fademask_clip as clip;

#[doc(inline)]
pub use fademask_image as image;

#[doc(inline)]
pub use fademask_imgproc as imgproc;
