#![deny(missing_docs)]
//! Lazy, index-addressable video clips.
//!
//! A [`Clip`] describes how to produce each of its frames rather than holding
//! them. Frames are computed on request by [`Clip::get_frame`], may be
//! requested in any order, and are shared as immutable [`std::sync::Arc`]s.

mod cache;

/// The clip type and its operations.
pub mod clip;

/// Error types for the clip module.
pub mod error;

mod source;

pub use crate::clip::{Clip, ClipFrames, ClipInfo};
pub use crate::error::ClipError;
pub use crate::source::FrameSource;
