use std::ops::Range;
use std::sync::Arc;

use fademask_image::VideoFrame;

use crate::{cache::FrameCache, clip::Clip, error::ClipError};

/// Produces the frames of a clip on request.
///
/// Implementations must be pure with respect to the frame index: asking twice
/// for frame `n` yields equal frames. Bounds are checked by [`Clip`] before a
/// source is called.
pub trait FrameSource: Send + Sync {
    /// Produce frame `n`.
    fn get_frame(&self, n: usize) -> Result<Arc<VideoFrame>, ClipError>;
}

pub(crate) type EvalFn = dyn Fn(usize) -> Result<VideoFrame, ClipError> + Send + Sync;
pub(crate) type MapFn = dyn Fn(usize, &VideoFrame) -> Result<VideoFrame, ClipError> + Send + Sync;

pub(crate) struct Frames(pub(crate) Vec<Arc<VideoFrame>>);

impl FrameSource for Frames {
    fn get_frame(&self, n: usize) -> Result<Arc<VideoFrame>, ClipError> {
        self.0
            .get(n)
            .cloned()
            .ok_or(ClipError::FrameOutOfRange(n, self.0.len()))
    }
}

pub(crate) struct Blank(pub(crate) Arc<VideoFrame>);

impl FrameSource for Blank {
    fn get_frame(&self, _n: usize) -> Result<Arc<VideoFrame>, ClipError> {
        Ok(self.0.clone())
    }
}

pub(crate) struct FrameEval(pub(crate) Box<EvalFn>);

impl FrameSource for FrameEval {
    fn get_frame(&self, n: usize) -> Result<Arc<VideoFrame>, ClipError> {
        log::trace!("evaluating frame {n}");
        (self.0)(n).map(Arc::new)
    }
}

pub(crate) struct Map {
    pub(crate) parent: Clip,
    pub(crate) f: Box<MapFn>,
}

impl FrameSource for Map {
    fn get_frame(&self, n: usize) -> Result<Arc<VideoFrame>, ClipError> {
        let frame = self.parent.get_frame(n)?;
        (self.f)(n, &frame).map(Arc::new)
    }
}

pub(crate) struct Slice {
    pub(crate) parent: Clip,
    pub(crate) start: usize,
}

impl FrameSource for Slice {
    fn get_frame(&self, n: usize) -> Result<Arc<VideoFrame>, ClipError> {
        self.parent.get_frame(self.start + n)
    }
}

pub(crate) struct Concat {
    pub(crate) first: Clip,
    pub(crate) second: Clip,
}

impl FrameSource for Concat {
    fn get_frame(&self, n: usize) -> Result<Arc<VideoFrame>, ClipError> {
        let split = self.first.num_frames();
        if n < split {
            self.first.get_frame(n)
        } else {
            self.second.get_frame(n - split)
        }
    }
}

pub(crate) struct Splice {
    pub(crate) base: Clip,
    pub(crate) active: Clip,
    pub(crate) range: Range<usize>,
}

impl FrameSource for Splice {
    fn get_frame(&self, n: usize) -> Result<Arc<VideoFrame>, ClipError> {
        if self.range.contains(&n) {
            self.active.get_frame(n)
        } else {
            self.base.get_frame(n)
        }
    }
}

pub(crate) struct Cached {
    pub(crate) parent: Clip,
    pub(crate) cache: FrameCache,
}

impl FrameSource for Cached {
    fn get_frame(&self, n: usize) -> Result<Arc<VideoFrame>, ClipError> {
        if let Some(frame) = self.cache.get(n) {
            return Ok(frame);
        }
        let frame = self.parent.get_frame(n)?;
        self.cache.insert(n, frame.clone());
        Ok(frame)
    }
}
