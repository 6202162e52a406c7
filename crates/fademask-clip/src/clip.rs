use std::ops::Range;
use std::sync::Arc;

use rayon::prelude::*;

use fademask_image::{ImageSize, VideoFormat, VideoFrame};

use crate::{
    cache::FrameCache,
    error::ClipError,
    source::{Blank, Cached, Concat, FrameEval, FrameSource, Frames, Map, Slice, Splice},
};

/// Shape shared by every frame of a clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipInfo {
    /// Format of every frame.
    pub format: VideoFormat,
    /// Size of every frame.
    pub size: ImageSize,
    /// Number of frames.
    pub num_frames: usize,
}

impl ClipInfo {
    fn describe(&self) -> String {
        format!("{} {}x{}", self.format, self.size.width, self.size.height)
    }

    fn with_num_frames(&self, num_frames: usize) -> Self {
        Self {
            num_frames,
            ..*self
        }
    }
}

/// A finite, ordered, lazily evaluated sequence of video frames.
///
/// Cloning a clip is cheap: clones share the same frame source.
#[derive(Clone)]
pub struct Clip {
    info: ClipInfo,
    source: Arc<dyn FrameSource>,
}

impl std::fmt::Debug for Clip {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Clip").field("info", &self.info).finish()
    }
}

impl Clip {
    /// Create a clip from a custom [`FrameSource`].
    ///
    /// # Errors
    ///
    /// Returns [`ClipError::Empty`] when `info.num_frames` is zero.
    pub fn from_source(info: ClipInfo, source: Arc<dyn FrameSource>) -> Result<Self, ClipError> {
        if info.num_frames == 0 {
            return Err(ClipError::Empty);
        }
        Ok(Self { info, source })
    }

    /// Create a clip that holds already decoded frames.
    ///
    /// # Errors
    ///
    /// Fails when `frames` is empty or the frames do not share a format and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use fademask_clip::Clip;
    /// use fademask_image::{ImageSize, VideoFormat, VideoFrame};
    ///
    /// let size = ImageSize { width: 4, height: 4 };
    /// let frame = VideoFrame::blank(VideoFormat::yuv420(8).unwrap(), size).unwrap();
    ///
    /// let clip = Clip::from_frames(vec![frame.clone(), frame]).unwrap();
    /// assert_eq!(clip.num_frames(), 2);
    /// ```
    pub fn from_frames(frames: Vec<VideoFrame>) -> Result<Self, ClipError> {
        let first = frames.first().ok_or(ClipError::Empty)?;
        let info = ClipInfo {
            format: first.format(),
            size: first.size(),
            num_frames: frames.len(),
        };

        for (index, frame) in frames.iter().enumerate() {
            check_frame(&info, index, frame)?;
        }

        let frames = frames.into_iter().map(Arc::new).collect();
        Self::from_source(info, Arc::new(Frames(frames)))
    }

    /// A clip whose frames all have every sample set to zero.
    ///
    /// A single frame is allocated and shared by every index.
    pub fn blank(info: ClipInfo) -> Result<Self, ClipError> {
        let frame = VideoFrame::blank(info.format, info.size)?;
        Self::from_source(info, Arc::new(Blank(Arc::new(frame))))
    }

    /// A clip whose frame `n` is computed by `f(n)` when requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use fademask_clip::{Clip, ClipInfo};
    /// use fademask_image::{ImageSize, VideoFormat, VideoFrame};
    ///
    /// let info = ClipInfo {
    ///     format: VideoFormat::gray(8).unwrap(),
    ///     size: ImageSize { width: 2, height: 2 },
    ///     num_frames: 10,
    /// };
    ///
    /// let clip = Clip::frame_eval(info, move |_n| Ok(VideoFrame::blank(info.format, info.size)?)).unwrap();
    /// assert_eq!(clip.get_frame(9).unwrap().width(), 2);
    /// assert!(clip.get_frame(10).is_err());
    /// ```
    pub fn frame_eval<F>(info: ClipInfo, f: F) -> Result<Self, ClipError>
    where
        F: Fn(usize) -> Result<VideoFrame, ClipError> + Send + Sync + 'static,
    {
        Self::from_source(info, Arc::new(FrameEval(Box::new(f))))
    }

    /// A clip of `format` whose frame `n` is `f(n, &self[n])`.
    pub fn map<F>(&self, format: VideoFormat, f: F) -> Result<Self, ClipError>
    where
        F: Fn(usize, &VideoFrame) -> Result<VideoFrame, ClipError> + Send + Sync + 'static,
    {
        let info = ClipInfo {
            format,
            ..self.info
        };
        Self::from_source(
            info,
            Arc::new(Map {
                parent: self.clone(),
                f: Box::new(f),
            }),
        )
    }

    /// The shape shared by every frame.
    pub fn info(&self) -> ClipInfo {
        self.info
    }

    /// Format of every frame.
    pub fn format(&self) -> VideoFormat {
        self.info.format
    }

    /// Size of every frame.
    pub fn size(&self) -> ImageSize {
        self.info.size
    }

    /// Number of frames.
    pub fn num_frames(&self) -> usize {
        self.info.num_frames
    }

    /// Produce frame `n`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipError::FrameOutOfRange`] for `n >= num_frames`, any error of
    /// the frame source, and [`ClipError::FrameMismatch`] if the source
    /// produced a frame of another format or size.
    pub fn get_frame(&self, n: usize) -> Result<Arc<VideoFrame>, ClipError> {
        if n >= self.info.num_frames {
            return Err(ClipError::FrameOutOfRange(n, self.info.num_frames));
        }
        let frame = self.source.get_frame(n)?;
        check_frame(&self.info, n, &frame)?;
        Ok(frame)
    }

    /// The frames `range.start..range.end` as a new clip.
    ///
    /// # Errors
    ///
    /// Returns [`ClipError::InvalidRange`] for an empty, reversed or
    /// out-of-bounds range.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, ClipError> {
        self.check_range(&range)?;
        Self::from_source(
            self.info.with_num_frames(range.end - range.start),
            Arc::new(Slice {
                parent: self.clone(),
                start: range.start,
            }),
        )
    }

    /// The frames of `self` followed by the frames of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipError::Mismatch`] when the clips differ in format or size.
    pub fn concat(&self, other: &Clip) -> Result<Self, ClipError> {
        self.check_compatible(other)?;
        Self::from_source(
            self.info
                .with_num_frames(self.num_frames() + other.num_frames()),
            Arc::new(Concat {
                first: self.clone(),
                second: other.clone(),
            }),
        )
    }

    /// Frames of `active` inside `range`, frames of `self` everywhere else.
    ///
    /// # Errors
    ///
    /// Returns [`ClipError::Mismatch`] when the clips differ in format, size or
    /// length, and [`ClipError::InvalidRange`] for an empty, reversed or
    /// out-of-bounds range.
    pub fn splice(&self, active: &Clip, range: Range<usize>) -> Result<Self, ClipError> {
        self.check_compatible(active)?;
        if active.num_frames() != self.num_frames() {
            return Err(ClipError::Mismatch(
                format!("{} frames", self.num_frames()),
                format!("{} frames", active.num_frames()),
            ));
        }
        self.check_range(&range)?;
        Self::from_source(
            self.info,
            Arc::new(Splice {
                base: self.clone(),
                active: active.clone(),
                range,
            }),
        )
    }

    /// Memoise up to `capacity` produced frames.
    pub fn cached(&self, capacity: usize) -> Self {
        Self {
            info: self.info,
            source: Arc::new(Cached {
                parent: self.clone(),
                cache: FrameCache::new(capacity),
            }),
        }
    }

    /// Iterate over the frames in order, evaluating them one by one.
    pub fn frames(&self) -> ClipFrames {
        ClipFrames {
            clip: self.clone(),
            next: 0,
        }
    }

    /// Evaluate every frame, in parallel, and return them in order.
    pub fn render(&self) -> Result<Vec<Arc<VideoFrame>>, ClipError> {
        (0..self.num_frames())
            .into_par_iter()
            .map(|n| self.get_frame(n))
            .collect()
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), ClipError> {
        if range.start >= range.end || range.end > self.num_frames() {
            return Err(ClipError::InvalidRange {
                start: range.start,
                end: range.end,
                len: self.num_frames(),
            });
        }
        Ok(())
    }

    fn check_compatible(&self, other: &Clip) -> Result<(), ClipError> {
        if self.format() != other.format() || self.size() != other.size() {
            return Err(ClipError::Mismatch(
                self.info.describe(),
                other.info.describe(),
            ));
        }
        Ok(())
    }
}

fn check_frame(info: &ClipInfo, index: usize, frame: &VideoFrame) -> Result<(), ClipError> {
    if frame.format() != info.format || frame.size() != info.size {
        return Err(ClipError::FrameMismatch {
            index,
            expected: info.describe(),
            found: format!("{} {}x{}", frame.format(), frame.width(), frame.height()),
        });
    }
    Ok(())
}

/// Sequential iterator over the frames of a [`Clip`].
pub struct ClipFrames {
    clip: Clip,
    next: usize,
}

impl Iterator for ClipFrames {
    type Item = Result<Arc<VideoFrame>, ClipError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.clip.num_frames() {
            return None;
        }
        let frame = self.clip.get_frame(self.next);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.clip.num_frames().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ClipFrames {}
