use std::ops::Range;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::FadeTextMaskError;

/// How many frames a mask borrows from the future and from the past.
///
/// `fade_in` frames ahead are merged so a caption is masked before it is
/// fully visible; `fade_out` frames behind are merged so it stays masked
/// while it disappears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FadeNums {
    /// The same length on both sides.
    Symmetric(usize),
    /// Separate fade-in and fade-out lengths.
    Asymmetric {
        /// Frames looked ahead.
        fade_in: usize,
        /// Frames looked behind.
        fade_out: usize,
    },
}

impl FadeNums {
    /// Number of frames looked ahead.
    pub fn in_num(&self) -> usize {
        match *self {
            FadeNums::Symmetric(n) => n,
            FadeNums::Asymmetric { fade_in, .. } => fade_in,
        }
    }

    /// Number of frames looked behind.
    pub fn out_num(&self) -> usize {
        match *self {
            FadeNums::Symmetric(n) => n,
            FadeNums::Asymmetric { fade_out, .. } => fade_out,
        }
    }
}

impl Default for FadeNums {
    fn default() -> Self {
        FadeNums::Symmetric(8)
    }
}

impl From<usize> for FadeNums {
    fn from(n: usize) -> Self {
        FadeNums::Symmetric(n)
    }
}

impl From<(usize, usize)> for FadeNums {
    fn from((fade_in, fade_out): (usize, usize)) -> Self {
        FadeNums::Asymmetric { fade_in, fade_out }
    }
}

impl TryFrom<&[usize]> for FadeNums {
    type Error = FadeTextMaskError;

    fn try_from(values: &[usize]) -> Result<Self, Self::Error> {
        match *values {
            [fade_in, fade_out] => Ok(FadeNums::Asymmetric { fade_in, fade_out }),
            _ => Err(FadeTextMaskError::ValueInput(
                "incorrect fade_nums setting.".to_string(),
            )),
        }
    }
}

impl FromStr for FadeNums {
    type Err = FadeTextMaskError;

    /// Parse `"8"` as symmetric or `"8,4"` as fade-in and fade-out lengths.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_list(s, "fade_nums can only be an integer or a pair of integers.")?;
        match values.as_slice() {
            [n] => Ok(FadeNums::Symmetric(*n)),
            other => FadeNums::try_from(other),
        }
    }
}

/// Half-open frame range `[start, end)` inside which the mask is kept.
///
/// The range is checked against the clip when the mask is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApplyRange {
    /// First frame of the range.
    pub start: usize,
    /// One past the last frame of the range.
    pub end: usize,
}

impl ApplyRange {
    /// Create a range without validating it.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The range as a [`Range`].
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for ApplyRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl TryFrom<&[usize]> for ApplyRange {
    type Error = FadeTextMaskError;

    fn try_from(values: &[usize]) -> Result<Self, Self::Error> {
        match *values {
            [start, end] => Ok(Self::new(start, end)),
            _ => Err(FadeTextMaskError::ValueInput(
                "incorrect apply range setting.".to_string(),
            )),
        }
    }
}

impl FromStr for ApplyRange {
    type Err = FadeTextMaskError;

    /// Parse `"start,end"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_list(s, "apply range can only be a pair of integers.")?;
        ApplyRange::try_from(values.as_slice())
    }
}

fn parse_list(s: &str, type_message: &str) -> Result<Vec<usize>, FadeTextMaskError> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| FadeTextMaskError::TypeInput(type_message.to_string()))
        })
        .collect()
}

/// Parameters of [`crate::fade_text_mask`].
///
/// Thresholds are on the 8-bit scale whatever the depth of the source.
///
/// # Examples
///
/// ```
/// use fademask::{ApplyRange, FadeNums, FadeTextMaskParams};
///
/// let params = FadeTextMaskParams::default()
///     .with_lthr(200)
///     .with_fade_nums(FadeNums::Asymmetric { fade_in: 4, fade_out: 12 })
///     .with_apply_range(ApplyRange::new(100, 300));
///
/// assert_eq!(params.cthr, 2);
/// assert_eq!(params.fade_nums.out_num(), 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FadeTextMaskParams {
    /// Luma threshold: text has luma strictly above it.
    pub lthr: u8,
    /// Chroma threshold: text has both chroma samples strictly within it of 128.
    pub cthr: u8,
    /// Number of 3x3 dilation passes.
    pub expand: usize,
    /// Temporal extension of the mask.
    pub fade_nums: FadeNums,
    /// Frames outside this range get an empty mask.
    pub apply_range: Option<ApplyRange>,
}

impl Default for FadeTextMaskParams {
    fn default() -> Self {
        Self {
            lthr: 225,
            cthr: 2,
            expand: 2,
            fade_nums: FadeNums::default(),
            apply_range: None,
        }
    }
}

impl FadeTextMaskParams {
    /// Set the luma threshold.
    pub fn with_lthr(mut self, lthr: u8) -> Self {
        self.lthr = lthr;
        self
    }

    /// Set the chroma threshold.
    pub fn with_cthr(mut self, cthr: u8) -> Self {
        self.cthr = cthr;
        self
    }

    /// Set the number of dilation passes.
    pub fn with_expand(mut self, expand: usize) -> Self {
        self.expand = expand;
        self
    }

    /// Set the fade lengths.
    pub fn with_fade_nums(mut self, fade_nums: impl Into<FadeNums>) -> Self {
        self.fade_nums = fade_nums.into();
        self
    }

    /// Restrict the mask to a frame range.
    pub fn with_apply_range(mut self, apply_range: impl Into<ApplyRange>) -> Self {
        self.apply_range = Some(apply_range.into());
        self
    }
}
