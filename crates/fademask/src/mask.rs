use std::sync::Arc;

use fademask_clip::{Clip, ClipError};
use fademask_image::{ColorFamily, ImageSize, Plane, VideoFormat, VideoFrame};
use fademask_imgproc::{
    combine, depth, morphology,
    resize::{self, PlaneResizer},
    temporal,
};

use crate::{
    context::Context,
    error::FadeTextMaskError,
    params::{ApplyRange, FadeNums, FadeTextMaskParams},
};

/// Depth at which thresholds are evaluated and masks are built.
const MASK_BITS: u32 = 8;

/// Horizontal offset, in chroma pixels, applied when upsampling chroma.
///
/// Compensates for left-sited chroma so it lines up with luma.
const CHROMA_SHIFT: f64 = 0.25;

/// Build a mask of fading on-screen text.
///
/// Pixels whose luma is above `lthr` and whose chroma is within `cthr` of
/// neutral are marked, the marks are dilated `expand` times, and every frame
/// is merged with the frames `fade_in` ahead and `fade_out` behind. With an
/// `apply_range`, frames outside it get an empty mask.
///
/// The returned clip is lazy: frames are computed when requested.
///
/// # Arguments
///
/// * `ctx` - The resamplers and cache settings to use.
/// * `src` - A YUV clip of any supported depth and subsampling.
/// * `params` - Thresholds, dilation, fade lengths and the apply range.
///
/// # Returns
///
/// A gray clip with the size, length and depth of `src`, whose samples are
/// either zero or `255 * ((2^depth - 1) / 255)`: 255 at 8 bits, 1020 at 10
/// bits, 65535 at 16 bits.
///
/// # Errors
///
/// * [`FadeTextMaskError::ColorModel`] if `src` is not YUV.
/// * [`FadeTextMaskError::InvalidRange`] if the apply range is empty, reversed
///   or past the end of the clip.
pub fn fade_text_mask(
    ctx: &Context,
    src: &Clip,
    params: &FadeTextMaskParams,
) -> Result<Clip, FadeTextMaskError> {
    let format = src.format();
    if format.color_family != ColorFamily::Yuv {
        return Err(FadeTextMaskError::ColorModel(format.color_family));
    }

    log::debug!(
        "fade text mask on {} {} ({} frames): lthr={} cthr={} expand={} fade={:?} range={:?}",
        format,
        src.size(),
        src.num_frames(),
        params.lthr,
        params.cthr,
        params.expand,
        params.fade_nums,
        params.apply_range,
    );

    let mask = text_mask(ctx, src, params.lthr, params.cthr, params.expand)?
        .cached(ctx.cache_capacity());
    let mut combined = bridge_fades(&mask, params.fade_nums)?;

    if let Some(range) = params.apply_range {
        combined = restrict_to_range(&combined, range)?;
    }

    restore_depth(&combined, format.bits_per_sample)
}

/// The per-frame text mask, before any temporal processing.
///
/// Frames are 8-bit gray with samples in `{0, 255}`.
///
/// # Errors
///
/// Returns [`FadeTextMaskError::ColorModel`] if `src` is not YUV.
pub fn text_mask(
    ctx: &Context,
    src: &Clip,
    lthr: u8,
    cthr: u8,
    expand: usize,
) -> Result<Clip, FadeTextMaskError> {
    let src_format = src.format();
    if src_format.color_family != ColorFamily::Yuv {
        return Err(FadeTextMaskError::ColorModel(src_format.color_family));
    }

    let bits = src_format.bits_per_sample;
    let size = src.size();
    let mask_format = VideoFormat::gray(MASK_BITS)?;
    let resizers = ctx.resizers().to_vec();
    let (lthr, cthr) = (lthr as u16, cthr as u16);

    let mask = src.map(mask_format, move |n, frame| {
        log::trace!("text mask for frame {n}");

        let luma = depth::convert_depth(frame.plane(0)?, bits, MASK_BITS)?;
        let chroma_u = align_chroma(&resizers, frame.plane(1)?, bits, size)?;
        let chroma_v = align_chroma(&resizers, frame.plane(2)?, bits, size)?;

        let raw = combine::neutral_highlights(&luma, &chroma_u, &chroma_v, lthr, cthr)?;
        let expanded = morphology::dilate_n(&raw, expand)?;

        Ok(VideoFrame::new(mask_format, size, vec![expanded])?)
    })?;

    Ok(mask)
}

/// Bring a chroma plane to 8 bits and to the luma size, correcting its siting.
fn align_chroma(
    resizers: &[Arc<dyn PlaneResizer>],
    plane: &Plane,
    bits: u32,
    size: ImageSize,
) -> Result<Plane, ClipError> {
    let plane = depth::convert_depth(plane, bits, MASK_BITS)?;
    Ok(resize::resize_with_fallback(
        resizers,
        &plane,
        size,
        CHROMA_SHIFT,
        MASK_BITS,
    )?)
}

/// Merge every frame of a single plane clip with the frames around it.
///
/// Frame `n` of the result is the sample-wise maximum of `mask[n]`,
/// `mask[min(n + fade_in, last)]` and `mask[max(n - fade_out, 0)]`. Only those
/// three frames are read, not the window between them, and the lookups clamp
/// at both ends of the clip.
///
/// # Errors
///
/// Returns a collaborator error if `mask` is not a single plane clip.
pub fn bridge_fades(mask: &Clip, fade_nums: FadeNums) -> Result<Clip, FadeTextMaskError> {
    let format = mask.format();
    if format.num_planes() != 1 {
        return Err(FadeTextMaskError::Collaborator(ClipError::Mismatch(
            format.to_string(),
            "a single plane mask".to_string(),
        )));
    }

    let (in_num, out_num) = (fade_nums.in_num(), fade_nums.out_num());
    let last = mask.num_frames() - 1;
    let size = mask.size();
    let source = mask.clone();

    let bridged = Clip::frame_eval(mask.info(), move |n| {
        let current = source.get_frame(n)?;
        let fade_in = source.get_frame(n.saturating_add(in_num).min(last))?;
        let fade_out = source.get_frame(n.saturating_sub(out_num))?;

        let plane = temporal::max3(current.plane(0)?, fade_in.plane(0)?, fade_out.plane(0)?)?;
        Ok(VideoFrame::new(format, size, vec![plane])?)
    })?;

    Ok(bridged)
}

/// Keep the mask inside `range` and blank it everywhere else.
///
/// # Errors
///
/// Returns [`FadeTextMaskError::InvalidRange`] if `range` is empty, reversed or
/// ends past the clip.
pub fn restrict_to_range(mask: &Clip, range: ApplyRange) -> Result<Clip, FadeTextMaskError> {
    let blank = Clip::blank(mask.info())?;
    blank
        .splice(mask, range.as_range())
        .map_err(|err| match err {
            ClipError::InvalidRange { .. } => FadeTextMaskError::InvalidRange {
                start: range.start,
                end: range.end,
            },
            other => FadeTextMaskError::Collaborator(other),
        })
}

/// Scale a binary 8-bit mask to `bits` depth, see [`depth::expand_binary`].
///
/// Returns the clip unchanged when `bits` is 8.
pub fn restore_depth(mask: &Clip, bits: u32) -> Result<Clip, FadeTextMaskError> {
    if bits <= MASK_BITS {
        return Ok(mask.clone());
    }

    let out_format = VideoFormat::gray(bits)?;
    let size = mask.size();
    let restored = mask.map(out_format, move |_, frame| {
        let plane = depth::expand_binary(frame.plane(0)?, bits)?;
        Ok(VideoFrame::new(out_format, size, vec![plane])?)
    })?;

    Ok(restored)
}
