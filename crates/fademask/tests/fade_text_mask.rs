use std::sync::Arc;

use fademask::clip::Clip;
use fademask::image::{ColorFamily, Image, ImageError, ImageSize, Plane, VideoFormat, VideoFrame};
use fademask::imgproc::resize::{BicubicResizer, FastResizer, PlaneResizer};
use fademask::{
    fade_text_mask, text_mask, ApplyRange, Context, FadeNums, FadeTextMaskError,
    FadeTextMaskParams,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const SIZE: ImageSize = ImageSize {
    width: 16,
    height: 12,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 8-bit planes of a synthetic frame: scattered bright specks on dark
/// background, chroma either neutral or strongly tinted.
#[derive(Clone)]
struct SyntheticFrame {
    luma: Vec<u16>,
    chroma_u: Vec<u16>,
    chroma_v: Vec<u16>,
}

fn synthetic_frames(format: VideoFormat, num_frames: usize, seed: u64) -> Vec<SyntheticFrame> {
    let mut rng = StdRng::seed_from_u64(seed);
    let chroma_area = format.plane_size(1, SIZE).area();
    (0..num_frames)
        .map(|_| SyntheticFrame {
            luma: (0..SIZE.area())
                .map(|_| if rng.random_bool(0.15) { 235 } else { 16 })
                .collect(),
            chroma_u: (0..chroma_area)
                .map(|_| if rng.random_bool(0.8) { 128 } else { 40 })
                .collect(),
            chroma_v: (0..chroma_area)
                .map(|_| if rng.random_bool(0.8) { 128 } else { 210 })
                .collect(),
        })
        .collect()
}

fn to_clip(format: VideoFormat, frames: &[SyntheticFrame]) -> Result<Clip, FadeTextMaskError> {
    let shift = format.bits_per_sample - 8;
    let chroma_size = format.plane_size(1, SIZE);
    let plane = |size: ImageSize, data: &[u16]| -> Result<Plane, ImageError> {
        Image::new(size, data.iter().map(|&v| v << shift).collect())
    };
    let frames = frames
        .iter()
        .map(|f| -> Result<VideoFrame, ImageError> {
            VideoFrame::new(
                format,
                SIZE,
                vec![
                    plane(SIZE, &f.luma)?,
                    plane(chroma_size, &f.chroma_u)?,
                    plane(chroma_size, &f.chroma_v)?,
                ],
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Clip::from_frames(frames)?)
}

/// A clip whose luma is flat per frame: bright where `lit[n]` is set.
fn flat_clip(format: VideoFormat, lit: &[bool]) -> Result<Clip, FadeTextMaskError> {
    let chroma_size = format.plane_size(1, SIZE);
    let frames = lit
        .iter()
        .map(|&on| SyntheticFrame {
            luma: vec![if on { 235 } else { 16 }; SIZE.area()],
            chroma_u: vec![128; chroma_size.area()],
            chroma_v: vec![128; chroma_size.area()],
        })
        .collect::<Vec<_>>();
    to_clip(format, &frames)
}

fn render(clip: &Clip) -> Result<Vec<Vec<u16>>, FadeTextMaskError> {
    Ok(clip
        .render()?
        .iter()
        .map(|f| -> Result<Vec<u16>, ImageError> { Ok(f.plane(0)?.as_slice().to_vec()) })
        .collect::<Result<Vec<_>, _>>()?)
}

fn marked_frames(clip: &Clip) -> Result<Vec<bool>, FadeTextMaskError> {
    Ok(render(clip)?
        .iter()
        .map(|plane| plane.iter().all(|&v| v > 0))
        .collect())
}

fn covers(outer: &[u16], inner: &[u16]) -> bool {
    outer.iter().zip(inner).all(|(&o, &i)| i == 0 || o > 0)
}

#[test]
fn output_matches_source_shape() -> Result<(), FadeTextMaskError> {
    init_logger();
    for format in [
        VideoFormat::yuv420(8)?,
        VideoFormat::yuv422(10)?,
        VideoFormat::yuv444(16)?,
    ] {
        let clip = to_clip(format, &synthetic_frames(format, 5, 1))?;
        let mask = fade_text_mask(&Context::default(), &clip, &FadeTextMaskParams::default())?;

        assert_eq!(mask.num_frames(), 5);
        assert_eq!(mask.size(), SIZE);
        assert_eq!(mask.format().color_family, ColorFamily::Gray);
        assert_eq!(mask.format().bits_per_sample, format.bits_per_sample);
    }
    Ok(())
}

#[test]
fn mask_is_binary() -> Result<(), FadeTextMaskError> {
    init_logger();
    for bits in [8, 10, 16] {
        let format = VideoFormat::yuv420(bits)?;
        let clip = to_clip(format, &synthetic_frames(format, 6, 7))?;
        let params = FadeTextMaskParams::default().with_fade_nums(2usize);
        let mask = fade_text_mask(&Context::default(), &clip, &params)?;

        let on = 255 * ((((1u32 << bits) - 1) / 255) as u16);
        let planes = render(&mask)?;
        for plane in &planes {
            assert!(plane.iter().all(|&v| v == 0 || v == on));
        }
        assert!(planes.iter().flatten().any(|&v| v == on));
    }
    Ok(())
}

#[test]
fn dilation_is_monotonic() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::yuv420(8)?;
    let clip = to_clip(format, &synthetic_frames(format, 3, 11))?;
    let ctx = Context::default();

    let mut previous = render(&text_mask(&ctx, &clip, 225, 2, 0)?)?;
    for expand in 1..4 {
        let current = render(&text_mask(&ctx, &clip, 225, 2, expand)?)?;
        for (cur, prev) in current.iter().zip(&previous) {
            assert!(covers(cur, prev), "expand {expand} lost pixels");
        }
        previous = current;
    }
    Ok(())
}

#[test]
fn bridged_mask_covers_raw_mask() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::yuv420(8)?;
    let clip = to_clip(format, &synthetic_frames(format, 8, 3))?;
    let ctx = Context::default();
    let params = FadeTextMaskParams::default().with_fade_nums((2usize, 3usize));

    let raw = render(&text_mask(&ctx, &clip, params.lthr, params.cthr, params.expand)?)?;
    let bridged = render(&fade_text_mask(&ctx, &clip, &params)?)?;

    for (outer, inner) in bridged.iter().zip(&raw) {
        assert!(covers(outer, inner));
    }
    Ok(())
}

#[test]
fn zero_fade_is_raw_mask() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::yuv420(8)?;
    let clip = to_clip(format, &synthetic_frames(format, 5, 5))?;
    let ctx = Context::default();
    let params = FadeTextMaskParams::default().with_fade_nums(0usize);

    let raw = render(&text_mask(&ctx, &clip, params.lthr, params.cthr, params.expand)?)?;
    let bridged = render(&fade_text_mask(&ctx, &clip, &params)?)?;
    assert_eq!(raw, bridged);
    Ok(())
}

#[test]
fn repeated_calls_agree() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::yuv422(8)?;
    let clip = to_clip(format, &synthetic_frames(format, 6, 21))?;
    let ctx = Context::default();
    let params = FadeTextMaskParams::default().with_fade_nums(FadeNums::Symmetric(1));

    let first = fade_text_mask(&ctx, &clip, &params)?;
    let second = fade_text_mask(&ctx, &clip, &params)?;
    assert_eq!(render(&first)?, render(&second)?);

    // frames requested out of order match the batch render
    let batch = render(&first)?;
    for n in (0..first.num_frames()).rev() {
        assert_eq!(first.get_frame(n)?.plane(0)?.as_slice(), &batch[n][..]);
    }
    Ok(())
}

#[test]
fn high_depth_matches_8bit() -> Result<(), FadeTextMaskError> {
    let frames = synthetic_frames(VideoFormat::yuv420(8)?, 6, 42);
    let ctx = Context::default();
    let params = FadeTextMaskParams::default().with_fade_nums(1usize);

    let clip8 = to_clip(VideoFormat::yuv420(8)?, &frames)?;
    let clip16 = to_clip(VideoFormat::yuv420(16)?, &frames)?;

    let mask8 = render(&fade_text_mask(&ctx, &clip8, &params)?)?;
    let mask16 = render(&fade_text_mask(&ctx, &clip16, &params)?)?;

    for (p8, p16) in mask8.iter().zip(&mask16) {
        let scaled: Vec<u16> = p16.iter().map(|&v| v / 257).collect();
        assert_eq!(&scaled, p8);
    }
    Ok(())
}

#[test]
fn caption_is_bridged_in_time() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::yuv420(8)?;
    let mut lit = vec![false; 10];
    lit[5] = true;
    let clip = flat_clip(format, &lit)?;
    let ctx = Context::default();

    let params = FadeTextMaskParams::default().with_fade_nums((2usize, 1usize));
    let marked = marked_frames(&fade_text_mask(&ctx, &clip, &params)?)?;
    // frame 3 looks ahead to it, frame 6 looks behind to it
    let expected: Vec<bool> = (0..10).map(|n| [3, 5, 6].contains(&n)).collect();
    assert_eq!(marked, expected);
    Ok(())
}

#[test]
fn lookups_clamp_to_clip_edges() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::yuv420(8)?;
    let ctx = Context::default();

    // only frame 0 is lit: the look-behind of every frame clamps to it
    let mut lit = vec![false; 6];
    lit[0] = true;
    let params = FadeTextMaskParams::default().with_fade_nums((0usize, 100usize));
    let marked = marked_frames(&fade_text_mask(&ctx, &flat_clip(format, &lit)?, &params)?)?;
    assert_eq!(marked, vec![true; 6]);

    // only the last frame is lit: the look-ahead clamps to it
    let mut lit = vec![false; 6];
    lit[5] = true;
    let params = FadeTextMaskParams::default().with_fade_nums((100usize, 0usize));
    let marked = marked_frames(&fade_text_mask(&ctx, &flat_clip(format, &lit)?, &params)?)?;
    assert_eq!(marked, vec![true; 6]);
    Ok(())
}

#[test]
fn apply_range_blanks_outside() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::yuv420(10)?;
    let clip = flat_clip(format, &[true; 8])?;
    let ctx = Context::default();

    for k in 1..=8 {
        let params = FadeTextMaskParams::default().with_apply_range(ApplyRange::new(0, k));
        let marked = marked_frames(&fade_text_mask(&ctx, &clip, &params)?)?;
        let expected: Vec<bool> = (0..8).map(|n| n < k).collect();
        assert_eq!(marked, expected, "range [0, {k})");
    }

    let params = FadeTextMaskParams::default().with_apply_range(3..6usize);
    let marked = marked_frames(&fade_text_mask(&ctx, &clip, &params)?)?;
    assert_eq!(
        marked,
        vec![false, false, false, true, true, true, false, false]
    );
    Ok(())
}

#[test]
fn invalid_apply_range_is_rejected() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::yuv420(8)?;
    let clip = flat_clip(format, &[true; 10])?;

    for (start, end) in [(5, 5), (8, 3), (4, 11)] {
        let params = FadeTextMaskParams::default().with_apply_range(ApplyRange::new(start, end));
        let err = fade_text_mask(&Context::default(), &clip, &params).unwrap_err();
        assert_eq!(err, FadeTextMaskError::InvalidRange { start, end });
        assert!(err.is_value_error());
        assert!(err.to_string().contains("Possible end less than start"));
    }
    Ok(())
}

#[test]
fn non_yuv_source_is_rejected() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::gray(8)?;
    let frame = VideoFrame::blank(format, SIZE)?;
    let clip = Clip::from_frames(vec![frame])?;

    let err = fade_text_mask(&Context::default(), &clip, &FadeTextMaskParams::default())
        .unwrap_err();
    assert_eq!(err, FadeTextMaskError::ColorModel(ColorFamily::Gray));
    assert!(err.is_type_error());
    assert_eq!(
        err.to_string(),
        "Fade Text Mask: src should be a YUV clip, got GRAY."
    );
    Ok(())
}

struct Rejecting;

impl PlaneResizer for Rejecting {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    fn resize(&self, _: &Plane, _: ImageSize, _: f64, _: u32) -> Result<Plane, ImageError> {
        Err(ImageError::ResizeRejected(
            "rejecting",
            "unsupported".to_string(),
        ))
    }
}

#[test]
fn fallback_resizer_is_used() -> Result<(), FadeTextMaskError> {
    init_logger();
    let format = VideoFormat::yuv420(8)?;
    let clip = flat_clip(format, &[false, true, false])?;
    let params = FadeTextMaskParams::default().with_fade_nums(0usize);

    let ctx = Context::default()
        .with_resizers(vec![Arc::new(Rejecting), Arc::new(BicubicResizer::default())]);
    let marked = marked_frames(&fade_text_mask(&ctx, &clip, &params)?)?;
    assert_eq!(marked, vec![false, true, false]);

    // without a working resizer the failure surfaces when frames are produced
    let ctx = Context::default().with_resizers(vec![Arc::new(Rejecting)]);
    let mask = fade_text_mask(&ctx, &clip, &params)?;
    assert!(mask.get_frame(0).is_err());
    Ok(())
}

#[test]
fn tinted_text_is_ignored() -> Result<(), FadeTextMaskError> {
    let format = VideoFormat::yuv444(8)?;
    let frame = SyntheticFrame {
        luma: vec![235; SIZE.area()],
        chroma_u: vec![90; SIZE.area()],
        chroma_v: vec![128; SIZE.area()],
    };
    let clip = to_clip(format, &[frame])?;
    let mask = render(&fade_text_mask(
        &Context::default(),
        &clip,
        &FadeTextMaskParams::default(),
    )?)?;
    assert!(mask[0].iter().all(|&v| v == 0));
    Ok(())
}

#[test]
fn primary_resizer_handles_every_layout() -> Result<(), FadeTextMaskError> {
    init_logger();
    // no fallback configured: any rejection would surface as a frame error
    let ctx = Context::default().with_resizers(vec![Arc::new(FastResizer)]);
    let params = FadeTextMaskParams::default().with_fade_nums(1usize);

    for format in [
        VideoFormat::yuv420(8)?,
        VideoFormat::yuv420(10)?,
        VideoFormat::yuv422(12)?,
        VideoFormat::yuv444(16)?,
    ] {
        let clip = flat_clip(format, &[false, true, false, false])?;
        let marked = marked_frames(&fade_text_mask(&ctx, &clip, &params)?)?;
        assert_eq!(marked, vec![true, true, true, false], "{format}");

        let synthetic = to_clip(format, &synthetic_frames(format, 3, 9))?;
        let with_fallback = render(&fade_text_mask(&Context::default(), &synthetic, &params)?)?;
        let primary_only = render(&fade_text_mask(&ctx, &synthetic, &params)?)?;
        assert_eq!(with_fallback, primary_only, "{format}");
    }
    Ok(())
}
