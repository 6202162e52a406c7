use argh::FromArgs;
use fademask::{
    clip::Clip,
    fade_text_mask,
    image::{Image, ImageSize, VideoFormat, VideoFrame},
    text_mask, ApplyRange, Context, FadeNums, FadeTextMaskParams,
};

/// Builds a fading text mask over a synthetic caption that fades in and out
#[derive(Debug, FromArgs)]
struct Args {
    /// bits per sample of the synthetic clip
    #[argh(option, short = 'b', default = "8")]
    bits: u32,

    /// number of frames of the fade-in and of the fade-out
    #[argh(option, short = 'r', default = "6")]
    ramp: usize,

    /// number of frames the caption is fully visible
    #[argh(option, short = 'H', default = "4")]
    hold: usize,

    /// fade lengths, either "n" or "in,out"
    #[argh(option, short = 'f', default = "FadeNums::Symmetric(8)")]
    fade_nums: FadeNums,

    /// optional frame range "start,end" to keep the mask in
    #[argh(option, short = 'a')]
    apply_range: Option<ApplyRange>,

    /// luma threshold on the 8-bit scale
    #[argh(option, short = 'l', default = "225")]
    lthr: u8,
}

const WIDTH: usize = 64;
const HEIGHT: usize = 36;

/// Luma of the caption at frame `n`: black, ramping to white, holding, ramping back.
fn caption_luma(n: usize, ramp: usize, hold: usize) -> u16 {
    let lead = ramp;
    let level = if n < lead {
        0.0
    } else if n < lead + ramp {
        (n - lead + 1) as f32 / ramp as f32
    } else if n < lead + ramp + hold {
        1.0
    } else if n < lead + 2 * ramp + hold {
        (lead + 2 * ramp + hold - n) as f32 / (ramp + 1) as f32
    } else {
        0.0
    };
    (16.0 + level * (235.0 - 16.0)).round() as u16
}

fn synthetic_clip(
    format: VideoFormat,
    ramp: usize,
    hold: usize,
) -> Result<Clip, Box<dyn std::error::Error>> {
    let size = ImageSize {
        width: WIDTH,
        height: HEIGHT,
    };
    let shift = format.bits_per_sample - 8;
    let num_frames = 4 * ramp + hold;
    let chroma = Image::from_size_val(format.plane_size(1, size), 128 << shift)?;

    let mut frames = Vec::with_capacity(num_frames);
    for n in 0..num_frames {
        let text = caption_luma(n, ramp, hold) << shift;
        let background = 40 << shift;

        // a caption bar in the lower third of the frame
        let data = (0..size.area())
            .map(|i| {
                let (x, y) = (i % WIDTH, i / WIDTH);
                if (24..30).contains(&y) && (8..56).contains(&x) && x % 4 != 3 {
                    text
                } else {
                    background
                }
            })
            .collect();
        let luma = Image::new(size, data)?;
        frames.push(VideoFrame::new(
            format,
            size,
            vec![luma, chroma.clone(), chroma.clone()],
        )?);
    }

    Ok(Clip::from_frames(frames)?)
}

fn coverage(clip: &Clip) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let mut out = Vec::with_capacity(clip.num_frames());
    for frame in clip.frames() {
        let frame = frame?;
        let plane = frame.plane(0)?;
        let marked = plane.as_slice().iter().filter(|&&v| v > 0).count();
        out.push(100.0 * marked as f32 / plane.as_slice().len() as f32);
    }
    Ok(out)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let format = VideoFormat::yuv420(args.bits)?;
    let clip = synthetic_clip(format, args.ramp, args.hold)?;

    let mut params = FadeTextMaskParams::default()
        .with_lthr(args.lthr)
        .with_fade_nums(args.fade_nums);
    if let Some(range) = args.apply_range {
        params = params.with_apply_range(range);
    }

    let ctx = Context::default();
    let raw = text_mask(&ctx, &clip, params.lthr, params.cthr, params.expand)?;
    let mask = fade_text_mask(&ctx, &clip, &params)?;

    println!(
        "{} {}x{}, {} frames, {:?}",
        format,
        WIDTH,
        HEIGHT,
        clip.num_frames(),
        params
    );
    println!("frame  caption  raw%   mask%");
    for (n, (raw, masked)) in coverage(&raw)?.iter().zip(coverage(&mask)?).enumerate() {
        println!(
            "{n:>5}  {:>7}  {raw:>5.1}  {masked:>5.1}",
            caption_luma(n, args.ramp, args.hold)
        );
    }

    Ok(())
}
