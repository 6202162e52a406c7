use fademask_image::{Image, ImageError, Plane};

use crate::parallel;

fn check_bits(bits: u32) -> Result<(), ImageError> {
    if !(8..=16).contains(&bits) {
        return Err(ImageError::UnsupportedBitDepth(bits));
    }
    Ok(())
}

fn max_value(bits: u32) -> u16 {
    ((1u32 << bits) - 1) as u16
}

/// Convert a plane between integer bit depths.
///
/// The conversion follows limited-range semantics: lowering the depth is a
/// rounded right shift, raising it is a left shift. Results are clamped to the
/// target range.
///
/// # Arguments
///
/// * `src` - The input plane, with samples at `from_bits`.
/// * `from_bits` - The bit depth of `src`.
/// * `to_bits` - The requested bit depth.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedBitDepth`] when a depth is outside `8..=16`.
///
/// # Examples
///
/// ```
/// use fademask_image::{Image, ImageSize};
/// use fademask_imgproc::depth::convert_depth;
///
/// let plane = Image::<u16, 1>::new(ImageSize { width: 3, height: 1 }, vec![0, 940, 1023]).unwrap();
/// let plane8 = convert_depth(&plane, 10, 8).unwrap();
///
/// assert_eq!(plane8.as_slice(), &[0, 235, 255]);
/// ```
pub fn convert_depth(src: &Plane, from_bits: u32, to_bits: u32) -> Result<Plane, ImageError> {
    check_bits(from_bits)?;
    check_bits(to_bits)?;

    if from_bits == to_bits {
        return Ok(src.clone());
    }

    let to_max = max_value(to_bits) as u32;
    let mut dst = Image::from_size_val(src.size(), 0u16)?;

    if from_bits > to_bits {
        let shift = from_bits - to_bits;
        let half = 1u32 << (shift - 1);
        parallel::par_iter_rows_val(src, &mut dst, |&x, y| {
            *y = ((x as u32 + half) >> shift).min(to_max) as u16;
        });
    } else {
        let shift = to_bits - from_bits;
        parallel::par_iter_rows_val(src, &mut dst, |&x, y| {
            *y = ((x as u32) << shift).min(to_max) as u16;
        });
    }

    Ok(dst)
}

/// Round and clamp a floating point plane into an integer plane of `bits` depth.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedBitDepth`] when `bits` is outside `8..=16`.
pub fn quantize(src: &Image<f32, 1>, bits: u32) -> Result<Plane, ImageError> {
    check_bits(bits)?;

    let max = max_value(bits) as f32;
    let mut dst = Image::from_size_val(src.size(), 0u16)?;
    parallel::par_iter_rows_val(src, &mut dst, |&x, y| {
        *y = x.round().clamp(0.0, max) as u16;
    });

    Ok(dst)
}

/// Stretch a binary 8-bit plane to `bits` depth.
///
/// Zero stays zero; any other sample becomes `255 * ((2^bits - 1) / 255)`,
/// i.e. 255 scaled by the integer ratio between the two ranges. That is
/// 1020 at 10 bits and 65535 at 16 bits.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedBitDepth`] when `bits` is outside `8..=16`.
pub fn expand_binary(src: &Plane, bits: u32) -> Result<Plane, ImageError> {
    check_bits(bits)?;

    let on = 255 * (max_value(bits) / 255);
    let mut dst = Image::from_size_val(src.size(), 0u16)?;
    parallel::par_iter_rows_val(src, &mut dst, |&x, y| {
        *y = if x == 0 { 0 } else { on };
    });

    Ok(dst)
}
