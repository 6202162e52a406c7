use std::sync::Arc;

use fast_image_resize as fr;
use rayon::prelude::*;

use fademask_image::{Image, ImageError, ImageSize, Plane};

use crate::{
    depth,
    interpolation::{BicubicParams, KernelWeights},
};

/// A primitive able to resample a single plane.
///
/// `src_left` moves the sampling window right by that many source pixels,
/// which is how chroma siting is corrected when upsampling.
pub trait PlaneResizer: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Resample `src`, holding samples at `bits` depth, to `dst_size`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ResizeRejected`] when the primitive does not
    /// support the request.
    fn resize(
        &self,
        src: &Plane,
        dst_size: ImageSize,
        src_left: f64,
        bits: u32,
    ) -> Result<Plane, ImageError>;
}

/// Resample a plane with the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// Uses a Mitchell–Netravali convolution. 8-bit planes go through the `U8`
/// pixel type, deeper planes through `U16`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastResizer;

impl FastResizer {
    const NAME: &'static str = "fast_image_resize";

    fn reject(err: impl std::fmt::Display) -> ImageError {
        ImageError::ResizeRejected(Self::NAME, err.to_string())
    }
}

impl PlaneResizer for FastResizer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn resize(
        &self,
        src: &Plane,
        dst_size: ImageSize,
        src_left: f64,
        bits: u32,
    ) -> Result<Plane, ImageError> {
        if src.width() == 0 || src.height() == 0 || dst_size.area() == 0 {
            return Err(Self::reject("empty plane"));
        }

        // replicate edge columns so the shifted crop box stays inside the source
        let pad = src_left.abs().ceil() as usize;
        let (pad_left, pad_right) = if src_left < 0.0 { (pad, 0) } else { (0, pad) };
        let padded_width = src.width() + pad_left + pad_right;
        let samples: Vec<u16> = src
            .as_slice()
            .chunks_exact(src.width())
            .flat_map(|row| {
                let first = row[0];
                let last = row[row.len() - 1];
                std::iter::repeat(first)
                    .take(pad_left)
                    .chain(row.iter().copied())
                    .chain(std::iter::repeat(last).take(pad_right))
            })
            .collect();

        // prepare the input buffer for the fast_image_resize crate
        let (pixel_type, src_buffer): (fr::PixelType, Vec<u8>) = if bits == 8 {
            let data = samples
                .iter()
                .map(|&v| u8::try_from(v).map_err(|_| ImageError::CastError))
                .collect::<Result<Vec<u8>, ImageError>>()?;
            (fr::PixelType::U8, data)
        } else {
            let data = samples.iter().flat_map(|v| v.to_ne_bytes()).collect();
            (fr::PixelType::U16, data)
        };

        let src_image = fr::images::ImageRef::new(
            padded_width as u32,
            src.height() as u32,
            &src_buffer,
            pixel_type,
        )
        .map_err(Self::reject)?;

        let mut dst_image =
            fr::images::Image::new(dst_size.width as u32, dst_size.height as u32, pixel_type);

        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Mitchell))
            .crop(
                pad_left as f64 + src_left,
                0.0,
                src.width() as f64,
                src.height() as f64,
            );

        let mut resizer = fr::Resizer::new();
        resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(Self::reject)?;

        let max = ((1u32 << bits) - 1) as u16;
        let data: Vec<u16> = if bits == 8 {
            dst_image.buffer().iter().map(|&v| v as u16).collect()
        } else {
            dst_image
                .buffer()
                .chunks_exact(2)
                .map(|b| u16::from_ne_bytes([b[0], b[1]]).min(max))
                .collect()
        };

        Image::new(dst_size, data)
    }
}

/// Native separable bicubic resampler.
///
/// Filters in `f32` and re-normalises the result to the requested depth with
/// [`depth::quantize`]. Edges are replicated.
#[derive(Debug, Default, Clone, Copy)]
pub struct BicubicResizer {
    /// Kernel parameters.
    pub params: BicubicParams,
}

impl BicubicResizer {
    /// Create a resampler with custom kernel parameters.
    pub fn new(params: BicubicParams) -> Self {
        Self { params }
    }

    /// Resample into a floating point plane without quantization.
    pub fn resize_f32(
        &self,
        src: &Plane,
        dst_size: ImageSize,
        src_left: f64,
    ) -> Result<Image<f32, 1>, ImageError> {
        if src.width() == 0 || src.height() == 0 {
            return Err(ImageError::ResizeRejected(
                self.name(),
                "empty plane".to_string(),
            ));
        }

        let horizontal = KernelWeights::new(
            &self.params,
            src.width(),
            dst_size.width,
            src_left as f32,
        );
        let vertical = KernelWeights::new(&self.params, src.height(), dst_size.height, 0.0);

        // horizontal pass: src rows -> tmp (src height x dst width)
        let src_width = src.width();
        let src_data = src.as_slice();
        let mut tmp = vec![0f32; src.height() * dst_size.width];
        if dst_size.width > 0 {
            tmp.par_chunks_exact_mut(dst_size.width)
                .enumerate()
                .for_each(|(y, row)| {
                    let src_row = &src_data[y * src_width..(y + 1) * src_width];
                    for (x, out) in row.iter_mut().enumerate() {
                        *out = horizontal.indices[x]
                            .iter()
                            .zip(horizontal.weights[x].iter())
                            .map(|(&i, &w)| src_row[i] as f32 * w)
                            .sum();
                    }
                });
        }

        // vertical pass: tmp -> dst
        let mut dst = Image::<f32, 1>::from_size_val(dst_size, 0.0)?;
        if dst_size.width > 0 {
            dst.as_slice_mut()
                .par_chunks_exact_mut(dst_size.width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, out) in row.iter_mut().enumerate() {
                        *out = vertical.indices[y]
                            .iter()
                            .zip(vertical.weights[y].iter())
                            .map(|(&i, &w)| tmp[i * dst_size.width + x] * w)
                            .sum();
                    }
                });
        }

        Ok(dst)
    }
}

impl PlaneResizer for BicubicResizer {
    fn name(&self) -> &'static str {
        "bicubic"
    }

    fn resize(
        &self,
        src: &Plane,
        dst_size: ImageSize,
        src_left: f64,
        bits: u32,
    ) -> Result<Plane, ImageError> {
        let resampled = self.resize_f32(src, dst_size, src_left)?;
        depth::quantize(&resampled, bits)
    }
}

/// Resample a plane with the first resizer that accepts the request.
///
/// Rejections of all but the last resizer are logged and the next one is
/// tried; the last error is returned when every resizer rejects.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fademask_image::{Image, ImageSize};
/// use fademask_imgproc::resize::{resize_with_fallback, BicubicResizer, PlaneResizer};
///
/// let chroma = Image::<u16, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 128).unwrap();
/// let resizers: Vec<Arc<dyn PlaneResizer>> = vec![Arc::new(BicubicResizer::default())];
///
/// let full = resize_with_fallback(&resizers, &chroma, ImageSize { width: 4, height: 4 }, 0.25, 8).unwrap();
/// assert!(full.as_slice().iter().all(|&v| v == 128));
/// ```
pub fn resize_with_fallback(
    resizers: &[Arc<dyn PlaneResizer>],
    src: &Plane,
    dst_size: ImageSize,
    src_left: f64,
    bits: u32,
) -> Result<Plane, ImageError> {
    let mut last_err = ImageError::ResizeRejected("none", "no resizer configured".to_string());
    for resizer in resizers {
        match resizer.resize(src, dst_size, src_left, bits) {
            Ok(plane) => return Ok(plane),
            Err(err) => {
                log::warn!(
                    "resizer {} rejected {}x{} -> {}x{}: {}",
                    resizer.name(),
                    src.width(),
                    src.height(),
                    dst_size.width,
                    dst_size.height,
                    err
                );
                last_err = err;
            }
        }
    }
    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rejecting;

    impl PlaneResizer for Rejecting {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        fn resize(&self, _: &Plane, _: ImageSize, _: f64, _: u32) -> Result<Plane, ImageError> {
            Err(ImageError::ResizeRejected("rejecting", "always".to_string()))
        }
    }

    fn chroma(width: usize, height: usize, data: Vec<u16>) -> Result<Plane, ImageError> {
        Image::new(ImageSize { width, height }, data)
    }

    #[test]
    fn bicubic_constant_plane() -> Result<(), ImageError> {
        let src = Image::from_size_val(ImageSize { width: 3, height: 2 }, 128u16)?;
        let dst = BicubicResizer::default().resize(&src, ImageSize { width: 6, height: 4 }, 0.25, 8)?;
        assert_eq!(dst.size(), ImageSize { width: 6, height: 4 });
        assert!(dst.as_slice().iter().all(|&v| v == 128));
        Ok(())
    }

    #[test]
    fn bicubic_shift_moves_edge() -> Result<(), ImageError> {
        // a vertical step edge between columns 1 and 2
        let src = chroma(4, 1, vec![0, 0, 200, 200])?;
        let dst_size = ImageSize { width: 8, height: 1 };
        let resizer = BicubicResizer::default();

        let centered = resizer.resize_f32(&src, dst_size, 0.0)?;
        let shifted = resizer.resize_f32(&src, dst_size, 0.25)?;

        // sampling further right reads brighter values around the edge
        assert!(shifted.as_slice()[3] > centered.as_slice()[3]);
        assert!(shifted.as_slice()[4] > centered.as_slice()[4]);
        Ok(())
    }

    #[test]
    fn bicubic_quantizes_to_depth() -> Result<(), ImageError> {
        let src = chroma(2, 1, vec![0, 1023])?;
        let dst = BicubicResizer::default().resize(&src, ImageSize { width: 4, height: 1 }, 0.0, 10)?;
        assert!(dst.as_slice().iter().all(|&v| v <= 1023));
        Ok(())
    }

    #[test]
    fn fallback_is_used() -> Result<(), ImageError> {
        let src = Image::from_size_val(ImageSize { width: 2, height: 2 }, 100u16)?;
        let resizers: Vec<Arc<dyn PlaneResizer>> =
            vec![Arc::new(Rejecting), Arc::new(BicubicResizer::default())];
        let dst = resize_with_fallback(&resizers, &src, ImageSize { width: 4, height: 4 }, 0.25, 8)?;
        assert!(dst.as_slice().iter().all(|&v| v == 100));
        Ok(())
    }

    #[test]
    fn fallback_exhausted() -> Result<(), ImageError> {
        let src = Image::from_size_val(ImageSize { width: 2, height: 2 }, 100u16)?;
        let resizers: Vec<Arc<dyn PlaneResizer>> = vec![Arc::new(Rejecting)];
        let res = resize_with_fallback(&resizers, &src, ImageSize { width: 4, height: 4 }, 0.25, 8);
        assert!(matches!(res, Err(ImageError::ResizeRejected("rejecting", _))));

        let res = resize_with_fallback(&[], &src, ImageSize { width: 4, height: 4 }, 0.25, 8);
        assert!(matches!(res, Err(ImageError::ResizeRejected("none", _))));
        Ok(())
    }

    #[test]
    fn fast_accepts_shift() -> Result<(), ImageError> {
        let dst_size = ImageSize {
            width: 8,
            height: 8,
        };
        for (bits, value) in [(8, 128u16), (10, 512u16)] {
            let src = Image::from_size_val(ImageSize { width: 4, height: 4 }, value)?;
            for shift in [0.25, 0.0, -0.25] {
                let dst = FastResizer.resize(&src, dst_size, shift, bits)?;
                assert_eq!(dst.size(), dst_size);
                assert!(
                    dst.as_slice().iter().all(|&v| v.abs_diff(value) <= 1),
                    "{bits} bits, shift {shift}"
                );
            }
        }
        Ok(())
    }

    #[test]
    fn fast_shift_moves_edge() -> Result<(), ImageError> {
        let src = chroma(4, 1, vec![0, 0, 200, 200])?;
        let dst_size = ImageSize { width: 8, height: 1 };

        let centered = FastResizer.resize(&src, dst_size, 0.0, 8)?;
        let shifted = FastResizer.resize(&src, dst_size, 0.25, 8)?;

        assert!(shifted.as_slice()[3] > centered.as_slice()[3]);
        assert!(shifted.as_slice()[4] > centered.as_slice()[4]);
        Ok(())
    }

    #[test]
    fn fast_rejects_empty() -> Result<(), ImageError> {
        let src = Image::from_size_val(ImageSize { width: 0, height: 2 }, 0u16)?;
        let res = FastResizer.resize(&src, ImageSize { width: 4, height: 4 }, 0.25, 8);
        assert!(matches!(res, Err(ImageError::ResizeRejected(_, _))));
        Ok(())
    }
}
