use rayon::prelude::*;

use fademask_image::{Image, ImageError, Plane};

/// Dilate a plane with a 3x3 square structuring element.
///
/// Each sample is replaced by the maximum of its 3x3 neighborhood. Neighbors
/// outside the plane are ignored, so borders never introduce new values.
///
/// # Examples
///
/// ```
/// use fademask_image::{Image, ImageSize};
/// use fademask_imgproc::morphology::dilate3x3;
///
/// let src = Image::<u16, 1>::new(
///     ImageSize { width: 3, height: 3 },
///     vec![0, 0, 0, 0, 9, 0, 0, 0, 0],
/// ).unwrap();
///
/// let dst = dilate3x3(&src).unwrap();
/// assert!(dst.as_slice().iter().all(|&v| v == 9));
/// ```
pub fn dilate3x3(src: &Plane) -> Result<Plane, ImageError> {
    let width = src.width();
    let height = src.height();
    let mut dst = Image::from_size_val(src.size(), 0u16)?;

    if width == 0 || height == 0 {
        return Ok(dst);
    }

    let src_data = src.as_slice();

    // dilation
    dst.as_slice_mut()
        .par_chunks_exact_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let y0 = y.saturating_sub(1);
            let y1 = (y + 1).min(height - 1);
            for (x, out) in row.iter_mut().enumerate() {
                let x0 = x.saturating_sub(1);
                let x1 = (x + 1).min(width - 1);
                let mut max_val = 0u16;
                for yy in y0..=y1 {
                    let src_row = &src_data[yy * width..(yy + 1) * width];
                    for &v in &src_row[x0..=x1] {
                        max_val = max_val.max(v);
                    }
                }
                *out = max_val;
            }
        });

    Ok(dst)
}

/// Apply [`dilate3x3`] `iterations` times.
///
/// Zero iterations return a copy of the input.
pub fn dilate_n(src: &Plane, iterations: usize) -> Result<Plane, ImageError> {
    let mut dst = src.clone();
    for _ in 0..iterations {
        dst = dilate3x3(&dst)?;
    }
    Ok(dst)
}
