use fademask_image::{Image, ImageError, Plane};

use crate::parallel;

/// Combine three planes of the same size sample by sample.
///
/// # Arguments
///
/// * `a`, `b`, `c` - The input planes.
/// * `f` - The per-sample function, receiving the samples of `a`, `b` and `c`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the planes differ in size.
///
/// # Examples
///
/// ```
/// use fademask_image::{Image, ImageSize};
/// use fademask_imgproc::combine::combine3;
///
/// let size = ImageSize { width: 2, height: 1 };
/// let a = Image::<u16, 1>::new(size, vec![1, 5]).unwrap();
/// let b = Image::<u16, 1>::new(size, vec![4, 2]).unwrap();
/// let c = Image::<u16, 1>::new(size, vec![3, 3]).unwrap();
///
/// let max = combine3(&a, &b, &c, |x, y, z| x.max(y).max(z)).unwrap();
/// assert_eq!(max.as_slice(), &[4, 5]);
/// ```
pub fn combine3(
    a: &Plane,
    b: &Plane,
    c: &Plane,
    f: impl Fn(u16, u16, u16) -> u16 + Send + Sync,
) -> Result<Plane, ImageError> {
    for other in [b, c] {
        if other.size() != a.size() {
            return Err(ImageError::InvalidImageSize(
                other.cols(),
                other.rows(),
                a.cols(),
                a.rows(),
            ));
        }
    }

    let mut dst = Image::from_size_val(a.size(), 0u16)?;
    parallel::par_iter_rows_val_three(a, b, c, &mut dst, |&x, &y, &z, out| {
        *out = f(x, y, z);
    });

    Ok(dst)
}

/// Binary mask of bright, near-neutral pixels on the 8-bit scale.
///
/// A sample becomes `255` when `luma > lthr` and both chroma samples lie
/// strictly within `cthr` of the neutral value `128`; otherwise `0`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the planes differ in size.
pub fn neutral_highlights(
    luma: &Plane,
    chroma_u: &Plane,
    chroma_v: &Plane,
    lthr: u16,
    cthr: u16,
) -> Result<Plane, ImageError> {
    let near_neutral = move |c: u16| c.abs_diff(128) < cthr;
    combine3(luma, chroma_u, chroma_v, move |y, u, v| {
        if y > lthr && near_neutral(u) && near_neutral(v) {
            255
        } else {
            0
        }
    })
}
