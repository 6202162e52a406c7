use rayon::prelude::*;

use fademask_image::Image;

/// Apply a function to each sample of the image in parallel.
pub fn par_iter_rows_val<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    if src.cols() == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each sample of three single channel images in parallel.
pub fn par_iter_rows_val_three<T1, T2, T3, T4>(
    src1: &Image<T1, 1>,
    src2: &Image<T2, 1>,
    src3: &Image<T3, 1>,
    dst: &mut Image<T4, 1>,
    f: impl Fn(&T1, &T2, &T3, &mut T4) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
    T3: Clone + Send + Sync,
    T4: Clone + Send + Sync,
{
    let cols = src1.cols();
    if cols == 0 {
        return;
    }

    src1.as_slice()
        .par_chunks_exact(cols)
        .zip(src2.as_slice().par_chunks_exact(cols))
        .zip(src3.as_slice().par_chunks_exact(cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .for_each(|(((src1_chunk, src2_chunk), src3_chunk), dst_chunk)| {
            for (i, dst_pixel) in dst_chunk.iter_mut().enumerate() {
                f(&src1_chunk[i], &src2_chunk[i], &src3_chunk[i], dst_pixel);
            }
        });
}
