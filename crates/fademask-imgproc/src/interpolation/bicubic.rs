/// Parameters of the Mitchell–Netravali family of cubic filters.
///
/// `b = c = 1/3` is the Mitchell filter, `b = 0, c = 0.5` is Catmull–Rom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BicubicParams {
    /// The `B` parameter (blurring).
    pub b: f32,
    /// The `C` parameter (ringing).
    pub c: f32,
}

impl Default for BicubicParams {
    fn default() -> Self {
        Self {
            b: 1.0 / 3.0,
            c: 1.0 / 3.0,
        }
    }
}

impl BicubicParams {
    /// Half-width of the kernel in source pixels at unit scale.
    pub const SUPPORT: f32 = 2.0;

    /// Evaluate the kernel at distance `x`.
    pub fn eval(&self, x: f32) -> f32 {
        let (b, c) = (self.b, self.c);
        let x = x.abs();
        if x < 1.0 {
            ((12.0 - 9.0 * b - 6.0 * c) * x * x * x
                + (-18.0 + 12.0 * b + 6.0 * c) * x * x
                + (6.0 - 2.0 * b))
                / 6.0
        } else if x < 2.0 {
            ((-b - 6.0 * c) * x * x * x
                + (6.0 * b + 30.0 * c) * x * x
                + (-12.0 * b - 48.0 * c) * x
                + (8.0 * b + 24.0 * c))
                / 6.0
        } else {
            0.0
        }
    }
}

/// Normalized filter taps for every output index along one axis.
#[derive(Debug, Clone)]
pub struct KernelWeights {
    /// Per output index, the source indices (already clamped to the axis).
    pub indices: Vec<Vec<usize>>,
    /// Per output index, the weights matching `indices`; they sum to one.
    pub weights: Vec<Vec<f32>>,
}

impl KernelWeights {
    /// Build the taps that map `src_len` samples onto `dst_len` samples.
    ///
    /// Output sample `i` is centered on source coordinate
    /// `(i + 0.5) * src_len / dst_len - 0.5 + shift`. When downscaling, the
    /// kernel is widened by the scale factor. Indices outside the axis are
    /// clamped, which replicates the edge samples.
    pub fn new(params: &BicubicParams, src_len: usize, dst_len: usize, shift: f32) -> Self {
        let mut indices = Vec::with_capacity(dst_len);
        let mut weights = Vec::with_capacity(dst_len);

        if src_len == 0 || dst_len == 0 {
            return Self { indices, weights };
        }

        let scale = src_len as f32 / dst_len as f32;
        let filter_scale = scale.max(1.0);
        let support = BicubicParams::SUPPORT * filter_scale;
        let last = src_len as isize - 1;

        for i in 0..dst_len {
            let center = (i as f32 + 0.5) * scale - 0.5 + shift;
            let left = (center - support).floor() as isize + 1;
            let right = (center + support).floor() as isize;

            let mut taps = Vec::new();
            let mut w = Vec::new();
            let mut sum = 0.0f32;
            for j in left..=right {
                let k = params.eval((j as f32 - center) / filter_scale);
                if k == 0.0 {
                    continue;
                }
                taps.push(j.clamp(0, last) as usize);
                w.push(k);
                sum += k;
            }

            if sum != 0.0 {
                w.iter_mut().for_each(|v| *v /= sum);
            }
            indices.push(taps);
            weights.push(w);
        }

        Self { indices, weights }
    }
}
