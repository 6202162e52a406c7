//! Resampling kernels.
//!
//! The kernels are evaluated at a distance from the sample center, measured in
//! source pixels, and are used to build the separable weight tables of
//! [`crate::resize::BicubicResizer`].

mod bicubic;

pub use bicubic::{BicubicParams, KernelWeights};
