#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// per-pixel combination of several planes.
pub mod combine;

/// bit depth conversion of planes.
pub mod depth;

/// utilities for interpolation.
pub mod interpolation;

/// morphological operations.
pub mod morphology;

/// module containing parallization utilities.
pub mod parallel;

/// utility functions for resampling planes.
pub mod resize;

/// operations across planes of consecutive frames.
pub mod temporal;
