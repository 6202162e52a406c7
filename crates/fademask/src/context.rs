use std::sync::Arc;

use fademask_imgproc::resize::{BicubicResizer, FastResizer, PlaneResizer};

/// Primitives and resources used while building masks.
///
/// Passed explicitly to [`crate::fade_text_mask`] instead of living in global
/// state. The default context resamples chroma with [`FastResizer`] and falls
/// back to [`BicubicResizer`] when the former rejects a plane.
#[derive(Clone)]
pub struct Context {
    resizers: Vec<Arc<dyn PlaneResizer>>,
    cache_capacity: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            resizers: vec![Arc::new(FastResizer), Arc::new(BicubicResizer::default())],
            cache_capacity: 32,
        }
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let names: Vec<&str> = self.resizers.iter().map(|r| r.name()).collect();
        f.debug_struct("Context")
            .field("resizers", &names)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl Context {
    /// Replace the chroma resamplers; they are tried in order.
    pub fn with_resizers(mut self, resizers: Vec<Arc<dyn PlaneResizer>>) -> Self {
        self.resizers = resizers;
        self
    }

    /// Number of per-frame masks memoised while bridging fades. Zero disables it.
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// The chroma resamplers, in the order they are tried.
    pub fn resizers(&self) -> &[Arc<dyn PlaneResizer>] {
        &self.resizers
    }

    /// Capacity of the mask frame cache.
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }
}
