use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use fademask_image::VideoFrame;

/// Bounded frame memo with first-in first-out eviction.
pub(crate) struct FrameCache {
    capacity: usize,
    inner: Mutex<CacheState>,
}

#[derive(Default)]
struct CacheState {
    frames: HashMap<usize, Arc<VideoFrame>>,
    order: VecDeque<usize>,
}

impl FrameCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheState::default()),
        }
    }

    pub(crate) fn get(&self, n: usize) -> Option<Arc<VideoFrame>> {
        // the state holds only immutable frames, a poisoned lock is still consistent
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.frames.get(&n).cloned()
    }

    pub(crate) fn insert(&self, n: usize, frame: Arc<VideoFrame>) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if state.frames.insert(n, frame).is_some() {
            return;
        }
        state.order.push_back(n);
        while state.order.len() > self.capacity {
            if let Some(evicted) = state.order.pop_front() {
                state.frames.remove(&evicted);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        let state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.frames.len()
    }
}
