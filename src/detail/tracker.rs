//! One-shot "first load completed" tracking for a single resource.

/// Derives monotonic readiness flags from a resource's `loading` signal.
///
/// `first_fetch_observed` latches the first time `loading` is seen true;
/// `initialized` latches the first time `loading` is seen false after that.
/// Neither flag ever resets, and once `initialized` is set further
/// observations are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadTracker {
    first_fetch_observed: bool,
    initialized: bool,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one observed `loading` value. Returns true when a flag flipped.
    pub fn observe(&mut self, loading: bool) -> bool {
        if self.initialized {
            return false;
        }
        match (loading, self.first_fetch_observed) {
            (true, false) => {
                self.first_fetch_observed = true;
                true
            }
            (false, true) => {
                self.initialized = true;
                true
            }
            _ => false,
        }
    }

    pub fn first_fetch_observed(&self) -> bool {
        self.first_fetch_observed
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
