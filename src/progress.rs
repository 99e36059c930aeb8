use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Receives progress callbacks during provider-bound phases.
///
/// Implementations live outside this crate; [`NoProgress`] is the default.
pub trait ProgressObserver: Send + Sync {
    /// Called after each universe gene has been attempted.
    fn lookup_done(&self, completed: usize, total: usize);
}

/// Observer that discards all progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn lookup_done(&self, _completed: usize, _total: usize) {}
}

/// Cooperative cancellation flag, checked between external calls and between
/// simulation batches. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
