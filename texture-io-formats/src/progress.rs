//! Progress reporting and cancellation for long-running codec calls

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Source of the "abort requested" state polled by codecs
pub trait AbortSignal: Send + Sync {
    fn abort_requested(&self) -> bool;
}

/// Shared abort flag
///
/// Clones share the flag, so one clone can be handed to the worker while
/// another is kept to request cancellation.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    /// Create a new flag, initially clear
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask running operations to stop
    pub fn request_abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clear a previous abort request
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AbortSignal for AbortFlag {
    fn abort_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress callback handed to decompression codecs
///
/// Keeps the highest progress seen and answers each report with the abort
/// state. The sink never sets the abort flag itself.
pub struct ProgressSink {
    abort: Arc<dyn AbortSignal>,
    highest: Mutex<f32>,
}

impl ProgressSink {
    /// Create a sink reporting the given abort signal
    pub fn new(abort: Arc<dyn AbortSignal>) -> Self {
        Self {
            abort,
            highest: Mutex::new(0.0),
        }
    }

    /// Record a progress report; returns true when the codec should abort
    ///
    /// The user values are opaque to the sink.
    pub fn on_progress(&self, progress: f32, _user1: usize, _user2: usize) -> bool {
        // A poisoned lock only means another reporter panicked mid-update
        let mut highest = match self.highest.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if progress > *highest {
            *highest = progress;
        }
        debug!("Decompression progress = {:2.0}", *highest);

        self.abort.abort_requested()
    }

    /// Highest progress reported so far
    pub fn progress(&self) -> f32 {
        match self.highest.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSink")
            .field("progress", &self.progress())
            .field("abort_requested", &self.abort.abort_requested())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_keeps_maximum() {
        let sink = ProgressSink::new(Arc::new(AbortFlag::new()));
        assert!(!sink.on_progress(10.0, 0, 0));
        assert!(!sink.on_progress(40.0, 0, 0));
        assert!(!sink.on_progress(25.0, 0, 0));
        assert_eq!(sink.progress(), 40.0);
    }

    #[test]
    fn test_progress_forwards_abort() {
        let flag = AbortFlag::new();
        let sink = ProgressSink::new(Arc::new(flag.clone()));
        assert!(!sink.on_progress(1.0, 0, 0));

        flag.request_abort();
        assert!(sink.on_progress(2.0, 0, 0));
        assert!(flag.abort_requested());

        flag.reset();
        assert!(!sink.on_progress(3.0, 0, 0));
    }
}
