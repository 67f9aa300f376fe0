/*!
 * Session state for one in-progress document translation.
 *
 * A session is ephemeral: it is created when a translation pass starts,
 * advanced once per translated leaf, and discarded on completion,
 * cancellation or error. The handle here is the read-only observation
 * side; the driver task is the single writer.
 */

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Lifecycle state of a translation session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created but not yet driving translations
    Idle,
    /// Translating leaves in document order
    Running,
    /// Every leaf processed, stream finished cleanly
    Completed,
    /// Consumer stopped the session; emitted snapshots remain valid
    Cancelled,
    /// A provider call failed; the stream terminated with the error
    Failed,
}

/// Progress counters for a session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionProgress {
    /// Text leaves in the source document
    pub total_leaves: usize,
    /// Leaves for which a translation call completed
    pub translated_leaves: usize,
    /// Snapshots actually emitted (identical translations are skipped)
    pub snapshots_emitted: usize,
}

impl SessionProgress {
    /// Translation progress as a percentage of leaves processed.
    pub fn percent(&self) -> f32 {
        if self.total_leaves == 0 {
            return 100.0;
        }
        (self.translated_leaves as f32 / self.total_leaves as f32) * 100.0
    }
}

/// Shared handle observing and cancelling one session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    state: Arc<Mutex<SessionState>>,
    progress: Arc<Mutex<SessionProgress>>,
    cancelled: Arc<AtomicBool>,
}

impl SessionHandle {
    /// Create a handle for a document with `total_leaves` text leaves.
    pub(crate) fn new(total_leaves: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::Idle)),
            progress: Arc::new(Mutex::new(SessionProgress {
                total_leaves,
                ..SessionProgress::default()
            })),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Snapshot of the progress counters.
    pub fn progress(&self) -> SessionProgress {
        *self.progress.lock()
    }

    /// Request cooperative cancellation.
    ///
    /// The driver checks this flag before every provider call; a
    /// translation already in flight is never applied afterwards.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn set_state(&self, state: SessionState) {
        *self.state.lock() = state;
    }

    pub(crate) fn leaf_translated(&self) {
        self.progress.lock().translated_leaves += 1;
    }

    pub(crate) fn snapshot_emitted(&self) {
        self.progress.lock().snapshots_emitted += 1;
    }
}
