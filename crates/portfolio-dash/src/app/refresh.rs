use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;

/// Handle to the periodic status refresh. Stopping or dropping it cancels
/// the timer together with any status load it has in flight.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub(super) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Marks a status refresh as in flight until dropped.
pub(super) struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    /// `None` when another refresh already holds the flag.
    pub(super) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
