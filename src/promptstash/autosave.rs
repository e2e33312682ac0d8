use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

/// A single debounced task: arming it again before it fires replaces the
/// pending run.
///
/// Only the waiting phase is cancellable. Once the delay has elapsed the
/// task runs detached, so a save that has started always reaches its
/// terminal action.
#[derive(Default)]
pub struct AutoSaveTimer {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AutoSaveTimer {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        // A poisoned slot only ever holds a JoinHandle; keep using it.
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `task` after `delay`, cancelling whatever was pending.
    pub fn arm<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        });
        if let Some(previous) = self.slot().replace(handle) {
            previous.abort();
        }
    }

    /// Drop the pending run, if any. Returns true if one was waiting.
    pub fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.slot().as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for AutoSaveTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
