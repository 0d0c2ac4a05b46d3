//! Single-slot debounce timer.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;

/// Action run when the quiet period elapses.
pub type DebouncedAction = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Collapses bursts of triggers into one action, run `delay` after the last trigger.
///
/// At most one timer is armed at a time; [`trigger`](Self::trigger) cancels it
/// and arms a fresh one. Once a timer fires, the action runs as its own task,
/// so later triggers never cancel work that already started. Runs never
/// overlap: a run waits for the previous one to finish before it starts.
pub struct Debouncer {
    delay: Duration,
    action: DebouncedAction,
    slot: Mutex<Option<JoinHandle<()>>>,
    running: Arc<tokio::sync::Mutex<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration, action: DebouncedAction) -> Self {
        Self {
            delay,
            action,
            slot: Mutex::new(None),
            running: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel the pending timer (if any) and arm a new one.
    pub fn trigger(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = slot.take() {
            pending.abort();
        }

        let action = self.action.clone();
        let running = self.running.clone();
        let delay = self.delay;
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(async move {
                let _turn = running.lock().await;
                action().await;
            });
        }));
    }

    /// Drop the pending timer without running the action.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.take() {
            Some(pending) if !pending.is_finished() => {
                pending.abort();
                true
            }
            _ => false,
        }
    }

    /// Cancel the timer and run the action now, waiting for it to finish.
    pub async fn flush(&self) {
        self.cancel();
        let _turn = self.running.lock().await;
        (self.action)().await;
    }

    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self
            .slot
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }
}
