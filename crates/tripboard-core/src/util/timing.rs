// ── Debounce / throttle ──
//
// Both wrappers run on the tokio clock, so paused-time tests drive them
// deterministically. `Debounced::call` must run inside a tokio runtime.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Delay used when callers have no reason to pick another.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Wrapper returned by [`debounce`].
pub struct Debounced<A> {
    callback: Callback<A>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Only the last call inside any `delay` window reaches `callback`, with
/// that call's arguments, `delay` after it was made.
pub fn debounce<A, F>(callback: F, delay: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        callback: Arc::new(callback),
        delay,
        pending: Mutex::new(None),
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Cancel whatever is pending and schedule `args`.
    pub fn call(&self, args: A) {
        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(args);
        }));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().unwrap_or_else(PoisonError::into_inner).take() {
            previous.abort();
        }
    }
}

impl<A> Drop for Debounced<A> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

/// Wrapper returned by [`throttle`].
pub struct Throttled<A> {
    callback: Callback<A>,
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
}

/// Calls go through immediately when at least `min_interval` passed since
/// the last one that did; anything in between is dropped, not queued.
pub fn throttle<A, F>(callback: F, min_interval: Duration) -> Throttled<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled {
        callback: Arc::new(callback),
        min_interval,
        last: Mutex::new(None),
    }
}

impl<A> Throttled<A> {
    /// Returns whether the callback ran.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
            if last.is_some_and(|at| now.duration_since(at) < self.min_interval) {
                return false;
            }
            *last = Some(now);
        }
        (self.callback)(args);
        true
    }
}
