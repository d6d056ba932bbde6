// ── Observer registry ──
//
// Typed callback listeners keyed by a monotonically increasing id.
// Listeners run synchronously inside `notify`, in registration order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Handle returned by [`Observable::add_observer`]; pass it back to
/// [`Observable::remove_observer`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

pub struct Observable<E> {
    next_id: AtomicU64,
    listeners: DashMap<ObserverId, Listener<E>>,
}

impl<E> Default for Observable<E> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            listeners: DashMap::new(),
        }
    }
}

impl<E> Observable<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observer<F>(&self, listener: F) -> ObserverId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.insert(id, Arc::new(listener));
        id
    }

    /// Returns whether a listener was registered under `id`.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    #[cfg(test)]
    pub(crate) fn observer_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn notify(&self, event: &E) {
        // Snapshot first: a listener may add or remove observers, and
        // holding a shard guard across the call would deadlock.
        let mut listeners: Vec<(ObserverId, Listener<E>)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();
        listeners.sort_by_key(|(id, _)| *id);

        for (_, listener) in listeners {
            listener(event);
        }
    }
}
