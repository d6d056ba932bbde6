// ── Filter model ──

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use super::observable::{Observable, ObserverId};
use crate::model::{FilterType, ModelEvent, ModelPayload, UpdateType};

/// Holds the active filter. Observers hear about every `set_filter`.
pub struct FilterModel {
    filter: ArcSwap<FilterType>,
    observers: Observable<ModelEvent>,
}

impl Default for FilterModel {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterModel {
    pub fn new() -> Self {
        Self {
            filter: ArcSwap::from_pointee(FilterType::default()),
            observers: Observable::new(),
        }
    }

    pub fn filter(&self) -> FilterType {
        **self.filter.load()
    }

    pub fn add_observer<F>(&self, listener: F) -> ObserverId
    where
        F: Fn(&ModelEvent) + Send + Sync + 'static,
    {
        self.observers.add_observer(listener)
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove_observer(id)
    }

    /// Store `filter` and notify, even when it is already active.
    pub fn set_filter(&self, update_type: UpdateType, filter: FilterType) {
        self.filter.store(Arc::new(filter));
        debug!(%filter, %update_type, "filter changed");
        self.observers
            .notify(&ModelEvent::new(update_type, ModelPayload::Filter(filter)));
    }
}
