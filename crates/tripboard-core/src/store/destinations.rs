// ── Destinations model ──
//
// A fetch-through cache. Renders read `cached()`; `get()` and `init()`
// go back to the service and replace the cache wholesale.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::api::PointsApi;
use crate::error::CoreError;
use crate::model::Destination;

pub struct DestinationsModel {
    api: Arc<dyn PointsApi>,
    destinations: ArcSwap<Vec<Destination>>,
}

impl DestinationsModel {
    pub fn new(api: Arc<dyn PointsApi>) -> Self {
        Self {
            api,
            destinations: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Fetch, store and return. Errors propagate and leave the cache as
    /// it was.
    pub async fn get(&self) -> Result<Arc<Vec<Destination>>, CoreError> {
        let fetched = Arc::new(self.api.destinations().await?);
        self.destinations.store(Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Like [`get`](Self::get), but a failure empties the cache before
    /// the error is returned.
    pub async fn init(&self) -> Result<(), CoreError> {
        match self.api.destinations().await {
            Ok(destinations) => {
                debug!(count = destinations.len(), "destinations loaded");
                self.destinations.store(Arc::new(destinations));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load destinations");
                self.destinations.store(Arc::new(Vec::new()));
                Err(e)
            }
        }
    }

    pub fn cached(&self) -> Arc<Vec<Destination>> {
        self.destinations.load_full()
    }
}
