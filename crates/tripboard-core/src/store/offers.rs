// ── Offers model ──

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::api::PointsApi;
use crate::error::CoreError;
use crate::model::OffersList;

/// Fetch-through cache of the offer catalog, same contract as
/// [`DestinationsModel`](super::DestinationsModel).
pub struct OffersModel {
    api: Arc<dyn PointsApi>,
    offers: ArcSwap<OffersList>,
}

impl OffersModel {
    pub fn new(api: Arc<dyn PointsApi>) -> Self {
        Self {
            api,
            offers: ArcSwap::from_pointee(OffersList::default()),
        }
    }

    pub async fn get(&self) -> Result<Arc<OffersList>, CoreError> {
        let fetched = Arc::new(self.api.offers().await?);
        self.offers.store(Arc::clone(&fetched));
        Ok(fetched)
    }

    pub async fn init(&self) -> Result<(), CoreError> {
        match self.api.offers().await {
            Ok(offers) => {
                debug!("offers loaded");
                self.offers.store(Arc::new(offers));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load offers");
                self.offers.store(Arc::new(OffersList::default()));
                Err(e)
            }
        }
    }

    pub fn cached(&self) -> Arc<OffersList> {
        self.offers.load_full()
    }
}
