//! First load: offers and destinations together, then points.

use tracing::{info, warn};

use tripboard_core::{CoreError, Models};

/// Load the catalog, then the points.
///
/// Points load even when the catalog fails, so the board always leaves
/// its loading state. The first failure is returned.
pub async fn load(models: &Models) -> Result<(), CoreError> {
    let (offers, destinations) = tokio::join!(models.offers.init(), models.destinations.init());
    if let Err(e) = &offers {
        warn!(error = %e, "failed to load offers");
    }
    if let Err(e) = &destinations {
        warn!(error = %e, "failed to load destinations");
    }

    let points = models.points.init().await;
    match &points {
        Ok(()) => info!(count = models.points.points().len(), "points loaded"),
        Err(e) => warn!(error = %e, "failed to load points"),
    }

    offers.and(destinations).and(points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use futures::future::BoxFuture;
    use tripboard_core::{
        DemoSource, Destination, ModelEvent, OffersList, Point, PointId, PointsApi, UpdateType,
    };

    /// Catalog calls fail; points work.
    struct NoCatalog(DemoSource);

    impl PointsApi for NoCatalog {
        fn points(&self) -> BoxFuture<'_, Result<Vec<Point>, CoreError>> {
            self.0.points()
        }

        fn offers(&self) -> BoxFuture<'_, Result<OffersList, CoreError>> {
            Box::pin(async { Err(CoreError::Internal("offers down".into())) })
        }

        fn destinations(&self) -> BoxFuture<'_, Result<Vec<Destination>, CoreError>> {
            Box::pin(async { Err(CoreError::Internal("destinations down".into())) })
        }

        fn update_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>> {
            self.0.update_point(point)
        }

        fn add_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>> {
            self.0.add_point(point)
        }

        fn delete_point<'a>(&'a self, id: &'a PointId) -> BoxFuture<'a, Result<(), CoreError>> {
            self.0.delete_point(id)
        }
    }

    #[tokio::test]
    async fn loads_everything_from_the_demo_source() {
        let models = Models::new(Arc::new(DemoSource::generate(4, Utc::now())));

        load(&models).await.unwrap();

        assert_eq!(models.points.points().len(), 4);
        assert!(!models.offers.cached().is_empty());
        assert!(!models.destinations.cached().is_empty());
    }

    #[tokio::test]
    async fn catalog_failure_still_loads_points_and_reports() {
        let api = NoCatalog(DemoSource::generate(3, Utc::now()));
        let models = Models::new(Arc::new(api));
        let events = Arc::new(std::sync::Mutex::new(Vec::<ModelEvent>::new()));
        let sink = Arc::clone(&events);
        models
            .points
            .add_observer(move |event| sink.lock().unwrap().push(event.clone()));

        let err = load(&models).await.unwrap_err();

        assert!(err.to_string().contains("offers down"));
        assert_eq!(models.points.points().len(), 3);
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].update_type, UpdateType::Init);
    }
}
