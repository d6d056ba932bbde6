// ── Points model ──
//
// Holds every known point as an immutable snapshot. Mutations go through
// the accessor first and only touch local state once the service has
// accepted them, then broadcast a `ModelEvent` tagged with the caller's
// update type.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use super::observable::{Observable, ObserverId};
use crate::api::PointsApi;
use crate::error::CoreError;
use crate::model::{ModelEvent, ModelPayload, Point, PointId, UpdateType};
use crate::util::update_item;

pub struct PointsModel {
    api: Arc<dyn PointsApi>,
    points: ArcSwap<Vec<Point>>,
    observers: Observable<ModelEvent>,
}

impl PointsModel {
    pub fn new(api: Arc<dyn PointsApi>) -> Self {
        Self {
            api,
            points: ArcSwap::from_pointee(Vec::new()),
            observers: Observable::new(),
        }
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn points(&self) -> Arc<Vec<Point>> {
        self.points.load_full()
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

    /// Initial load.
    ///
    /// Observers get `INIT` whether or not the fetch worked, so the
    /// loading indicator always goes away; on failure the list is empty
    /// and the error is handed back for the caller to report.
    pub async fn init(&self) -> Result<(), CoreError> {
        let result = self.api.points().await;
        let outcome = match result {
            Ok(points) => {
                debug!(count = points.len(), "points loaded");
                self.points.store(Arc::new(points));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load points");
                self.points.store(Arc::new(Vec::new()));
                Err(e)
            }
        };
        self.notify(UpdateType::Init, ModelPayload::Nothing);
        outcome
    }

    pub async fn update_point(&self, update_type: UpdateType, point: Point) -> Result<(), CoreError> {
        self.ensure_known(&point.id)?;
        let updated = self.api.update_point(&point).await?;

        self.points.rcu(|current| Arc::new(update_item(current.as_slice(), updated.clone()).into_owned()));
        self.notify(update_type, ModelPayload::Point(updated));
        Ok(())
    }

    /// New points go to the front of the list.
    pub async fn add_point(&self, update_type: UpdateType, point: Point) -> Result<(), CoreError> {
        let created = self.api.add_point(&point).await?;

        self.points.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.push(created.clone());
            next.extend(current.iter().cloned());
            Arc::new(next)
        });
        self.notify(update_type, ModelPayload::Point(created));
        Ok(())
    }

    pub async fn delete_point(&self, update_type: UpdateType, point: Point) -> Result<(), CoreError> {
        self.ensure_known(&point.id)?;
        self.api.delete_point(&point.id).await?;

        self.points.rcu(|current| {
            Arc::new(
                current
                    .iter()
                    .filter(|p| p.id != point.id)
                    .cloned()
                    .collect::<Vec<_>>(),
            )
        });
        self.notify(update_type, ModelPayload::Nothing);
        Ok(())
    }

    fn ensure_known(&self, id: &PointId) -> Result<(), CoreError> {
        if self.points.load().iter().any(|p| &p.id == id) {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                message: format!("point {id} does not exist"),
            })
        }
    }

    fn notify(&self, update_type: UpdateType, payload: ModelPayload) {
        debug!(%update_type, "points changed");
        self.observers.notify(&ModelEvent::new(update_type, payload));
    }
}
