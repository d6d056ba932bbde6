// ── In-memory demo source ──
//
// A `PointsApi` that keeps everything in process, seeded with random
// trips. Used when no service is configured. An optional latency and
// failure rate make the saving and aborting states visible.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use strum::IntoEnumIterator;
use tracing::debug;
use uuid::Uuid;

use crate::api::PointsApi;
use crate::error::CoreError;
use crate::model::{
    Destination, DestinationId, Offer, OfferId, OffersList, Picture, Point, PointId, PointType,
};
use crate::util::{get_random_element, get_random_elements, get_random_integer, get_random_number};

const CITIES: &[&str] = &[
    "Amsterdam", "Chamonix", "Geneva", "Lisbon", "Reykjavik", "Kyoto", "Valparaiso",
];

const SENTENCES: &[&str] = &[
    "A compact old town wrapped around a busy harbour.",
    "Best reached early, before the tour buses arrive.",
    "Famous for its markets and long summer evenings.",
    "The viewpoint above the station is worth the climb.",
    "Locals recommend the small bakeries off the main square.",
    "Rain is likely; the museums are excellent.",
];

const OFFER_TITLES: &[&str] = &[
    "Add luggage",
    "Switch to comfort",
    "Add meal",
    "Choose seats",
    "Travel by train",
    "Order Uber",
    "Rent a car",
    "Add breakfast",
    "Book tickets",
    "Lunch in city",
];

pub struct DemoSource {
    points: Mutex<Vec<Point>>,
    offers: OffersList,
    destinations: Vec<Destination>,
    latency: Duration,
    failure_rate: f64,
}

impl DemoSource {
    pub fn new(points: Vec<Point>, offers: OffersList, destinations: Vec<Destination>) -> Self {
        Self {
            points: Mutex::new(points),
            offers,
            destinations,
            latency: Duration::ZERO,
            failure_rate: 0.0,
        }
    }

    /// Random catalog and `count` random points around `now`.
    pub fn generate(count: usize, now: DateTime<Utc>) -> Self {
        let destinations = random_destinations();
        let offers = random_offers();
        let points = (0..count)
            .map(|_| random_point(now, &offers, &destinations))
            .collect();
        Self::new(points, offers, destinations)
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail mutations with probability `rate` (clamped to `0.0..=1.0`).
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn roll_failure(&self, what: &str) -> Result<(), CoreError> {
        if self.failure_rate > 0.0 && get_random_number(0.0, 1.0, 2) <= self.failure_rate {
            debug!(what, "demo source rejecting mutation");
            return Err(CoreError::Rejected {
                message: format!("demo service refused to {what}"),
            });
        }
        Ok(())
    }

    fn with_points<R>(&self, f: impl FnOnce(&mut Vec<Point>) -> R) -> Result<R, CoreError> {
        let mut points = self
            .points
            .lock()
            .map_err(|_| CoreError::Internal("demo store lock poisoned".into()))?;
        Ok(f(&mut points))
    }
}

impl PointsApi for DemoSource {
    fn points(&self) -> BoxFuture<'_, Result<Vec<Point>, CoreError>> {
        Box::pin(async move {
            self.delay().await;
            self.with_points(|points| points.clone())
        })
    }

    fn offers(&self) -> BoxFuture<'_, Result<OffersList, CoreError>> {
        Box::pin(async move {
            self.delay().await;
            Ok(self.offers.clone())
        })
    }

    fn destinations(&self) -> BoxFuture<'_, Result<Vec<Destination>, CoreError>> {
        Box::pin(async move {
            self.delay().await;
            Ok(self.destinations.clone())
        })
    }

    fn update_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>> {
        Box::pin(async move {
            self.delay().await;
            self.roll_failure("update the point")?;
            self.with_points(|points| {
                let slot = points.iter_mut().find(|p| p.id == point.id).ok_or_else(|| {
                    CoreError::NotFound {
                        message: format!("point {} does not exist", point.id),
                    }
                })?;
                *slot = point.clone();
                Ok(point.clone())
            })?
        })
    }

    fn add_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>> {
        Box::pin(async move {
            self.delay().await;
            self.roll_failure("add the point")?;
            let stored = Point {
                id: PointId::new(Uuid::new_v4().to_string()),
                ..point.clone()
            };
            self.with_points(|points| points.insert(0, stored.clone()))?;
            Ok(stored)
        })
    }

    fn delete_point<'a>(&'a self, id: &'a PointId) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move {
            self.delay().await;
            self.roll_failure("delete the point")?;
            self.with_points(|points| points.retain(|p| &p.id != id))
        })
    }
}

// ── Generators ─────────────────────────────────────────────────────

fn random_destinations() -> Vec<Destination> {
    CITIES
        .iter()
        .enumerate()
        .map(|(index, name)| Destination {
            id: DestinationId::new(format!("dst-{index}")),
            name: (*name).to_owned(),
            description: get_random_elements(SENTENCES).join(" "),
            pictures: (0..get_random_integer(0, 4))
                .map(|_| Picture {
                    src: format!(
                        "https://loremflickr.com/248/152?random={}",
                        get_random_integer(1, 1000)
                    ),
                    description: format!("{name} {}", get_random_element(SENTENCES).unwrap_or(&"")),
                })
                .collect(),
        })
        .collect()
}

fn random_offers() -> OffersList {
    PointType::iter()
        .map(|point_type| {
            let offers = get_random_elements(OFFER_TITLES)
                .into_iter()
                .enumerate()
                .map(|(index, title)| Offer {
                    id: OfferId::new(format!("{point_type}-{index}")),
                    title: title.to_owned(),
                    price: price_between(5, 200),
                })
                .collect();
            (point_type, offers)
        })
        .collect()
}

fn random_point(now: DateTime<Utc>, offers: &OffersList, destinations: &[Destination]) -> Point {
    let point_type = get_random_element(&PointType::iter().collect::<Vec<_>>())
        .copied()
        .unwrap_or_default();
    let date_from = now + chrono::Duration::minutes(get_random_integer(-4 * 24 * 60, 4 * 24 * 60));
    let date_to = date_from + chrono::Duration::minutes(get_random_integer(20, 36 * 60));
    let offer_ids: Vec<OfferId> = offers
        .for_type(point_type)
        .iter()
        .map(|offer| offer.id.clone())
        .collect();

    Point {
        id: PointId::new(Uuid::new_v4().to_string()),
        point_type,
        destination: get_random_element(destinations).map(|d| d.id.clone()),
        date_from,
        date_to,
        base_price: price_between(20, 1500),
        offers: get_random_elements(&offer_ids),
        is_favorite: get_random_integer(0, 1) == 1,
    }
}

fn price_between(min: u32, max: u32) -> u32 {
    u32::try_from(get_random_integer(i64::from(min), i64::from(max))).unwrap_or(min)
}
