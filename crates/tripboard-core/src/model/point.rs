// ── Point domain type ──

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::ids::{DestinationId, OfferId, PointId};
use crate::util::items::Identified;

/// Kind of trip event. Each type has its own offer catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PointType {
    Taxi,
    Bus,
    Train,
    Ship,
    Drive,
    #[default]
    Flight,
    CheckIn,
    Sightseeing,
    Restaurant,
}

impl PointType {
    /// Human-facing label ("Check-in", "Flight", ...).
    pub fn label(self) -> String {
        let raw: &'static str = self.into();
        let mut chars = raw.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

/// A single trip event or reservation.
///
/// Presenters never mutate a committed point: edits produce a new value
/// that replaces the old one wholesale once the service accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub point_type: PointType,
    pub destination: Option<DestinationId>,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    /// Selected offers; ids refer to the catalog of `point_type`.
    pub offers: Vec<OfferId>,
    pub is_favorite: bool,
}

impl Point {
    /// A fresh, unsaved point as shown by the creation form.
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: PointId::default(),
            point_type: PointType::default(),
            destination: None,
            date_from: now,
            date_to: now,
            base_price: 0,
            offers: Vec::new(),
            is_favorite: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.date_to - self.date_from
    }

    /// Copy of this point with the favorite flag flipped.
    pub fn with_favorite_toggled(&self) -> Self {
        Self {
            is_favorite: !self.is_favorite,
            ..self.clone()
        }
    }
}

impl Identified for Point {
    type Id = PointId;

    fn id(&self) -> &PointId {
        &self.id
    }
}
