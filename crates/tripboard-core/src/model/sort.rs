// ── Sorting ──

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::point::Point;

/// Columns of the sort bar. `Event` and `Offers` are shown but cannot be
/// selected.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortType {
    #[default]
    Day,
    Event,
    Time,
    Price,
    Offers,
}

impl SortType {
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Day | Self::Time | Self::Price)
    }

    /// Day: earliest start first. Time: longest first. Price: most
    /// expensive first.
    pub fn compare(self, a: &Point, b: &Point) -> Ordering {
        match self {
            Self::Day => a.date_from.cmp(&b.date_from),
            Self::Time => b.duration().cmp(&a.duration()),
            Self::Price => b.base_price.cmp(&a.base_price),
            Self::Event | Self::Offers => Ordering::Equal,
        }
    }

    /// Stable in-place sort; ties keep their incoming order.
    pub fn sort(self, points: &mut [Point]) {
        points.sort_by(|a, b| self.compare(a, b));
    }
}
