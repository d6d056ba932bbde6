// ── Filters ──
//
// A filter is a named predicate over points, evaluated against "now".
// Callers pass the clock in so rendering and tests agree on one instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::point::Point;

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
pub enum FilterType {
    #[default]
    Everything,
    Future,
    Present,
    Past,
}

impl FilterType {
    pub fn matches(self, point: &Point, now: DateTime<Utc>) -> bool {
        match self {
            Self::Everything => true,
            Self::Future => point.date_from > now,
            Self::Present => point.date_from <= now && point.date_to >= now,
            Self::Past => point.date_to < now,
        }
    }

    /// Points passing this filter, in their original order.
    pub fn apply(self, points: &[Point], now: DateTime<Utc>) -> Vec<Point> {
        points
            .iter()
            .filter(|point| self.matches(point, now))
            .cloned()
            .collect()
    }

    /// Message shown in place of the list when nothing matches.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Everything => "Click New Event to create your first point",
            Self::Future => "There are no future events now",
            Self::Present => "There are no present events now",
            Self::Past => "There are no past events now",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn point_between(from_hours: i64, to_hours: i64, now: DateTime<Utc>) -> Point {
        Point {
            date_from: now + Duration::hours(from_hours),
            date_to: now + Duration::hours(to_hours),
            ..Point::blank(now)
        }
    }

    #[test]
    fn filters_split_points_by_time() {
        let now = Utc::now();
        let past = point_between(-5, -2, now);
        let present = point_between(-1, 1, now);
        let future = point_between(2, 4, now);
        let all = vec![past.clone(), present.clone(), future.clone()];

        assert_eq!(FilterType::Everything.apply(&all, now).len(), 3);
        assert_eq!(FilterType::Past.apply(&all, now), vec![past]);
        assert_eq!(FilterType::Present.apply(&all, now), vec![present]);
        assert_eq!(FilterType::Future.apply(&all, now), vec![future]);
    }

    #[test]
    fn each_filter_has_its_own_empty_message() {
        assert!(FilterType::Future.empty_message().contains("future"));
        assert!(FilterType::Past.empty_message().contains("past"));
    }
}
