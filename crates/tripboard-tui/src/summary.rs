//! The trip header line, computed over every stored point.

use tripboard_core::model::find_destination;
use tripboard_core::{Destination, OffersList, Point, SortType};

use crate::format;

/// Longest route spelled out in full.
const MAX_ROUTE_STOPS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TripSummary {
    pub route: String,
    pub dates: Option<String>,
    pub cost: u64,
}

impl TripSummary {
    pub fn new(points: &[Point], offers: &OffersList, destinations: &[Destination]) -> Self {
        let mut points = points.to_vec();
        SortType::Day.sort(&mut points);

        let stops: Vec<&str> = points
            .iter()
            .filter_map(|p| find_destination(destinations, p.destination.as_ref()))
            .map(|d| d.name.as_str())
            .collect();
        let route = match stops.as_slice() {
            [first, .., last] if stops.len() > MAX_ROUTE_STOPS => {
                format!("{first} — … — {last}")
            }
            _ => stops.join(" — "),
        };

        let dates = match (points.first(), points.iter().map(|p| p.date_to).max()) {
            (Some(first), Some(end)) => Some(format!(
                "{} — {}",
                format::day_month(first.date_from),
                format::day_month(end)
            )),
            _ => None,
        };

        let cost = points
            .iter()
            .map(|p| {
                let extras: u64 = offers
                    .selected(p.point_type, &p.offers)
                    .map(|o| u64::from(o.price))
                    .sum();
                u64::from(p.base_price) + extras
            })
            .sum();

        Self { route, dates, cost }
    }
}
