// ── Destinations ──

use serde::{Deserialize, Serialize};

use super::ids::DestinationId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub src: String,
    pub description: String,
}

/// A place a point can take the traveller to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    pub description: String,
    pub pictures: Vec<Picture>,
}

/// Find a destination by id in a fetched list.
pub fn find_destination<'a>(
    destinations: &'a [Destination],
    id: Option<&DestinationId>,
) -> Option<&'a Destination> {
    let id = id?;
    destinations.iter().find(|d| &d.id == id)
}
