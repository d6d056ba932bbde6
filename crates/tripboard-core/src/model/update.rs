// ── Change tags ──
//
// `UserAction` says what the user asked for; `UpdateType` says how much
// of the screen a committed change invalidates.

use strum::Display;

use super::filter::FilterType;
use super::point::Point;

/// Granularity of a model-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum UpdateType {
    /// One item changed; patch it in place.
    Patch,
    /// The list changed; rebuild it keeping the current sort.
    Minor,
    /// Everything changed; rebuild with the default sort.
    Major,
    /// Initial load finished.
    Init,
}

/// Kind of mutation a view asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    UpdatePoint,
    AddPoint,
    DeletePoint,
}

/// A mutation request travelling from a presenter to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewAction {
    pub action: UserAction,
    pub update_type: UpdateType,
    pub point: Point,
}

impl ViewAction {
    pub fn new(action: UserAction, update_type: UpdateType, point: Point) -> Self {
        Self {
            action,
            update_type,
            point,
        }
    }
}

/// What a model hands its observers alongside the update type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelPayload {
    Point(Point),
    Filter(FilterType),
    Nothing,
}

/// A committed change broadcast by an observable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEvent {
    pub update_type: UpdateType,
    pub payload: ModelPayload,
}

impl ModelEvent {
    pub fn new(update_type: UpdateType, payload: ModelPayload) -> Self {
        Self {
            update_type,
            payload,
        }
    }
}
