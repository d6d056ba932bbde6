// ── Identifier newtypes ──
//
// Points, destinations and offers are keyed by opaque service-assigned
// strings. Separate newtypes keep a destination id from ever being
// looked up as a point id.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_id!(
    /// Identifier of a stored point. Empty until the service assigns one.
    PointId
);

impl PointId {
    /// Whether the service has assigned this id yet.
    pub fn is_assigned(&self) -> bool {
        !self.0.is_empty()
    }
}

string_id!(
    /// Identifier of a destination.
    DestinationId
);

string_id!(
    /// Identifier of an offer, unique within its point type.
    OfferId
);
