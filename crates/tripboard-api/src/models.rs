// Wire types for the points service.
//
// Field names follow the service's snake_case JSON. Identifiers arrive
// either as strings or bare numbers depending on the deployment, so they
// are normalized to strings on the way in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// An identifier as the service sends it.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Accept `"42"` or `42` and hand back a `String`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

fn string_or_number_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Vec::<RawId>::deserialize(deserializer)?
        .into_iter()
        .map(String::from)
        .collect())
}

/// A stored point as returned by `GET /points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPoint {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Point type in kebab-case (`taxi`, `check-in`, ...).
    #[serde(rename = "type")]
    pub point_type: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub destination: Option<String>,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    #[serde(default, deserialize_with = "string_or_number_list")]
    pub offers: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Request body for `POST /points`. The service assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiNewPoint {
    #[serde(rename = "type")]
    pub point_type: String,
    pub destination: Option<String>,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    pub offers: Vec<String>,
    pub is_favorite: bool,
}

impl From<ApiPoint> for ApiNewPoint {
    fn from(point: ApiPoint) -> Self {
        Self {
            point_type: point.point_type,
            destination: point.destination,
            date_from: point.date_from,
            date_to: point.date_to,
            base_price: point.base_price,
            offers: point.offers,
            is_favorite: point.is_favorite,
        }
    }
}

/// One entry of `GET /offers`: every offer available for a point type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiOfferGroup {
    #[serde(rename = "type")]
    pub point_type: String,
    #[serde(default)]
    pub offers: Vec<ApiOffer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiOffer {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub price: u32,
}

/// One entry of `GET /destinations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDestination {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<ApiPicture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPicture {
    pub src: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn point_accepts_numeric_ids() {
        let point: ApiPoint = serde_json::from_value(json!({
            "id": 7,
            "type": "check-in",
            "destination": 3,
            "date_from": "2024-07-10T22:55:56.845Z",
            "date_to": "2024-07-11T11:22:13.375Z",
            "base_price": 1100,
            "offers": [1, "2"],
            "is_favorite": true
        }))
        .unwrap();

        assert_eq!(point.id, "7");
        assert_eq!(point.destination.as_deref(), Some("3"));
        assert_eq!(point.offers, vec!["1".to_string(), "2".to_string()]);
        assert!(point.is_favorite);
    }

    #[test]
    fn new_point_omits_id() {
        let point: ApiPoint = serde_json::from_value(json!({
            "id": "abc",
            "type": "taxi",
            "destination": null,
            "date_from": "2024-07-10T22:55:56Z",
            "date_to": "2024-07-10T23:55:56Z",
            "base_price": 20,
            "offers": [],
            "is_favorite": false
        }))
        .unwrap();

        let body = serde_json::to_value(ApiNewPoint::from(point)).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["type"], "taxi");
        assert_eq!(body["base_price"], 20);
    }
}
