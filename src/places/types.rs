use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A latitude/longitude pair, kept as decimal strings per the provider's
/// query-parameter convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub lat: String,
    pub lng: String,
}

impl Coordinate {
    /// Formats the coordinate as the `lat,lng` string the nearby-search
    /// endpoint expects
    pub fn to_location_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Minimal record returned by a nearby-places search, before enrichment
///
/// Invariant: `place_id` and `name` are non-empty; stubs are only built
/// through [`PlaceStub::from_raw`], which rejects payloads missing either.
#[derive(Debug, Clone)]
pub struct PlaceStub {
    /// Opaque provider-assigned identifier
    pub place_id: String,

    /// Display name of the business
    pub name: String,

    /// Raw provider payload for this result
    pub raw: serde_json::Value,
}

impl PlaceStub {
    /// Builds a stub from a raw nearby-search result entry
    ///
    /// Returns `None` when the entry has no usable `place_id` or `name`.
    pub fn from_raw(raw: serde_json::Value) -> Option<Self> {
        let place_id = raw.get("place_id")?.as_str()?.to_string();
        let name = raw.get("name")?.as_str()?.to_string();

        if place_id.is_empty() || name.is_empty() {
            return None;
        }

        Some(Self {
            place_id,
            name,
            raw,
        })
    }
}

/// Extended fields fetched from the place-details endpoint
///
/// Every field may be absent; a business with no listed phone or website is
/// normal data sparsity, not an error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaceDetails {
    pub name: Option<String>,

    pub rating: Option<f64>,

    #[serde(rename = "formatted_phone_number")]
    pub phone: Option<String>,

    pub website: Option<String>,
}

/// A place stub carried through the enrichment pipeline
///
/// Each pipeline stage fully owns its pass over the collection, so partially
/// enriched records are never visible to concurrent readers.
#[derive(Debug, Clone)]
pub struct EnrichedPlace {
    pub place_id: String,
    pub name: String,
    pub raw: serde_json::Value,

    /// Map-service deep link synthesized from the place identifier
    pub map_url: String,

    /// Detail payload, or `None` when the detail fetch failed
    pub details: Option<PlaceDetails>,

    /// Social-profile URLs discovered on the business website
    pub social: BTreeSet<String>,
}

impl EnrichedPlace {
    /// Wraps a stub with its map deep link; details and social links are
    /// filled in by later pipeline stages
    pub fn from_stub(stub: PlaceStub) -> Self {
        let map_url = maps_deep_link(&stub.place_id);
        Self {
            place_id: stub.place_id,
            name: stub.name,
            raw: stub.raw,
            map_url,
            details: None,
            social: BTreeSet::new(),
        }
    }

    /// The business website from the detail payload, if any
    pub fn website(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|d| d.website.as_deref())
            .filter(|w| !w.is_empty())
    }
}

/// Synthesizes a map-service deep link for a place identifier
pub fn maps_deep_link(place_id: &str) -> String {
    format!("https://www.google.com/maps/place/?q=place_id:{}", place_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinate_location_param() {
        let coord = Coordinate {
            lat: "35.658034".to_string(),
            lng: "139.701636".to_string(),
        };
        assert_eq!(coord.to_location_param(), "35.658034,139.701636");
    }

    #[test]
    fn test_stub_from_valid_raw() {
        let raw = json!({"place_id": "abc123", "name": "Cafe", "vicinity": "Somewhere"});
        let stub = PlaceStub::from_raw(raw).unwrap();
        assert_eq!(stub.place_id, "abc123");
        assert_eq!(stub.name, "Cafe");
        assert_eq!(stub.raw["vicinity"], "Somewhere");
    }

    #[test]
    fn test_stub_rejects_missing_place_id() {
        let raw = json!({"name": "Cafe"});
        assert!(PlaceStub::from_raw(raw).is_none());
    }

    #[test]
    fn test_stub_rejects_empty_name() {
        let raw = json!({"place_id": "abc123", "name": ""});
        assert!(PlaceStub::from_raw(raw).is_none());
    }

    #[test]
    fn test_enriched_place_from_stub() {
        let raw = json!({"place_id": "abc123", "name": "Cafe"});
        let stub = PlaceStub::from_raw(raw).unwrap();
        let place = EnrichedPlace::from_stub(stub);

        assert_eq!(place.place_id, "abc123");
        assert_eq!(
            place.map_url,
            "https://www.google.com/maps/place/?q=place_id:abc123"
        );
        assert!(place.details.is_none());
        assert!(place.social.is_empty());
    }

    #[test]
    fn test_website_absent_without_details() {
        let stub = PlaceStub::from_raw(json!({"place_id": "x", "name": "Y"})).unwrap();
        let mut place = EnrichedPlace::from_stub(stub);
        assert!(place.website().is_none());

        place.details = Some(PlaceDetails {
            website: Some(String::new()),
            ..Default::default()
        });
        assert!(place.website().is_none());

        place.details = Some(PlaceDetails {
            website: Some("https://example.com".to_string()),
            ..Default::default()
        });
        assert_eq!(place.website(), Some("https://example.com"));
    }

    #[test]
    fn test_details_deserialization() {
        let details: PlaceDetails = serde_json::from_value(json!({
            "name": "Cafe",
            "rating": 4.2,
            "formatted_phone_number": "03-1234-5678",
            "website": "https://example.com"
        }))
        .unwrap();

        assert_eq!(details.phone.as_deref(), Some("03-1234-5678"));
        assert_eq!(details.rating, Some(4.2));
    }

    #[test]
    fn test_details_all_fields_optional() {
        let details: PlaceDetails = serde_json::from_value(json!({})).unwrap();
        assert!(details.name.is_none());
        assert!(details.phone.is_none());
        assert!(details.website.is_none());
    }
}
