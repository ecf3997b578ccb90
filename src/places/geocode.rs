//! Geocoder: resolves a free-text place name to a coordinate pair
//!
//! One request per call, region/language biased to the deployment locale.
//! Zero results means the place name is unknown or ambiguous; the caller
//! must treat that as terminal for the whole pipeline invocation, since no
//! coordinate means no search is possible.

use crate::places::client::PlacesClient;
use crate::places::types::Coordinate;
use crate::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl PlacesClient {
    /// Resolves a place name to a coordinate
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Coordinate))` - First geocoding result
    /// * `Ok(None)` - Provider returned zero results
    /// * `Err(_)` - Transport error; no retries, fatal to the caller
    pub async fn resolve(&self, place: &str) -> Result<Option<Coordinate>> {
        tracing::debug!("Geocoding place: {}", place);

        let response = self
            .http
            .get(&self.provider.geocode_endpoint)
            .query(&[
                ("address", place),
                ("region", self.provider.region.as_str()),
                ("language", self.provider.language.as_str()),
                ("key", self.provider.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: GeocodeResponse = response.json().await?;

        let coordinate = body.results.first().map(|result| Coordinate {
            lat: result.geometry.location.lat.to_string(),
            lng: result.geometry.location.lng.to_string(),
        });

        if coordinate.is_none() {
            tracing::warn!("No geocoding results for place: {}", place);
        }

        Ok(coordinate)
    }
}
