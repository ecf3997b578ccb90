//! Nearby search: paginates a radius-bounded, keyword-filtered query into a
//! flat list of place stubs
//!
//! The provider hands back an opaque pagination token that is not valid
//! until a short server-side propagation window has elapsed, so every
//! paginated request is preceded by a fixed delay. The delay length is
//! provider-determined and undocumented; it comes from configuration.

use crate::places::client::PlacesClient;
use crate::places::types::{Coordinate, PlaceStub};
use crate::Result;
use serde::Deserialize;
use std::time::Duration;

/// Parameters for a single nearby search
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    pub keyword: String,

    /// Search radius in meters, bounded by the provider maximum
    pub radius_m: u32,

    /// Maximum number of result pages to request
    pub page_limit: u32,

    /// Provider place-type filter; `None` searches all types
    pub place_type: Option<String>,

    /// Delay before each paginated request
    pub page_token_delay: Duration,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,

    next_page_token: Option<String>,
}

impl PlacesClient {
    /// Runs a nearby search centered on `coordinate`, following pagination
    /// tokens up to `query.page_limit` pages
    ///
    /// A transport error on the first page propagates; an error on a later
    /// page stops pagination and returns what was accumulated, since the
    /// caller's contract is a best-effort list.
    pub async fn search_nearby(
        &self,
        query: &NearbyQuery,
        coordinate: &Coordinate,
    ) -> Result<Vec<PlaceStub>> {
        tracing::debug!(
            "Nearby search for '{}' at {} (radius {}m, up to {} pages)",
            query.keyword,
            coordinate.to_location_param(),
            query.radius_m,
            query.page_limit
        );

        let mut stubs = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 0..query.page_limit {
            let response = if let Some(token) = &page_token {
                // The token needs a propagation window before it is accepted
                tokio::time::sleep(query.page_token_delay).await;
                self.fetch_page_by_token(token).await
            } else {
                self.fetch_first_page(query, coordinate).await
            };

            let body = match response {
                Ok(body) => body,
                Err(e) if page == 0 => return Err(e),
                Err(e) => {
                    tracing::warn!("Nearby search page {} failed, stopping: {}", page, e);
                    break;
                }
            };

            let page_size = body.results.len();
            for raw in body.results {
                match PlaceStub::from_raw(raw) {
                    Some(stub) => stubs.push(stub),
                    None => tracing::debug!("Skipping result without place_id/name"),
                }
            }
            tracing::debug!("Page {}: {} results ({} total)", page, page_size, stubs.len());

            if page == 0 && page_size == 0 {
                break;
            }

            match body.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(stubs)
    }

    async fn fetch_first_page(
        &self,
        query: &NearbyQuery,
        coordinate: &Coordinate,
    ) -> Result<NearbyResponse> {
        let radius = query.radius_m.to_string();
        let mut params = vec![
            ("location", coordinate.to_location_param()),
            ("keyword", query.keyword.clone()),
            ("radius", radius),
            ("language", self.provider.language.clone()),
            ("key", self.provider.api_key.clone()),
        ];
        if let Some(place_type) = &query.place_type {
            params.push(("type", place_type.clone()));
        }

        let response = self
            .http
            .get(&self.provider.nearby_endpoint)
            .query(&params)
            .send()
            .await?;

        Ok(response.json().await?)
    }

    async fn fetch_page_by_token(&self, token: &str) -> Result<NearbyResponse> {
        let response = self
            .http
            .get(&self.provider.nearby_endpoint)
            .query(&[
                ("pagetoken", token),
                ("key", self.provider.api_key.as_str()),
            ])
            .send()
            .await?;

        Ok(response.json().await?)
    }
}
