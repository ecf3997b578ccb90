//! Place-details fetch: phone, rating, and website by place identifier

use crate::places::client::PlacesClient;
use crate::places::types::PlaceDetails;
use crate::Result;
use serde::Deserialize;

const DETAIL_FIELDS: &str = "name,rating,formatted_phone_number,website";

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<PlaceDetails>,
}

impl PlacesClient {
    /// Fetches the extended detail fields for a place
    ///
    /// Any of the detail fields may be absent in the provider response;
    /// a missing `result` object altogether yields empty details.
    pub async fn fetch_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let response = self
            .http
            .get(&self.provider.details_endpoint)
            .query(&[
                ("placeid", place_id),
                ("fields", DETAIL_FIELDS),
                ("key", self.provider.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: DetailsResponse = response.json().await?;
        Ok(body.result.unwrap_or_default())
    }
}
