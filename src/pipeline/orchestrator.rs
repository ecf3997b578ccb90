//! Pipeline orchestration
//!
//! Sequences the enrichment stages: geocode the place name, run the nearby
//! search, annotate each stub with a map deep link, fetch details, then
//! discover social links. Stages run strictly one after another; each stage
//! finishes its whole pass before the next starts.
//!
//! Only two things abort a run: the geocoder finding no location, and a
//! transport error during geocoding or the first nearby-search page. All
//! per-item failures downstream are absorbed by the stages.

use crate::config::Config;
use crate::pipeline::stages::{enrich_details, enrich_social};
use crate::places::{EnrichedPlace, NearbyQuery, PlacesClient};
use crate::social::LinkExtractor;
use crate::{PlacelensError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Parameters for a single pipeline run
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Keyword filter for the nearby search (e.g. "ramen")
    pub keyword: String,

    /// Free-text place name to center the search on (e.g. a station name)
    pub place: String,

    /// Search radius in meters
    pub radius_m: u32,

    /// Maximum result pages to fetch
    pub page_limit: u32,

    /// Provider place-type filter; `None` searches all types
    pub place_type: Option<String>,
}

/// The enrichment pipeline
///
/// Owns the provider client and the link extractor for its lifetime; both
/// are built once from configuration at construction.
pub struct Pipeline {
    client: PlacesClient,
    extractor: Arc<LinkExtractor>,
    page_token_delay: Duration,
    max_concurrent: usize,
}

impl Pipeline {
    /// Builds a pipeline from the loaded configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = PlacesClient::new(config.provider.clone(), &config.search)?;
        let extractor = Arc::new(LinkExtractor::new(client.http_client().clone()));

        Ok(Self {
            client,
            extractor,
            page_token_delay: Duration::from_millis(config.search.page_token_delay_ms),
            max_concurrent: config.search.max_concurrent_requests as usize,
        })
    }

    /// Runs the full enrichment pipeline and returns the best-effort list
    ///
    /// Partial enrichment (missing phone, empty social set) is normal and
    /// representable in every returned record; callers render or export the
    /// list without further error handling.
    pub async fn run(&self, request: &SearchRequest) -> Result<Vec<EnrichedPlace>> {
        tracing::info!(
            "Searching for '{}' near '{}' (radius {}m)",
            request.keyword,
            request.place,
            request.radius_m
        );

        // Stage 1: geocode; no coordinate means no search is possible
        let coordinate = self
            .client
            .resolve(&request.place)
            .await?
            .ok_or_else(|| PlacelensError::PlaceNotFound {
                place: request.place.clone(),
            })?;

        // Stage 2: paginated nearby search
        let query = NearbyQuery {
            keyword: request.keyword.clone(),
            radius_m: request.radius_m,
            page_limit: request.page_limit,
            place_type: request.place_type.clone(),
            page_token_delay: self.page_token_delay,
        };
        let stubs = self.client.search_nearby(&query, &coordinate).await?;
        tracing::info!("Nearby search returned {} places", stubs.len());

        // Stage 3+4: map deep-link annotation happens as each stub becomes
        // an EnrichedPlace, then details are fetched concurrently
        let places = enrich_details(&self.client, stubs, self.max_concurrent).await;

        // Stage 5: social discovery for places with a website
        let places = enrich_social(Arc::clone(&self.extractor), places, self.max_concurrent).await;

        let with_social = places.iter().filter(|p| !p.social.is_empty()).count();
        tracing::info!(
            "Enrichment complete: {} places, {} with social links",
            places.len(),
            with_social
        );

        Ok(places)
    }
}
