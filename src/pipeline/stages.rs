//! Concurrent enrichment stages
//!
//! Both stages fan out one task per item, gated by a semaphore sized from
//! configuration. Workers receive only the datum they need (a place id or a
//! website URL) and hand their result back to the stage, which writes it
//! into the collection by position - so input order is preserved, no item
//! can be lost to a failed task, and nothing is mutated concurrently.
//!
//! A per-item failure is a return-path signal, not an abort: it is logged
//! and the item keeps an empty/absent value. The batch never shrinks.

use crate::places::{EnrichedPlace, PlaceStub, PlacesClient};
use crate::social::LinkExtractor;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Fetches detail fields for every stub, concurrently
///
/// Each stub becomes an [`EnrichedPlace`]; a failed detail fetch leaves
/// `details` as `None` and the place stays in the list.
pub async fn enrich_details(
    client: &PlacesClient,
    stubs: Vec<PlaceStub>,
    max_concurrent: usize,
) -> Vec<EnrichedPlace> {
    tracing::debug!("Fetching details for {} places", stubs.len());

    let mut places: Vec<EnrichedPlace> = stubs.into_iter().map(EnrichedPlace::from_stub).collect();

    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let mut handles = Vec::with_capacity(places.len());

    for place in &places {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let place_id = place.place_id.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            client.fetch_details(&place_id).await
        }));
    }

    for (place, handle) in places.iter_mut().zip(handles) {
        match handle.await {
            Ok(Ok(details)) => place.details = Some(details),
            Ok(Err(e)) => {
                tracing::warn!("Detail fetch failed for {}: {}", place.place_id, e);
            }
            Err(e) => {
                tracing::warn!("Detail task failed for {}: {}", place.place_id, e);
            }
        }
    }

    places
}

/// Discovers social-profile links for every place with a website,
/// concurrently
///
/// Places without a website keep an empty social set and cost no request.
/// A failed extraction is logged and leaves the set empty.
pub async fn enrich_social(
    extractor: Arc<LinkExtractor>,
    mut places: Vec<EnrichedPlace>,
    max_concurrent: usize,
) -> Vec<EnrichedPlace> {
    tracing::debug!("Discovering social links for {} places", places.len());

    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let mut handles = Vec::with_capacity(places.len());

    for place in &places {
        let handle = place.website().map(|website| {
            let extractor = Arc::clone(&extractor);
            let semaphore = Arc::clone(&semaphore);
            let website = website.to_string();

            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                extractor.extract(&website).await
            })
        });
        handles.push(handle);
    }

    for (place, handle) in places.iter_mut().zip(handles) {
        let Some(handle) = handle else {
            // No website listed; expected data sparsity, not an error
            continue;
        };

        match handle.await {
            Ok(Ok(links)) => place.social = links,
            Ok(Err(e)) => {
                tracing::warn!("Social extraction failed for {}: {}", place.place_id, e);
            }
            Err(e) => {
                tracing::warn!("Social task failed for {}: {}", place.place_id, e);
            }
        }
    }

    places
}
