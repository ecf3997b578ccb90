//! Mapping-provider places API client
//!
//! This module covers the three provider endpoints the pipeline consumes:
//! - Geocoding (free-text place name to coordinate)
//! - Nearby search (paginated, keyword/radius/type filtered)
//! - Place details (phone, rating, website by place identifier)

mod client;
mod details;
mod geocode;
mod nearby;
mod types;

pub use client::{build_http_client, PlacesClient};
pub use nearby::NearbyQuery;
pub use types::{maps_deep_link, Coordinate, EnrichedPlace, PlaceDetails, PlaceStub};
