//! Enrichment pipeline
//!
//! The pipeline turns a keyword and a place name into a list of enriched
//! business records: geocoding, nearby search, deep-link annotation,
//! concurrent detail fetching, and concurrent social-link discovery.

mod orchestrator;
mod stages;

pub use orchestrator::{Pipeline, SearchRequest};
pub use stages::{enrich_details, enrich_social};
