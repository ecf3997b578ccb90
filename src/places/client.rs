//! Provider API client construction
//!
//! One `PlacesClient` is built at process start from the loaded
//! configuration and shared by every pipeline stage. The credential and
//! endpoint URLs are injected here; nothing downstream reads the
//! environment.

use crate::config::{ProviderConfig, SearchConfig};
use reqwest::Client;
use std::time::Duration;

/// Client for the geocoding, nearby-search, and place-details endpoints
#[derive(Debug, Clone)]
pub struct PlacesClient {
    pub(crate) http: Client,
    pub(crate) provider: ProviderConfig,
}

impl PlacesClient {
    /// Creates a client with the given provider configuration
    pub fn new(provider: ProviderConfig, search: &SearchConfig) -> Result<Self, reqwest::Error> {
        let http = build_http_client(search.request_timeout_secs)?;
        Ok(Self { http, provider })
    }

    /// Creates a client reusing an already-built HTTP client
    pub fn with_http_client(provider: ProviderConfig, http: Client) -> Self {
        Self { http, provider }
    }

    /// The underlying HTTP client, shared with the link extractor so both
    /// use the same timeout behavior
    pub fn http_client(&self) -> &Client {
        &self.http
    }
}

/// Builds an HTTP client with explicit timeouts
///
/// # Arguments
///
/// * `timeout_secs` - Total per-request timeout in seconds
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("placelens/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
