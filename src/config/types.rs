use serde::Deserialize;

/// Main configuration structure for Placelens
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub output: OutputConfig,
}

/// Mapping-provider API configuration
///
/// Endpoint URLs default to the Google Maps web-service endpoints but are
/// overridable, which is how the integration tests point the client at a
/// mock server.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Static API credential sent with every provider request
    #[serde(rename = "api-key")]
    pub api_key: String,

    /// Geocoding endpoint URL
    #[serde(rename = "geocode-endpoint", default = "default_geocode_endpoint")]
    pub geocode_endpoint: String,

    /// Nearby-places search endpoint URL
    #[serde(rename = "nearby-endpoint", default = "default_nearby_endpoint")]
    pub nearby_endpoint: String,

    /// Place-details endpoint URL
    #[serde(rename = "details-endpoint", default = "default_details_endpoint")]
    pub details_endpoint: String,

    /// Region bias for geocoding (e.g. "jp")
    #[serde(default = "default_region")]
    pub region: String,

    /// Response language (e.g. "ja")
    #[serde(default = "default_language")]
    pub language: String,
}

/// Search behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Search radius in meters (provider maximum is 50,000)
    #[serde(rename = "radius-m", default = "default_radius_m")]
    pub radius_m: u32,

    /// Maximum number of result pages to fetch per search
    #[serde(rename = "page-limit", default = "default_page_limit")]
    pub page_limit: u32,

    /// Default place type filter (empty = no filter)
    #[serde(rename = "place-type", default)]
    pub place_type: String,

    /// Delay before each paginated request (milliseconds)
    ///
    /// The provider's pagination token only becomes valid after a short
    /// server-side propagation window; requesting too early gets the token
    /// rejected. The true required delay is undocumented, hence a knob.
    #[serde(rename = "page-token-delay-ms", default = "default_page_token_delay_ms")]
    pub page_token_delay_ms: u64,

    /// Maximum concurrent requests during detail/social enrichment
    #[serde(rename = "max-concurrent-requests", default = "default_max_concurrent")]
    pub max_concurrent_requests: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
            page_limit: default_page_limit(),
            place_type: String::new(),
            page_token_delay_ms: default_page_token_delay_ms(),
            max_concurrent_requests: default_max_concurrent(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV export file
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path to the daily quota counter file
    #[serde(rename = "quota-path")]
    pub quota_path: String,

    /// Maximum searches per calendar day
    #[serde(rename = "daily-search-limit", default = "default_daily_search_limit")]
    pub daily_search_limit: u32,
}

fn default_geocode_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_nearby_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json".to_string()
}

fn default_details_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/place/details/json".to_string()
}

fn default_region() -> String {
    "jp".to_string()
}

fn default_language() -> String {
    "ja".to_string()
}

fn default_radius_m() -> u32 {
    // walking distance, roughly 10-15 minutes
    800
}

fn default_page_limit() -> u32 {
    3
}

fn default_page_token_delay_ms() -> u64 {
    2000
}

fn default_max_concurrent() -> u32 {
    8
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_daily_search_limit() -> u32 {
    15
}
