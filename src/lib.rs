//! Placelens: a local-business social presence finder
//!
//! This crate queries a mapping-provider places API for businesses near a
//! location, enriches each hit with contact details, and scrapes each
//! business website for social-network profile links.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod places;
pub mod quota;
pub mod social;

use thiserror::Error;

/// Main error type for Placelens operations
#[derive(Debug, Error)]
pub enum PlacelensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No location found for place: {place}")]
    PlaceNotFound { place: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Daily search limit reached ({limit} searches)")]
    QuotaExceeded { limit: u32 },

    #[error("Quota file error: {0}")]
    Quota(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Placelens operations
pub type Result<T> = std::result::Result<T, PlacelensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::Pipeline;
pub use places::{Coordinate, EnrichedPlace, PlaceDetails, PlaceStub};
pub use social::LinkExtractor;
