//! Configuration module for Placelens
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. The API credential, provider endpoints, and all tuning knobs live
//! here and are injected into the clients at construction, never read from
//! the environment inside business logic.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ProviderConfig, SearchConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

pub use validation::{validate_search_bounds, MAX_RADIUS_M};
