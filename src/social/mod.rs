//! Social-presence discovery
//!
//! Recognizes social-network profile URLs, either directly or by scanning a
//! website's HTML for outbound links.

mod extractor;
mod networks;

pub use extractor::LinkExtractor;
pub use networks::{SocialMatcher, SOCIAL_DOMAINS};
