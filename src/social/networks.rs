//! Recognized social networks and post-pattern matching
//!
//! A URL counts as a social link when it contains one of the recognized
//! domain substrings. Matching on the domain alone also captures links to
//! individual posts ("status"/"post" permalinks) embedded in page bodies;
//! those are not stable profile identifiers, so a parallel set of post
//! patterns filters them out.

use regex::Regex;

/// Domain substrings identifying the recognized social networks
///
/// `lin.ee` is the link shortener used by the LINE messaging platform.
pub const SOCIAL_DOMAINS: [&str; 5] = ["instagram.", "twitter.", "tiktok.", "facebook.", "lin.ee"];

/// Patterns identifying content permalinks (posts, statuses, videos) on the
/// recognized platforms
const POST_PATTERNS: [&str; 4] = [
    r"instagram\.com/p/",
    r"twitter\.com/.*/status",
    r"tiktok\.com/.*/video/",
    r"facebook\.com/.*/posts",
];

/// Classifier for social-network URLs
#[derive(Debug)]
pub struct SocialMatcher {
    post_patterns: Vec<Regex>,
}

impl SocialMatcher {
    pub fn new() -> Self {
        let post_patterns = POST_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("post pattern is a valid regex"))
            .collect();
        Self { post_patterns }
    }

    /// True when the URL contains a recognized social domain substring
    pub fn is_social_url(&self, url: &str) -> bool {
        SOCIAL_DOMAINS.iter().any(|domain| url.contains(domain))
    }

    /// True when the URL points at a single content item rather than a
    /// profile or page
    pub fn is_post_url(&self, url: &str) -> bool {
        self.post_patterns.iter().any(|pattern| pattern.is_match(url))
    }

    /// True when the URL is a usable profile link: on a recognized network
    /// and not a content permalink
    pub fn is_profile_url(&self, url: &str) -> bool {
        self.is_social_url(url) && !self.is_post_url(url)
    }
}

impl Default for SocialMatcher {
    fn default() -> Self {
        Self::new()
    }
}
