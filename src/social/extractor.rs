//! Link extractor: finds social-network profile URLs for a website
//!
//! Two paths:
//! 1. The input URL is itself a profile URL - return it as a singleton set
//!    without any network traffic.
//! 2. Otherwise fetch the page HTML and scan every anchor's `href` for
//!    recognized profile links, deduplicated into a set.

use crate::social::networks::SocialMatcher;
use crate::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::BTreeSet;

/// Extracts social-profile URLs from a business website
#[derive(Debug)]
pub struct LinkExtractor {
    http: Client,
    matcher: SocialMatcher,
}

impl LinkExtractor {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            matcher: SocialMatcher::new(),
        }
    }

    /// Returns the set of social-profile URLs associated with `url`
    ///
    /// Network and parse failures propagate; the enrichment stage that calls
    /// this is responsible for catching them per item.
    pub async fn extract(&self, url: &str) -> Result<BTreeSet<String>> {
        // The website URL may already be a social profile (shops frequently
        // list their Instagram page as the website)
        if self.matcher.is_profile_url(url) {
            let mut links = BTreeSet::new();
            links.insert(url.to_string());
            return Ok(links);
        }

        let html = self.fetch_html(url).await?;
        Ok(self.scan_anchors(&html))
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await?;
        let body = response.text().await?;
        Ok(body)
    }

    /// Scans anchor hrefs for profile links
    ///
    /// Hrefs are matched as-is: a relative href cannot contain a recognized
    /// domain substring, so no base-URL resolution is needed.
    fn scan_anchors(&self, html: &str) -> BTreeSet<String> {
        let document = Html::parse_document(html);
        let mut links = BTreeSet::new();

        if let Ok(selector) = Selector::parse("a[href]") {
            for element in document.select(&selector) {
                if let Some(href) = element.value().attr("href") {
                    let href = href.trim();
                    if self.matcher.is_profile_url(href) {
                        links.insert(href.to_string());
                    }
                }
            }
        }

        links
    }
}
