//! RSS feed sources (DZone and dev.to).
//!
//! Both feeds are fetched with a single request and decoded with
//! `quick_xml`'s serde support. Only `<channel><item><link>` is read.

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use super::{Fetcher, get_text};
use crate::error::FetchError;
use crate::models::FetchResult;

pub const DZONE_URL: &str = "http://feeds.dzone.com/home";
pub const DEVTO_URL: &str = "https://dev.to/feed";

/// Decoded RSS document.
#[derive(Debug, Deserialize)]
pub struct Rss {
    pub channel: Channel,
}

#[derive(Debug, Deserialize)]
pub struct Channel {
    #[serde(rename = "item", default)]
    pub items: Vec<RssItem>,
}

/// Namespace prefixes are dropped while decoding, so an `<atom:link>` next to
/// the plain `<link>` lands in the same list.
#[derive(Debug, Deserialize)]
pub struct RssItem {
    #[serde(rename = "link", default)]
    pub links: Vec<String>,
}

impl RssItem {
    /// The first non-empty link, or `""` when the item has none.
    pub fn link(&self) -> &str {
        self.links
            .iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
            .unwrap_or_default()
    }
}

/// A fixed RSS feed.
#[derive(Debug, Clone)]
pub struct FeedSource {
    client: Client,
    name: &'static str,
    url: String,
}

impl FeedSource {
    pub fn new(client: Client, name: &'static str, url: impl Into<String>) -> Self {
        Self {
            client,
            name,
            url: url.into(),
        }
    }

    pub fn dzone(client: Client) -> Self {
        Self::new(client, "dzone", DZONE_URL)
    }

    pub fn devto(client: Client) -> Self {
        Self::new(client, "devto", DEVTO_URL)
    }
}

impl Fetcher for FeedSource {
    fn name(&self) -> &'static str {
        self.name
    }

    #[instrument(level = "info", skip(self), fields(feed = self.name))]
    async fn fetch(&self, count: usize) -> Result<FetchResult, FetchError> {
        let body = get_text(&self.client, &self.url).await?;
        let rss = decode_feed(&body).map_err(|e| FetchError::Decode {
            url: self.url.clone(),
            message: e.to_string(),
        })?;

        let news = first_links(&rss, count);
        info!(count = news.len(), available = rss.channel.items.len(), "Indexed feed items");
        Ok(news)
    }
}

pub fn decode_feed(xml: &str) -> Result<Rss, quick_xml::DeError> {
    quick_xml::de::from_str(xml)
}

/// Take the first `count` item links in feed order.
pub fn first_links(rss: &Rss, count: usize) -> FetchResult {
    rss.channel
        .items
        .iter()
        .take(count)
        .map(|item| item.link().to_string())
        .enumerate()
        .collect()
}
