//! Hacker News front page scraper.
//!
//! Hacker News lists 30 stories per page at `news?p=N`. Each story title is an
//! anchor directly under `.titleline` (older markup used `a.storylink`).
//!
//! Positions in the returned [`FetchResult`] are the anchor's index *within
//! its page*. A second page therefore writes over the first page's positions.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, error, info, instrument, warn};

use super::{Fetcher, get_text};
use crate::error::FetchError;
use crate::models::FetchResult;

/// Listing URL; the page number is appended.
pub const HACKER_NEWS_URL: &str = "https://news.ycombinator.com/news?p=";

/// Stories per listing page.
pub const PAGE_SIZE: usize = 30;

const STORY_SELECTOR: &str = "a.storylink, .titleline > a";

#[derive(Debug, Clone)]
pub struct HackerNews {
    client: Client,
    base_url: String,
}

impl HackerNews {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, HACKER_NEWS_URL)
    }

    /// `base_url` must end right where the page number goes.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn page_url(&self, page: usize) -> String {
        format!("{}{}", self.base_url, page)
    }
}

impl Fetcher for HackerNews {
    fn name(&self) -> &'static str {
        "hn"
    }

    /// Fetch `count / 30 + 1` pages (integer division, so anything under 30
    /// is a single page).
    ///
    /// Iteration `i` requests page `i + 1`, walking forward through the
    /// listing instead of asking for the same page number on every pass.
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, count: usize) -> Result<FetchResult, FetchError> {
        let pages = count / PAGE_SIZE;
        let mut news = FetchResult::new();

        for i in 0..=pages {
            let url = self.page_url(i + 1);
            let html = match get_text(&self.client, &url).await {
                Ok(html) => html,
                Err(e) => {
                    error!(error = %e, %url, "Hacker News page fetch failed; skipping");
                    continue;
                }
            };

            let links = match story_links(&html) {
                Ok(links) => links,
                Err(e) => {
                    error!(error = %e, %url, "Hacker News page parse failed; skipping");
                    continue;
                }
            };

            if links.is_empty() {
                warn!(%url, "can't find any stories...");
            }

            for (position, href) in links.into_iter().enumerate() {
                match href {
                    Some(href) => {
                        news.insert(position, href);
                    }
                    None => warn!(position, %url, "story anchor has no href"),
                }
            }
            debug!(page = i + 1, collected = news.len(), "Scraped Hacker News page");
        }

        info!(count = news.len(), "Indexed Hacker News stories");
        Ok(news)
    }
}

/// Extract the `href` of every story anchor in page order.
///
/// `None` marks an anchor without an `href`; it keeps its slot so positions
/// stay aligned with the page.
pub fn story_links(html: &str) -> Result<Vec<Option<String>>, FetchError> {
    let selector =
        Selector::parse(STORY_SELECTOR).map_err(|e| FetchError::Parse(e.to_string()))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|a| a.value().attr("href").map(str::to_string))
        .collect())
}
