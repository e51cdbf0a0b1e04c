//! Lobsters front page scraper.
//!
//! Lobsters shows 25 stories per page at `/page/N`. Unlike the Hacker News
//! scraper, positions run continuously across pages and stop at `count`.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{error, info, instrument, warn};

use super::{Fetcher, get_text};
use crate::error::FetchError;
use crate::models::FetchResult;

pub const LOBSTERS_URL: &str = "https://lobste.rs";

/// Stories per listing page.
pub const PAGE_SIZE: usize = 25;

const PERMALINK_SELECTOR: &str = ".link a.u-url";

#[derive(Debug, Clone)]
pub struct Lobsters {
    client: Client,
    base_url: String,
}

impl Lobsters {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, LOBSTERS_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Turn a site-relative `href` into an absolute URL on this site.
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{}", self.base_url, href)
        } else {
            href.to_string()
        }
    }
}

impl Fetcher for Lobsters {
    fn name(&self) -> &'static str {
        "lobsters"
    }

    /// Every one of the `ceil(count / 25)` pages is requested even after
    /// `count` links have been collected.
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, count: usize) -> Result<FetchResult, FetchError> {
        let pages = count.div_ceil(PAGE_SIZE);
        let mut news = FetchResult::new();
        let mut next = 0;

        for page in 1..=pages {
            let url = format!("{}/page/{}", self.base_url, page);
            let html = match get_text(&self.client, &url).await {
                Ok(html) => html,
                Err(e) => {
                    error!(error = %e, %url, "Lobsters page fetch failed; skipping");
                    continue;
                }
            };

            let links = match permalinks(&html) {
                Ok(links) => links,
                Err(e) => {
                    error!(error = %e, %url, "Lobsters page parse failed; skipping");
                    continue;
                }
            };

            if links.is_empty() {
                warn!(%url, "can't find any stories...");
            }

            for href in links {
                if next >= count {
                    break;
                }
                let Some(href) = href else {
                    warn!(%url, "permalink has no href");
                    continue;
                };
                news.insert(next, self.absolutize(&href));
                next += 1;
            }
        }

        info!(count = news.len(), "Indexed Lobsters stories");
        Ok(news)
    }
}

/// Extract the `href` of every story permalink in page order.
pub fn permalinks(html: &str) -> Result<Vec<Option<String>>, FetchError> {
    let selector =
        Selector::parse(PERMALINK_SELECTOR).map_err(|e| FetchError::Parse(e.to_string()))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|a| a.value().attr("href").map(str::to_string))
        .collect())
}
