//! r/programming "hot" listing via Reddit's public JSON API.

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use super::{Fetcher, get_text};
use crate::error::FetchError;
use crate::models::FetchResult;

pub const REDDIT_URL: &str = "https://www.reddit.com";
pub const SUBREDDIT: &str = "programming";

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
pub struct Child {
    pub data: Submission,
}

#[derive(Debug, Deserialize)]
pub struct Submission {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Reddit {
    client: Client,
    base_url: String,
}

impl Reddit {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, REDDIT_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn listing_url(&self, count: usize) -> String {
        format!(
            "{}/r/{}/hot.json?limit={count}&count={count}",
            self.base_url, SUBREDDIT
        )
    }
}

impl Fetcher for Reddit {
    fn name(&self) -> &'static str {
        "reddit"
    }

    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, count: usize) -> Result<FetchResult, FetchError> {
        let url = self.listing_url(count);
        let body = get_text(&self.client, &url).await?;
        let listing: Listing = serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let news: FetchResult = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.url)
            .enumerate()
            .collect();

        info!(count = news.len(), "Indexed Reddit submissions");
        Ok(news)
    }
}
