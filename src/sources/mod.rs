//! News sources that turn a requested story count into position-keyed URLs.
//!
//! Every source implements [`Fetcher`]. The run loop only sees a
//! [`NewsSource`], which is selected once from the `--source` flag and never
//! switched afterwards.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Page size |
//! |--------|--------|--------|-----------|
//! | Hacker News | [`hackernews`] | HTML scraping | 30 |
//! | r/programming | [`reddit`] | JSON listing API | `count` |
//! | Lobsters | [`lobsters`] | HTML scraping | 25 |
//! | DZone, dev.to | [`feed`] | RSS decoding | whole feed |
//!
//! # Error policy
//!
//! Paginating sources log a failed page and move on, so they always return
//! `Ok` with whatever they collected. Single-request sources return `Err`
//! and the caller continues with an empty result.

pub mod feed;
pub mod hackernews;
pub mod lobsters;
pub mod reddit;

use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;
use crate::models::{FetchResult, SourceKind};

pub use feed::FeedSource;
pub use hackernews::HackerNews;
pub use lobsters::Lobsters;
pub use reddit::Reddit;

/// Retrieves up to `count` story URLs from one provider.
pub trait Fetcher {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    /// Fetch story URLs keyed by listing position.
    async fn fetch(&self, count: usize) -> Result<FetchResult, FetchError>;
}

/// The source chosen for this run.
#[derive(Debug, Clone)]
pub enum NewsSource {
    HackerNews(HackerNews),
    Reddit(Reddit),
    Lobsters(Lobsters),
    Feed(FeedSource),
}

impl NewsSource {
    /// Construct the production fetcher for `kind`.
    pub fn new(kind: SourceKind, client: Client) -> Self {
        match kind {
            SourceKind::HackerNews => NewsSource::HackerNews(HackerNews::new(client)),
            SourceKind::Reddit => NewsSource::Reddit(Reddit::new(client)),
            SourceKind::Lobsters => NewsSource::Lobsters(Lobsters::new(client)),
            SourceKind::DZone => NewsSource::Feed(FeedSource::dzone(client)),
            SourceKind::DevTo => NewsSource::Feed(FeedSource::devto(client)),
        }
    }
}

impl Fetcher for NewsSource {
    fn name(&self) -> &'static str {
        match self {
            NewsSource::HackerNews(s) => s.name(),
            NewsSource::Reddit(s) => s.name(),
            NewsSource::Lobsters(s) => s.name(),
            NewsSource::Feed(s) => s.name(),
        }
    }

    async fn fetch(&self, count: usize) -> Result<FetchResult, FetchError> {
        match self {
            NewsSource::HackerNews(s) => s.fetch(count).await,
            NewsSource::Reddit(s) => s.fetch(count).await,
            NewsSource::Lobsters(s) => s.fetch(count).await,
            NewsSource::Feed(s) => s.fetch(count).await,
        }
    }
}

/// Build the HTTP client shared by all requests of a run.
///
/// Reddit rejects anonymous default user agents, so every request carries
/// `hnreader/<version>`.
pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("hnreader/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// GET `url` and read the whole body as text.
///
/// The response is consumed here, so the connection is released before the
/// caller starts parsing.
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String, FetchError> {
    debug!(%url, "GET");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| FetchError::Network {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_new_selects_matching_variant() {
        let client = Client::new();
        assert!(matches!(
            NewsSource::new(SourceKind::HackerNews, client.clone()),
            NewsSource::HackerNews(_)
        ));
        assert!(matches!(
            NewsSource::new(SourceKind::Reddit, client.clone()),
            NewsSource::Reddit(_)
        ));
        assert!(matches!(
            NewsSource::new(SourceKind::Lobsters, client.clone()),
            NewsSource::Lobsters(_)
        ));
        assert_eq!(NewsSource::new(SourceKind::DZone, client.clone()).name(), "dzone");
        assert_eq!(NewsSource::new(SourceKind::DevTo, client).name(), "devto");
    }

    #[tokio::test]
    async fn test_get_text_reports_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = get_text(&Client::new(), &url).await.unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_get_text_reports_network_failure() {
        // Nothing listens on port 1.
        let err = get_text(&Client::new(), "http://127.0.0.1:1/")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }
}
