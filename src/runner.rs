//! The run loop: fetch once, sort, open each story in the chosen browser.
//!
//! ```text
//! Fetching -> Sorting -> Dispatching(key) ... -> Done
//!                              |
//!                              +-> Aborted (default opener failed)
//! ```
//!
//! Dispatch walks the positions in ascending order and stops when it reaches
//! a position *equal* to the tab count. If no such position exists every
//! entry is opened, however many there are.

use itertools::Itertools;
use tracing::{error, info, instrument};

use crate::browser::{Opener, find_browser};
use crate::error::{BrowserError, RunError};
use crate::models::{FetchResult, RunReport, RunRequest};
use crate::sources::Fetcher;

/// Run against the OS this binary was built for.
pub async fn run_app<F, O>(request: &RunRequest, source: &F, opener: &O) -> Result<RunReport, RunError>
where
    F: Fetcher,
    O: Opener,
{
    run_app_on(request, source, opener, std::env::consts::OS).await
}

/// Run with browser names resolved for `os`.
#[instrument(level = "info", skip_all, fields(tabs = request.tabs, source = %request.source, os = os))]
pub async fn run_app_on<F, O>(
    request: &RunRequest,
    source: &F,
    opener: &O,
    os: &str,
) -> Result<RunReport, RunError>
where
    F: Fetcher,
    O: Opener,
{
    let news = match source.fetch(request.tabs).await {
        Ok(news) => news,
        Err(e) => {
            error!(source = source.name(), error = %e, "Fetch failed; nothing to open");
            FetchResult::new()
        }
    };

    let browser = find_browser(&request.browser, os);
    info!(stories = news.len(), browser = %browser, "Fetched stories");

    dispatch(&news, request.tabs, &browser, opener)
}

/// Positions of `news` in ascending numeric order.
pub fn sorted_keys(news: &FetchResult) -> Vec<usize> {
    news.keys().copied().sorted().collect()
}

/// Open the stories of `news` in position order until position `tabs`.
///
/// An empty `browser` uses the default opener directly. Otherwise a failure
/// of the named browser falls back to the default opener for the same URL.
/// A failing default opener ends the run.
pub fn dispatch<O: Opener>(
    news: &FetchResult,
    tabs: usize,
    browser: &str,
    opener: &O,
) -> Result<RunReport, RunError> {
    let mut report = RunReport::default();

    for key in sorted_keys(news) {
        if key == tabs {
            break;
        }
        let url = &news[&key];

        let result = if browser.is_empty() {
            info!(%url, "Trying default browser...");
            opener.open_default(url)
        } else {
            match opener.open_with(url, browser) {
                Ok(()) => Ok(()),
                Err(e) => {
                    error!(error = %e, "{browser} is not found on this computer, trying default browser...");
                    report.fallbacks += 1;
                    opener.open_default(url)
                }
            }
        };

        if let Err(source) = result {
            return Err(abort(url, source));
        }
        report.opened.push(url.clone());
    }

    Ok(report)
}

fn abort(url: &str, source: BrowserError) -> RunError {
    error!(%url, error = %source, "Could not open a browser");
    RunError::BrowserOpen {
        url: url.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::OS_MACOS;
    use crate::error::FetchError;
    use crate::models::SourceKind;
    use crate::sources::HackerNews;
    use std::cell::RefCell;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Default(String),
        With(String, String),
    }

    #[derive(Default)]
    struct RecordingOpener {
        calls: RefCell<Vec<Call>>,
        named_fails: bool,
        default_fails: bool,
    }

    impl Opener for RecordingOpener {
        fn open_default(&self, url: &str) -> Result<(), BrowserError> {
            self.calls.borrow_mut().push(Call::Default(url.to_string()));
            if self.default_fails {
                Err(BrowserError::Default {
                    source: io::Error::other("no handler"),
                })
            } else {
                Ok(())
            }
        }

        fn open_with(&self, url: &str, app: &str) -> Result<(), BrowserError> {
            self.calls
                .borrow_mut()
                .push(Call::With(url.to_string(), app.to_string()));
            if self.named_fails {
                Err(BrowserError::Launch {
                    app: app.to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "missing"),
                })
            } else {
                Ok(())
            }
        }
    }

    struct StubSource(Result<FetchResult, ()>);

    impl Fetcher for StubSource {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn fetch(&self, _count: usize) -> Result<FetchResult, FetchError> {
            match &self.0 {
                Ok(news) => Ok(news.clone()),
                Err(()) => Err(FetchError::Parse("stub failure".to_string())),
            }
        }
    }

    /// Records the level of every event emitted while installed.
    #[derive(Clone, Default)]
    struct LevelLog(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelLog {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    fn news(keys: &[usize]) -> FetchResult {
        keys.iter()
            .map(|k| (*k, format!("https://s.example/{k}")))
            .collect()
    }

    fn request(tabs: usize, browser: &str) -> RunRequest {
        RunRequest {
            tabs,
            browser: browser.to_string(),
            source: SourceKind::HackerNews,
        }
    }

    #[test]
    fn test_sorted_keys_ignore_insertion_order() {
        let mut map = FetchResult::new();
        for k in [9, 3, 27, 0, 14] {
            map.insert(k, String::new());
        }
        assert_eq!(sorted_keys(&map), vec![0, 3, 9, 14, 27]);
    }

    #[test]
    fn test_dispatch_stops_at_exact_tab_key() {
        let opener = RecordingOpener::default();
        let report = dispatch(&news(&[0, 1, 2, 3, 4, 5, 6, 7]), 5, "", &opener).unwrap();

        assert_eq!(report.opened.len(), 5);
        assert_eq!(report.opened[0], "https://s.example/0");
        assert_eq!(report.opened[4], "https://s.example/4");
    }

    #[test]
    fn test_dispatch_opens_everything_without_exact_key() {
        let opener = RecordingOpener::default();
        let report = dispatch(&news(&[8, 0, 7, 1]), 5, "", &opener).unwrap();

        assert_eq!(
            report.opened,
            vec![
                "https://s.example/0",
                "https://s.example/1",
                "https://s.example/7",
                "https://s.example/8"
            ]
        );
    }

    #[test]
    fn test_named_browser_is_used() {
        let opener = RecordingOpener::default();
        let report = dispatch(&news(&[0, 1]), 10, "firefox", &opener).unwrap();

        assert_eq!(report.fallbacks, 0);
        assert_eq!(
            *opener.calls.borrow(),
            vec![
                Call::With("https://s.example/0".into(), "firefox".into()),
                Call::With("https://s.example/1".into(), "firefox".into()),
            ]
        );
    }

    #[test]
    fn test_missing_browser_falls_back_per_url() {
        let opener = RecordingOpener {
            named_fails: true,
            ..Default::default()
        };
        let report = dispatch(&news(&[0, 1]), 10, "brave", &opener).unwrap();

        assert_eq!(report.opened.len(), 2);
        assert_eq!(report.fallbacks, 2);
        assert_eq!(
            *opener.calls.borrow(),
            vec![
                Call::With("https://s.example/0".into(), "brave".into()),
                Call::Default("https://s.example/0".into()),
                Call::With("https://s.example/1".into(), "brave".into()),
                Call::Default("https://s.example/1".into()),
            ]
        );
    }

    #[test]
    fn test_missing_browser_is_reported_as_error() {
        let log = LevelLog::default();
        let subscriber = tracing_subscriber::registry().with(log.clone());
        let opener = RecordingOpener {
            named_fails: true,
            ..Default::default()
        };

        tracing::subscriber::with_default(subscriber, || {
            dispatch(&news(&[0]), 10, "brave", &opener).unwrap();
        });

        let levels = log.0.lock().unwrap();
        assert!(levels.contains(&Level::ERROR));
        assert!(!levels.contains(&Level::WARN));
    }

    #[test]
    fn test_failed_fallback_aborts_run() {
        let opener = RecordingOpener {
            named_fails: true,
            default_fails: true,
            ..Default::default()
        };
        let err = dispatch(&news(&[0, 1, 2]), 10, "brave", &opener).unwrap_err();

        let RunError::BrowserOpen { url, .. } = err;
        assert_eq!(url, "https://s.example/0");
        // Nothing after the first story was attempted.
        assert_eq!(opener.calls.borrow().len(), 2);
    }

    #[test]
    fn test_failed_default_without_browser_aborts_run() {
        let opener = RecordingOpener {
            default_fails: true,
            ..Default::default()
        };
        assert!(dispatch(&news(&[0, 1]), 10, "", &opener).is_err());
        assert_eq!(opener.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_leaves_nothing_to_open() {
        let opener = RecordingOpener::default();
        let report = run_app_on(&request(10, ""), &StubSource(Err(())), &opener, OS_MACOS)
            .await
            .unwrap();

        assert!(report.opened.is_empty());
        assert!(opener.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_typo_browser_resolves_before_dispatch() {
        let opener = RecordingOpener::default();
        let source = StubSource(Ok(news(&[0])));
        run_app_on(&request(10, "safri"), &source, &opener, OS_MACOS)
            .await
            .unwrap();

        assert_eq!(
            *opener.calls.borrow(),
            vec![Call::With("https://s.example/0".into(), "Brave".into())]
        );
    }

    #[tokio::test]
    async fn test_hacker_news_five_tabs_end_to_end() {
        let server = MockServer::start().await;
        let rows: String = (0..30)
            .map(|i| {
                format!(r#"<span class="titleline"><a href="https://hn.example/{i}">t</a></span>"#)
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("p", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(format!("<html><body>{rows}</body></html>")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let source = HackerNews::with_base_url(
            reqwest::Client::new(),
            format!("{}/news?p=", server.uri()),
        );
        let opener = RecordingOpener::default();
        let report = run_app_on(&request(5, ""), &source, &opener, OS_MACOS)
            .await
            .unwrap();

        assert_eq!(
            report.opened,
            (0..5)
                .map(|i| format!("https://hn.example/{i}"))
                .collect::<Vec<_>>()
        );
    }
}
