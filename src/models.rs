//! Data models passed between the fetchers and the run loop.
//!
//! - [`FetchResult`]: position-keyed story URLs returned by every source
//! - [`SourceKind`]: which source the user selected on the command line
//! - [`RunRequest`]: the validated inputs of a single run
//! - [`RunReport`]: what the run loop actually dispatched

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidSource;

/// Story URLs keyed by their position in the source listing.
///
/// Positions are zero-based but not guaranteed contiguous: the forum scraper
/// restarts its numbering on every page, and anchors without an `href` leave
/// a hole. The map itself carries no ordering, so consumers sort the keys.
pub type FetchResult = HashMap<usize, String>;

/// The news source selected for a run.
///
/// | Short name | Source |
/// |------------|--------|
/// | `hn`, `hackernews` | Hacker News front page |
/// | `reddit` | r/programming hot submissions |
/// | `lobsters` | Lobsters front page |
/// | `dzone` | DZone home feed |
/// | `devto` | dev.to feed |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    HackerNews,
    Reddit,
    Lobsters,
    DZone,
    DevTo,
}

impl FromStr for SourceKind {
    type Err = InvalidSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hn" | "hackernews" => Ok(SourceKind::HackerNews),
            "reddit" => Ok(SourceKind::Reddit),
            "lobsters" => Ok(SourceKind::Lobsters),
            "dzone" => Ok(SourceKind::DZone),
            "devto" => Ok(SourceKind::DevTo),
            other => Err(InvalidSource(other.to_string())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::HackerNews => "hn",
            SourceKind::Reddit => "reddit",
            SourceKind::Lobsters => "lobsters",
            SourceKind::DZone => "dzone",
            SourceKind::DevTo => "devto",
        };
        f.write_str(name)
    }
}

/// Inputs of one run, built once from the command line and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Requested number of tabs; also the count handed to the fetcher.
    pub tabs: usize,
    /// Free-form browser name typed by the user. Empty means system default.
    pub browser: String,
    pub source: SourceKind,
}

/// Outcome of a completed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// URLs handed to an opener, in dispatch order.
    pub opened: Vec<String>,
    /// How many of those needed the default-browser fallback.
    pub fallbacks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_short_names() {
        assert_eq!("hn".parse::<SourceKind>(), Ok(SourceKind::HackerNews));
        assert_eq!("hackernews".parse::<SourceKind>(), Ok(SourceKind::HackerNews));
        assert_eq!("reddit".parse::<SourceKind>(), Ok(SourceKind::Reddit));
        assert_eq!("lobsters".parse::<SourceKind>(), Ok(SourceKind::Lobsters));
        assert_eq!("dzone".parse::<SourceKind>(), Ok(SourceKind::DZone));
        assert_eq!("devto".parse::<SourceKind>(), Ok(SourceKind::DevTo));
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        assert_eq!(
            "bogus".parse::<SourceKind>(),
            Err(InvalidSource("bogus".to_string()))
        );
        // Names are case-sensitive.
        assert!("HN".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_names() {
        for name in ["hn", "reddit", "lobsters", "dzone", "devto"] {
            let kind: SourceKind = name.parse().unwrap();
            assert_eq!(kind.to_string(), name);
        }
    }
}
