//! Error kinds shared by the fetchers, the browser launcher and the run loop.
//!
//! Only [`RunError`] is fatal. Everything else is either recovered locally
//! (page errors, named-browser failures) or reported and skipped by the caller.

use thiserror::Error;

/// Failure while retrieving or decoding a source document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// An HTML selector could not be compiled or applied.
    #[error("could not parse document: {0}")]
    Parse(String),

    /// The feed or listing body was not the expected XML/JSON shape.
    #[error("could not decode {url}: {message}")]
    Decode { url: String, message: String },
}

/// An unknown `--source` value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid source: {0}")]
pub struct InvalidSource(pub String);

/// Failure reported by a platform opener.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("{app} is not found on this computer: {source}")]
    Launch {
        app: String,
        #[source]
        source: std::io::Error,
    },

    #[error("default browser could not open the link: {source}")]
    Default {
        #[source]
        source: std::io::Error,
    },
}

/// Terminal failure of a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("could not open {url}: {source}")]
    BrowserOpen {
        url: String,
        #[source]
        source: BrowserError,
    },
}
