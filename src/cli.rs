//! Command-line interface definitions for hnreader.
//!
//! Every `run` flag can also be supplied through an environment variable.

use clap::{Args, Parser, Subcommand};

use crate::error::InvalidSource;
use crate::models::RunRequest;

/// Open multiple tech news feeds in your favorite browser.
///
/// # Examples
///
/// ```sh
/// # Ten Hacker News stories in the default browser
/// hnreader run
///
/// # Five Lobsters stories in Firefox
/// hnreader r -t 5 -b firefox -s lobsters
/// ```
#[derive(Parser, Debug)]
#[command(name = "hnreader", author, version, about, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start hnreader with default options (10 news and the default browser)
    #[command(visible_alias = "r")]
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Specify number of tabs
    #[arg(short, long, default_value_t = 10, env = "HNREADER_TABS")]
    pub tabs: u32,

    /// Specify browser
    #[arg(short, long, default_value = "", env = "HNREADER_BROWSER")]
    pub browser: String,

    /// Specify news source (one of "hn", "reddit", "lobsters", "dzone", "devto")
    #[arg(short, long, default_value = "hn", env = "HNREADER_SOURCE")]
    pub source: String,
}

impl RunArgs {
    /// Validate the flags into a [`RunRequest`].
    pub fn to_request(&self) -> Result<RunRequest, InvalidSource> {
        Ok(RunRequest {
            tabs: self.tabs as usize,
            browser: self.browser.clone(),
            source: self.source.parse()?,
        })
    }
}
