//! Browser name resolution and launching.
//!
//! A user may type anything after `--browser`: "chrome", "firefx", "google".
//! [`find_browser`] snaps that text onto one of five known names by edit
//! distance and translates the winner into the application name the current
//! OS launches it by. An empty result means "use the system default".
//!
//! # Tie-break
//!
//! Candidates are scanned in declaration order and the best match is replaced
//! whenever a candidate is *at least as close* as the current one. On a tie
//! the later candidate therefore wins.

use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::BrowserError;

/// Known browser names, in scan order.
pub const BROWSERS: [&str; 5] = ["google", "chrome", "mozilla", "firefox", "brave"];

pub const OS_MACOS: &str = "macos";
pub const OS_LINUX: &str = "linux";
pub const OS_WINDOWS: &str = "windows";

/// Launches URLs in a browser.
pub trait Opener {
    /// Open `url` with the platform's default handler.
    fn open_default(&self, url: &str) -> Result<(), BrowserError>;

    /// Open `url` with the application called `app`.
    fn open_with(&self, url: &str, app: &str) -> Result<(), BrowserError>;
}

/// Resolve `query` to the launch name used on `os`.
pub fn find_browser(query: &str, os: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    let mut shortest: Option<usize> = None;
    let mut word = "";
    for browser in BROWSERS {
        let distance = strsim::levenshtein(browser, query);
        if distance == 0 {
            word = browser;
            break;
        }
        if shortest.is_none_or(|best| distance <= best) {
            shortest = Some(distance);
            word = browser;
        }
    }

    debug!(query, matched = word, ?shortest, "Resolved browser name");
    browser_name_for_os(word, os).to_string()
}

/// Map a canonical browser name to the application name used on `os`.
///
/// Unknown browsers and unknown operating systems map to `""`.
pub fn browser_name_for_os(browser: &str, os: &str) -> &'static str {
    match (browser, os) {
        ("google" | "chrome", OS_MACOS) => "Google Chrome",
        ("google" | "chrome", OS_LINUX) => "google-chrome",
        ("google" | "chrome", OS_WINDOWS) => "chrome",
        ("mozilla" | "firefox", OS_MACOS) => "Firefox",
        ("mozilla" | "firefox", OS_LINUX | OS_WINDOWS) => "firefox",
        ("brave", OS_MACOS) => "Brave",
        ("brave", OS_LINUX | OS_WINDOWS) => "brave",
        _ => "",
    }
}

/// Opens URLs through the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open_default(&self, url: &str) -> Result<(), BrowserError> {
        webbrowser::open(url).map_err(|source| BrowserError::Default { source })
    }

    fn open_with(&self, url: &str, app: &str) -> Result<(), BrowserError> {
        let os = std::env::consts::OS;
        let mut command = launch_command(app, url, os);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let result = if os == OS_LINUX {
            // The browser binary itself is started; do not wait for it to exit.
            command.spawn().map(drop)
        } else {
            command.status().and_then(|status| {
                if status.success() {
                    Ok(())
                } else {
                    Err(io::Error::other(format!("launcher exited with {status}")))
                }
            })
        };

        result.map_err(|source| BrowserError::Launch {
            app: app.to_string(),
            source,
        })
    }
}

/// Build the command that opens `url` in `app` on `os`.
pub fn launch_command(app: &str, url: &str, os: &str) -> Command {
    match os {
        OS_MACOS => {
            let mut cmd = Command::new("open");
            cmd.args(["-a", app, url]);
            cmd
        }
        OS_WINDOWS => {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", app, url]);
            cmd
        }
        _ => {
            let mut cmd = Command::new(app);
            cmd.arg(url);
            cmd
        }
    }
}
