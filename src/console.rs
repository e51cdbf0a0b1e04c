//! Console text styling.
//!
//! Stateless helpers that wrap text in ANSI styles at the print site. Log
//! lines go through `tracing`; these cover the banner and the few messages
//! printed directly to the terminal.

use crossterm::style::Stylize;

/// The startup banner: name and version, then the description.
pub fn banner(name: &str, version: &str, description: &str) -> String {
    format!(
        "{} - {}\n{}\n",
        name.blue().bold(),
        version.blue().bold(),
        description.blue().bold()
    )
}

/// Text styled as an error.
pub fn alert(message: &str) -> String {
    message.red().bold().to_string()
}
