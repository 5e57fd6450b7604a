//! Rendering of presentations for terminals, pipelines and web pages.
//!
//! Human output aligns table cells by display width, JSON output emits the
//! presentation as one document, and HTML output produces the table fragment
//! a web front end embeds directly.

mod html;
mod human;

use clap::ValueEnum;

use crate::presenter::Presentation;

pub use html::escape_html;

/// Output format selection for query results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render an aligned text table.
    Human,
    /// Always emit a JSON document.
    Json,
    /// Emit an HTML fragment.
    Html,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Aligned text.
    Human,
    /// JSON document.
    Json,
    /// HTML fragment.
    Html,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
            Self::Html => ResolvedOutputFormat::Html,
        }
    }
}

/// Renders `presentation` in `format`, newline terminated.
///
/// # Errors
///
/// Returns the serialiser error when JSON output cannot be produced.
pub fn render(
    presentation: &Presentation,
    format: ResolvedOutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ResolvedOutputFormat::Human => Ok(human::render(presentation)),
        ResolvedOutputFormat::Json => {
            serde_json::to_string_pretty(presentation).map(|document| document + "\n")
        }
        ResolvedOutputFormat::Html => Ok(html::render(presentation)),
    }
}
