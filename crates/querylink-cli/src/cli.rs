//! CLI argument definitions for querylink.

use clap::Parser;

use crate::output::OutputFormat;

/// Command-line interface for sending one query to a processing node.
#[derive(Parser, Debug)]
#[command(name = "querylink", version)]
pub(crate) struct Cli {
    /// Controls how the result is rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// Query words, joined with single spaces before sending.
    #[arg(
        value_name = "QUERY",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) query: Vec<String>,
}

impl Cli {
    /// Joins the query words into the line sent to the node.
    pub(crate) fn query_text(&self) -> String {
        self.query.join(" ")
    }
}
