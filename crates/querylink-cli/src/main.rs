//! CLI entrypoint for querylink.
//!
//! The binary delegates to [`querylink_cli::run`], which loads configuration,
//! parses the query from the command line, exchanges it with the configured
//! processing node and renders the result.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    querylink_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
