//! Command-line runtime for querylink.
//!
//! The module owns argument parsing, configuration bootstrapping, the single
//! node exchange and result rendering. The runtime is exercised both from the
//! binary entrypoint and from tests where configuration loading and IO
//! streams are substituted.

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use querylink_client::{NodeConnector, Query, execute};
use querylink_config::Config;
use tracing::debug;

mod cli;
mod config;
mod errors;
pub mod output;
pub mod presenter;
pub mod telemetry;

use cli::Cli;
use config::{prepare_cli_arguments, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
use errors::AppError;
pub use output::{OutputFormat, ResolvedOutputFormat, render};
pub use presenter::{ErrorCategory, Payload, Presentation, present};

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: This list must be kept in sync with the fields of
/// `querylink_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--node-socket",
    "--connect-timeout-secs",
    "--io-timeout-secs",
    "--log-filter",
    "--log-format",
];

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal: io::stdout().is_terminal(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_terminal_status(
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'a mut IoStreams<'a, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let result = Cli::try_parse_from(cli_arguments)
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                let query = Query::new(cli.query_text())?;
                let config = self.loader.load(&split.config_arguments)?;
                Ok((cli, query, config))
            })
            .and_then(|(cli, query, config)| self.execute_query(&query, cli.output, &config));

        match result {
            Ok(exit_code) => exit_code,
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                let _ = write!(self.io.stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.io.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn execute_query(
        &mut self,
        query: &Query,
        output: OutputFormat,
        config: &Config,
    ) -> Result<ExitCode, AppError> {
        telemetry::initialise(config)?;
        let format = output.resolve(self.io.stdout_is_terminal());
        let connector = NodeConnector::from_config(config);
        debug!(endpoint = %connector.endpoint(), mode = %query.mode(), "sending query");

        let presentation = present(execute(&connector, query));
        let rendered = render(&presentation, format).map_err(AppError::SerialiseOutput)?;

        let (sink, exit_code): (&mut dyn Write, ExitCode) = if presentation.success {
            (&mut *self.io.stdout, ExitCode::SUCCESS)
        } else {
            (&mut *self.io.stderr, ExitCode::FAILURE)
        };
        sink.write_all(rendered.as_bytes())
            .and_then(|()| sink.flush())
            .map_err(AppError::WriteOutput)?;
        Ok(exit_code)
    }
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Returns success when the node accepted the query and the result was
/// written to `stdout`; every failure is reported on `stderr`.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<'a, I, W, E, L>(
    args: I,
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}
