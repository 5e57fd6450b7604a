//! Test support utilities for querylink CLI behavioural coverage.
//!
//! Supplies harness types for starting fake nodes and capturing CLI output so
//! step definitions and unit tests remain focused on their assertions.

mod fake_node;

use std::cell::RefCell;
use std::ffi::OsString;
use std::net::TcpListener;
use std::process::ExitCode;

use anyhow::{Context, Result, ensure};
use querylink_config::{Config, SocketEndpoint};
use rstest::fixture;

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

pub(super) use fake_node::FakeNode;

/// A config loader that returns a fixed configuration.
pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Splits a command line on whitespace, prefixed with the program name.
pub(super) fn build_args(command: &str) -> Vec<OsString> {
    std::iter::once("querylink")
        .chain(command.split_whitespace())
        .map(OsString::from)
        .collect()
}

/// Output captured from one CLI run.
pub(super) struct Captured {
    pub exit_code: ExitCode,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the CLI in-process with `loader` and a non-terminal stdout.
pub(super) fn run_captured<L: ConfigLoader>(args: Vec<OsString>, loader: &L) -> Result<Captured> {
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();
    let exit_code = {
        let mut io = IoStreams::with_terminal_status(&mut stdout, &mut stderr, false);
        run_with_loader(args, &mut io, loader)
    };
    Ok(Captured {
        exit_code,
        stdout: String::from_utf8(stdout).context("stdout utf8")?,
        stderr: String::from_utf8(stderr).context("stderr utf8")?,
    })
}

#[derive(Default)]
pub(super) struct TestWorld {
    pub config: Config,
    pub node: Option<FakeNode>,
    pub captured: Option<Captured>,
    pub requests: Vec<String>,
}

impl TestWorld {
    pub fn start_node(&mut self, lines: Vec<String>) -> Result<()> {
        let node = FakeNode::spawn(lines)?;
        self.config.node_socket = SocketEndpoint::tcp("127.0.0.1", node.port());
        self.config.io_timeout_secs = 2;
        self.node = Some(node);
        Ok(())
    }

    /// Points the configuration at a port nothing listens on.
    pub fn point_at_unreachable_node(&mut self) -> Result<()> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).context("bind probe")?;
        let port = listener.local_addr().context("probe addr")?.port();
        drop(listener);
        self.config.node_socket = SocketEndpoint::tcp("127.0.0.1", port);
        Ok(())
    }

    pub fn run(&mut self, command: &str) -> Result<()> {
        self.requests.clear();
        let loader = StaticConfigLoader::new(self.config.clone());
        self.captured = Some(run_captured(build_args(command), &loader)?);
        if let Some(node) = self.node.as_mut() {
            self.requests = node.take_requests()?;
        }
        self.node = None;
        Ok(())
    }

    fn captured(&self) -> Result<&Captured> {
        self.captured.as_ref().context("the CLI has not run")
    }

    pub fn stdout_text(&self) -> Result<&str> {
        Ok(self.captured()?.stdout.as_str())
    }

    pub fn stderr_text(&self) -> Result<&str> {
        Ok(self.captured()?.stderr.as_str())
    }

    pub fn assert_exit_code(&self, expected: ExitCode) -> Result<()> {
        let exit = self.captured()?.exit_code;
        ensure!(
            exit == expected,
            "expected exit code {expected:?}, got {exit:?}"
        );
        Ok(())
    }

    pub fn assert_single_request(&self, query: &str) -> Result<()> {
        let expected = format!("{query}\n");
        ensure!(
            self.requests == [expected.clone()],
            "expected node to receive {expected:?}, got {:?}",
            self.requests
        );
        Ok(())
    }

    pub fn assert_no_requests(&self) -> Result<()> {
        ensure!(
            self.requests.is_empty(),
            "expected no node requests but found {:?}",
            self.requests
        );
        Ok(())
    }
}

/// Splits a `|`-separated reply into protocol lines.
pub(super) fn reply_lines(reply: &str) -> Vec<String> {
    reply.split('|').map(str::to_owned).collect()
}

#[fixture]
pub(super) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}
