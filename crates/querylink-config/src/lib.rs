//! Shared configuration for the querylink client and command-line front end.
//!
//! Values are layered by [`ortho_config`]: built-in defaults, then an optional
//! TOML file (selected with `--config-path` or `QUERYLINK_CONFIG_PATH`), then
//! `QUERYLINK_*` environment variables, then command-line flags.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod logging;
mod socket;

pub use defaults::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_IO_TIMEOUT_SECS, DEFAULT_LOG_FILTER, DEFAULT_NODE_HOST,
    DEFAULT_NODE_PORT, default_connect_timeout_secs, default_io_timeout_secs, default_log_filter,
    default_log_filter_string, default_log_format, default_node_socket,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError};

/// Resolved configuration for a querylink invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "QUERYLINK")]
pub struct Config {
    /// Address of the processing node.
    #[serde(default = "default_node_socket")]
    #[ortho_config(default = default_node_socket())]
    pub node_socket: SocketEndpoint,
    /// Seconds allowed for establishing the connection.
    #[serde(default = "default_connect_timeout_secs")]
    #[ortho_config(default = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,
    /// Seconds allowed for each read or write on the connection.
    #[serde(default = "default_io_timeout_secs")]
    #[ortho_config(default = DEFAULT_IO_TIMEOUT_SECS)]
    pub io_timeout_secs: u64,
    /// `tracing` filter expression.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log line format.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_socket: default_node_socket(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            io_timeout_secs: DEFAULT_IO_TIMEOUT_SECS,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Endpoint of the processing node.
    #[must_use]
    pub const fn node_socket(&self) -> &SocketEndpoint {
        &self.node_socket
    }

    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Per-operation read/write timeout as a [`Duration`].
    #[must_use]
    pub const fn io_timeout(&self) -> Duration {
        Duration::from_secs(self.io_timeout_secs)
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log line format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
