use crate::logging::LogFormat;
use crate::socket::SocketEndpoint;

/// Host the processing node listens on when nothing else is configured.
pub const DEFAULT_NODE_HOST: &str = "127.0.0.1";

/// Port the processing node listens on when nothing else is configured.
pub const DEFAULT_NODE_PORT: u16 = 9090;

/// Seconds allowed for establishing a connection to the node.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Seconds allowed for any single read or write on the node connection.
pub const DEFAULT_IO_TIMEOUT_SECS: u64 = 5;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Computes the default endpoint of the processing node.
#[must_use]
pub fn default_node_socket() -> SocketEndpoint {
    SocketEndpoint::tcp(DEFAULT_NODE_HOST, DEFAULT_NODE_PORT)
}

/// Default connect timeout in seconds.
#[must_use]
pub const fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

/// Default read/write timeout in seconds.
#[must_use]
pub const fn default_io_timeout_secs() -> u64 {
    DEFAULT_IO_TIMEOUT_SECS
}
