//! Socket transport to the processing node.
//!
//! [`NodeConnector`] opens one bounded connection per exchange and wraps the
//! stream in a [`Connection`] so the decoder stays transport agnostic.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use querylink_config::{Config, SocketEndpoint};
use tracing::debug;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

#[cfg(unix)]
use socket2::{Domain, SockAddr, Socket, Type};

/// Source of fresh streams to the processing node.
pub trait Connector {
    /// Stream type produced for each exchange.
    type Stream: Read + Write;

    /// Opens a new stream.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the node cannot be reached.
    fn connect(&self) -> io::Result<Self::Stream>;
}

/// Open stream to the processing node. Dropping it closes the socket.
#[derive(Debug)]
pub enum Connection {
    /// TCP stream.
    Tcp(TcpStream),
    /// Unix domain socket stream.
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Unix(stream) => stream.flush(),
        }
    }
}

/// Connects to a configured endpoint with connect and I/O timeouts applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConnector {
    endpoint: SocketEndpoint,
    connect_timeout: Duration,
    io_timeout: Duration,
}

impl NodeConnector {
    /// Builds a connector for `endpoint`.
    ///
    /// Zero durations are rejected by the socket layer when connecting, which
    /// surfaces as a connection error.
    #[must_use]
    pub const fn new(endpoint: SocketEndpoint, connect_timeout: Duration, io_timeout: Duration) -> Self {
        Self {
            endpoint,
            connect_timeout,
            io_timeout,
        }
    }

    /// Builds a connector from the node socket and timeouts in `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.node_socket().clone(),
            config.connect_timeout(),
            config.io_timeout(),
        )
    }

    /// Endpoint this connector dials.
    #[must_use]
    pub const fn endpoint(&self) -> &SocketEndpoint {
        &self.endpoint
    }

    fn connect_tcp(&self, host: &str, port: u16) -> io::Result<Connection> {
        let stream = connect_any((host, port).to_socket_addrs()?, self.connect_timeout)?;
        stream.set_read_timeout(Some(self.io_timeout))?;
        stream.set_write_timeout(Some(self.io_timeout))?;
        Ok(Connection::Tcp(stream))
    }

    #[cfg(unix)]
    fn connect_unix(&self, path: &str) -> io::Result<Connection> {
        let socket = Socket::new(Domain::UNIX, Type::STREAM, None)?;
        let address = SockAddr::unix(path)?;
        socket.connect_timeout(&address, self.connect_timeout)?;
        let stream: UnixStream = socket.into();
        stream.set_read_timeout(Some(self.io_timeout))?;
        stream.set_write_timeout(Some(self.io_timeout))?;
        Ok(Connection::Unix(stream))
    }

    #[cfg(not(unix))]
    fn connect_unix(&self, _path: &str) -> io::Result<Connection> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "platform does not support Unix sockets",
        ))
    }
}

impl Connector for NodeConnector {
    type Stream = Connection;

    fn connect(&self) -> io::Result<Connection> {
        debug!(endpoint = %self.endpoint, "connecting to node");
        match &self.endpoint {
            SocketEndpoint::Tcp { host, port } => self.connect_tcp(host, *port),
            SocketEndpoint::Unix { path } => self.connect_unix(path.as_str()),
        }
    }
}

/// Tries each resolved address in turn, returning the first stream that
/// connects or the last error seen.
fn connect_any(
    addrs: impl IntoIterator<Item = SocketAddr>,
    timeout: Duration,
) -> io::Result<TcpStream> {
    let mut last_error = None;
    for address in addrs {
        match TcpStream::connect_timeout(&address, timeout) {
            Ok(stream) => return Ok(stream),
            Err(error) => {
                debug!(%address, %error, "node address unreachable");
                last_error = Some(error);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "no resolved addresses")
    }))
}
