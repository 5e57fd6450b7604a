//! Failure taxonomy for a single query exchange.

use std::fmt;
use std::io;

use thiserror::Error;

/// Point in the exchange where a transport failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportStage {
    /// Resolving the address or establishing the connection.
    Connect,
    /// Writing the query.
    Send,
    /// Reading the response.
    Receive,
}

impl fmt::Display for TransportStage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connect => "connect",
            Self::Send => "send",
            Self::Receive => "receive",
        };
        formatter.write_str(label)
    }
}

/// The node's reply did not follow the line protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The tabular header was neither `ERROR:` nor `COLUMNS:<count>`, or a
    /// zero-column table carried data.
    #[error("Invalid response format")]
    InvalidResponseFormat,
    /// The node closed the stream before the terminator arrived.
    #[error("unexpected end of response while reading {expected}")]
    UnexpectedEof {
        /// What the decoder was waiting for.
        expected: &'static str,
    },
    /// A response line was not valid UTF-8.
    #[error("response is not valid UTF-8")]
    InvalidEncoding,
}

/// Why a query exchange failed.
///
/// The `Display` form is the user-facing reason: transport failures read
/// `Connection error: <cause>`, node errors are the node's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Connecting, writing or reading failed, including timeouts.
    #[error("Connection error: {detail}")]
    Transport {
        /// Exchange stage that failed.
        stage: TransportStage,
        /// Kind of the underlying I/O error.
        kind: io::ErrorKind,
        /// Rendered I/O error.
        detail: String,
    },
    /// The response violated the line protocol.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    /// The node reported an `ERROR:` line.
    #[error("{0}")]
    Node(String),
}

impl QueryError {
    /// Captures an I/O failure for the given stage.
    #[must_use]
    pub fn transport(stage: TransportStage, source: &io::Error) -> Self {
        Self::Transport {
            stage,
            kind: source.kind(),
            detail: source.to_string(),
        }
    }

    /// Returns true when the failure came from the node's own `ERROR:` line.
    #[must_use]
    pub const fn is_node_error(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}
