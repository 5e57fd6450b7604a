//! Client for the processing node's line protocol.
//!
//! A single exchange writes the query followed by `\n`, picks the response
//! grammar from the query's leading keywords ([`QueryMode`]), and reads lines
//! until that grammar's terminator. The result is an [`Outcome`]: either a
//! [`QueryResponse`] or a [`QueryError`] whose `Display` form is the reason
//! shown to users.
//!
//! Each call opens its own connection and drops it before returning, whatever
//! the result. Nothing is retried.

use std::io::{BufReader, Read, Write};

use tracing::{debug, debug_span};

mod decoder;
mod errors;
mod query;
mod response;
mod transport;

pub use errors::{ProtocolError, QueryError, TransportStage};
pub use query::{EmptyQuery, Query, QueryMode};
pub use response::{NameList, NameListKind, QueryResponse, TabularResult};
pub use transport::{Connection, Connector, NodeConnector};

use decoder::{LineReader, decode_acknowledgement, decode_names, decode_table};

/// Result of one query exchange.
pub type Outcome = Result<QueryResponse, QueryError>;

/// Connects through `connector`, sends `query` and decodes the reply.
///
/// # Errors
///
/// Returns [`QueryError::Transport`] when connecting fails, otherwise any
/// error from [`decode_stream`].
pub fn execute<C>(connector: &C, query: &Query) -> Outcome
where
    C: Connector,
{
    let span = debug_span!("query", mode = %query.mode());
    let _entered = span.enter();

    let outcome = connector
        .connect()
        .map_err(|error| QueryError::transport(TransportStage::Connect, &error))
        .and_then(|connection| decode_stream(connection, query));

    if let Err(error) = &outcome {
        debug!(%error, node_error = error.is_node_error(), "query failed");
    }
    outcome
}

/// Sends `query` on an open stream and decodes the reply.
///
/// The stream is consumed and dropped before this returns.
///
/// # Errors
///
/// Returns [`QueryError::Transport`] for write or read failures (including
/// timeouts), [`QueryError::Protocol`] for malformed or truncated replies and
/// [`QueryError::Node`] when the node answers with an `ERROR:` line.
pub fn decode_stream<S>(mut stream: S, query: &Query) -> Outcome
where
    S: Read + Write,
{
    send_query(&mut stream, query)?;
    debug!("query sent");

    let mut lines = LineReader::new(BufReader::new(stream));
    let response = match query.mode() {
        QueryMode::Tabular => decode_table(&mut lines).map(QueryResponse::Table),
        QueryMode::DatabaseList => {
            decode_names(&mut lines, NameListKind::Databases).map(QueryResponse::Names)
        }
        QueryMode::TableList => {
            decode_names(&mut lines, NameListKind::Tables).map(QueryResponse::Names)
        }
        QueryMode::Acknowledge => {
            decode_acknowledgement(&mut lines).map(|()| QueryResponse::Acknowledged)
        }
    }?;
    debug!("response decoded");
    Ok(response)
}

fn send_query<W>(writer: &mut W, query: &Query) -> Result<(), QueryError>
where
    W: Write,
{
    let send_error = |error: std::io::Error| QueryError::transport(TransportStage::Send, &error);
    writer.write_all(query.text().as_bytes()).map_err(send_error)?;
    writer.write_all(b"\n").map_err(send_error)?;
    writer.flush().map_err(send_error)
}
