//! In-memory streams standing in for a node connection.

use std::io::{self, Cursor, Read, Write};

use crate::{Connector, Outcome, Query, decode_stream};

/// Replays a canned response and records what the client wrote.
pub(super) struct ScriptedStream {
    response: Cursor<Vec<u8>>,
    pub(super) written: Vec<u8>,
}

impl ScriptedStream {
    pub(super) fn new(response: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Cursor::new(response.into()),
            written: Vec::new(),
        }
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stream whose reads and writes fail with a fixed error kind.
pub(super) struct BrokenStream {
    pub(super) fail_writes: bool,
    pub(super) kind: io::ErrorKind,
}

impl Read for BrokenStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(self.kind, "stream broke"))
    }
}

impl Write for BrokenStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            Err(io::Error::new(self.kind, "stream broke"))
        } else {
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Connector that always fails to connect.
pub(super) struct RefusingConnector;

impl Connector for RefusingConnector {
    type Stream = ScriptedStream;

    fn connect(&self) -> io::Result<ScriptedStream> {
        Err(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))
    }
}

/// Connector that hands out a fresh scripted stream per call.
pub(super) struct ScriptedConnector {
    pub(super) response: &'static str,
}

impl Connector for ScriptedConnector {
    type Stream = ScriptedStream;

    fn connect(&self) -> io::Result<ScriptedStream> {
        Ok(ScriptedStream::new(self.response))
    }
}

/// Decodes `response` as the reply to `query`.
pub(super) fn decode(query: &str, response: &str) -> Outcome {
    let query = Query::new(query).expect("query is not empty");
    decode_stream(ScriptedStream::new(response), &query)
}
