//! Line-protocol state machines for each response grammar.
//!
//! The node frames nothing but the column count: result sets end at an
//! `END_RESULTS` line and failures arrive as `ERROR:<message>` lines. Lines
//! are read one at a time and never pushed back.

use std::io::{self, BufRead};

use tracing::trace;

use crate::errors::{ProtocolError, QueryError, TransportStage};
use crate::response::{NameList, NameListKind, TabularResult};

pub(crate) const ERROR_PREFIX: &str = "ERROR:";
pub(crate) const COLUMNS_PREFIX: &str = "COLUMNS:";
pub(crate) const END_MARKER: &str = "END_RESULTS";

/// Reads trimmed response lines and maps stream failures onto [`QueryError`].
pub(crate) struct LineReader<R> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) const fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }

    /// Returns the next line without surrounding whitespace.
    ///
    /// `expected` names what the caller is waiting for and is reported when
    /// the stream ends first.
    pub(crate) fn next_line(&mut self, expected: &'static str) -> Result<String, QueryError> {
        self.buffer.clear();
        let read = self
            .reader
            .read_line(&mut self.buffer)
            .map_err(|error| match error.kind() {
                io::ErrorKind::InvalidData => QueryError::from(ProtocolError::InvalidEncoding),
                _ => QueryError::transport(TransportStage::Receive, &error),
            })?;
        if read == 0 {
            return Err(ProtocolError::UnexpectedEof { expected }.into());
        }
        let line = self.buffer.trim();
        trace!(line, "response line");
        Ok(line.to_owned())
    }
}

/// Interpretation of a line in a position where control lines may appear.
enum ControlLine<'a> {
    End,
    Error(&'a str),
    Data,
}

fn classify(line: &str) -> ControlLine<'_> {
    if line == END_MARKER {
        return ControlLine::End;
    }
    match line.strip_prefix(ERROR_PREFIX) {
        Some(message) => ControlLine::Error(message),
        None => ControlLine::Data,
    }
}

fn node_error(message: &str) -> QueryError {
    QueryError::Node(message.to_owned())
}

fn parse_header(line: &str) -> Result<usize, QueryError> {
    if let Some(message) = line.strip_prefix(ERROR_PREFIX) {
        return Err(node_error(message));
    }
    line.strip_prefix(COLUMNS_PREFIX)
        .and_then(|count| count.trim().parse::<usize>().ok())
        .ok_or(QueryError::Protocol(ProtocolError::InvalidResponseFormat))
}

/// Progress through a tabular response.
enum TabularState {
    ReadHeader,
    ReadColumns,
    ReadRowOrEnd,
    ReadRowRemainder { row: Vec<String> },
    Done,
}

/// Decodes `COLUMNS:<n>`, `n` names, rows of `n` cells and `END_RESULTS`.
///
/// An `ERROR:` line in place of the header or a row start aborts the decode
/// and discards rows already read. Cells after the first in a row are taken
/// verbatim, whatever they contain.
pub(crate) fn decode_table<R: BufRead>(
    lines: &mut LineReader<R>,
) -> Result<TabularResult, QueryError> {
    let mut state = TabularState::ReadHeader;
    let mut width = 0usize;
    // The declared count comes off the wire, so nothing is pre-allocated from it.
    let mut result = TabularResult::default();

    loop {
        state = match state {
            TabularState::ReadHeader => {
                width = parse_header(&lines.next_line("the column header")?)?;
                trace!(width, "column header");
                if width == 0 {
                    TabularState::ReadRowOrEnd
                } else {
                    TabularState::ReadColumns
                }
            }
            TabularState::ReadColumns => {
                result.columns.push(lines.next_line("a column name")?);
                if result.columns.len() == width {
                    TabularState::ReadRowOrEnd
                } else {
                    TabularState::ReadColumns
                }
            }
            TabularState::ReadRowOrEnd => {
                let line = lines.next_line("a row or the end of results")?;
                match classify(&line) {
                    ControlLine::End => TabularState::Done,
                    ControlLine::Error(message) => return Err(node_error(message)),
                    ControlLine::Data if width == 0 => {
                        return Err(ProtocolError::InvalidResponseFormat.into());
                    }
                    ControlLine::Data => {
                        let row = vec![line];
                        complete_or_continue(&mut result, row, width)
                    }
                }
            }
            TabularState::ReadRowRemainder { mut row } => {
                row.push(lines.next_line("a row cell")?);
                complete_or_continue(&mut result, row, width)
            }
            TabularState::Done => return Ok(result),
        };
    }
}

fn complete_or_continue(result: &mut TabularResult, row: Vec<String>, width: usize) -> TabularState {
    if row.len() == width {
        result.rows.push(row);
        TabularState::ReadRowOrEnd
    } else {
        TabularState::ReadRowRemainder { row }
    }
}

/// Progress through a name-list response.
enum ListState {
    ReadFirstOrError,
    ReadNameOrEnd,
    Done,
}

/// Decodes a `SHOW DATABASES` or `SHOW TABLES` response.
///
/// Only the first line may carry `ERROR:`. A first line equal to the node's
/// banner for `kind` is a header rather than a name. Later lines are names
/// until `END_RESULTS`.
pub(crate) fn decode_names<R: BufRead>(
    lines: &mut LineReader<R>,
    kind: NameListKind,
) -> Result<NameList, QueryError> {
    let mut state = ListState::ReadFirstOrError;
    let mut list = NameList::new(kind);

    loop {
        state = match state {
            ListState::ReadFirstOrError => {
                let line = lines.next_line("the first list line")?;
                match classify(&line) {
                    ControlLine::Error(message) => return Err(node_error(message)),
                    ControlLine::End => ListState::Done,
                    ControlLine::Data if line == kind.banner() => ListState::ReadNameOrEnd,
                    ControlLine::Data => {
                        list.names.push(line);
                        ListState::ReadNameOrEnd
                    }
                }
            }
            ListState::ReadNameOrEnd => {
                let line = lines.next_line("a name or the end of results")?;
                if line == END_MARKER {
                    ListState::Done
                } else {
                    list.names.push(line);
                    ListState::ReadNameOrEnd
                }
            }
            ListState::Done => return Ok(list),
        };
    }
}

/// Reads the single acknowledgement line; its content is ignored unless it is
/// an `ERROR:` line.
pub(crate) fn decode_acknowledgement<R: BufRead>(
    lines: &mut LineReader<R>,
) -> Result<(), QueryError> {
    let line = lines.next_line("the acknowledgement")?;
    match line.strip_prefix(ERROR_PREFIX) {
        Some(message) => Err(node_error(message)),
        None => Ok(()),
    }
}
