//! Converts query outcomes into display-ready presentations.
//!
//! Presentation is independent of the output format: every renderer in
//! [`crate::output`] consumes the same [`Presentation`].

use querylink_client::{NameListKind, Outcome, QueryError, QueryResponse};
use serde::Serialize;

/// Message shown when the node acknowledges a non-result query.
pub const ACKNOWLEDGED_MESSAGE: &str = "Query executed successfully";

/// Display-ready result of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    /// Whether the query succeeded.
    pub success: bool,
    /// Failure category; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
    /// What to display.
    pub payload: Payload,
}

impl Presentation {
    fn table(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            success: true,
            category: None,
            payload: Payload::Table { columns, rows },
        }
    }

    fn message(text: impl Into<String>) -> Self {
        Self {
            success: true,
            category: None,
            payload: Payload::Message { text: text.into() },
        }
    }

    fn failure(category: ErrorCategory, text: String) -> Self {
        Self {
            success: false,
            category: Some(category),
            payload: Payload::Message { text },
        }
    }
}

/// Renderable body of a [`Presentation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// Column labels and rows of cells.
    Table {
        /// Column labels in display order.
        columns: Vec<String>,
        /// Rows, each holding one cell per column.
        rows: Vec<Vec<String>>,
    },
    /// Plain text.
    Message {
        /// Text to display.
        text: String,
    },
}

/// Source of a failed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The node could not be reached or the connection broke.
    Transport,
    /// The node's reply did not follow the line protocol.
    Protocol,
    /// The node reported an error for the query.
    Node,
}

impl From<&QueryError> for ErrorCategory {
    fn from(error: &QueryError) -> Self {
        match error {
            QueryError::Transport { .. } => Self::Transport,
            QueryError::Protocol(_) => Self::Protocol,
            QueryError::Node(_) => Self::Node,
        }
    }
}

/// Column label for a one-column name listing.
#[must_use]
pub const fn column_label(kind: NameListKind) -> &'static str {
    match kind {
        NameListKind::Databases => "Database Name",
        NameListKind::Tables => "Table Name",
    }
}

/// Maps an outcome onto what the user sees.
#[must_use]
pub fn present(outcome: Outcome) -> Presentation {
    match outcome {
        Ok(QueryResponse::Table(table)) => Presentation::table(table.columns, table.rows),
        Ok(QueryResponse::Names(list)) => Presentation::table(
            vec![column_label(list.kind).to_owned()],
            list.names.into_iter().map(|name| vec![name]).collect(),
        ),
        Ok(QueryResponse::Acknowledged) => Presentation::message(ACKNOWLEDGED_MESSAGE),
        Err(error) => Presentation::failure(ErrorCategory::from(&error), error.to_string()),
    }
}
