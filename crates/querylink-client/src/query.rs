//! Query text and the decoding mode derived from its leading keywords.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Response grammar expected for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// `SELECT` queries: a column header followed by rows of cells.
    Tabular,
    /// `SHOW DATABASES`: one database name per line.
    DatabaseList,
    /// `SHOW TABLES`: one table name per line.
    TableList,
    /// Anything else: a single acknowledgement line.
    Acknowledge,
}

impl QueryMode {
    /// Classifies query text by its leading keywords, ignoring ASCII case.
    ///
    /// Each keyword sequence is a literal prefix, so `SHOW  DATABASES` with a
    /// doubled space is not a listing.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let text = text.trim_start();
        if starts_with_ignore_case(text, "SELECT") {
            Self::Tabular
        } else if starts_with_ignore_case(text, "SHOW DATABASES") {
            Self::DatabaseList
        } else if starts_with_ignore_case(text, "SHOW TABLES") {
            Self::TableList
        } else {
            Self::Acknowledge
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Tabular => "tabular",
            Self::DatabaseList => "database_list",
            Self::TableList => "table_list",
            Self::Acknowledge => "acknowledge",
        };
        formatter.write_str(label)
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// A trimmed, non-empty query together with its decoding mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    mode: QueryMode,
}

impl Query {
    /// Trims `text` and classifies it.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyQuery`] when nothing but whitespace was supplied.
    pub fn new(text: impl AsRef<str>) -> Result<Self, EmptyQuery> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(EmptyQuery);
        }
        Ok(Self {
            mode: QueryMode::classify(text),
            text: text.to_owned(),
        })
    }

    /// The query text as sent to the node, without the trailing newline.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// The decoding mode selected for this query.
    #[must_use]
    pub const fn mode(&self) -> QueryMode {
        self.mode
    }
}

impl FromStr for Query {
    type Err = EmptyQuery;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::new(input)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.text)
    }
}

/// Raised when a query contains no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please enter a SQL query")]
pub struct EmptyQuery;
