//! Structured results produced by a successful exchange.

use serde::Serialize;

/// Column names and rows of a `SELECT` result.
///
/// Every row holds exactly as many cells as there are columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TabularResult {
    /// Column names in declaration order.
    pub columns: Vec<String>,
    /// Rows in arrival order.
    pub rows: Vec<Vec<String>>,
}

/// Which catalogue a name list describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameListKind {
    /// Result of `SHOW DATABASES`.
    Databases,
    /// Result of `SHOW TABLES`.
    Tables,
}

impl NameListKind {
    /// Header line the node writes ahead of the names.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::Databases => "Databases:",
            Self::Tables => "Tables:",
        }
    }
}

/// Names returned by `SHOW DATABASES` or `SHOW TABLES`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameList {
    /// Catalogue the names belong to.
    pub kind: NameListKind,
    /// Names in arrival order.
    pub names: Vec<String>,
}

impl NameList {
    /// Creates an empty list of the given kind.
    #[must_use]
    pub const fn new(kind: NameListKind) -> Self {
        Self {
            kind,
            names: Vec::new(),
        }
    }
}

/// Successful payload of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResponse {
    /// Rows from a `SELECT`.
    Table(TabularResult),
    /// Names from a `SHOW` listing.
    Names(NameList),
    /// The node accepted a statement that returns no rows.
    Acknowledged,
}
