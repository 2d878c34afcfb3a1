//! Uniform row, result, and status types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Reserved column names of the uniform vector-store schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TableField {
    /// Record identifier.
    Id,
    /// Text content.
    Content,
    /// JSON metadata.
    Metadata,
    /// Stored embedding vector; never projected into results.
    Embeddings,
    /// Pseudo-column carrying the query embedding of a similarity search.
    SearchVector,
    /// Distance from the query embedding; present only after a similarity
    /// search.
    Distance,
}

/// A row handed to `insert`: column name to value.
///
/// `metadata` arrives as a JSON string on the wire and is deserialized
/// before transmission to the backend.
pub type Row = serde_json::Map<String, Value>;

/// Uniform tabular result of a `select`.
///
/// Row-major; `rows[i][j]` belongs to `columns[j]`. Column order follows
/// the caller's projection. Row order is backend-defined and preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Emitted column names, in projection order.
    pub columns: Vec<String>,

    /// Result rows, index-aligned with `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Creates an empty result with the given column header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name, if emitted.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Outcome of a connection-state operation: a flag plus an optional
/// failure message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Whether the adapter considers itself connected and usable.
    pub connected: bool,

    /// Cause of the failure, when `connected` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConnectionStatus {
    /// Creates a healthy status.
    pub fn healthy() -> Self {
        Self {
            connected: true,
            message: None,
        }
    }

    /// Creates a failed status with the given cause.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            connected: false,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_field_names() {
        assert_eq!(TableField::Id.as_ref(), "id");
        assert_eq!(TableField::SearchVector.as_ref(), "search_vector");
        assert_eq!(TableField::Distance.as_ref(), "distance");
        assert_eq!(
            TableField::from_str("embeddings").unwrap(),
            TableField::Embeddings
        );
    }

    #[test]
    fn test_query_result_column_index() {
        let result = QueryResult::new(vec!["id".into(), "content".into()]);
        assert_eq!(result.column_index("content"), Some(1));
        assert_eq!(result.column_index("metadata"), None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_connection_status() {
        assert!(ConnectionStatus::healthy().connected);
        let failed = ConnectionStatus::failed("refused");
        assert!(!failed.connected);
        assert_eq!(failed.message.as_deref(), Some("refused"));
    }
}
