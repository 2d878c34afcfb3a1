//! Adapter error taxonomy.

use std::fmt;

use thiserror::Error;

/// Result type for vector store operations.
pub type VectorResult<T> = Result<T, VectorError>;

/// Errors surfaced by the vector store adapter.
///
/// Backend-originating failures are caught at the boundary of the operation
/// that triggered them and folded into the variant for that operation class,
/// with the table name and underlying cause in the message. Only usage
/// violations reflect caller bugs rather than runtime faults.
#[derive(Debug, Error)]
pub enum VectorError {
    /// Connection construction or health check failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Table create, drop, or schema update failed.
    #[error("provisioning error: {0}")]
    Provisioning(String),

    /// A row or batch failed to persist, or a delete failed.
    #[error("write error: {0}")]
    Write(String),

    /// Query execution failed.
    #[error("read error: {0}")]
    Read(String),

    /// The caller violated an operation's contract.
    #[error("usage error: {0}")]
    Usage(String),

    /// The operation or combination of arguments is not supported.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl VectorError {
    /// Creates a connection error.
    pub fn connection(cause: impl fmt::Display) -> Self {
        Self::Connection(cause.to_string())
    }

    /// Creates a provisioning error scoped to a table.
    pub fn provisioning(table: &str, cause: impl fmt::Display) -> Self {
        Self::Provisioning(format!("table '{table}': {cause}"))
    }

    /// Creates a write error scoped to a table.
    pub fn write(table: &str, cause: impl fmt::Display) -> Self {
        Self::Write(format!("table '{table}': {cause}"))
    }

    /// Creates a read error scoped to a table.
    pub fn read(table: &str, cause: impl fmt::Display) -> Self {
        Self::Read(format!("table '{table}': {cause}"))
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Creates an unsupported-operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_name_the_table() {
        let error = VectorError::provisioning("docs", "schema update failed");
        assert_eq!(
            error.to_string(),
            "provisioning error: table 'docs': schema update failed"
        );

        let error = VectorError::write("docs", "record already exists");
        assert!(error.to_string().contains("'docs'"));

        let error = VectorError::read("docs", "timeout");
        assert!(error.to_string().contains("'docs'"));
    }

    #[test]
    fn test_usage_display() {
        let error = VectorError::usage("delete requires at least one condition");
        assert_eq!(
            error.to_string(),
            "usage error: delete requires at least one condition"
        );
    }
}
