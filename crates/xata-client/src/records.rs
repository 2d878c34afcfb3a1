//! Record write responses and identity types.

use serde::{Deserialize, Serialize};

/// Outcome of a single-record write.
///
/// The backend reports application-level failures (id collisions, schema
/// violations) inside an otherwise completed HTTP exchange; this type
/// carries both the HTTP status and the embedded message so callers can
/// treat them uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    /// HTTP status of the exchange.
    pub status: u16,

    /// Identifier of the written record, when the write succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Backend message, populated on application-level failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecordResponse {
    /// True when the exchange completed with a success status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the backend message, or a generic fallback.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("unknown error")
    }
}

/// Outcome of a bulk write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkResponse {
    /// Identifiers assigned to the written records.
    #[serde(default, rename = "recordIDs")]
    pub record_ids: Vec<String>,
}

/// The authenticated user, returned by the control-plane identity endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User identifier.
    pub id: String,

    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_bounds() {
        let ok = RecordResponse {
            status: 201,
            id: Some("rec_1".into()),
            message: None,
        };
        assert!(ok.is_success());

        let conflict = RecordResponse {
            status: 422,
            id: None,
            message: Some("record already exists".into()),
        };
        assert!(!conflict.is_success());
        assert_eq!(conflict.message(), "record already exists");
    }

    #[test]
    fn test_message_fallback() {
        let response = RecordResponse {
            status: 500,
            id: None,
            message: None,
        };
        assert_eq!(response.message(), "unknown error");
    }

    #[test]
    fn test_bulk_response_field_name() {
        let response: BulkResponse =
            serde_json::from_value(serde_json::json!({"recordIDs": ["a", "b"]})).unwrap();
        assert_eq!(response.record_ids, vec!["a", "b"]);
    }
}
