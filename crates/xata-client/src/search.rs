//! Retrieval request and response wire types.
//!
//! The similarity endpoint answers one result batch per query embedding,
//! so its arrays are nested one level deeper than the plain query
//! endpoint's. Callers that send a single embedding read the first batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result fields a similarity search can be asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeField {
    /// Text content of each match.
    Documents,
    /// JSON metadata of each match.
    Metadatas,
    /// Distance from the query embedding.
    Distances,
}

/// Request body for `POST /tables/{table}/vectorSearch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSearchRequest {
    /// Query embeddings; the response carries one batch per entry.
    pub query_embeddings: Vec<Vec<f32>>,

    /// Native filter expression restricting the candidate set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,

    /// Maximum number of matches per batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_results: Option<usize>,

    /// Fields to include alongside ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<IncludeField>,
}

impl VectorSearchRequest {
    /// Creates a request for a single query embedding.
    pub fn single(embedding: Vec<f32>) -> Self {
        Self {
            query_embeddings: vec![embedding],
            filter: None,
            n_results: None,
            include: Vec::new(),
        }
    }

    /// Sets the native filter expression.
    #[must_use]
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the per-batch result cap.
    #[must_use]
    pub fn with_n_results(mut self, n_results: usize) -> Self {
        self.n_results = Some(n_results);
        self
    }

    /// Sets the included result fields.
    #[must_use]
    pub fn with_include(mut self, include: Vec<IncludeField>) -> Self {
        self.include = include;
        self
    }
}

/// Response of a similarity search: one batch per query embedding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSearchResponse {
    /// Matched record ids, per batch.
    #[serde(default)]
    pub ids: Vec<Vec<String>>,

    /// Matched text content, per batch.
    #[serde(default)]
    pub documents: Vec<Vec<Option<String>>>,

    /// Matched metadata, per batch.
    #[serde(default)]
    pub metadatas: Vec<Vec<Option<Value>>>,

    /// Distances from the query embedding, per batch.
    #[serde(default)]
    pub distances: Vec<Vec<f32>>,
}

/// Request body for `POST /tables/{table}/query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Restrict the result to these record ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,

    /// Native filter expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,

    /// Maximum number of records to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Number of records to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

/// Response of a plain query: flat arrays, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Record ids.
    #[serde(default)]
    pub ids: Vec<String>,

    /// Text content, aligned with `ids`.
    #[serde(default)]
    pub documents: Vec<Option<String>>,

    /// JSON metadata, aligned with `ids`.
    #[serde(default)]
    pub metadatas: Vec<Option<Value>>,
}

/// Request body for record deletion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Delete these record ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,

    /// Delete records matching this native filter expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_search_request_shape() {
        let request = VectorSearchRequest::single(vec![0.1, 0.2])
            .with_filter(json!({"kind": {"$is": "note"}}))
            .with_n_results(5)
            .with_include(vec![
                IncludeField::Metadatas,
                IncludeField::Documents,
                IncludeField::Distances,
            ]);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "query_embeddings": [[0.1, 0.2]],
                "filter": {"kind": {"$is": "note"}},
                "n_results": 5,
                "include": ["metadatas", "documents", "distances"]
            })
        );
    }

    #[test]
    fn test_search_request_omits_absent_fields() {
        let value = serde_json::to_value(VectorSearchRequest::single(vec![0.5])).unwrap();
        assert_eq!(value, json!({"query_embeddings": [[0.5]]}));
    }

    #[test]
    fn test_search_response_nested_batches() {
        let response: VectorSearchResponse = serde_json::from_value(json!({
            "ids": [["a", "b"]],
            "documents": [["first", null]],
            "metadatas": [[{"k": 1}, null]],
            "distances": [[0.1, 0.4]]
        }))
        .unwrap();

        assert_eq!(response.ids[0], vec!["a", "b"]);
        assert_eq!(response.documents[0][1], None);
        assert_eq!(response.distances[0][1], 0.4);
    }

    #[test]
    fn test_query_response_defaults() {
        let response: QueryResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.ids.is_empty());
        assert!(response.documents.is_empty());
    }

    #[test]
    fn test_query_request_omits_absent_fields() {
        let value = serde_json::to_value(QueryRequest::default()).unwrap();
        assert_eq!(value, json!({}));
    }
}
