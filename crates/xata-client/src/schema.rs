//! Table schema and branch wire types.

use serde::{Deserialize, Serialize};

/// Column data types supported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Fixed-dimension embedding vector.
    Vector,
    /// Free-form text.
    Text,
    /// JSON document.
    Json,
}

/// Parameters for a vector column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorColumnParams {
    /// Number of vector components.
    pub dimension: usize,
}

/// A single column in a table schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,

    /// Column data type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Vector parameters; present only for vector columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<VectorColumnParams>,
}

impl ColumnDefinition {
    /// Creates a vector column with the given dimension.
    pub fn vector(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Vector,
            vector: Some(VectorColumnParams { dimension }),
        }
    }

    /// Creates a text column.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Text,
            vector: None,
        }
    }

    /// Creates a JSON column.
    pub fn json(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Json,
            vector: None,
        }
    }
}

/// Schema payload for `PUT /tables/{table}/schema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Ordered column definitions.
    pub columns: Vec<ColumnDefinition>,
}

/// A table entry in the branch schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchTable {
    /// Table name.
    pub name: String,
}

/// Branch schema, as nested in [`BranchDetails`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchSchema {
    /// Tables declared on the branch.
    #[serde(default)]
    pub tables: Vec<BranchTable>,
}

/// Response of `GET {db_url}`, the branch metadata endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchDetails {
    /// Branch schema.
    #[serde(default)]
    pub schema: BranchSchema,
}

impl BranchDetails {
    /// Returns the names of all tables on the branch.
    pub fn table_names(&self) -> Vec<String> {
        self.schema.tables.iter().map(|t| t.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_column_serializes_dimension() {
        let column = ColumnDefinition::vector("embeddings", 8);
        let value = serde_json::to_value(&column).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "embeddings",
                "type": "vector",
                "vector": {"dimension": 8}
            })
        );
    }

    #[test]
    fn test_scalar_column_omits_vector_params() {
        let value = serde_json::to_value(ColumnDefinition::text("content")).unwrap();
        assert_eq!(value, serde_json::json!({"name": "content", "type": "text"}));

        let value = serde_json::to_value(ColumnDefinition::json("metadata")).unwrap();
        assert_eq!(value, serde_json::json!({"name": "metadata", "type": "json"}));
    }

    #[test]
    fn test_branch_details_table_names() {
        let details: BranchDetails = serde_json::from_value(serde_json::json!({
            "schema": {"tables": [{"name": "docs"}, {"name": "notes"}]}
        }))
        .unwrap();
        assert_eq!(details.table_names(), vec!["docs", "notes"]);
    }

    #[test]
    fn test_branch_details_defaults_empty() {
        let details: BranchDetails = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(details.table_names().is_empty());
    }
}
