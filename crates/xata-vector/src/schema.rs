//! Fixed table schema.
//!
//! Every table the adapter provisions carries the same three columns, in
//! this order: the embedding vector, the text content, and the JSON
//! metadata document.

use xata_client::{ColumnDefinition, TableSchema};

use crate::types::TableField;

/// Builds the fixed three-column schema for the given embedding dimension.
pub fn table_schema(dimension: usize) -> TableSchema {
    TableSchema {
        columns: vec![
            ColumnDefinition::vector(TableField::Embeddings.as_ref(), dimension),
            ColumnDefinition::text(TableField::Content.as_ref()),
            ColumnDefinition::json(TableField::Metadata.as_ref()),
        ],
    }
}

#[cfg(test)]
mod tests {
    use xata_client::ColumnType;

    use super::*;

    #[test]
    fn test_fixed_columns_in_order() {
        let schema = table_schema(8);
        let names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["embeddings", "content", "metadata"]);

        assert_eq!(schema.columns[0].column_type, ColumnType::Vector);
        assert_eq!(schema.columns[1].column_type, ColumnType::Text);
        assert_eq!(schema.columns[2].column_type, ColumnType::Json);
    }

    #[test]
    fn test_dimension_is_applied() {
        let schema = table_schema(1536);
        assert_eq!(schema.columns[0].vector.unwrap().dimension, 1536);
    }
}
