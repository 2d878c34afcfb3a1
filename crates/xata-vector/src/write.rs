//! Write-path routing.
//!
//! An insert batch is dispatched across three backend call shapes by its
//! cardinality and by whether a singleton row carries a declared id. The
//! three paths must leave equivalent end states for equivalent inputs;
//! only the id-assignment responsibility differs.

use serde_json::Value;

use crate::error::{VectorError, VectorResult};
use crate::types::{Row, TableField};

/// Execution plan for an insert, decided from the batch shape.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WritePlan {
    /// Empty batch: succeed without touching the backend.
    Skip,
    /// Multi-row batch: queue everything and flush once.
    Bulk(Vec<Value>),
    /// Singleton with a declared id: create-only write under that id.
    CreateOnly { id: String, record: Value },
    /// Singleton without a declared id: the backend assigns identity.
    Append(Value),
}

impl WritePlan {
    /// Classifies a batch, deserializing each row's metadata first.
    ///
    /// The create-only path is taken only when the row carries an `id`
    /// value AND the declared column list names `id`; a stray `id` field
    /// without the declaration rides along as ordinary data.
    pub(crate) fn classify(
        table: &str,
        rows: Vec<Row>,
        columns: Option<&[String]>,
    ) -> VectorResult<Self> {
        let mut rows = rows;
        for row in &mut rows {
            normalize_metadata(table, row)?;
        }

        if rows.len() > 1 {
            return Ok(Self::Bulk(rows.into_iter().map(Value::Object).collect()));
        }

        let mut row = match rows.pop() {
            Some(row) => row,
            None => return Ok(Self::Skip),
        };

        let id_declared = columns
            .map(|columns| columns.iter().any(|c| c == TableField::Id.as_ref()))
            .unwrap_or(false);

        if id_declared && row.contains_key(TableField::Id.as_ref()) {
            let id = match row.remove(TableField::Id.as_ref()) {
                Some(Value::String(id)) => id,
                Some(Value::Number(id)) => id.to_string(),
                _ => {
                    return Err(VectorError::write(
                        table,
                        "row id must be a string or number",
                    ));
                }
            };
            Ok(Self::CreateOnly {
                id,
                record: Value::Object(row),
            })
        } else {
            Ok(Self::Append(Value::Object(row)))
        }
    }
}

/// Deserializes a row's metadata from its JSON-string wire form.
///
/// Input rows always carry metadata as serialized JSON text; the backend
/// expects the structured value.
fn normalize_metadata(table: &str, row: &mut Row) -> VectorResult<()> {
    let field = TableField::Metadata.as_ref();
    let serialized = match row.get(field) {
        Some(Value::String(s)) => s.clone(),
        _ => return Ok(()),
    };

    let parsed: Value = serde_json::from_str(&serialized)
        .map_err(|e| VectorError::write(table, format!("invalid metadata JSON: {e}")))?;
    row.insert(field.to_owned(), parsed);
    Ok(())
}
