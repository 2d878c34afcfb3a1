//! Read-path routing and result normalization.
//!
//! A select is either a similarity search (exactly one `search_vector`
//! predicate drives it) or a plain retrieval (none does), never both.
//! The two backend response shapes are normalized into one [`RowSet`]
//! before projection.

use serde_json::Value;
use xata_client::{QueryResponse, VectorSearchResponse};

use crate::error::{VectorError, VectorResult};
use crate::filter::{ConditionSet, FilterCondition};
use crate::types::{QueryResult, TableField};

/// Execution plan for a select, decided from the condition list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReadPlan {
    /// Similarity search driven by a query embedding.
    Similarity {
        filter: Option<Value>,
        embedding: Vec<f32>,
        limit: Option<usize>,
    },
    /// Plain retrieval by id list and/or filter.
    Plain {
        ids: Option<Vec<String>>,
        filter: Option<Value>,
        limit: Option<usize>,
        offset: Option<usize>,
    },
}

impl ReadPlan {
    /// Decides the execution path from the partitioned conditions.
    ///
    /// The similarity path has no offset support in the backend; that
    /// combination is rejected rather than silently dropping the offset.
    pub(crate) fn build(
        conditions: Option<&[FilterCondition]>,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> VectorResult<Self> {
        let set = ConditionSet::partition(conditions);

        match set.vector {
            Some(condition) => {
                if offset.is_some() {
                    return Err(VectorError::unsupported(
                        "similarity search does not support an offset",
                    ));
                }
                Ok(Self::Similarity {
                    filter: set.filter,
                    embedding: as_embedding(&condition.value)?,
                    limit,
                })
            }
            None => Ok(Self::Plain {
                ids: set.ids,
                filter: set.filter,
                limit,
                offset,
            }),
        }
    }
}

/// Parses a query embedding out of a `search_vector` condition value.
fn as_embedding(value: &Value) -> VectorResult<Vec<f32>> {
    let items = value
        .as_array()
        .ok_or_else(|| VectorError::usage("search_vector condition value must be a numeric array"))?;

    items
        .iter()
        .map(|item| {
            item.as_f64().map(|f| f as f32).ok_or_else(|| {
                VectorError::usage("search_vector condition value must be a numeric array")
            })
        })
        .collect()
}

/// Normalized rows from either retrieval path.
///
/// The similarity response nests one batch per query embedding; only the
/// first batch is kept, since the adapter always sends a single embedding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RowSet {
    Similarity {
        ids: Vec<String>,
        documents: Vec<Option<String>>,
        metadatas: Vec<Option<Value>>,
        distances: Vec<f32>,
    },
    Plain {
        ids: Vec<String>,
        documents: Vec<Option<String>>,
        metadatas: Vec<Option<Value>>,
    },
}

fn first_batch<T>(batches: Vec<Vec<T>>) -> Vec<T> {
    batches.into_iter().next().unwrap_or_default()
}

impl RowSet {
    /// Unwraps the first batch of a similarity response.
    pub(crate) fn from_search(response: VectorSearchResponse) -> Self {
        Self::Similarity {
            ids: first_batch(response.ids),
            documents: first_batch(response.documents),
            metadatas: first_batch(response.metadatas),
            distances: first_batch(response.distances),
        }
    }

    /// Adopts a plain query response as-is.
    pub(crate) fn from_query(response: QueryResponse) -> Self {
        Self::Plain {
            ids: response.ids,
            documents: response.documents,
            metadatas: response.metadatas,
        }
    }

    /// Applies the caller's projection and emits the uniform result.
    ///
    /// The `embeddings` column is never emitted, even when named. The
    /// `distance` column is always emitted after a similarity search,
    /// whether or not the projection names it.
    pub(crate) fn project(self, columns: Option<&[String]>) -> QueryResult {
        let selected: Vec<TableField> = match columns {
            None => vec![TableField::Id, TableField::Content, TableField::Metadata],
            Some(columns) => columns
                .iter()
                .filter_map(|name| {
                    [TableField::Id, TableField::Content, TableField::Metadata]
                        .into_iter()
                        .find(|field| name == field.as_ref())
                })
                .collect(),
        };

        let (ids, documents, metadatas, distances) = match self {
            Self::Similarity {
                ids,
                documents,
                metadatas,
                distances,
            } => (ids, documents, metadatas, Some(distances)),
            Self::Plain {
                ids,
                documents,
                metadatas,
            } => (ids, documents, metadatas, None),
        };

        let mut header: Vec<String> = selected.iter().map(|f| f.as_ref().to_owned()).collect();
        if distances.is_some() {
            header.push(TableField::Distance.as_ref().to_owned());
        }

        let mut result = QueryResult::new(header);
        for (i, id) in ids.iter().enumerate() {
            let mut row: Vec<Value> = selected
                .iter()
                .map(|field| match field {
                    TableField::Id => Value::String(id.clone()),
                    TableField::Content => documents
                        .get(i)
                        .and_then(|d| d.as_ref())
                        .map(|d| Value::String(d.clone()))
                        .unwrap_or(Value::Null),
                    TableField::Metadata => metadatas
                        .get(i)
                        .and_then(|m| m.clone())
                        .unwrap_or(Value::Null),
                    _ => Value::Null,
                })
                .collect();

            if let Some(distances) = &distances {
                row.push(
                    distances
                        .get(i)
                        .map(|d| serde_json::json!(d))
                        .unwrap_or(Value::Null),
                );
            }

            result.rows.push(row);
        }

        result
    }
}
