#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod error;
mod filter;
mod query;
mod schema;
mod store;
mod types;
mod write;

use async_trait::async_trait;
pub use xata_client::{ColumnDefinition, ColumnType, TableSchema, VectorColumnParams};

pub use config::{DEFAULT_DIMENSION, XataVectorConfig};
pub use error::{VectorError, VectorResult};
pub use filter::{ConditionSet, FilterCondition, FilterOperator, translate_filter};
pub use schema::table_schema;
pub use store::XataVectorStore;
pub use types::{ConnectionStatus, QueryResult, Row, TableField};

/// Tracing target for vector store operations.
pub const TRACING_TARGET: &str = "xata_vector";

/// The generic vector-store contract this adapter implements.
///
/// Tables carry the fixed embedding/content/metadata schema. A select is a
/// similarity search when its conditions include a `search_vector`
/// predicate and a plain retrieval otherwise; results are uniform rows
/// either way.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Establishes the backend connection; idempotent.
    async fn connect(&self) -> ConnectionStatus;

    /// Releases the backend connection; a no-op when already disconnected.
    fn disconnect(&self);

    /// Verifies backend reachability with a cheap authenticated probe.
    async fn check_connection(&self) -> ConnectionStatus;

    /// Creates a table with the fixed three-column schema.
    async fn create_table(&self, table: &str) -> VectorResult<()>;

    /// Drops a table.
    async fn drop_table(&self, table: &str) -> VectorResult<()>;

    /// Lists table names.
    async fn get_tables(&self) -> VectorResult<Vec<String>>;

    /// Describes a table's columns, validating that it exists.
    async fn get_columns(&self, table: &str) -> VectorResult<Vec<ColumnDefinition>>;

    /// Inserts a batch of rows.
    async fn insert(
        &self,
        table: &str,
        rows: Vec<Row>,
        columns: Option<Vec<String>>,
    ) -> VectorResult<()>;

    /// Selects rows with optional projection, conditions, offset, and
    /// limit.
    async fn select(
        &self,
        table: &str,
        columns: Option<Vec<String>>,
        conditions: Option<Vec<FilterCondition>>,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> VectorResult<QueryResult>;

    /// Deletes rows matching at least one condition.
    async fn delete(&self, table: &str, conditions: Vec<FilterCondition>) -> VectorResult<()>;

    /// Updates rows in place. Not implemented by every backend.
    async fn update(
        &self,
        table: &str,
        rows: Vec<Row>,
        columns: Option<Vec<String>>,
    ) -> VectorResult<()>;
}
