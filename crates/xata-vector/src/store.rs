//! Xata-backed implementation of the vector store contract.

use std::sync::RwLock;

use async_trait::async_trait;
use xata_client::{
    BulkProcessor, ColumnDefinition, DeleteRequest, IncludeField, QueryRequest,
    VectorSearchRequest, XataClient,
};

use crate::TRACING_TARGET;
use crate::VectorStore;
use crate::config::XataVectorConfig;
use crate::error::{VectorError, VectorResult};
use crate::filter::{ConditionSet, FilterCondition};
use crate::query::{ReadPlan, RowSet};
use crate::schema::table_schema;
use crate::types::{ConnectionStatus, QueryResult, Row};
use crate::write::WritePlan;

/// Vector store over one Xata database branch.
///
/// Holds at most one client handle. The handle is established lazily and
/// reused; `connect`/`disconnect`/`check_connection` drive the two-state
/// lifecycle, and failed health checks force the disconnected state.
pub struct XataVectorStore {
    config: XataVectorConfig,
    client: RwLock<Option<XataClient>>,
}

impl XataVectorStore {
    /// Creates a disconnected store.
    pub fn new(config: XataVectorConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
        }
    }

    /// Gets the store configuration.
    pub fn config(&self) -> &XataVectorConfig {
        &self.config
    }

    /// True when a client handle is currently held.
    pub fn is_connected(&self) -> bool {
        self.client.read().expect("connection lock poisoned").is_some()
    }

    fn current_client(&self) -> Option<XataClient> {
        self.client.read().expect("connection lock poisoned").clone()
    }

    /// Returns the live handle, establishing it if absent.
    fn ensure_client(&self) -> VectorResult<XataClient> {
        if let Some(client) = self.current_client() {
            return Ok(client);
        }

        let client = XataClient::new(self.config.client_config()).map_err(|e| {
            tracing::error!(target: TRACING_TARGET, error = %e, "Failed to connect");
            VectorError::connection(e)
        })?;

        *self.client.write().expect("connection lock poisoned") = Some(client.clone());
        Ok(client)
    }
}

impl std::fmt::Debug for XataVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XataVectorStore")
            .field("db_url", &self.config.db_url.as_str())
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[async_trait]
impl VectorStore for XataVectorStore {
    /// Establishes the client handle; a no-op when already connected.
    async fn connect(&self) -> ConnectionStatus {
        if self.is_connected() {
            return ConnectionStatus::healthy();
        }

        match self.ensure_client() {
            Ok(_) => ConnectionStatus::healthy(),
            Err(e) => ConnectionStatus::failed(e.to_string()),
        }
    }

    /// Releases the client handle; a no-op when already disconnected.
    fn disconnect(&self) {
        self.client.write().expect("connection lock poisoned").take();
    }

    /// Probes the backend with an authenticated identity fetch.
    ///
    /// A connection opened solely for the probe is closed again afterward;
    /// a failed probe forces the disconnected state regardless of how the
    /// connection came to be.
    async fn check_connection(&self) -> ConnectionStatus {
        let need_to_close = !self.is_connected();

        let client = match self.ensure_client() {
            Ok(client) => client,
            Err(e) => return ConnectionStatus::failed(e.to_string()),
        };

        match client.get_user().await {
            Ok(_) => {
                if need_to_close {
                    self.disconnect();
                }
                ConnectionStatus::healthy()
            }
            Err(e) => {
                tracing::error!(target: TRACING_TARGET, error = %e, "Health check failed");
                self.disconnect();
                ConnectionStatus::failed(e.to_string())
            }
        }
    }

    /// Creates a table and sets its fixed three-column schema.
    ///
    /// No rollback on partial failure: a failed schema step leaves the
    /// created-but-unschemaed table in place.
    async fn create_table(&self, table: &str) -> VectorResult<()> {
        tracing::debug!(target: TRACING_TARGET, table = %table, "Creating table");
        let client = self.ensure_client()?;

        client
            .create_table(table)
            .await
            .map_err(|e| VectorError::provisioning(table, e))?;
        client
            .set_schema(table, &table_schema(self.config.dimension))
            .await
            .map_err(|e| VectorError::provisioning(table, e))?;
        Ok(())
    }

    /// Drops a table.
    async fn drop_table(&self, table: &str) -> VectorResult<()> {
        tracing::debug!(target: TRACING_TARGET, table = %table, "Dropping table");
        let client = self.ensure_client()?;

        client
            .delete_table(table)
            .await
            .map_err(|e| VectorError::provisioning(table, e))
    }

    /// Lists the tables on the branch.
    async fn get_tables(&self) -> VectorResult<Vec<String>> {
        let client = self.ensure_client()?;
        let details = client
            .branch_details()
            .await
            .map_err(|e| VectorError::Read(format!("failed to list tables: {e}")))?;
        Ok(details.table_names())
    }

    /// Describes a table's columns.
    ///
    /// Validates that the table exists, then answers with the fixed schema
    /// every provisioned table shares.
    async fn get_columns(&self, table: &str) -> VectorResult<Vec<ColumnDefinition>> {
        let client = self.ensure_client()?;
        client
            .get_columns(table)
            .await
            .map_err(|e| VectorError::read(table, e))?;
        Ok(table_schema(self.config.dimension).columns)
    }

    /// Inserts a batch of rows, routed by batch shape.
    async fn insert(
        &self,
        table: &str,
        rows: Vec<Row>,
        columns: Option<Vec<String>>,
    ) -> VectorResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            table = %table,
            count = rows.len(),
            "Inserting rows"
        );

        let plan = WritePlan::classify(table, rows, columns.as_deref())?;
        if plan == WritePlan::Skip {
            return Ok(());
        }

        let client = self.ensure_client()?;
        match plan {
            WritePlan::Skip => Ok(()),
            WritePlan::Bulk(records) => {
                let mut processor = BulkProcessor::new(client);
                processor.put_records(table, records);
                processor
                    .flush_queue()
                    .await
                    .map_err(|e| VectorError::write(table, e))
            }
            WritePlan::CreateOnly { id, record } => {
                let response = client
                    .insert_record_with_id(table, &id, &record, true, columns.as_deref())
                    .await
                    .map_err(|e| VectorError::write(table, e))?;
                if !response.is_success() {
                    return Err(VectorError::write(table, response.message()));
                }
                Ok(())
            }
            WritePlan::Append(record) => {
                let response = client
                    .insert_record(table, &record, columns.as_deref())
                    .await
                    .map_err(|e| VectorError::write(table, e))?;
                if !response.is_success() {
                    return Err(VectorError::write(table, response.message()));
                }
                Ok(())
            }
        }
    }

    /// Selects rows, routed between similarity search and plain retrieval.
    async fn select(
        &self,
        table: &str,
        columns: Option<Vec<String>>,
        conditions: Option<Vec<FilterCondition>>,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> VectorResult<QueryResult> {
        tracing::debug!(target: TRACING_TARGET, table = %table, "Selecting rows");

        let plan = ReadPlan::build(conditions.as_deref(), offset, limit)?;
        let client = self.ensure_client()?;

        let rows = match plan {
            ReadPlan::Similarity {
                filter,
                embedding,
                limit,
            } => {
                let mut request = VectorSearchRequest::single(embedding).with_include(vec![
                    IncludeField::Metadatas,
                    IncludeField::Documents,
                    IncludeField::Distances,
                ]);
                if let Some(filter) = filter {
                    request = request.with_filter(filter);
                }
                if let Some(limit) = limit {
                    request = request.with_n_results(limit);
                }

                let response = client
                    .vector_search(table, &request)
                    .await
                    .map_err(|e| VectorError::read(table, e))?;
                RowSet::from_search(response)
            }
            ReadPlan::Plain {
                ids,
                filter,
                limit,
                offset,
            } => {
                let request = QueryRequest {
                    ids,
                    filter,
                    limit,
                    offset,
                };
                let response = client
                    .query(table, &request)
                    .await
                    .map_err(|e| VectorError::read(table, e))?;
                RowSet::from_query(response)
            }
        };

        Ok(rows.project(columns.as_deref()))
    }

    /// Deletes rows matching the given conditions.
    ///
    /// At least one id or metadata condition is required; an unconstrained
    /// delete is a caller contract violation, not a delete-all.
    async fn delete(&self, table: &str, conditions: Vec<FilterCondition>) -> VectorResult<()> {
        let set = ConditionSet::partition(Some(&conditions));
        if set.is_unconstrained() {
            return Err(VectorError::usage(
                "delete requires at least one id or metadata condition",
            ));
        }

        tracing::debug!(target: TRACING_TARGET, table = %table, "Deleting rows");

        let client = self.ensure_client()?;
        client
            .delete_records(
                table,
                &DeleteRequest {
                    ids: set.ids,
                    filter: set.filter,
                },
            )
            .await
            .map_err(|e| VectorError::write(table, e))
    }

    /// Not implemented by this adapter.
    async fn update(
        &self,
        _table: &str,
        _rows: Vec<Row>,
        _columns: Option<Vec<String>>,
    ) -> VectorResult<()> {
        Err(VectorError::unsupported(
            "update is not implemented for the Xata store",
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::filter::FilterOperator;

    fn store() -> XataVectorStore {
        let config = XataVectorConfig::new(
            Url::parse("https://ws-abc123.us-east-1.xata.sh/db/docs:main").unwrap(),
            "xau_test",
        );
        XataVectorStore::new(config)
    }

    #[tokio::test]
    async fn test_connect_is_idempotent() {
        let store = store();
        assert!(!store.is_connected());

        let status = store.connect().await;
        assert!(status.connected);
        assert!(store.is_connected());

        // A second connect reuses the handle without side effects.
        let status = store.connect().await;
        assert!(status.connected);
        assert!(store.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect_is_a_noop_when_disconnected() {
        let store = store();
        store.disconnect();
        assert!(!store.is_connected());

        store.connect().await;
        store.disconnect();
        assert!(!store.is_connected());
        store.disconnect();
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn test_empty_insert_succeeds_without_a_connection() {
        let store = store();
        store.insert("docs", Vec::new(), None).await.unwrap();
        // No backend call was needed, so no handle was established.
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn test_unconstrained_delete_is_a_usage_error() {
        let store = store();
        let error = store.delete("docs", Vec::new()).await.unwrap_err();
        assert!(matches!(error, VectorError::Usage(_)));
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn test_vector_only_delete_is_a_usage_error() {
        let store = store();
        let conditions = vec![FilterCondition::new(
            "search_vector",
            FilterOperator::Equal,
            json!([0.1, 0.2]),
        )];
        let error = store.delete("docs", conditions).await.unwrap_err();
        assert!(matches!(error, VectorError::Usage(_)));
    }

    #[tokio::test]
    async fn test_update_is_unsupported() {
        let store = store();
        let error = store.update("docs", Vec::new(), None).await.unwrap_err();
        assert!(matches!(error, VectorError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_similarity_select_with_offset_is_rejected_before_any_call() {
        let store = store();
        let conditions = vec![FilterCondition::new(
            "search_vector",
            FilterOperator::Equal,
            json!([0.1, 0.2]),
        )];
        let error = store
            .select("docs", None, Some(conditions), Some(10), Some(5))
            .await
            .unwrap_err();
        assert!(matches!(error, VectorError::Unsupported(_)));
        assert!(!store.is_connected());
    }
}
