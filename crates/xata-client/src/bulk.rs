//! Queue-and-flush primitive for batched record writes.

use std::collections::HashMap;

use serde_json::Value;

use crate::TRACING_TARGET;
use crate::client::XataClient;
use crate::error::ApiResult;

/// Batches record writes into one bulk call per table.
///
/// Records accumulate in per-table queues until [`flush_queue`] is called.
/// A flush issues one bulk request per queued table and stops at the first
/// failure, leaving the failed table's records (and any tables not yet
/// flushed) in the queue.
///
/// [`flush_queue`]: BulkProcessor::flush_queue
#[derive(Debug)]
pub struct BulkProcessor {
    client: XataClient,
    queues: HashMap<String, Vec<Value>>,
}

impl BulkProcessor {
    /// Creates a processor with empty queues.
    pub fn new(client: XataClient) -> Self {
        Self {
            client,
            queues: HashMap::new(),
        }
    }

    /// Enqueues a single record for the given table.
    pub fn put_record(&mut self, table: impl Into<String>, record: Value) {
        self.queues.entry(table.into()).or_default().push(record);
    }

    /// Enqueues a batch of records for the given table.
    pub fn put_records(&mut self, table: impl Into<String>, records: Vec<Value>) {
        self.queues.entry(table.into()).or_default().extend(records);
    }

    /// Number of records currently queued across all tables.
    pub fn queued(&self) -> usize {
        self.queues.values().map(Vec::len).sum()
    }

    /// Flushes every queue, one bulk call per table, failing fast.
    pub async fn flush_queue(&mut self) -> ApiResult<()> {
        let tables: Vec<String> = self.queues.keys().cloned().collect();

        for table in tables {
            let records = self.queues.get(&table).cloned().unwrap_or_default();
            if records.is_empty() {
                self.queues.remove(&table);
                continue;
            }

            tracing::debug!(
                target: TRACING_TARGET,
                table = %table,
                count = records.len(),
                "Flushing bulk queue"
            );

            self.client.bulk_insert(&table, &records).await?;
            self.queues.remove(&table);
        }

        Ok(())
    }
}
