#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod bulk;
mod client;
mod config;
mod error;

pub mod records;
pub mod schema;
pub mod search;

pub use bulk::BulkProcessor;
pub use client::XataClient;
pub use config::{DEFAULT_TIMEOUT_SECS, XataConfig};
pub use error::{ApiError, ApiResult};
pub use records::{BulkResponse, RecordResponse, UserRecord};
pub use schema::{BranchDetails, ColumnDefinition, ColumnType, TableSchema, VectorColumnParams};
pub use search::{
    DeleteRequest, IncludeField, QueryRequest, QueryResponse, VectorSearchRequest,
    VectorSearchResponse,
};

/// Tracing target for Xata client operations.
pub const TRACING_TARGET: &str = "xata_client";
