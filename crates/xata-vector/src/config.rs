//! Adapter configuration.

use serde::{Deserialize, Serialize};
use url::Url;
use xata_client::XataConfig;

/// Default embedding dimension used when provisioning tables.
pub const DEFAULT_DIMENSION: usize = 8;

/// Configuration for the Xata vector store.
///
/// Two required settings and one optional one: the branch-scoped database
/// URL, the API key, and the embedding dimension applied to newly created
/// tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XataVectorConfig {
    /// Branch-scoped database URL.
    pub db_url: Url,

    /// Personal API key.
    pub api_key: String,

    /// Embedding dimension for provisioned tables.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}

impl XataVectorConfig {
    /// Creates a configuration with the default embedding dimension.
    pub fn new(db_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            db_url,
            api_key: api_key.into(),
            dimension: DEFAULT_DIMENSION,
        }
    }

    /// Sets the embedding dimension.
    #[must_use]
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Derives the client configuration for this adapter.
    pub(crate) fn client_config(&self) -> XataConfig {
        XataConfig::new(self.db_url.clone(), self.api_key.clone())
    }
}
