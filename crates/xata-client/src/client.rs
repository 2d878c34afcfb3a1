//! Reqwest-based client for the Xata REST API.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde_json::Value;

use crate::TRACING_TARGET;
use crate::config::{CONTROL_PLANE_URL, XataConfig};
use crate::error::{ApiError, ApiResult};
use crate::records::{BulkResponse, RecordResponse, UserRecord};
use crate::schema::{BranchDetails, ColumnDefinition, TableSchema};
use crate::search::{
    DeleteRequest, QueryRequest, QueryResponse, VectorSearchRequest, VectorSearchResponse,
};

/// Inner client that holds the HTTP client and configuration.
struct XataClientInner {
    http: Client,
    config: XataConfig,
}

/// Authenticated client for one Xata database branch.
///
/// Cloning is cheap; clones share the underlying HTTP connection pool.
/// Construction performs no network I/O, so a freshly built client may
/// still fail its first request.
#[derive(Clone)]
pub struct XataClient {
    inner: Arc<XataClientInner>,
}

impl std::fmt::Debug for XataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XataClient")
            .field("db_url", &self.inner.config.db_url.as_str())
            .finish_non_exhaustive()
    }
}

impl XataClient {
    /// Creates a new client from the given configuration.
    pub fn new(config: XataConfig) -> ApiResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ApiError::config("API key contains invalid header characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .default_headers(headers)
            .build()?;

        tracing::debug!(
            target: TRACING_TARGET,
            db_url = %config.db_url,
            "Created Xata client"
        );

        Ok(Self {
            inner: Arc::new(XataClientInner { http, config }),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &XataConfig {
        &self.inner.config
    }

    fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Branch-scoped base URL without a trailing slash.
    fn branch_url(&self) -> String {
        self.inner
            .config
            .db_url
            .as_str()
            .trim_end_matches('/')
            .to_owned()
    }

    fn table_url(&self, table: &str, suffix: &str) -> String {
        format!("{}/tables/{}{}", self.branch_url(), table, suffix)
    }

    /// Fetches the authenticated user from the control plane.
    ///
    /// This is the cheapest authenticated round-trip the API offers and is
    /// used as a connectivity probe.
    pub async fn get_user(&self) -> ApiResult<UserRecord> {
        let response = self
            .http()
            .get(format!("{}/user", CONTROL_PLANE_URL))
            .send()
            .await?;
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }

    /// Creates an empty table on the branch.
    pub async fn create_table(&self, table: &str) -> ApiResult<()> {
        let response = self.http().put(self.table_url(table, "")).send().await?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Deletes a table from the branch.
    pub async fn delete_table(&self, table: &str) -> ApiResult<()> {
        let response = self.http().delete(self.table_url(table, "")).send().await?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Replaces the schema of an existing table.
    pub async fn set_schema(&self, table: &str, schema: &TableSchema) -> ApiResult<()> {
        let response = self
            .http()
            .put(self.table_url(table, "/schema"))
            .json(schema)
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Lists the columns of a table.
    pub async fn get_columns(&self, table: &str) -> ApiResult<Vec<ColumnDefinition>> {
        let response = self
            .http()
            .get(self.table_url(table, "/columns"))
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let body: Value = response.json().await?;
        let columns = body
            .get("columns")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        Ok(serde_json::from_value(columns)?)
    }

    /// Fetches branch metadata, including the table listing.
    pub async fn branch_details(&self) -> ApiResult<BranchDetails> {
        let response = self.http().get(self.branch_url()).send().await?;
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }

    /// Inserts a record, letting the backend assign its identifier.
    ///
    /// Application-level failures are reported through the returned
    /// [`RecordResponse`], not as errors.
    pub async fn insert_record(
        &self,
        table: &str,
        record: &Value,
        columns: Option<&[String]>,
    ) -> ApiResult<RecordResponse> {
        let mut request = self.http().post(self.table_url(table, "/data"));
        if let Some(param) = columns_param(columns) {
            request = request.query(&[("columns", param)]);
        }
        let response = request.json(record).send().await?;
        record_response(response).await
    }

    /// Inserts a record under a caller-chosen identifier.
    ///
    /// With `create_only` set, the backend refuses to overwrite an existing
    /// record and reports the collision in the [`RecordResponse`].
    pub async fn insert_record_with_id(
        &self,
        table: &str,
        id: &str,
        record: &Value,
        create_only: bool,
        columns: Option<&[String]>,
    ) -> ApiResult<RecordResponse> {
        let mut request = self
            .http()
            .put(self.table_url(table, &format!("/data/{}", id)))
            .query(&[("createOnly", create_only.to_string())]);
        if let Some(param) = columns_param(columns) {
            request = request.query(&[("columns", param)]);
        }
        let response = request.json(record).send().await?;
        record_response(response).await
    }

    /// Writes a batch of records in one call.
    pub async fn bulk_insert(&self, table: &str, records: &[Value]) -> ApiResult<BulkResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            table = %table,
            count = records.len(),
            "Bulk insert"
        );

        let response = self
            .http()
            .post(self.table_url(table, "/bulk"))
            .json(&serde_json::json!({"records": records}))
            .send()
            .await?;
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }

    /// Runs a similarity search against a table's vector column.
    pub async fn vector_search(
        &self,
        table: &str,
        request: &VectorSearchRequest,
    ) -> ApiResult<VectorSearchResponse> {
        let response = self
            .http()
            .post(self.table_url(table, "/vectorSearch"))
            .json(request)
            .send()
            .await?;
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }

    /// Queries records by id list and/or filter expression.
    pub async fn query(&self, table: &str, request: &QueryRequest) -> ApiResult<QueryResponse> {
        let response = self
            .http()
            .post(self.table_url(table, "/query"))
            .json(request)
            .send()
            .await?;
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }

    /// Deletes records by id list and/or filter expression.
    pub async fn delete_records(&self, table: &str, request: &DeleteRequest) -> ApiResult<()> {
        let response = self
            .http()
            .post(self.table_url(table, "/data/delete"))
            .json(request)
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }
}

/// Joins a declared column list into the `columns` query parameter.
fn columns_param(columns: Option<&[String]>) -> Option<String> {
    columns.filter(|c| !c.is_empty()).map(|c| c.join(","))
}

/// Maps a non-success HTTP status to [`ApiError::Status`], extracting the
/// backend's `message` field when the body carries one.
async fn error_for_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = extract_message(&text).unwrap_or(text);

    tracing::error!(
        target: TRACING_TARGET,
        status = status.as_u16(),
        message = %message,
        "Request failed"
    );

    Err(ApiError::status(status.as_u16(), message))
}

/// Builds a [`RecordResponse`] from any completed exchange.
async fn record_response(response: Response) -> ApiResult<RecordResponse> {
    let status = response.status().as_u16();
    let text = response.text().await?;
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

    Ok(RecordResponse {
        status,
        id: body
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned),
        message: body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned),
    })
}

fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn client() -> XataClient {
        let config = XataConfig::new(
            Url::parse("https://ws-abc123.us-east-1.xata.sh/db/docs:main").unwrap(),
            "xau_test",
        );
        XataClient::new(config).unwrap()
    }

    #[test]
    fn test_table_url() {
        let client = client();
        assert_eq!(
            client.table_url("docs", "/data"),
            "https://ws-abc123.us-east-1.xata.sh/db/docs:main/tables/docs/data"
        );
        assert_eq!(
            client.table_url("docs", ""),
            "https://ws-abc123.us-east-1.xata.sh/db/docs:main/tables/docs"
        );
    }

    #[test]
    fn test_branch_url_trims_trailing_slash() {
        let config = XataConfig::new(
            Url::parse("https://ws-abc123.us-east-1.xata.sh/db/docs:main/").unwrap(),
            "xau_test",
        );
        let client = XataClient::new(config).unwrap();
        assert_eq!(
            client.branch_url(),
            "https://ws-abc123.us-east-1.xata.sh/db/docs:main"
        );
    }

    #[test]
    fn test_columns_param() {
        assert_eq!(columns_param(None), None);
        assert_eq!(columns_param(Some(&[])), None);
        assert_eq!(
            columns_param(Some(&["id".into(), "content".into()])),
            Some("id,content".to_owned())
        );
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_message(r#"{"message": "table not found"}"#),
            Some("table not found".to_owned())
        );
        assert_eq!(extract_message("not json"), None);
        assert_eq!(extract_message(r#"{"id": "rec_1"}"#), None);
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let config = XataConfig::new(
            Url::parse("https://ws-abc123.us-east-1.xata.sh/db/docs:main").unwrap(),
            "bad\nkey",
        );
        assert!(matches!(
            XataClient::new(config),
            Err(ApiError::Config(_))
        ));
    }
}
