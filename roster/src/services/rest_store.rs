//! REST table store client
//!
//! Talks to a PostgREST endpoint (as exposed by Supabase):
//! - `GET  {base}/rest/v1/{table}?select=*&order={column}.{asc|desc}`
//! - `POST {base}/rest/v1/{table}` with a one-element JSON array and
//!   `Prefer: return=representation`, answered with the created rows
//!
//! Every request carries the access key both as `apikey` and as a bearer token.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use shared::{Component, NewStudent, StoreConfig, Student, component_debug};
use url::Url;

use crate::error::{StoreError, StoreResult};
use crate::traits::{OrderBy, TableStore};

/// Table store backed by a PostgREST HTTP API
#[derive(Clone)]
pub struct RestTableStore {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl RestTableStore {
    /// Create a client from validated store configuration
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StoreError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// REST endpoint for `table`
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.as_str().trim_end_matches('/'), table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.api_key).bearer_auth(&self.api_key)
    }

    /// Turn non-2xx responses into errors, keeping the body for diagnostics
    async fn ensure_success(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TableStore for RestTableStore {
    async fn select_all(&self, table: &str, order: &OrderBy) -> StoreResult<Vec<Student>> {
        let url = self.table_url(table);
        let order_value = order.to_query_value();
        component_debug!(Component::Store, "GET {} order={}", url, order_value);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("select", "*"), ("order", order_value.as_str())])
            .send()
            .await?;

        let rows: Vec<Student> = Self::ensure_success(response).await?.json().await?;
        Ok(rows)
    }

    async fn insert_one(&self, table: &str, record: &NewStudent) -> StoreResult<Student> {
        let url = self.table_url(table);
        component_debug!(Component::Store, "POST {}", url);

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await?;

        let rows: Vec<Student> = Self::ensure_success(response).await?.json().await?;
        rows.into_iter().next().ok_or_else(|| StoreError::EmptyInsertResponse {
            table: table.to_string(),
        })
    }
}
