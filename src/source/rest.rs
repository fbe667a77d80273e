//! RestSource — paginated table access over a REST backend

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{EdgeRow, GraphSource, JobRow, SourceError, SourceResult};

/// Table-oriented REST backend client.
///
/// Reads pages via `GET {base}/{table}?offset=..&limit=..` and writes rows
/// via `POST {base}/{table}`, with an optional bearer token.
pub struct RestSource {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl RestSource {
    /// Create a new client for the given backend base URL.
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        table: &str,
        offset: usize,
        limit: usize,
    ) -> SourceResult<Vec<T>> {
        let url = format!("{}/{}", self.base_url, table);
        let mut request = self
            .client
            .get(&url)
            .query(&[("offset", offset), ("limit", limit)]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::backend_error(table, response).await)
        }
    }

    async fn post_rows<T: Serialize + ?Sized>(&self, table: &str, body: &T) -> SourceResult<()> {
        let url = format!("{}/{}", self.base_url, table);
        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::backend_error(table, response).await)
        }
    }

    async fn backend_error(table: &str, response: reqwest::Response) -> SourceError {
        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({ "error": "Unknown error" }));
        let message = body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        SourceError::Backend(format!("{} returned {}: {}", table, status, message))
    }
}

#[async_trait]
impl GraphSource for RestSource {
    async fn fetch_jobs(&self, offset: usize, limit: usize) -> SourceResult<Vec<JobRow>> {
        self.get_page("jobs", offset, limit).await
    }

    async fn fetch_edges(&self, offset: usize, limit: usize) -> SourceResult<Vec<EdgeRow>> {
        self.get_page("edges", offset, limit).await
    }

    async fn persist_job(&self, row: &JobRow) -> SourceResult<()> {
        self.post_rows("jobs", row).await
    }

    async fn persist_edges(&self, rows: &[EdgeRow]) -> SourceResult<()> {
        self.post_rows("edges", rows).await
    }
}
