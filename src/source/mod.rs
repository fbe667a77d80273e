//! Backend boundary for the `jobs` and `edges` tables
//!
//! The service never talks to the backend directly; it goes through the
//! `GraphSource` trait so tests and demo mode can swap in an in-memory
//! implementation.

pub mod memory;
pub mod rest;

pub use memory::StaticSource;
pub use rest::RestSource;

use crate::graph::{JobNode, NodeId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when scanning backend tables
pub const FETCH_PAGE_SIZE: usize = 1_000;

/// Ceiling on nodes loaded into one process
pub const MAX_NODES: usize = 10_000;

/// Ceiling on edges loaded into one process
pub const MAX_EDGES: usize = 100_000;

/// Errors from the tabular backend
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON decode error
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Error reported by the backend itself
    #[error("Backend error: {0}")]
    Backend(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// One row of the `jobs` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRow {
    pub id: u64,
    pub title: String,
    pub industry: String,
    pub sector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
}

/// One row of the `edges` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub source: u64,
    pub target: u64,
}

impl From<JobRow> for JobNode {
    fn from(row: JobRow) -> Self {
        JobNode::new(NodeId::new(row.id), row.title, row.industry, row.sector)
            .with_details(row.description, row.skills, row.responsibilities)
    }
}

/// Boundary to the tabular backend holding the `jobs` and `edges` tables.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Fetch one page of job rows
    async fn fetch_jobs(&self, offset: usize, limit: usize) -> SourceResult<Vec<JobRow>>;

    /// Fetch one page of edge rows
    async fn fetch_edges(&self, offset: usize, limit: usize) -> SourceResult<Vec<EdgeRow>>;

    /// Persist a newly classified job row
    async fn persist_job(&self, row: &JobRow) -> SourceResult<()>;

    /// Persist a batch of edge rows
    async fn persist_edges(&self, rows: &[EdgeRow]) -> SourceResult<()>;
}
