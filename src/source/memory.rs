//! StaticSource — in-memory backend for tests and demo mode

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{EdgeRow, GraphSource, JobRow, SourceResult};

/// In-memory `GraphSource` backed by plain vectors.
///
/// Clones share the same underlying rows, so a test can keep a handle to
/// inspect what the service persisted.
#[derive(Clone, Default)]
pub struct StaticSource {
    jobs: Arc<Mutex<Vec<JobRow>>>,
    edges: Arc<Mutex<Vec<EdgeRow>>>,
}

impl StaticSource {
    pub fn new(jobs: Vec<JobRow>, edges: Vec<EdgeRow>) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(jobs)),
            edges: Arc::new(Mutex::new(edges)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of the job rows
    pub fn job_rows(&self) -> Vec<JobRow> {
        self.jobs.lock().expect("source lock poisoned").clone()
    }

    /// Snapshot of the edge rows
    pub fn edge_rows(&self) -> Vec<EdgeRow> {
        self.edges.lock().expect("source lock poisoned").clone()
    }

    /// A small connected dataset for running the server without a backend.
    pub fn demo() -> Self {
        let job = |id: u64, title: &str, industry: &str, sector: &str| JobRow {
            id,
            title: title.to_string(),
            industry: industry.to_string(),
            sector: sector.to_string(),
            description: None,
            skills: None,
            responsibilities: None,
        };
        let edge = |source: u64, target: u64| EdgeRow { source, target };

        Self::new(
            vec![
                job(1, "Software Engineer", "Technology", "Software"),
                job(2, "Product Manager", "Technology", "Software"),
                job(3, "UX Designer", "Design", "Software"),
                job(4, "Data Scientist", "Technology", "Analytics"),
                job(5, "Marketing Manager", "Marketing", "Consumer Goods"),
                job(6, "Sales Director", "Sales", "Enterprise"),
                job(7, "Financial Analyst", "Finance", "Banking"),
                job(8, "Recruiter", "Human Resources", "Services"),
            ],
            vec![
                edge(1, 2),
                edge(2, 3),
                edge(1, 4),
                edge(4, 7),
                edge(2, 5),
                edge(5, 6),
                edge(6, 8),
                edge(2, 6),
            ],
        )
    }
}

fn page<T: Clone>(rows: &[T], offset: usize, limit: usize) -> Vec<T> {
    rows.iter().skip(offset).take(limit).cloned().collect()
}

#[async_trait]
impl GraphSource for StaticSource {
    async fn fetch_jobs(&self, offset: usize, limit: usize) -> SourceResult<Vec<JobRow>> {
        Ok(page(&self.jobs.lock().expect("source lock poisoned"), offset, limit))
    }

    async fn fetch_edges(&self, offset: usize, limit: usize) -> SourceResult<Vec<EdgeRow>> {
        Ok(page(&self.edges.lock().expect("source lock poisoned"), offset, limit))
    }

    async fn persist_job(&self, row: &JobRow) -> SourceResult<()> {
        self.jobs.lock().expect("source lock poisoned").push(row.clone());
        Ok(())
    }

    async fn persist_edges(&self, rows: &[EdgeRow]) -> SourceResult<()> {
        self.edges.lock().expect("source lock poisoned").extend_from_slice(rows);
        Ok(())
    }
}
