//! Graph lifecycle and operations
//!
//! `GraphService` owns the in-memory graph behind a read-write lock and the
//! backend behind a `GraphSource` trait object. The graph is loaded on first
//! use; the load is single-flight, so concurrent first callers share one
//! attempt instead of each querying the backend.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::algo;
use crate::graph::{GraphError, JobGraph, JobNode, NodeId};
use crate::source::{
    EdgeRow, GraphSource, JobRow, SourceError, FETCH_PAGE_SIZE, MAX_EDGES, MAX_NODES,
};

/// Upper bound on placeholder connections wired to a newly inserted job.
/// Stands in for the embedding-similarity selection done by the external
/// classification workflow.
const MAX_SEED_CONNECTIONS: usize = 12;

/// Errors surfaced by graph operations
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The graph could not be loaded; every operation is unavailable until
    /// a later load attempt succeeds
    #[error("graph unavailable: {0}")]
    Unavailable(#[source] SourceError),

    /// A backend write failed
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Lifecycle of the in-memory graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

/// Hop-count path between two jobs, with the full nodes along it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSummary {
    pub path_length: usize,
    pub path: Vec<JobNode>,
}

/// A multiple-choice round with resolved nodes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSet {
    pub choices: Vec<JobNode>,
    pub correct_choice_id: Option<NodeId>,
    pub reached_target: bool,
}

/// Verdict on a chosen hop, with the chosen node resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceReport {
    pub correct: bool,
    pub reached_target: bool,
    pub chosen_node: JobNode,
}

/// Graph-level counters
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInfo {
    pub total_nodes: usize,
    pub total_edges: usize,
}

/// A newly classified job, as produced by the external classification workflow
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub industry: String,
    pub sector: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
}

/// The job graph service: lifecycle, queries, and mutation
pub struct GraphService {
    source: Box<dyn GraphSource>,
    graph: RwLock<JobGraph>,
    state: Mutex<LoadState>,
}

impl GraphService {
    pub fn new(source: Box<dyn GraphSource>) -> Self {
        Self {
            source,
            graph: RwLock::new(JobGraph::new()),
            state: Mutex::new(LoadState::Unloaded),
        }
    }

    /// Block until the graph is loaded, loading it if necessary.
    ///
    /// Holding the state lock across the load is what makes it single-flight:
    /// concurrent callers queue here and observe the outcome of the attempt
    /// already in progress. A failed attempt is not retried internally; the
    /// next caller starts a fresh one.
    pub async fn ensure_ready(&self) -> ServiceResult<()> {
        let mut state = self.state.lock().await;
        if *state == LoadState::Ready {
            return Ok(());
        }

        *state = LoadState::Loading;
        match self.load_graph().await {
            Ok(graph) => {
                *self.graph.write().await = graph;
                *state = LoadState::Ready;
                Ok(())
            }
            Err(e) => {
                *state = LoadState::Failed;
                Err(ServiceError::Unavailable(e))
            }
        }
    }

    /// Materialize the graph from the backend tables.
    ///
    /// Edge rows referencing missing node ids are dropped with a warning:
    /// the two tables can drift and availability wins over strict
    /// referential integrity here.
    async fn load_graph(&self) -> Result<JobGraph, SourceError> {
        let started = Instant::now();
        let mut graph = JobGraph::new();

        let mut offset = 0;
        loop {
            let rows = self.source.fetch_jobs(offset, FETCH_PAGE_SIZE).await?;
            let page_len = rows.len();
            for row in rows {
                if graph.node_count() >= MAX_NODES {
                    break;
                }
                let id = row.id;
                if graph.insert_node(JobNode::from(row)).is_err() {
                    warn!("Dropping duplicate job row {}", id);
                }
            }
            if page_len < FETCH_PAGE_SIZE || graph.node_count() >= MAX_NODES {
                break;
            }
            offset += page_len;
        }
        if graph.node_count() >= MAX_NODES {
            warn!("Node ceiling of {} reached; remaining job rows ignored", MAX_NODES);
        }

        let mut dropped = 0usize;
        let mut seen = 0usize;
        let mut offset = 0;
        loop {
            let rows = self.source.fetch_edges(offset, FETCH_PAGE_SIZE).await?;
            let page_len = rows.len();
            for row in rows {
                if seen >= MAX_EDGES {
                    break;
                }
                seen += 1;
                if let Err(e) = graph.connect(NodeId::new(row.source), NodeId::new(row.target)) {
                    warn!("Dropping edge {} - {}: {}", row.source, row.target, e);
                    dropped += 1;
                }
            }
            if page_len < FETCH_PAGE_SIZE || seen >= MAX_EDGES {
                break;
            }
            offset += page_len;
        }
        if seen >= MAX_EDGES {
            warn!("Edge ceiling of {} reached; remaining edge rows ignored", MAX_EDGES);
        }

        info!(
            "Graph loaded: {} nodes, {} edges ({} edge rows dropped) in {:?}",
            graph.node_count(),
            graph.edge_count(),
            dropped,
            started.elapsed()
        );
        Ok(graph)
    }

    /// All jobs, in load order
    pub async fn all_jobs(&self) -> ServiceResult<Vec<JobNode>> {
        self.ensure_ready().await?;
        let graph = self.graph.read().await;
        Ok(graph.all_nodes().cloned().collect())
    }

    /// A single job by id
    pub async fn job(&self, id: NodeId) -> ServiceResult<Option<JobNode>> {
        self.ensure_ready().await?;
        let graph = self.graph.read().await;
        Ok(graph.get_node(id).cloned())
    }

    /// Node and edge counts
    pub async fn graph_info(&self) -> ServiceResult<GraphInfo> {
        self.ensure_ready().await?;
        let graph = self.graph.read().await;
        Ok(GraphInfo {
            total_nodes: graph.node_count(),
            total_edges: graph.edge_count(),
        })
    }

    /// Shortest path between two jobs; `None` for unknown ids or a
    /// disconnected pair
    pub async fn calculate_path(
        &self,
        start: NodeId,
        target: NodeId,
    ) -> ServiceResult<Option<PathSummary>> {
        self.ensure_ready().await?;
        let graph = self.graph.read().await;
        Ok(algo::shortest_path(&graph, start, target).map(|result| PathSummary {
            path_length: result.hops,
            path: resolve(&graph, &result.path),
        }))
    }

    /// Multiple-choice next hops for the player standing at `current`
    pub async fn hop_choices(
        &self,
        current: NodeId,
        target: NodeId,
    ) -> ServiceResult<Option<ChoiceSet>> {
        self.ensure_ready().await?;
        let graph = self.graph.read().await;
        let mut rng = rand::thread_rng();
        Ok(
            algo::hop_choices(&graph, current, target, &mut rng).map(|round| ChoiceSet {
                choices: resolve(&graph, &round.choices),
                correct_choice_id: round.correct_choice,
                reached_target: round.reached_target,
            }),
        )
    }

    /// Judge a chosen hop against the true shortest path
    pub async fn validate_choice(
        &self,
        current: NodeId,
        target: NodeId,
        chosen: NodeId,
    ) -> ServiceResult<Option<ChoiceReport>> {
        self.ensure_ready().await?;
        let graph = self.graph.read().await;
        let outcome = algo::validate_choice(&graph, current, target, chosen);
        Ok(outcome.and_then(|outcome| {
            graph.get_node(chosen).cloned().map(|node| ChoiceReport {
                correct: outcome.correct,
                reached_target: outcome.reached_target,
                chosen_node: node,
            })
        }))
    }

    /// Append a newly classified job, wiring it to a bounded random sample
    /// of existing nodes.
    ///
    /// The rows are written to the backend before the in-memory graph is
    /// touched, so a failed write leaves memory unchanged and the call can
    /// simply be retried.
    pub async fn insert_job(&self, job: NewJob) -> ServiceResult<NodeId> {
        self.ensure_ready().await?;
        let mut graph = self.graph.write().await;

        let id = graph.next_id();
        let node = JobNode::new(id, job.title, job.industry, job.sector).with_details(
            job.description,
            job.skills,
            job.responsibilities,
        );

        let neighbor_ids = sample_nodes(&graph, MAX_SEED_CONNECTIONS);

        let row = JobRow {
            id: id.as_u64(),
            title: node.title.clone(),
            industry: node.industry.clone(),
            sector: node.sector.clone(),
            description: node.description.clone(),
            skills: node.skills.clone(),
            responsibilities: node.responsibilities.clone(),
        };
        self.source.persist_job(&row).await?;

        let edge_rows: Vec<EdgeRow> = neighbor_ids
            .iter()
            .map(|neighbor| EdgeRow {
                source: id.as_u64(),
                target: neighbor.as_u64(),
            })
            .collect();
        if !edge_rows.is_empty() {
            self.source.persist_edges(&edge_rows).await?;
        }

        graph.insert_node(node)?;
        for neighbor in &neighbor_ids {
            graph.connect(id, *neighbor)?;
        }

        info!("Inserted job {} with {} connections", id, neighbor_ids.len());
        Ok(id)
    }
}

/// Clone the nodes behind a list of ids, in order
fn resolve(graph: &JobGraph, ids: &[NodeId]) -> Vec<JobNode> {
    ids.iter()
        .filter_map(|id| graph.get_node(*id).cloned())
        .collect()
}

/// Uniform random sample of up to `count` existing node ids
fn sample_nodes(graph: &JobGraph, count: usize) -> Vec<NodeId> {
    use rand::seq::SliceRandom;

    let mut rng = rand::thread_rng();
    let mut indices: Vec<usize> = (0..graph.node_count()).collect();
    indices.shuffle(&mut rng);
    indices
        .into_iter()
        .take(count)
        .filter_map(|index| graph.node_at(index))
        .map(|node| node.id)
        .collect()
}
