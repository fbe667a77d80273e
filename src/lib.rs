//! Job-connection graph service
//!
//! Maintains an in-memory, undirected graph of job titles loaded from a
//! tabular backend and answers shortest-path queries over it for a
//! career-transition guessing game: compute paths, generate next-hop
//! multiple-choice options, validate guesses, and append newly classified
//! jobs at runtime.
//!
//! The graph is loaded once per process on first use behind a single-flight
//! guard; after that, queries are pure in-memory computation.
//!
//! # Example
//!
//! ```rust
//! use jobgraph::algo;
//! use jobgraph::graph::{JobGraph, JobNode, NodeId};
//!
//! let mut graph = JobGraph::new();
//! graph
//!     .insert_node(JobNode::new(NodeId::new(1), "Software Engineer", "Technology", "Software"))
//!     .unwrap();
//! graph
//!     .insert_node(JobNode::new(NodeId::new(2), "Product Manager", "Technology", "Software"))
//!     .unwrap();
//! graph.connect(NodeId::new(1), NodeId::new(2)).unwrap();
//!
//! let result = algo::shortest_path(&graph, NodeId::new(1), NodeId::new(2)).unwrap();
//! assert_eq!(result.hops, 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod http;
pub mod service;
pub mod source;

// Re-export main types for convenience
pub use graph::{GraphError, GraphResult, JobGraph, JobNode, NodeId};
pub use service::{
    ChoiceReport, ChoiceSet, GraphInfo, GraphService, NewJob, PathSummary, ServiceError,
    ServiceResult,
};
pub use source::{GraphSource, RestSource, SourceError, SourceResult, StaticSource};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
