//! Core job graph implementation
//!
//! This module implements the in-memory graph the whole service runs on:
//! - Job nodes with industry/sector metadata
//! - Undirected, unweighted edges stored as adjacency lists
//! - Endpoint-validated mutation with duplicate-edge suppression

pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use node::JobNode;
pub use store::{GraphError, GraphResult, JobGraph};
pub use types::NodeId;
