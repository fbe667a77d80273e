//! In-memory job graph storage

use super::node::JobNode;
use super::types::NodeId;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("Invalid edge: endpoint node {0} does not exist")]
    InvalidEdgeEndpoint(NodeId),

    #[error("Invalid edge: self-loop on node {0}")]
    SelfLoop(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory undirected job graph
///
/// Uses an order-preserving node map plus adjacency lists:
/// - nodes: NodeId -> JobNode (insertion-ordered, indexable for sampling)
/// - adjacency: NodeId -> Vec<NodeId>
/// - edges: normalized (low, high) id pairs for duplicate detection
///
/// Invariants: adjacency is symmetric, every entry references an existing
/// node, and there are no self-loops or parallel edges.
#[derive(Debug, Default)]
pub struct JobGraph {
    nodes: IndexMap<NodeId, JobNode>,
    adjacency: FxHashMap<NodeId, Vec<NodeId>>,
    edges: FxHashSet<(NodeId, NodeId)>,
}

impl JobGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Fails if the id is already taken.
    pub fn insert_node(&mut self, node: JobNode) -> GraphResult<NodeId> {
        let id = node.id;
        if self.nodes.contains_key(&id) {
            return Err(GraphError::NodeAlreadyExists(id));
        }
        self.nodes.insert(id, node);
        self.adjacency.entry(id).or_default();
        Ok(id)
    }

    /// Connect two existing nodes with an undirected edge.
    ///
    /// Returns `true` if a new edge was added, `false` if the pair was
    /// already connected. Self-loops and edges to missing nodes are errors.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> GraphResult<bool> {
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        if !self.nodes.contains_key(&a) {
            return Err(GraphError::InvalidEdgeEndpoint(a));
        }
        if !self.nodes.contains_key(&b) {
            return Err(GraphError::InvalidEdgeEndpoint(b));
        }

        let key = if a < b { (a, b) } else { (b, a) };
        if !self.edges.insert(key) {
            return Ok(false);
        }

        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        Ok(true)
    }

    /// Neighbors of a node, in edge-insertion order. Empty for unknown ids.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Look up a node by id
    pub fn get_node(&self, id: NodeId) -> Option<&JobNode> {
        self.nodes.get(&id)
    }

    /// Whether the node id is present
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes, in insertion order
    pub fn all_nodes(&self) -> impl Iterator<Item = &JobNode> {
        self.nodes.values()
    }

    /// Node at the given insertion index, for random sampling
    pub fn node_at(&self, index: usize) -> Option<&JobNode> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Next free node id (one past the current maximum)
    pub fn next_id(&self) -> NodeId {
        let max = self.nodes.keys().map(|id| id.as_u64()).max().unwrap_or(0);
        NodeId::new(max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: u64, title: &str) -> JobNode {
        JobNode::new(NodeId::new(id), title, "Technology", "Software")
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut graph = JobGraph::new();
        graph.insert_node(job(1, "Engineer")).unwrap();
        graph.insert_node(job(2, "Product Manager")).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains(NodeId::new(1)));
        assert_eq!(graph.get_node(NodeId::new(2)).unwrap().title, "Product Manager");
        assert!(graph.get_node(NodeId::new(3)).is_none());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = JobGraph::new();
        graph.insert_node(job(1, "Engineer")).unwrap();
        let err = graph.insert_node(job(1, "Designer")).unwrap_err();
        assert_eq!(err, GraphError::NodeAlreadyExists(NodeId::new(1)));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut graph = JobGraph::new();
        graph.insert_node(job(1, "Engineer")).unwrap();
        graph.insert_node(job(2, "Product Manager")).unwrap();

        assert!(graph.connect(NodeId::new(1), NodeId::new(2)).unwrap());
        assert_eq!(graph.neighbors(NodeId::new(1)), &[NodeId::new(2)]);
        assert_eq!(graph.neighbors(NodeId::new(2)), &[NodeId::new(1)]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_edge_ignored() {
        let mut graph = JobGraph::new();
        graph.insert_node(job(1, "Engineer")).unwrap();
        graph.insert_node(job(2, "Product Manager")).unwrap();

        assert!(graph.connect(NodeId::new(1), NodeId::new(2)).unwrap());
        // same edge from the other direction
        assert!(!graph.connect(NodeId::new(2), NodeId::new(1)).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(NodeId::new(1)).len(), 1);
    }

    #[test]
    fn test_connect_validates_endpoints() {
        let mut graph = JobGraph::new();
        graph.insert_node(job(1, "Engineer")).unwrap();

        let err = graph.connect(NodeId::new(1), NodeId::new(9)).unwrap_err();
        assert_eq!(err, GraphError::InvalidEdgeEndpoint(NodeId::new(9)));

        let err = graph.connect(NodeId::new(9), NodeId::new(1)).unwrap_err();
        assert_eq!(err, GraphError::InvalidEdgeEndpoint(NodeId::new(9)));

        let err = graph.connect(NodeId::new(1), NodeId::new(1)).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop(NodeId::new(1)));

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_next_id() {
        let mut graph = JobGraph::new();
        assert_eq!(graph.next_id(), NodeId::new(1));

        graph.insert_node(job(5, "Engineer")).unwrap();
        graph.insert_node(job(2, "Designer")).unwrap();
        assert_eq!(graph.next_id(), NodeId::new(6));
    }

    #[test]
    fn test_node_at_follows_insertion_order() {
        let mut graph = JobGraph::new();
        graph.insert_node(job(3, "Engineer")).unwrap();
        graph.insert_node(job(1, "Designer")).unwrap();

        assert_eq!(graph.node_at(0).unwrap().id, NodeId::new(3));
        assert_eq!(graph.node_at(1).unwrap().id, NodeId::new(1));
        assert!(graph.node_at(2).is_none());
    }
}
