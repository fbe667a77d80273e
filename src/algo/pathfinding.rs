//! Shortest-path search over the job graph

use crate::graph::{JobGraph, NodeId};
use rustc_hash::FxHashMap;

/// Result of a shortest-path search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub path: Vec<NodeId>,
    /// Hop count; equals `path.len() - 1`
    pub hops: usize,
}

/// Bidirectional breadth-first search (unweighted shortest path).
///
/// Expands one full BFS level per round, always from the smaller frontier,
/// and stops at the first node discovered by both searches. Returns `None`
/// when either endpoint is absent from the graph or the nodes sit in
/// disconnected components.
pub fn shortest_path(graph: &JobGraph, start: NodeId, target: NodeId) -> Option<PathResult> {
    if !graph.contains(start) || !graph.contains(target) {
        return None;
    }
    if start == target {
        return Some(PathResult { path: vec![start], hops: 0 });
    }

    // Parent maps double as visited sets; each root maps to itself.
    let mut parent_fwd: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut parent_bwd: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    parent_fwd.insert(start, start);
    parent_bwd.insert(target, target);

    let mut frontier_fwd = vec![start];
    let mut frontier_bwd = vec![target];
    let mut meet: Option<NodeId> = None;

    'search: while !frontier_fwd.is_empty() && !frontier_bwd.is_empty() {
        let forward = frontier_fwd.len() <= frontier_bwd.len();
        let (frontier, parents, other) = if forward {
            (&mut frontier_fwd, &mut parent_fwd, &parent_bwd)
        } else {
            (&mut frontier_bwd, &mut parent_bwd, &parent_fwd)
        };

        let mut next = Vec::new();
        for &node in frontier.iter() {
            for &neighbor in graph.neighbors(node) {
                if parents.contains_key(&neighbor) {
                    continue;
                }
                parents.insert(neighbor, node);
                if other.contains_key(&neighbor) {
                    meet = Some(neighbor);
                    break 'search;
                }
                next.push(neighbor);
            }
        }
        *frontier = next;
    }

    meet.map(|meet| {
        let path = reconstruct(&parent_fwd, &parent_bwd, meet);
        PathResult { hops: path.len() - 1, path }
    })
}

/// Stitch the two half-paths together at the meeting node.
fn reconstruct(
    parent_fwd: &FxHashMap<NodeId, NodeId>,
    parent_bwd: &FxHashMap<NodeId, NodeId>,
    meet: NodeId,
) -> Vec<NodeId> {
    let mut path = Vec::new();

    // meet back to start, then flip
    let mut current = meet;
    loop {
        path.push(current);
        let parent = parent_fwd[&current];
        if parent == current {
            break;
        }
        current = parent;
    }
    path.reverse();

    // meet forward to target
    let mut current = meet;
    loop {
        let parent = parent_bwd[&current];
        if parent == current {
            break;
        }
        current = parent;
        path.push(current);
    }

    path
}
