//! Next-hop choice generation and validation for the guessing game

use super::pathfinding::shortest_path;
use crate::graph::{JobGraph, NodeId};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

/// Options presented per turn, including the correct hop.
const CHOICE_COUNT: usize = 3;

/// A multiple-choice round: up to three candidate next hops.
///
/// The correct id is part of the result on purpose; hiding it from end
/// users is the consumer's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopChoices {
    /// Candidate next hops, shuffled
    pub choices: Vec<NodeId>,
    /// The true next hop on the shortest path; `None` once the target is reached
    pub correct_choice: Option<NodeId>,
    pub reached_target: bool,
}

/// Verdict on a player's chosen hop.
///
/// The two flags are independent: a hop onto the target via a longer-but-valid
/// route yields `correct == false` together with `reached_target == true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOutcome {
    /// Whether the chosen node is the next hop on the shortest path
    pub correct: bool,
    /// Whether the chosen node is the target itself
    pub reached_target: bool,
}

/// Generate a multiple-choice round for the player standing at `current`.
///
/// The true shortest path's second node is the correct hop; up to two decoys
/// are sampled from the other neighbors of `current`. When fewer than two
/// wrong neighbors exist, decoys fall back to arbitrary other graph nodes.
/// Returns `None` when either id is absent or no path exists.
pub fn hop_choices(
    graph: &JobGraph,
    current: NodeId,
    target: NodeId,
    rng: &mut impl Rng,
) -> Option<HopChoices> {
    if !graph.contains(current) || !graph.contains(target) {
        return None;
    }
    if current == target {
        return Some(HopChoices {
            choices: Vec::new(),
            correct_choice: None,
            reached_target: true,
        });
    }

    let result = shortest_path(graph, current, target)?;
    let correct = result.path[1];

    let mut decoys: Vec<NodeId> = graph
        .neighbors(current)
        .iter()
        .copied()
        .filter(|&id| id != correct)
        .collect();
    decoys.shuffle(rng);
    decoys.truncate(CHOICE_COUNT - 1);

    if decoys.len() < CHOICE_COUNT - 1 {
        fill_from_graph(graph, current, correct, &mut decoys, rng);
    }

    let mut choices = decoys;
    choices.push(correct);
    choices.shuffle(rng);

    Some(HopChoices {
        choices,
        correct_choice: Some(correct),
        reached_target: false,
    })
}

/// Pad the decoy list with arbitrary other graph nodes.
fn fill_from_graph(
    graph: &JobGraph,
    current: NodeId,
    correct: NodeId,
    decoys: &mut Vec<NodeId>,
    rng: &mut impl Rng,
) {
    let mut exclude: FxHashSet<NodeId> = decoys.iter().copied().collect();
    exclude.insert(current);
    exclude.insert(correct);

    let pool: Vec<NodeId> = graph
        .all_nodes()
        .map(|node| node.id)
        .filter(|id| !exclude.contains(id))
        .collect();

    let needed = CHOICE_COUNT - 1 - decoys.len();
    decoys.extend(pool.choose_multiple(rng, needed).copied());
}

/// Check a chosen hop against the true shortest path from `current` to `target`.
///
/// The chosen node is compared to the expected second hop only; it is NOT
/// required to be a neighbor of `current`. A valid-but-non-adjacent chosen id
/// simply comes back `correct == false`. Returns `None` when any id is absent
/// or current and target are disconnected.
pub fn validate_choice(
    graph: &JobGraph,
    current: NodeId,
    target: NodeId,
    chosen: NodeId,
) -> Option<ChoiceOutcome> {
    if !graph.contains(chosen) {
        return None;
    }
    let result = shortest_path(graph, current, target)?;
    Some(ChoiceOutcome {
        correct: result.path.get(1) == Some(&chosen),
        reached_target: chosen == target,
    })
}
