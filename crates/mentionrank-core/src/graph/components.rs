//! Weakly connected components and component selection.
//!
//! Edges are treated as undirected for reachability. Components are
//! returned with members sorted by identity, ordered largest first; equal
//! sizes are ordered by their smallest member. The first component in that
//! order is the one [`select_largest_component`] returns.

use std::cmp::Ordering;

use petgraph::{Direction, visit::IntoNodeIdentifiers};
use tracing::{debug, instrument};

use crate::error::RankError;
use crate::graph::build::MentionGraph;

/// Partition `g` into weakly connected components.
///
/// Each component's members are sorted. The outer list is ordered by size
/// descending, then by smallest member ascending. Runs in `O(V + E)` plus
/// the sorting.
#[must_use]
#[instrument(skip(g))]
pub fn weakly_connected_components(g: &MentionGraph) -> Vec<Vec<String>> {
    let graph = &g.graph;
    let mut visited = vec![false; graph.node_count()];
    let mut components: Vec<Vec<String>> = Vec::new();

    for start in graph.node_identifiers() {
        if visited[start.index()] {
            continue;
        }

        let mut stack = vec![start];
        let mut members = Vec::new();

        while let Some(node) = stack.pop() {
            if visited[node.index()] {
                continue;
            }
            visited[node.index()] = true;
            members.push(graph[node].clone());

            let neighbors = graph
                .neighbors_directed(node, Direction::Outgoing)
                .chain(graph.neighbors_directed(node, Direction::Incoming));
            for neighbor in neighbors {
                if !visited[neighbor.index()] {
                    stack.push(neighbor);
                }
            }
        }

        members.sort_unstable();
        components.push(members);
    }

    components.sort_by(|a, b| compare_components(a, b));
    debug!(count = components.len(), "weakly connected components");
    components
}

/// Select the largest weakly connected component and return its induced
/// subgraph.
///
/// Ties on node count go to the component whose smallest identity sorts
/// first.
///
/// # Errors
///
/// Returns [`RankError::EmptyGraph`] if `g` has no nodes.
#[instrument(skip(g))]
pub fn select_largest_component(g: &MentionGraph) -> Result<MentionGraph, RankError> {
    let components = weakly_connected_components(g);
    let Some(selected) = components.first() else {
        return Err(RankError::EmptyGraph);
    };

    debug!(
        size = selected.len(),
        excluded_components = components.len() - 1,
        "selected largest component"
    );
    Ok(g.induced(selected))
}

/// Larger first; among equal sizes, smaller first member first.
fn compare_components(a: &[String], b: &[String]) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
