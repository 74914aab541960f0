//! Basic statistics for a mention graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: identities and distinct mentions.
//! - **density**: `edge_count / (node_count * (node_count - 1))`. A graph in
//!   which everyone mentioned everyone else has density 1.0. Empty and
//!   single-node graphs have density 0.0.
//! - **component_sizes**: sizes of the weakly connected components, largest
//!   first.
//! - **isolated_node_count**: identities with no mention edges at all (for
//!   example an author who only mentioned itself).
//! - **max_in_degree** / **max_out_degree**: the most-mentioned identity's
//!   mention count and the most prolific mentioner's distinct target count.

use petgraph::{Direction, graph::NodeIndex, visit::IntoNodeIdentifiers};
use serde::Serialize;

use crate::graph::build::MentionGraph;
use crate::graph::components::weakly_connected_components;

/// Summary statistics for a [`MentionGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Zero for graphs with 0 or 1 node.
    pub density: f64,
    /// Number of weakly connected components.
    pub component_count: usize,
    /// Component sizes, descending.
    pub component_sizes: Vec<usize>,
    pub isolated_node_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    /// See [`MentionGraph::content_hash`].
    pub content_hash: String,
}

impl GraphStats {
    /// Compute statistics for `g`.
    #[must_use]
    pub fn from_graph(g: &MentionGraph) -> Self {
        let graph = &g.graph;
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let component_sizes: Vec<usize> = weakly_connected_components(g)
            .iter()
            .map(Vec::len)
            .collect();

        let degree = |idx: NodeIndex, dir: Direction| graph.neighbors_directed(idx, dir).count();

        let isolated_node_count = graph
            .node_identifiers()
            .filter(|&idx| {
                degree(idx, Direction::Incoming) == 0 && degree(idx, Direction::Outgoing) == 0
            })
            .count();

        let max_in_degree = graph
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Incoming))
            .max()
            .unwrap_or(0);

        let max_out_degree = graph
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Outgoing))
            .max()
            .unwrap_or(0);

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            component_count: component_sizes.len(),
            component_sizes,
            isolated_node_count,
            max_in_degree,
            max_out_degree,
            content_hash: g.content_hash(),
        }
    }

    /// Return `true` if the graph has no mention edges.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }

    /// Size of the component the selector would pick, or 0 when empty.
    #[must_use]
    pub fn largest_component_size(&self) -> usize {
        self.component_sizes.first().copied().unwrap_or(0)
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
