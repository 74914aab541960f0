//! End-to-end ranking: build → select → score → report.
//!
//! Each stage reads an immutable view of the previous stage's output. The
//! first failing stage aborts the run and its [`RankError`] is returned
//! unchanged.

use serde::Serialize;
use tracing::{info, instrument};

use crate::config::RankConfig;
use crate::error::RankError;
use crate::graph::{MentionGraph, MentionRecord, select_largest_component};
use crate::metrics::hits::{HitsConfig, hits};
use crate::report::{RankedEntry, top_k};

/// Output of a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankReport {
    /// Nodes in the full mention graph.
    pub graph_nodes: usize,
    /// Edges in the full mention graph.
    pub graph_edges: usize,
    /// Nodes in the scored component.
    pub component_nodes: usize,
    /// Edges in the scored component.
    pub component_edges: usize,
    /// Power iterations performed.
    pub iterations: usize,
    /// Top hubs, best first.
    pub hubs: Vec<RankedEntry>,
    /// Top authorities, best first.
    pub authorities: Vec<RankedEntry>,
}

/// Rank an already-built mention graph.
///
/// # Errors
///
/// - [`RankError::InvalidIterationCount`] / [`RankError::InvalidCount`] for
///   an invalid `config`.
/// - [`RankError::EmptyGraph`] if `g` has no nodes.
/// - [`RankError::DegenerateComponent`] if the selected component has no
///   edges.
#[instrument(skip(g, config))]
pub fn rank_graph(g: &MentionGraph, config: &RankConfig) -> Result<RankReport, RankError> {
    config.validate()?;

    let component = select_largest_component(g)?;
    let scores = hits(
        &component,
        &HitsConfig {
            iteration_count: config.iteration_count,
        },
    )?;

    let hubs = top_k(&scores.hubs, config.top_k)?;
    let authorities = top_k(&scores.authorities, config.top_k)?;

    info!(
        graph_nodes = g.node_count(),
        component_nodes = component.node_count(),
        iterations = scores.iterations,
        "ranking complete"
    );

    Ok(RankReport {
        graph_nodes: g.node_count(),
        graph_edges: g.edge_count(),
        component_nodes: component.node_count(),
        component_edges: component.edge_count(),
        iterations: scores.iterations,
        hubs,
        authorities,
    })
}

/// Build a graph from `records` and rank it.
///
/// # Errors
///
/// See [`rank_graph`].
pub fn rank_records<I>(records: I, config: &RankConfig) -> Result<RankReport, RankError>
where
    I: IntoIterator<Item = MentionRecord>,
{
    let g = MentionGraph::from_records(records);
    rank_graph(&g, config)
}
