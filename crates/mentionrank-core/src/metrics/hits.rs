//! HITS (Hyperlink-Induced Topic Search) over a mention graph.
//!
//! # Overview
//!
//! HITS computes two scores for each identity:
//!
//! - **Hub score**: how much an identity mentions good authorities.
//! - **Authority score**: how much an identity is mentioned by good hubs.
//!
//! # Algorithm
//!
//! Fixed-budget synchronous power method:
//!
//! 1. Initialize all hub and authority scores to 1.0.
//! 2. From the previous round's scores, compute for every node
//!    `hub'(v) = Σ auth(w) for v → w` and `auth'(v) = Σ hub(u) for u → v`.
//! 3. Replace both vectors wholesale.
//! 4. Normalize each vector to unit L1 norm (values sum to 1.0).
//! 5. Repeat exactly `iteration_count` times. There is no convergence test.
//!
//! A vector whose sum is zero cannot be normalized. That happens for a
//! component with nodes but no edges, and is reported as
//! [`RankError::DegenerateComponent`] instead of dividing by zero.
//!
//! # Determinism
//!
//! Nodes are laid out in identity order and neighbor lists are sorted, so
//! floating-point summation order is the same on every run regardless of
//! how the graph was ingested.

use std::collections::HashMap;

use petgraph::{Direction, graph::NodeIndex};
use tracing::{debug, instrument, trace};

use crate::error::{RankError, ScoreKind};
use crate::graph::build::MentionGraph;

/// Iteration budget used by [`HitsConfig::default`].
pub const DEFAULT_ITERATION_COUNT: usize = 300;

/// Configuration for HITS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitsConfig {
    /// Number of power iterations. Must be at least 1.
    pub iteration_count: usize,
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            iteration_count: DEFAULT_ITERATION_COUNT,
        }
    }
}

/// Result of the HITS algorithm.
#[derive(Debug, Clone)]
pub struct HitsResult {
    /// Hub scores: identity → hub score. Sums to 1.0.
    pub hubs: HashMap<String, f64>,
    /// Authority scores: identity → authority score. Sums to 1.0.
    pub authorities: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// L1 change in the authority vector during the last iteration.
    pub last_delta: f64,
}

/// Compute HITS hub and authority scores for every node of `g`.
///
/// `g` is normally the component chosen by
/// [`crate::graph::select_largest_component`], but any graph is accepted.
///
/// # Errors
///
/// - [`RankError::InvalidIterationCount`] if `config.iteration_count` is 0.
/// - [`RankError::DegenerateComponent`] if either score vector sums to zero
///   at a normalization step (no edges, or no nodes at all).
#[instrument(skip(g, config), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn hits(g: &MentionGraph, config: &HitsConfig) -> Result<HitsResult, RankError> {
    if config.iteration_count == 0 {
        return Err(RankError::InvalidIterationCount);
    }

    let layout = Layout::new(g);
    let n = layout.ids.len();

    let mut hub = vec![1.0_f64; n];
    let mut auth = vec![1.0_f64; n];
    let mut new_hub = vec![0.0_f64; n];
    let mut new_auth = vec![0.0_f64; n];
    let mut last_delta = 0.0_f64;

    for iteration in 1..=config.iteration_count {
        // Every read below targets last round's `hub`/`auth`; writes go to
        // the separate `new_*` buffers.
        // `Sum for f64` starts from -0.0; fold from +0.0 so a node with no
        // neighbors scores exactly 0.0.
        for v in 0..n {
            new_hub[v] = layout.successors[v]
                .iter()
                .fold(0.0, |acc, &w| acc + auth[w]);
            new_auth[v] = layout.predecessors[v]
                .iter()
                .fold(0.0, |acc, &u| acc + hub[u]);
        }

        normalize_l1(&mut new_hub, ScoreKind::Hub, iteration)?;
        normalize_l1(&mut new_auth, ScoreKind::Authority, iteration)?;

        last_delta = auth
            .iter()
            .zip(new_auth.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut hub, &mut new_hub);
        std::mem::swap(&mut auth, &mut new_auth);

        trace!(iteration, delta = last_delta, "hits iteration");
    }

    debug!(
        iterations = config.iteration_count,
        last_delta, "hits finished"
    );

    let hubs = layout.ids.iter().cloned().zip(hub).collect();
    let authorities = layout.ids.into_iter().zip(auth).collect();

    Ok(HitsResult {
        hubs,
        authorities,
        iterations: config.iteration_count,
        last_delta,
    })
}

/// Normalize `v` in place so its values sum to 1.0.
///
/// # Errors
///
/// Returns [`RankError::DegenerateComponent`] if the sum is zero.
#[allow(clippy::float_cmp)]
fn normalize_l1(v: &mut [f64], map: ScoreKind, iteration: usize) -> Result<(), RankError> {
    let total: f64 = v.iter().sum();
    if total == 0.0 {
        return Err(RankError::DegenerateComponent { map, iteration });
    }
    for x in v.iter_mut() {
        *x /= total;
    }
    Ok(())
}

/// Dense, identity-ordered adjacency view of a [`MentionGraph`].
struct Layout {
    /// Identities in ascending order; position = dense index.
    ids: Vec<String>,
    /// `successors[v]`: dense indices of nodes `v` mentions, ascending.
    successors: Vec<Vec<usize>>,
    /// `predecessors[v]`: dense indices of nodes mentioning `v`, ascending.
    predecessors: Vec<Vec<usize>>,
}

impl Layout {
    fn new(g: &MentionGraph) -> Self {
        let graph = &g.graph;

        let mut order: Vec<NodeIndex> = graph.node_indices().collect();
        order.sort_unstable_by(|a, b| graph[*a].cmp(&graph[*b]));

        let mut position = vec![0usize; graph.node_count()];
        for (dense, idx) in order.iter().enumerate() {
            position[idx.index()] = dense;
        }

        let neighbors = |idx: NodeIndex, dir: Direction| -> Vec<usize> {
            let mut out: Vec<usize> = graph
                .neighbors_directed(idx, dir)
                .map(|n| position[n.index()])
                .collect();
            out.sort_unstable();
            out
        };

        let successors = order
            .iter()
            .map(|&idx| neighbors(idx, Direction::Outgoing))
            .collect();
        let predecessors = order
            .iter()
            .map(|&idx| neighbors(idx, Direction::Incoming))
            .collect();
        let ids = order.iter().map(|&idx| graph[idx].clone()).collect();

        Self {
            ids,
            successors,
            predecessors,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
