//! Mention graph construction from a stream of mention records.
//!
//! # Overview
//!
//! Each [`MentionRecord`] names an author and the identities the author
//! mentioned. The builder turns the record stream into a simple directed
//! [`petgraph`] graph:
//!
//! - every author and every mentioned identity becomes a node (once);
//! - an edge `A → B` means "A mentioned B";
//! - self-mentions never produce an edge;
//! - repeated mentions of the same target never produce a second edge.
//!
//! The resulting node and edge sets do not depend on record order.
//!
//! ## Content Hash
//!
//! [`MentionGraph::content_hash`] is a BLAKE3 hash over the sorted node and
//! edge sets. Two runs over the same mentions (in any order) hash equal.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One decoded mention event: an author and the identities it mentioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRecord {
    pub author: String,
    /// Mentioned identities in the order they appeared.
    pub mentions: Vec<String>,
}

impl MentionRecord {
    /// Convenience constructor used heavily in tests and by readers.
    #[must_use]
    pub fn new<A, I, M>(author: A, mentions: I) -> Self
    where
        A: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self {
            author: author.into(),
            mentions: mentions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Counters collected while ingesting records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Records consumed.
    pub records: usize,
    /// Mentioned identities seen across all records.
    pub mentions: usize,
    /// Mentions of the author by itself (skipped as edges).
    pub self_mentions: usize,
    /// Mentions whose edge already existed (skipped as edges).
    pub duplicate_mentions: usize,
}

// ---------------------------------------------------------------------------
// MentionGraph
// ---------------------------------------------------------------------------

/// A simple directed mention graph.
///
/// Nodes are identities (strings). An edge `A → B` means "A mentioned B".
/// There are no self-loops and at most one edge per ordered pair.
#[derive(Debug, Clone, Default)]
pub struct MentionGraph {
    /// Directed graph: nodes = identities, edges = mentions.
    pub(crate) graph: DiGraph<String, ()>,
    /// Mapping from identity to petgraph `NodeIndex`.
    pub(crate) node_map: HashMap<String, NodeIndex>,
    /// Ingestion counters. Zero for graphs derived via [`Self::induced`].
    pub ingest: IngestStats,
}

impl MentionGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph by consuming `records` one at a time.
    #[must_use]
    #[instrument(skip(records))]
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = MentionRecord>,
    {
        let mut g = Self::new();
        for record in records {
            g.add_record(&record.author, &record.mentions);
        }
        g.log_summary();
        g
    }

    /// Build a graph from a fallible record stream, stopping at the first
    /// error the upstream reader reports.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by `records`.
    #[instrument(skip(records))]
    pub fn try_from_records<I, E>(records: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<MentionRecord, E>>,
    {
        let mut g = Self::new();
        for record in records {
            let record = record?;
            g.add_record(&record.author, &record.mentions);
        }
        g.log_summary();
        Ok(g)
    }

    /// Ingest one record.
    pub fn add_record<S: AsRef<str>>(&mut self, author: &str, mentions: &[S]) {
        self.ingest.records += 1;
        let author_idx = self.ensure_node(author);

        for mentioned in mentions {
            let mentioned = mentioned.as_ref();
            self.ingest.mentions += 1;
            let mentioned_idx = self.ensure_node(mentioned);

            if mentioned == author {
                self.ingest.self_mentions += 1;
                continue;
            }

            // petgraph allows parallel edges by default.
            if self.graph.contains_edge(author_idx, mentioned_idx) {
                self.ingest.duplicate_mentions += 1;
            } else {
                self.graph.add_edge(author_idx, mentioned_idx, ());
            }
        }
    }

    /// Return the node for `id`, adding it if absent.
    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    /// Return the number of nodes (identities) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (distinct mentions) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for an identity.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Return the identity label for a node.
    #[must_use]
    pub fn identity(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Return `true` if the graph contains a node for `id`.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Return `true` if `source` mentioned `target`.
    #[must_use]
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.node_index(source), self.node_index(target)) {
            (Some(s), Some(t)) => self.graph.contains_edge(s, t),
            _ => false,
        }
    }

    /// All identities, sorted.
    #[must_use]
    pub fn identities(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.graph.node_weights().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// All `(source, target)` edges, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].as_str(),
                    self.graph[e.target()].as_str(),
                )
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Identities `id` mentioned, sorted. Empty if `id` is unknown.
    #[must_use]
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Identities that mentioned `id`, sorted. Empty if `id` is unknown.
    #[must_use]
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, dir: Direction) -> Vec<&str> {
        let Some(idx) = self.node_index(id) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n].as_str())
            .collect();
        out.sort_unstable();
        out
    }

    /// Return the subgraph induced by `members`: those nodes plus every edge
    /// whose endpoints both lie in `members`. Unknown identities are ignored.
    ///
    /// Nodes are inserted in sorted identity order.
    #[must_use]
    pub fn induced<S: AsRef<str>>(&self, members: &[S]) -> Self {
        let mut sorted: Vec<&str> = members
            .iter()
            .map(AsRef::as_ref)
            .filter(|id| self.contains_node(id))
            .collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut sub = Self::new();
        for id in &sorted {
            sub.ensure_node(id);
        }

        for (source, target) in self.edges() {
            if let (Some(s), Some(t)) = (sub.node_index(source), sub.node_index(target)) {
                sub.graph.add_edge(s, t, ());
            }
        }
        sub
    }

    /// BLAKE3 hash over the sorted node set and sorted edge set.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for id in self.identities() {
            hasher.update(id.as_bytes());
            hasher.update(b"\x00");
        }
        hasher.update(b"\x01");
        for (source, target) in self.edges() {
            hasher.update(source.as_bytes());
            hasher.update(b"\x00");
            hasher.update(target.as_bytes());
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }

    fn log_summary(&self) {
        debug!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            records = self.ingest.records,
            self_mentions = self.ingest.self_mentions,
            duplicate_mentions = self.ingest.duplicate_mentions,
            "mention graph built"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
