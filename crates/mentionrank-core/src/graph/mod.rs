//! Mention graph module.
//!
//! # Overview
//!
//! This module constructs a petgraph-based directed mention graph from a
//! stream of [`MentionRecord`]s and derives the views the scorer needs.
//!
//! ## Pipeline
//!
//! ```text
//! MentionRecord stream
//!        ↓  build::MentionGraph::from_records()
//! MentionGraph (simple digraph, no self-loops, no parallel edges)
//!        ↓  components::select_largest_component()
//! MentionGraph (induced subgraph of the largest weak component)
//!        ↓  stats::GraphStats::from_graph()   (diagnostics only)
//! GraphStats (density, component sizes, degrees, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use mentionrank_core::graph::{MentionGraph, MentionRecord, select_largest_component};
//!
//! let g = MentionGraph::from_records(records);
//! let component = select_largest_component(&g)?;
//! ```

pub mod build;
pub mod components;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use build::{IngestStats, MentionGraph, MentionRecord};
pub use components::{select_largest_component, weakly_connected_components};
pub use stats::GraphStats;
