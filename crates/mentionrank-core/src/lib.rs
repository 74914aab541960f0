#![forbid(unsafe_code)]
//! mentionrank-core library.
//!
//! Hub and authority (HITS) ranking over a mention graph:
//!
//! ```text
//! MentionRecord stream → graph::MentionGraph → graph::select_largest_component
//!     → metrics::hits::hits → report::top_k
//! ```
//!
//! [`pipeline::rank_graph`] runs all four stages.
//!
//! # Conventions
//!
//! - **Errors**: stage failures are [`error::RankError`]; config loading
//!   uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod report;

pub use config::RankConfig;
pub use error::{ErrorCode, RankError};
pub use graph::{MentionGraph, MentionRecord};
pub use pipeline::{RankReport, rank_graph, rank_records};
