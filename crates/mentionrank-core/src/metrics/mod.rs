//! Link-analysis metrics for the mention graph.
//!
//! - **HITS** (`hits`): which identities are authoritative (mentioned by
//!   good hubs) and which are hubs (mention good authorities)?
//!
//! ```rust,ignore
//! use mentionrank_core::metrics::hits::{HitsConfig, hits};
//!
//! let result = hits(&component, &HitsConfig::default())?;
//! ```

pub mod hits;
