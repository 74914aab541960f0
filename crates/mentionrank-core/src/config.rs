use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::RankError;

/// Tunables recognized by the ranking pipeline.
///
/// Loaded from a TOML file such as:
///
/// ```toml
/// iteration_count = 300
/// top_k = 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankConfig {
    /// Number of HITS power iterations. No convergence check is made.
    #[serde(default = "default_iteration_count")]
    pub iteration_count: usize,
    /// Number of entries in each ranked list.
    ///
    /// Signed so that a negative request reaches the reporter and is
    /// rejected there with [`RankError::InvalidCount`].
    #[serde(default = "default_top_k")]
    pub top_k: i64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            iteration_count: default_iteration_count(),
            top_k: default_top_k(),
        }
    }
}

impl RankConfig {
    /// Check the config before running any stage.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidIterationCount`] for a zero iteration
    /// budget, or [`RankError::InvalidCount`] for a negative `top_k`.
    pub const fn validate(&self) -> Result<(), RankError> {
        if self.iteration_count == 0 {
            return Err(RankError::InvalidIterationCount);
        }
        if self.top_k < 0 {
            return Err(RankError::InvalidCount {
                requested: self.top_k,
            });
        }
        Ok(())
    }
}

/// Load a [`RankConfig`] from `path`.
///
/// A missing file yields the defaults. Keys absent from the file keep
/// their default values.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<RankConfig> {
    if !path.exists() {
        return Ok(RankConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<RankConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_iteration_count() -> usize {
    300
}

const fn default_top_k() -> i64 {
    20
}
