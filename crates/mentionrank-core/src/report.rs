//! Top-K ranking of score maps.
//!
//! Entries are ordered by score descending. Equal scores are ordered by
//! identity ascending, so the output is fully determined by the map.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::RankError;

/// One row of a ranked list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub identity: String,
    pub score: f64,
}

/// Return the `k` highest-scoring entries of `scores`.
///
/// Returns every entry, still ordered, when the map holds fewer than `k`.
///
/// # Errors
///
/// Returns [`RankError::InvalidCount`] if `k` is negative.
pub fn top_k(scores: &HashMap<String, f64>, k: i64) -> Result<Vec<RankedEntry>, RankError> {
    if k < 0 {
        return Err(RankError::InvalidCount { requested: k });
    }
    let limit = usize::try_from(k).unwrap_or(usize::MAX);

    let mut entries: Vec<RankedEntry> = scores
        .iter()
        .map(|(identity, &score)| RankedEntry {
            identity: identity.clone(),
            score: positive_zero(score),
        })
        .collect();
    entries.sort_by(compare_entries);
    entries.truncate(limit);
    Ok(entries)
}

/// Map `-0.0` to `+0.0` so both zeros compare equal under `total_cmp`.
const fn positive_zero(score: f64) -> f64 {
    score + 0.0
}

fn compare_entries(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.identity.cmp(&b.identity))
}
