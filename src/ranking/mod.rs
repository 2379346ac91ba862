pub mod token_sort;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::cache::CacheSnapshot;
use crate::core::RankedWindow;

pub use token_sort::TokenSortScorer;

/// Trait for fuzzy similarity implementations
pub trait Scorer: Send + Sync {
    /// Similarity of `a` and `b` in `[0, 100]`. Must be total and symmetric.
    fn score(&self, a: &str, b: &str) -> f64;

    /// Get scorer name for logging
    fn name(&self) -> &str;
}

/// Ranking configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// Weight of the query vs title score
    pub title_weight: f64,
    /// Weight of the query vs executable path score
    pub path_weight: f64,
    /// Limit used when the caller does not pass one
    pub default_limit: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            title_weight: 0.9,
            path_weight: 0.1,
            default_limit: 10,
        }
    }
}

impl RankOptions {
    pub fn combine(&self, title_score: f64, path_score: f64) -> f64 {
        self.title_weight * title_score + self.path_weight * path_score
    }
}

/// Map a possibly negative limit coming from user input to a usable one
pub fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

/// Rank every window of `snapshot` against `query` and keep the best `limit`.
///
/// Scores descend; equal scores keep insertion order, so an unchanged
/// snapshot and query always produce the same sequence.
pub fn rank(
    snapshot: &CacheSnapshot,
    scorer: &dyn Scorer,
    options: &RankOptions,
    query: &str,
    limit: usize,
) -> Vec<RankedWindow> {
    if limit == 0 || snapshot.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u64, RankedWindow)> = snapshot
        .iter()
        .map(|(handle, cached)| {
            let title_score = scorer.score(query, &cached.record.title);
            let path_score = scorer.score(query, &cached.record.executable_path);
            (
                cached.seq,
                RankedWindow {
                    handle: *handle,
                    record: cached.record.clone(),
                    score: options.combine(title_score, path_score),
                    title_score,
                    path_score,
                },
            )
        })
        .collect();

    scored.sort_by(|(seq_a, a), (seq_b, b)| match b.score.total_cmp(&a.score) {
        Ordering::Equal => seq_a.cmp(seq_b),
        other => other,
    });
    scored.truncate(limit);

    tracing::trace!(
        "Ranked {} windows for {:?} with {}",
        snapshot.len(),
        query,
        scorer.name()
    );

    scored.into_iter().map(|(_, ranked)| ranked).collect()
}
