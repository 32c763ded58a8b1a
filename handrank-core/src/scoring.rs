//! Win counting and final ranking.
//!
//! Scores are keyed by display name, so items that share a name share a win
//! count. Each of them still gets its own ranking row.
use std::collections::HashMap;

use crate::types::RankedItem;

/// Running win count per item name.
#[derive(Debug, Clone, Default)]
pub struct ScoreMap {
    scores: HashMap<String, u32>,
}

impl ScoreMap {
    /// Score map with every name present at zero.
    pub fn new(names: &[String]) -> Self {
        let scores = names.iter().map(|name| (name.clone(), 0)).collect();
        ScoreMap { scores }
    }

    pub fn record_win(&mut self, name: &str) {
        *self.scores.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Wins for `name`. Unknown names score zero.
    pub fn get(&self, name: &str) -> u32 {
        self.scores.get(name).copied().unwrap_or(0)
    }

    /// Sum of all win counts.
    pub fn total(&self) -> u32 {
        self.scores.values().sum()
    }
}

/// Build the final ranking.
///
/// Walks `items` in original order, keeps those not flagged in `removed` with a
/// positive score, then sorts by score descending. The sort is stable, so ties
/// keep original item order. Ranks are assigned 1..k after sorting.
pub fn rank_items(items: &[String], removed: &[bool], scores: &ScoreMap) -> Vec<RankedItem> {
    let mut kept: Vec<(&String, u32)> = items
        .iter()
        .enumerate()
        .filter(|&(idx, _)| !removed[idx])
        .map(|(_, name)| (name, scores.get(name)))
        .filter(|&(_, score)| score > 0)
        .collect();

    kept.sort_by(|a, b| b.1.cmp(&a.1));

    kept.into_iter()
        .enumerate()
        .map(|(i, (name, score))| RankedItem {
            rank: i + 1,
            name: name.clone(),
            score,
        })
        .collect()
}
