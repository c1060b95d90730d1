//! Score accumulation, mean-cutoff pruning, and ranked output shared by the
//! hypothesis and compound stages.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Accumulated weight plus occurrence count for one candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HypothesisScore {
    pub score: f64,
    pub occurrences: u32,
}

/// One entry of a ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ranked<K> {
    pub item: K,
    pub score: f64,
    pub occurrences: u32,
}

/// Candidates sorted by descending score, ties by descending key.
///
/// Only candidates that beat the mean contribution of their scan are ever
/// present. An empty ranking is the normal state early in a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ranking<K> {
    entries: Vec<Ranked<K>>,
    cutoff: f64,
}

impl<K> Default for Ranking<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cutoff: 0.0,
        }
    }
}

impl<K: Ord> Ranking<K> {
    pub(crate) fn from_scores(scores: FxHashMap<K, HypothesisScore>, cutoff: f64) -> Self {
        let mut entries: Vec<Ranked<K>> = scores
            .into_iter()
            .map(|(item, s)| Ranked {
                item,
                score: s.score,
                occurrences: s.occurrences,
            })
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| b.item.cmp(&a.item)));
        Self { entries, cutoff }
    }
}

impl<K: PartialEq> Ranking<K> {
    /// Score of a specific candidate, if it survived.
    #[must_use]
    pub fn score_of(&self, item: &K) -> Option<f64> {
        self.entries.iter().find(|e| &e.item == item).map(|e| e.score)
    }

    /// Zero-based rank of a specific candidate, if it survived.
    #[must_use]
    pub fn position(&self, item: &K) -> Option<usize> {
        self.entries.iter().position(|e| &e.item == item)
    }
}

impl<K> Ranking<K> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn best(&self) -> Option<&Ranked<K>> {
        self.entries.first()
    }

    /// The first `n` entries.
    #[must_use]
    pub fn top(&self, n: usize) -> &[Ranked<K>] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ranked<K>> {
        self.entries.iter()
    }

    /// Mean contribution that every entry had to exceed.
    #[must_use]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

impl<'a, K> IntoIterator for &'a Ranking<K> {
    type Item = &'a Ranked<K>;
    type IntoIter = std::slice::Iter<'a, Ranked<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Running accumulator for one scan.
#[derive(Debug)]
pub(crate) struct ScoreTable<K> {
    scores: FxHashMap<K, HypothesisScore>,
    total: f64,
}

impl<K> Default for ScoreTable<K> {
    fn default() -> Self {
        Self {
            scores: FxHashMap::default(),
            total: 0.0,
        }
    }
}

impl<K: Hash + Eq> ScoreTable<K> {
    /// Credit one occurrence of `key`.
    ///
    /// With `compounding`, the n-th occurrence adds `contribution * n`.
    /// The raw contribution always feeds the running mean.
    pub fn credit(&mut self, key: K, contribution: f64, compounding: bool) {
        let entry = self.scores.entry(key).or_default();
        entry.occurrences += 1;
        entry.score += if compounding {
            contribution * f64::from(entry.occurrences)
        } else {
            contribution
        };
        self.total += contribution;
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Mean contribution per distinct key, 0 when nothing was credited.
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.total / self.scores.len() as f64
        }
    }

    /// Drop every key scoring at or below the mean; return the survivors
    /// and the cutoff used.
    pub fn prune(self) -> (FxHashMap<K, HypothesisScore>, f64) {
        let cutoff = self.mean();
        let kept = self
            .scores
            .into_iter()
            .filter(|(_, s)| s.score > cutoff)
            .collect();
        (kept, cutoff)
    }
}
