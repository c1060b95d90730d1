//! Conjunctive compounds of the strongest hypotheses.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use tracing::debug;

use super::evidence::Evidence;
use super::hypothesis::{Hypothesis, HypothesisRanking};
use super::ranking::{Ranking, ScoreTable};
use crate::cards::CharacteristicSet;
use crate::core::{CharacteristicWeights, InferenceConfig};

/// A conjunction of hypotheses, in the order they were ranked.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompoundRule {
    members: SmallVec<[Hypothesis; 5]>,
}

impl CompoundRule {
    /// `None` for an empty member list.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = Hypothesis>) -> Option<Self> {
        let members: SmallVec<[Hypothesis; 5]> = members.into_iter().collect();
        (!members.is_empty()).then_some(Self { members })
    }

    #[must_use]
    pub fn single(hypothesis: Hypothesis) -> Self {
        Self {
            members: smallvec::smallvec![hypothesis],
        }
    }

    #[must_use]
    pub fn members(&self) -> &[Hypothesis] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every member matches its own trailing alignment within `window`.
    #[must_use]
    pub fn matches(&self, window: &[CharacteristicSet]) -> bool {
        self.members.iter().all(|h| h.matches(window))
    }

    /// Mean of the members' average tag weights.
    #[must_use]
    pub fn average_weight(&self, weights: &CharacteristicWeights) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.members.iter().map(|h| h.average_weight(weights)).sum();
        sum / self.members.len() as f64
    }
}

impl fmt::Display for CompoundRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

pub type RuleRanking = Ranking<CompoundRule>;

/// Builds and scores compounds from a hypothesis ranking.
#[derive(Clone, Debug, Default)]
pub struct CompoundRuleRanker {
    config: InferenceConfig,
}

impl CompoundRuleRanker {
    #[must_use]
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Candidate compounds: every combination of 1 to
    /// `max_combination_size` top hypotheses, plus the full top set.
    #[must_use]
    pub fn candidates(&self, hypotheses: &HypothesisRanking) -> Vec<CompoundRule> {
        let pool: Vec<Hypothesis> = hypotheses
            .top(self.config.top_hypotheses)
            .iter()
            .map(|e| e.item.clone())
            .collect();

        let mut compounds = Vec::new();
        for size in 1..=self.config.max_combination_size.min(pool.len()) {
            for indices in combinations(pool.len(), size) {
                compounds.extend(CompoundRule::new(indices.into_iter().map(|i| pool[i].clone())));
            }
        }
        if pool.len() > self.config.max_combination_size {
            compounds.extend(CompoundRule::new(pool));
        }
        compounds
    }

    /// Score every candidate over the 3-card windows of the legal sequence.
    ///
    /// A matching window credits the compound's mean member weight. With
    /// fewer than three legal cards there are no windows and the ranking is
    /// empty.
    #[must_use]
    pub fn scan_and_rank_rules(&self, hypotheses: &HypothesisRanking, evidence: &Evidence) -> RuleRanking {
        let weights = &self.config.weights;
        let candidates = self.candidates(hypotheses);

        let mut table = ScoreTable::default();
        for end in evidence.window_ends(3) {
            let window = evidence.window(end, 3);
            for compound in candidates.iter().filter(|c| c.matches(window)) {
                table.credit(compound.clone(), compound.average_weight(weights), false);
            }
        }

        let (retained, cutoff) = table.prune();
        let ranking = RuleRanking::from_scores(retained, cutoff);
        debug!(
            candidates = candidates.len(),
            retained = ranking.len(),
            cutoff,
            top = ranking.best().map(|e| e.item.to_string()),
            top_score = ranking.best().map(|e| e.score),
            "compound scan"
        );
        ranking
    }
}

/// Index combinations of `k` out of `n`, in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<SmallVec<[usize; 5]>> {
    let mut out = Vec::new();
    if k == 0 || k > n {
        return out;
    }
    let mut idx: SmallVec<[usize; 5]> = (0..k).collect();
    loop {
        out.push(idx.clone());
        // Rightmost index that can still advance.
        let Some(i) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return out;
        };
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}
