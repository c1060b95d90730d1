//! Characteristic-tuple hypotheses and the sliding-window scanner.
//!
//! ## Scoring
//!
//! Every window of the legal sequence contributes every tuple in the
//! Cartesian product of its positions' tag sets. The n-th sighting of a
//! tuple adds `avg_weight * n`, so patterns that hold throughout the game
//! compound far ahead of coincidental ones.
//!
//! ## Pruning and disconfirmation
//!
//! Tuples at or below the mean contribution are dropped. Each surviving
//! tuple that would also have allowed a rejected card then loses
//! `avg_weight` per such illegal observation. A rejection with two
//! preceding cards is read as a triple window when triple windows are on,
//! otherwise as a pair.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use tracing::debug;

use super::evidence::Evidence;
use super::ranking::{HypothesisScore, Ranking, ScoreTable};
use crate::board::{BoardState, IllegalObservation};
use crate::cards::{Characteristic, CharacteristicSet};
use crate::core::{CharacteristicWeights, InferenceConfig};
use crate::expr::Slot;

/// One tag per consecutive window position, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hypothesis {
    tags: SmallVec<[Characteristic; 3]>,
}

impl Hypothesis {
    /// "The previous and current cards exhibit these tags."
    #[must_use]
    pub fn pair(previous: Characteristic, current: Characteristic) -> Self {
        Self {
            tags: smallvec::smallvec![previous, current],
        }
    }

    /// "The three trailing cards exhibit these tags."
    #[must_use]
    pub fn triple(previous2: Characteristic, previous: Characteristic, current: Characteristic) -> Self {
        Self {
            tags: smallvec::smallvec![previous2, previous, current],
        }
    }

    #[must_use]
    pub fn tags(&self) -> &[Characteristic] {
        &self.tags
    }

    /// Window length this hypothesis spans (2 or 3).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The tag required of the card being judged.
    #[must_use]
    pub fn current(&self) -> Characteristic {
        self.tags[self.tags.len() - 1]
    }

    /// Tags paired with the window slot they constrain.
    pub fn slotted(&self) -> impl Iterator<Item = (Slot, Characteristic)> + '_ {
        Slot::trailing(self.tags.len())
            .iter()
            .copied()
            .zip(self.tags.iter().copied())
    }

    /// Whether the trailing positions of `window` exhibit these tags.
    ///
    /// A 2-tag hypothesis checks the last two sets of a 3-set window.
    #[must_use]
    pub fn matches(&self, window: &[CharacteristicSet]) -> bool {
        let Some(start) = window.len().checked_sub(self.tags.len()) else {
            return false;
        };
        self.tags
            .iter()
            .zip(&window[start..])
            .all(|(tag, set)| set.contains(tag))
    }

    #[must_use]
    pub fn average_weight(&self, weights: &CharacteristicWeights) -> f64 {
        weights.average(&self.tags)
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}")?;
        }
        f.write_str(")")
    }
}

/// Every tag tuple a window of characteristic sets exhibits.
pub(crate) fn candidates(sets: &[CharacteristicSet]) -> impl Iterator<Item = Hypothesis> + '_ {
    let width = sets.first().map_or(0, |s| s.len());
    let total = if sets.is_empty() { 0 } else { width.pow(sets.len() as u32) };
    (0..total).map(move |mut k| {
        let mut tags: SmallVec<[Characteristic; 3]> = SmallVec::new();
        for set in sets.iter().rev() {
            tags.push(set[k % width]);
            k /= width;
        }
        tags.reverse();
        Hypothesis { tags }
    })
}

pub type HypothesisRanking = Ranking<Hypothesis>;

/// Scans the legal sequence for recurring characteristic tuples.
#[derive(Clone, Debug, Default)]
pub struct HypothesisEngine {
    config: InferenceConfig,
}

impl HypothesisEngine {
    #[must_use]
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Scan a board snapshot and rank the surviving hypotheses.
    #[must_use]
    pub fn scan_and_rank_hypotheses(&self, board: &BoardState, use_triple_windows: bool) -> HypothesisRanking {
        self.rank(&Evidence::from_board(board), use_triple_windows)
    }

    /// Rank hypotheses against precomputed evidence.
    ///
    /// Fewer than two legal cards yield an empty ranking. Triple windows
    /// are only scanned once three legal cards exist.
    #[must_use]
    pub fn rank(&self, evidence: &Evidence, use_triple_windows: bool) -> HypothesisRanking {
        let legal = evidence.legal().len();
        if legal < 2 {
            return HypothesisRanking::default();
        }
        let weights = &self.config.weights;
        let use_triple = use_triple_windows && legal >= 3;

        let mut table = ScoreTable::default();
        let lengths: &[usize] = if use_triple { &[2, 3] } else { &[2] };
        for &len in lengths {
            for end in evidence.window_ends(len) {
                for hypothesis in candidates(evidence.window(end, len)) {
                    let contribution = hypothesis.average_weight(weights);
                    table.credit(hypothesis, contribution, true);
                }
            }
        }
        let scanned = table.len();
        let (mut retained, cutoff) = table.prune();

        let penalties = disconfirm(&mut retained, evidence.illegal(), weights, use_triple_windows);

        let ranking = HypothesisRanking::from_scores(retained, cutoff);
        debug!(
            legal,
            illegal = evidence.illegal().len(),
            scanned,
            retained = ranking.len(),
            penalties,
            cutoff,
            top_score = ranking.best().map(|e| e.score),
            "hypothesis scan"
        );
        ranking
    }
}

/// Penalise retained hypotheses that would have allowed a rejected card.
///
/// Each observation is read as a triple window when triple windows are on
/// and two cards preceded the rejection, and as a pair window otherwise.
/// Every matching hypothesis loses its average weight once per observation.
///
/// Returns the number of penalties applied.
fn disconfirm(
    retained: &mut FxHashMap<Hypothesis, HypothesisScore>,
    observations: &[IllegalObservation],
    weights: &CharacteristicWeights,
    use_triple_windows: bool,
) -> usize {
    let mut applied = 0;

    for observation in observations {
        let Some(previous) = observation.previous() else {
            continue;
        };
        let rejected = Characteristic::of(observation.rejected);
        let previous = Characteristic::of(previous);

        let sets: SmallVec<[CharacteristicSet; 3]> = match observation.previous2() {
            Some(p2) if use_triple_windows => {
                smallvec::smallvec![Characteristic::of(p2), previous, rejected]
            }
            _ => smallvec::smallvec![previous, rejected],
        };

        for hypothesis in candidates(&sets) {
            if let Some(entry) = retained.get_mut(&hypothesis) {
                entry.score -= hypothesis.average_weight(weights);
                applied += 1;
            }
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Color, Parity, Suit};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn board(cards: &[&str]) -> BoardState {
        BoardState::with_accepted(cards.iter().map(|c| card(c)))
    }

    fn hearts() -> Hypothesis {
        Hypothesis::pair(Characteristic::Suit(Suit::Heart), Characteristic::Suit(Suit::Heart))
    }

    #[test]
    fn test_candidates_cover_product() {
        let a = Characteristic::of(card("2H"));
        let b = Characteristic::of(card("9S"));
        let pairs: Vec<_> = candidates(&[a, b]).collect();
        assert_eq!(pairs.len(), 25);
        assert!(pairs.contains(&Hypothesis::pair(
            Characteristic::Color(Color::Red),
            Characteristic::Suit(Suit::Spade)
        )));

        let mut triples: Vec<_> = candidates(&[a, b, a]).collect();
        assert_eq!(triples.len(), 125);
        triples.sort();
        triples.dedup();
        assert_eq!(triples.len(), 125);
        assert!(triples.iter().all(|h| h.len() == 3));
    }

    #[test]
    fn test_matches_aligns_to_trailing_positions() {
        let window = [
            Characteristic::of(card("2S")),
            Characteristic::of(card("4H")),
            Characteristic::of(card("6H")),
        ];
        assert!(hearts().matches(&window));
        assert!(!hearts().matches(&window[..2]));
        assert!(!Hypothesis::triple(
            Characteristic::Suit(Suit::Heart),
            Characteristic::Suit(Suit::Heart),
            Characteristic::Suit(Suit::Heart)
        )
        .matches(&window));
        assert!(!hearts().matches(&window[2..]));
    }

    #[test]
    fn test_slotted_and_display() {
        let h = Hypothesis::triple(
            Characteristic::Color(Color::Red),
            Characteristic::Parity(Parity::Even),
            Characteristic::Suit(Suit::Club),
        );
        let slots: Vec<_> = h.slotted().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![Slot::Previous2, Slot::Previous, Slot::Current]);
        assert_eq!(h.current(), Characteristic::Suit(Suit::Club));
        assert_eq!(h.to_string(), "(red, even, suit:C)");
    }

    #[test]
    fn test_too_few_cards_is_empty() {
        let engine = HypothesisEngine::default();
        assert!(engine.scan_and_rank_hypotheses(&BoardState::new(), true).is_empty());
        assert!(engine.scan_and_rank_hypotheses(&board(&["2H"]), true).is_empty());
    }

    #[test]
    fn test_shared_suit_ranks_first() {
        let engine = HypothesisEngine::default();
        let ranking = engine.scan_and_rank_hypotheses(&board(&["2H", "4H", "6H"]), true);
        let best = ranking.best().unwrap();
        assert_eq!(best.item, hearts());
        assert_eq!(best.occurrences, 2);
        assert!((best.score - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_pair_only_scan() {
        let engine = HypothesisEngine::default();
        let ranking = engine.scan_and_rank_hypotheses(&board(&["2H", "4H", "6H"]), false);
        assert!(!ranking.is_empty());
        assert!(ranking.iter().all(|e| e.item.len() == 2));
    }

    fn heart_triple() -> Hypothesis {
        Hypothesis::triple(
            Characteristic::Suit(Suit::Heart),
            Characteristic::Suit(Suit::Heart),
            Characteristic::Suit(Suit::Heart),
        )
    }

    #[test]
    fn test_triple_context_rejection_penalises_triples_only() {
        let engine = HypothesisEngine::default();
        let mut b = board(&["2H", "4H", "6H", "8H"]);
        let clean = engine.scan_and_rank_hypotheses(&b, true);
        assert!((clean.score_of(&hearts()).unwrap() - 6.0).abs() < 1e-9);
        assert!((clean.score_of(&heart_triple()).unwrap() - 3.0).abs() < 1e-9);

        b.append_rejected(card("3H")).unwrap();
        let once = engine.scan_and_rank_hypotheses(&b, true);
        assert!((once.score_of(&heart_triple()).unwrap() - 2.0).abs() < 1e-9);
        assert!((once.score_of(&hearts()).unwrap() - 6.0).abs() < 1e-9);

        // Each further matching rejection costs the same.
        b.append_rejected(card("5H")).unwrap();
        let twice = engine.scan_and_rank_hypotheses(&b, true);
        assert!((twice.score_of(&heart_triple()).unwrap() - 1.0).abs() < 1e-9);
        assert!((twice.score_of(&hearts()).unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_preceding_card_penalises_pairs() {
        let engine = HypothesisEngine::default();
        let mut b = board(&["2H"]);
        b.append_rejected(card("5H")).unwrap();
        for c in ["4H", "6H", "8H"] {
            b.append_accepted(card(c));
        }
        let ranking = engine.scan_and_rank_hypotheses(&b, true);
        assert!((ranking.score_of(&hearts()).unwrap() - 5.0).abs() < 1e-9);
        assert!((ranking.score_of(&heart_triple()).unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_pair_scan_reads_rejections_as_pairs() {
        let engine = HypothesisEngine::default();
        let mut b = board(&["2H", "4H", "6H", "8H"]);
        b.append_rejected(card("3H")).unwrap();
        b.append_rejected(card("5H")).unwrap();
        let ranking = engine.scan_and_rank_hypotheses(&b, false);
        assert!((ranking.score_of(&hearts()).unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_rejection_leaves_score() {
        let engine = HypothesisEngine::default();
        let mut b = board(&["2H", "4H", "6H", "8H"]);
        b.append_rejected(card("3S")).unwrap();
        let ranking = engine.scan_and_rank_hypotheses(&b, true);
        assert!((ranking.score_of(&hearts()).unwrap() - 6.0).abs() < 1e-9);
        assert_eq!(ranking.position(&hearts()), Some(0));
    }
}
