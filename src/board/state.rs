//! Board state: the append-only record of plays.
//!
//! ## Slots
//!
//! The board is a sequence of slots. Each slot holds one accepted card and
//! the cards rejected while it was the open (most recent) slot. Only the
//! last slot can still gain rejections.
//!
//! ## Snapshots
//!
//! Backed by `im` persistent vectors, so cloning a board for a read-only
//! inference pass is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{EleusisError, EleusisResult};
use crate::expr::CardWindow;

/// One accepted card plus the rejections recorded after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSlot {
    pub accepted: Card,
    pub rejected: Vector<Card>,
}

impl BoardSlot {
    fn open(accepted: Card) -> Self {
        Self {
            accepted,
            rejected: Vector::new(),
        }
    }
}

/// A rejected card together with the accepted cards it was played after.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IllegalObservation {
    preceding: SmallVec<[Card; 2]>,
    pub rejected: Card,
}

impl IllegalObservation {
    /// Record `rejected` after one or two preceding accepted cards.
    pub fn new(preceding: &[Card], rejected: Card) -> EleusisResult<Self> {
        if preceding.is_empty() || preceding.len() > 2 {
            return Err(EleusisError::InvalidSequence(format!(
                "a rejection follows one or two accepted cards, got {}",
                preceding.len()
            )));
        }
        Ok(Self {
            preceding: preceding.iter().copied().collect(),
            rejected,
        })
    }

    /// Preceding accepted cards, oldest first.
    #[must_use]
    pub fn preceding(&self) -> &[Card] {
        &self.preceding
    }

    /// The accepted card immediately before the rejection.
    #[must_use]
    pub fn previous(&self) -> Option<Card> {
        self.preceding.last().copied()
    }

    /// The accepted card two before the rejection, if there was one.
    #[must_use]
    pub fn previous2(&self) -> Option<Card> {
        match self.preceding.as_slice() {
            [p2, _] => Some(*p2),
            _ => None,
        }
    }

    /// The window the arbiter judged when rejecting.
    #[must_use]
    pub fn window(&self) -> CardWindow {
        CardWindow::after(&self.preceding, self.rejected)
    }
}

/// Append-only play history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    slots: Vector<BoardSlot>,
}

impl BoardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A board whose first cards are known to be legal.
    #[must_use]
    pub fn with_accepted(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut board = Self::new();
        for card in cards {
            board.append_accepted(card);
        }
        board
    }

    /// Close the open slot and open a new one for `card`.
    pub fn append_accepted(&mut self, card: Card) {
        self.slots.push_back(BoardSlot::open(card));
    }

    /// Record a rejection against the open slot.
    ///
    /// Fails with `InvalidSequence` before any card has been accepted.
    pub fn append_rejected(&mut self, card: Card) -> EleusisResult<()> {
        let open = self.slots.back_mut().ok_or_else(|| {
            EleusisError::InvalidSequence(format!(
                "cannot reject {card}: no accepted card on the board yet"
            ))
        })?;
        open.rejected.push_back(card);
        Ok(())
    }

    /// Accepted cards in play order.
    #[must_use]
    pub fn legal_sequence(&self) -> Vec<Card> {
        self.slots.iter().map(|slot| slot.accepted).collect()
    }

    /// Every rejection with its one or two preceding accepted cards.
    #[must_use]
    pub fn illegal_observations(&self) -> Vec<IllegalObservation> {
        let mut observations = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let mut preceding = SmallVec::new();
            if index > 0 {
                preceding.push(self.slots[index - 1].accepted);
            }
            preceding.push(slot.accepted);
            for &rejected in &slot.rejected {
                observations.push(IllegalObservation {
                    preceding: preceding.clone(),
                    rejected,
                });
            }
        }
        observations
    }

    #[must_use]
    pub fn slots(&self) -> &Vector<BoardSlot> {
        &self.slots
    }

    /// Number of accepted cards.
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of recorded rejections.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.slots.iter().map(|slot| slot.rejected.len()).sum()
    }

    /// The last `n` accepted cards, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<Card> {
        let skip = self.slots.len().saturating_sub(n);
        self.slots.iter().skip(skip).map(|slot| slot.accepted).collect()
    }

    /// The window a candidate card would be judged in.
    #[must_use]
    pub fn window_for(&self, candidate: Card) -> CardWindow {
        CardWindow::after(&self.recent(2), candidate)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_reject_requires_open_slot() {
        let mut board = BoardState::new();
        let err = board.append_rejected(card("2H")).unwrap_err();
        assert!(matches!(err, EleusisError::InvalidSequence(_)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_legal_sequence_is_accepted_projection() {
        let mut board = BoardState::with_accepted([card("9S"), card("3H")]);
        board.append_rejected(card("4C")).unwrap();
        board.append_accepted(card("5H"));

        assert_eq!(board.legal_sequence(), vec![card("9S"), card("3H"), card("5H")]);
        assert_eq!(board.accepted_count(), 3);
        assert_eq!(board.rejected_count(), 1);
    }

    #[test]
    fn test_rejections_attach_to_open_slot_only() {
        let mut board = BoardState::with_accepted([card("2H")]);
        board.append_rejected(card("3S")).unwrap();
        board.append_accepted(card("4H"));
        board.append_rejected(card("5C")).unwrap();
        board.append_rejected(card("6C")).unwrap();

        let slots = board.slots();
        assert_eq!(slots[0].rejected.len(), 1);
        assert_eq!(slots[1].rejected.len(), 2);
    }

    #[test]
    fn test_illegal_observations_carry_context() {
        let mut board = BoardState::with_accepted([card("2H")]);
        board.append_rejected(card("3S")).unwrap();
        board.append_accepted(card("4H"));
        board.append_rejected(card("5C")).unwrap();

        let obs = board.illegal_observations();
        assert_eq!(obs.len(), 2);

        assert_eq!(obs[0].preceding(), &[card("2H")]);
        assert_eq!(obs[0].rejected, card("3S"));
        assert_eq!(obs[0].previous2(), None);

        assert_eq!(obs[1].preceding(), &[card("2H"), card("4H")]);
        assert_eq!(obs[1].previous(), Some(card("4H")));
        assert_eq!(obs[1].previous2(), Some(card("2H")));
        assert_eq!(obs[1].window(), CardWindow::triple(card("2H"), card("4H"), card("5C")));
    }

    #[test]
    fn test_observation_needs_preceding_card() {
        let err = IllegalObservation::new(&[], card("3S")).unwrap_err();
        assert!(matches!(err, EleusisError::InvalidSequence(_)));
        assert!(IllegalObservation::new(&[card("2H"), card("4H"), card("6H")], card("3S")).is_err());

        let obs = IllegalObservation::new(&[card("4H")], card("3S")).unwrap();
        assert_eq!(obs.previous(), Some(card("4H")));
        assert_eq!(obs.previous2(), None);
    }

    #[test]
    fn test_observations_never_expire() {
        let mut board = BoardState::with_accepted([card("2H")]);
        board.append_rejected(card("3S")).unwrap();
        for c in ["4H", "6H", "8H", "10H"] {
            board.append_accepted(card(c));
        }
        assert_eq!(board.illegal_observations().len(), 1);
    }

    #[test]
    fn test_window_for_candidate() {
        let board = BoardState::with_accepted([card("2H"), card("4H"), card("6H")]);
        assert_eq!(
            board.window_for(card("8H")),
            CardWindow::triple(card("4H"), card("6H"), card("8H"))
        );
        assert_eq!(board.recent(5).len(), 3);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut board = BoardState::with_accepted([card("2H")]);
        let snapshot = board.clone();
        board.append_accepted(card("4H"));
        assert_eq!(snapshot.accepted_count(), 1);
        assert_eq!(board.accepted_count(), 2);
    }

    #[test]
    fn test_serialization() {
        let mut board = BoardState::with_accepted([card("2H"), card("KS")]);
        board.append_rejected(card("3D")).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: BoardState = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
    }
}
