//! Per-cycle view of the board used by every inference stage.

use crate::board::{BoardState, IllegalObservation};
use crate::cards::{Card, Characteristic, CharacteristicSet};

/// Legal cards, their characteristic sets, and the illegal observations,
/// computed once from a board snapshot and shared by the hypothesis engine
/// and the compound ranker within one cycle.
#[derive(Clone, Debug, Default)]
pub struct Evidence {
    legal: Vec<Card>,
    tags: Vec<CharacteristicSet>,
    illegal: Vec<IllegalObservation>,
}

impl Evidence {
    #[must_use]
    pub fn from_board(board: &BoardState) -> Self {
        let legal = board.legal_sequence();
        let tags = legal.iter().map(|&card| Characteristic::of(card)).collect();
        Self {
            legal,
            tags,
            illegal: board.illegal_observations(),
        }
    }

    #[must_use]
    pub fn legal(&self) -> &[Card] {
        &self.legal
    }

    #[must_use]
    pub fn illegal(&self) -> &[IllegalObservation] {
        &self.illegal
    }

    /// Characteristic sets of the `len` legal cards ending at index `end`.
    ///
    /// Callers guarantee `len - 1 <= end < legal().len()`.
    #[must_use]
    pub fn window(&self, end: usize, len: usize) -> &[CharacteristicSet] {
        &self.tags[end + 1 - len..=end]
    }

    /// End indices of every window of length `len`.
    pub fn window_ends(&self, len: usize) -> std::ops::Range<usize> {
        len.saturating_sub(1).min(self.legal.len())..self.legal.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cards: &[&str]) -> BoardState {
        BoardState::with_accepted(cards.iter().map(|c| c.parse().unwrap()))
    }

    #[test]
    fn test_windows() {
        let evidence = Evidence::from_board(&board(&["2H", "4H", "6H", "8S"]));
        assert_eq!(evidence.window_ends(2), 1..4);
        assert_eq!(evidence.window_ends(3), 2..4);
        assert_eq!(evidence.window(3, 3).len(), 3);
        assert_eq!(evidence.window(3, 2)[1], Characteristic::of("8S".parse().unwrap()));
    }

    #[test]
    fn test_short_board_has_no_windows() {
        let evidence = Evidence::from_board(&board(&["2H"]));
        assert!(evidence.window_ends(2).is_empty());
        assert!(evidence.window_ends(3).is_empty());

        let evidence = Evidence::from_board(&BoardState::new());
        assert!(evidence.window_ends(2).is_empty());
    }
}
