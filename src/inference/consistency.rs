//! How well a rule explains the board.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::expr::{CardWindow, ExpressionTree};

/// Agreement between a rule and the recorded verdicts.
///
/// Plays made before the rule has enough context to judge them are not
/// counted. Windows on which the rule fails to evaluate count as `errors`
/// and as disagreements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConsistency {
    pub legal_windows: usize,
    pub legal_accepted: usize,
    pub illegal_observations: usize,
    pub illegal_rejected: usize,
    pub errors: usize,
}

impl RuleConsistency {
    #[must_use]
    pub fn measure(tree: &ExpressionTree, board: &BoardState) -> Self {
        let lookback = tree.lookback();
        let mut report = Self::default();

        let legal = board.legal_sequence();
        for i in lookback.max(1)..legal.len() {
            let window = CardWindow::after(&legal[..i], legal[i]);
            report.legal_windows += 1;
            match tree.holds(&window) {
                Ok(true) => report.legal_accepted += 1,
                Ok(false) => {}
                Err(_) => report.errors += 1,
            }
        }

        for observation in board.illegal_observations() {
            if observation.preceding().len() < lookback {
                continue;
            }
            report.illegal_observations += 1;
            match tree.holds(&observation.window()) {
                Ok(false) => report.illegal_rejected += 1,
                Ok(true) => {}
                Err(_) => report.errors += 1,
            }
        }
        report
    }

    /// Windows judged correctly.
    #[must_use]
    pub fn agreements(&self) -> usize {
        self.legal_accepted + self.illegal_rejected
    }

    /// Windows judged.
    #[must_use]
    pub fn total(&self) -> usize {
        self.legal_windows + self.illegal_observations
    }

    /// Fraction of judged windows the rule agrees with; 1.0 with nothing
    /// to judge.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            1.0
        } else {
            self.agreements() as f64 / self.total() as f64
        }
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.agreements() == self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn suit_rule() -> ExpressionTree {
        ExpressionTree::parse("equal(suit(previous), suit(current))").unwrap()
    }

    #[test]
    fn test_perfect_rule() {
        let mut board = BoardState::with_accepted([card("2H"), card("9H")]);
        board.append_rejected(card("3S")).unwrap();
        board.append_accepted(card("KH"));

        let report = RuleConsistency::measure(&suit_rule(), &board);
        assert_eq!(report.legal_windows, 2);
        assert_eq!(report.illegal_observations, 1);
        assert!(report.is_perfect());
        assert_eq!(report.accuracy(), 1.0);
    }

    #[test]
    fn test_always_misses_rejections() {
        let mut board = BoardState::with_accepted([card("2H"), card("9H")]);
        board.append_rejected(card("3S")).unwrap();

        let report = RuleConsistency::measure(&ExpressionTree::always(), &board);
        assert_eq!(report.legal_accepted, 1);
        assert_eq!(report.illegal_rejected, 0);
        assert!(!report.is_perfect());
        assert!((report.accuracy() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_skips_plays_without_context() {
        let mut board = BoardState::with_accepted([card("2H")]);
        board.append_rejected(card("3S")).unwrap();
        board.append_accepted(card("4H"));

        let deep = ExpressionTree::parse("equal(suit(previous2), suit(current))").unwrap();
        let report = RuleConsistency::measure(&deep, &board);
        assert_eq!(report.total(), 0);
        assert_eq!(report.accuracy(), 1.0);
    }

    #[test]
    fn test_type_errors_count_against() {
        let board = BoardState::with_accepted([card("2H"), card("4H")]);
        let broken = ExpressionTree::parse("equal(suit(current), value(previous))").unwrap();
        let report = RuleConsistency::measure(&broken, &board);
        assert_eq!(report.errors, 1);
        assert!(!report.is_perfect());
    }
}
