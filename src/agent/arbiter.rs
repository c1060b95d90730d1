//! The arbiter seam: whoever holds the hidden rule.

use tracing::warn;

use crate::cards::Card;
use crate::expr::{CardWindow, ExpressionTree};

/// Judges plays against a hidden rule.
///
/// The agent only ever sees the verdict. `history` is the legal sequence so
/// far, oldest first.
pub trait Arbiter {
    fn judge(&mut self, card: Card, history: &[Card]) -> bool;
}

impl<F> Arbiter for F
where
    F: FnMut(Card, &[Card]) -> bool,
{
    fn judge(&mut self, card: Card, history: &[Card]) -> bool {
        self(card, history)
    }
}

/// Arbiter backed by an [`ExpressionTree`].
///
/// Plays made before the rule has enough preceding cards to evaluate are
/// accepted. A rule that fails to evaluate rejects the card.
#[derive(Clone, Debug)]
pub struct RuleArbiter {
    rule: ExpressionTree,
}

impl RuleArbiter {
    #[must_use]
    pub fn new(rule: ExpressionTree) -> Self {
        Self { rule }
    }

    #[must_use]
    pub fn rule(&self) -> &ExpressionTree {
        &self.rule
    }
}

impl Arbiter for RuleArbiter {
    fn judge(&mut self, card: Card, history: &[Card]) -> bool {
        if history.len() < self.rule.lookback() {
            return true;
        }
        match self.rule.holds(&CardWindow::after(history, card)) {
            Ok(legal) => legal,
            Err(error) => {
                warn!(%card, rule = %self.rule, %error, "hidden rule failed to evaluate; rejecting");
                false
            }
        }
    }
}
