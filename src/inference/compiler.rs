//! Compiles compound rules into evaluable expression trees.

use super::compound::CompoundRule;
use super::hypothesis::Hypothesis;
use crate::cards::{Characteristic, Parity, Royalty};
use crate::core::EleusisResult;
use crate::expr::{Expr, ExpressionTree, Operator, Slot};

/// Turns characteristic tuples into predicates.
///
/// Each tag becomes a predicate on its slot:
///
/// | tag        | predicate                        |
/// |------------|----------------------------------|
/// | color      | `equal(color(slot), R)`          |
/// | suit       | `equal(suit(slot), H)`           |
/// | rank       | `equal(value(slot), 7)`          |
/// | parity     | `even(slot)` / `odd(slot)`       |
/// | royalty    | `is_royal(slot)` / `not(...)`    |
///
/// All predicates of all members are joined with a left-folded `and`.
pub struct TreeCompiler;

impl TreeCompiler {
    pub fn compile(rule: &CompoundRule) -> EleusisResult<ExpressionTree> {
        let mut terms = Vec::new();
        for member in rule.members() {
            terms.extend(Self::predicates(member)?);
        }
        Ok(ExpressionTree::new(conjoin(terms)?))
    }

    /// A single hypothesis as a tree.
    pub fn compile_hypothesis(hypothesis: &Hypothesis) -> EleusisResult<ExpressionTree> {
        Self::compile(&CompoundRule::single(hypothesis.clone()))
    }

    fn predicates(hypothesis: &Hypothesis) -> EleusisResult<Vec<Expr>> {
        hypothesis
            .slotted()
            .map(|(slot, tag)| Self::predicate(slot, tag))
            .collect()
    }

    fn predicate(slot: Slot, tag: Characteristic) -> EleusisResult<Expr> {
        let card = Expr::slot(slot);
        match tag {
            Characteristic::Color(color) => {
                Expr::binary(Operator::Equal, Expr::unary(Operator::Color, card)?, Expr::literal(color))
            }
            Characteristic::Suit(suit) => {
                Expr::binary(Operator::Equal, Expr::unary(Operator::Suit, card)?, Expr::literal(suit))
            }
            Characteristic::Rank(rank) => {
                Expr::binary(Operator::Equal, Expr::unary(Operator::Value, card)?, Expr::literal(rank))
            }
            Characteristic::Parity(Parity::Even) => Expr::unary(Operator::Even, card),
            Characteristic::Parity(Parity::Odd) => Expr::unary(Operator::Odd, card),
            Characteristic::Royalty(Royalty::Royal) => Expr::unary(Operator::IsRoyal, card),
            Characteristic::Royalty(Royalty::NotRoyal) => {
                Expr::unary(Operator::Not, Expr::unary(Operator::IsRoyal, card)?)
            }
        }
    }
}

fn conjoin(terms: Vec<Expr>) -> EleusisResult<Expr> {
    let mut terms = terms.into_iter();
    let Some(first) = terms.next() else {
        return Ok(Expr::literal(true));
    };
    terms.try_fold(first, |acc, term| Expr::binary(Operator::And, acc, term))
}
