//! Rule expression trees.
//!
//! An [`ExpressionTree`] is an immutable predicate over a 3-card window.
//! Operator nodes are arity-checked when built, so every tree in hand is
//! structurally valid; evaluation can still fail on operand types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::eval::{evaluate, CardWindow};
use super::operator::{Operator, Slot};
use super::parser::Parser;
use super::value::Value;
use crate::core::{EleusisError, EleusisResult};

/// An operator applied to arity-checked operands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    op: Operator,
    args: Vec<Expr>,
}

impl Node {
    /// Build a node, failing if `args` does not match the operator's arity.
    pub fn new(op: Operator, args: Vec<Expr>) -> EleusisResult<Self> {
        if args.len() != op.arity() {
            return Err(EleusisError::MalformedExpression(format!(
                "{op} takes {} operand(s), got {}",
                op.arity(),
                args.len()
            )));
        }
        Ok(Self { op, args })
    }

    #[must_use]
    pub fn op(&self) -> Operator {
        self.op
    }

    #[must_use]
    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

/// One operand: a nested node, a window slot, or a literal value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    Apply(Node),
    Slot(Slot),
    Literal(Value),
}

impl Expr {
    pub fn apply(op: Operator, args: Vec<Expr>) -> EleusisResult<Expr> {
        Node::new(op, args).map(Expr::Apply)
    }

    pub fn unary(op: Operator, arg: Expr) -> EleusisResult<Expr> {
        Self::apply(op, vec![arg])
    }

    pub fn binary(op: Operator, lhs: Expr, rhs: Expr) -> EleusisResult<Expr> {
        Self::apply(op, vec![lhs, rhs])
    }

    #[must_use]
    pub fn slot(slot: Slot) -> Expr {
        Expr::Slot(slot)
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Expr {
        Expr::Literal(value.into())
    }

    /// Deepest slot referenced, as a number of preceding cards.
    #[must_use]
    pub fn lookback(&self) -> usize {
        match self {
            Expr::Apply(node) => node.args.iter().map(Expr::lookback).max().unwrap_or(0),
            Expr::Slot(slot) => slot.lookback(),
            Expr::Literal(_) => 0,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Apply(node) => {
                write!(f, "{}(", node.op)?;
                for (i, arg) in node.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expr::Slot(slot) => write!(f, "{slot}"),
            Expr::Literal(value) => write!(f, "{value}"),
        }
    }
}

/// A complete, immutable rule.
///
/// Serializes as its prefix notation and is re-validated by the parser when
/// deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpressionTree {
    root: Expr,
}

impl ExpressionTree {
    #[must_use]
    pub fn new(root: Expr) -> Self {
        Self { root }
    }

    /// Parse the prefix notation, e.g. `equal(suit(previous), suit(current))`.
    pub fn parse(input: &str) -> EleusisResult<Self> {
        Parser::parse(input).map(Self::new)
    }

    /// The rule that accepts every card.
    #[must_use]
    pub fn always() -> Self {
        Self::new(Expr::literal(true))
    }

    #[must_use]
    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// How many preceding cards the rule needs (0, 1 or 2).
    #[must_use]
    pub fn lookback(&self) -> usize {
        self.root.lookback()
    }

    /// Evaluate against a window, returning the raw value.
    pub fn evaluate(&self, window: &CardWindow) -> EleusisResult<Value> {
        evaluate(&self.root, window)
    }

    /// Evaluate and collapse the result to truthiness.
    pub fn holds(&self, window: &CardWindow) -> EleusisResult<bool> {
        self.evaluate(window).map(Value::is_truthy)
    }
}

impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl FromStr for ExpressionTree {
    type Err = EleusisError;

    fn from_str(s: &str) -> EleusisResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExpressionTree {
    type Error = EleusisError;

    fn try_from(s: String) -> EleusisResult<Self> {
        Self::parse(&s)
    }
}

impl From<ExpressionTree> for String {
    fn from(tree: ExpressionTree) -> Self {
        tree.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn test_node_checks_arity() {
        assert!(Node::new(Operator::Not, vec![Expr::literal(true)]).is_ok());
        let err = Node::new(Operator::Equal, vec![Expr::literal(true)]).unwrap_err();
        assert!(matches!(err, EleusisError::MalformedExpression(_)));
        assert!(Expr::apply(Operator::If, vec![]).is_err());
    }

    #[test]
    fn test_display_is_prefix_notation() {
        let tree = ExpressionTree::new(
            Expr::binary(
                Operator::Equal,
                Expr::unary(Operator::Suit, Expr::slot(Slot::Previous)).unwrap(),
                Expr::literal(Suit::Heart),
            )
            .unwrap(),
        );
        assert_eq!(tree.to_string(), "equal(suit(previous), H)");
    }

    #[test]
    fn test_lookback() {
        assert_eq!(ExpressionTree::always().lookback(), 0);
        let tree = ExpressionTree::parse("and(even(current), odd(previous2))").unwrap();
        assert_eq!(tree.lookback(), 2);
        let tree = ExpressionTree::parse("greater(current, previous)").unwrap();
        assert_eq!(tree.lookback(), 1);
    }

    #[test]
    fn test_serde_uses_notation() {
        let tree = ExpressionTree::parse("equal(color(previous), color(current))").unwrap();
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, "\"equal(color(previous), color(current))\"");
        let back: ExpressionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);

        assert!(serde_json::from_str::<ExpressionTree>("\"equal(current)\"").is_err());
    }
}
