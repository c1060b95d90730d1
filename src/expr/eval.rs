//! Expression evaluation over a 3-card window.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::operator::{Operator, Slot};
use super::tree::Expr;
use super::value::Value;
use crate::cards::Card;
use crate::core::{EleusisError, EleusisResult};

/// The cards bound to the three slot names.
///
/// Early in a game fewer than two cards precede the current one; referring
/// to an unbound slot is a `MalformedExpression`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardWindow {
    pub previous2: Option<Card>,
    pub previous: Option<Card>,
    pub current: Card,
}

impl CardWindow {
    #[must_use]
    pub const fn triple(previous2: Card, previous: Card, current: Card) -> Self {
        Self {
            previous2: Some(previous2),
            previous: Some(previous),
            current,
        }
    }

    #[must_use]
    pub const fn pair(previous: Card, current: Card) -> Self {
        Self {
            previous2: None,
            previous: Some(previous),
            current,
        }
    }

    /// Window for playing `current` after `history` (oldest first).
    #[must_use]
    pub fn after(history: &[Card], current: Card) -> Self {
        let n = history.len();
        Self {
            previous2: n.checked_sub(2).map(|i| history[i]),
            previous: n.checked_sub(1).map(|i| history[i]),
            current,
        }
    }

    /// Card bound to `slot`.
    pub fn get(&self, slot: Slot) -> EleusisResult<Card> {
        match slot {
            Slot::Previous2 => self.previous2,
            Slot::Previous => self.previous,
            Slot::Current => Some(self.current),
        }
        .ok_or_else(|| EleusisError::MalformedExpression(format!("slot '{slot}' is not bound")))
    }
}

/// Evaluate an expression against a window.
pub fn evaluate(expr: &Expr, window: &CardWindow) -> EleusisResult<Value> {
    let node = match expr {
        Expr::Slot(slot) => return window.get(*slot).map(Value::Card),
        Expr::Literal(value) => return Ok(*value),
        Expr::Apply(node) => node,
    };
    let args = node.args();

    match node.op() {
        Operator::And => {
            let lhs = evaluate(&args[0], window)?;
            if !lhs.is_truthy() {
                return Ok(Value::Bool(false));
            }
            // The right-hand value flows through unchanged.
            evaluate(&args[1], window)
        }
        Operator::Or => {
            let lhs = evaluate(&args[0], window)?;
            if lhs.is_truthy() {
                return Ok(Value::Bool(true));
            }
            evaluate(&args[1], window)
        }
        Operator::If => {
            if evaluate(&args[0], window)?.is_truthy() {
                evaluate(&args[1], window)
            } else {
                evaluate(&args[2], window)
            }
        }
        Operator::Equal | Operator::Less | Operator::Greater => {
            let lhs = evaluate(&args[0], window)?;
            let rhs = evaluate(&args[1], window)?;
            let wanted = match node.op() {
                Operator::Equal => Ordering::Equal,
                Operator::Less => Ordering::Less,
                _ => Ordering::Greater,
            };
            Ok(Value::Bool(lhs.compare(rhs)? == wanted))
        }
        op => apply_unary(op, evaluate(&args[0], window)?),
    }
}

fn apply_unary(op: Operator, value: Value) -> EleusisResult<Value> {
    let result = match (op, value) {
        (Operator::Not, v) => Some(Value::Bool(!v.is_truthy())),

        (Operator::Suit, Value::Card(c)) => Some(Value::Suit(c.suit)),
        (Operator::Suit, Value::Suit(s)) => Some(Value::Suit(s)),

        (Operator::Color, Value::Card(c)) => Some(Value::Color(c.color())),
        (Operator::Color, Value::Suit(s)) => Some(Value::Color(s.color())),
        (Operator::Color, Value::Color(k)) => Some(Value::Color(k)),

        (Operator::Value, Value::Card(c)) => Some(Value::Rank(c.rank)),
        (Operator::Value, Value::Rank(r)) => Some(Value::Rank(r)),

        (Operator::IsRoyal, Value::Card(c)) => Some(Value::Bool(c.is_royal())),
        (Operator::IsRoyal, Value::Rank(r)) => Some(Value::Bool(r.is_royal())),
        (Operator::Even, Value::Card(c)) => Some(Value::Bool(c.is_even())),
        (Operator::Even, Value::Rank(r)) => Some(Value::Bool(r.is_even())),
        (Operator::Odd, Value::Card(c)) => Some(Value::Bool(c.is_odd())),
        (Operator::Odd, Value::Rank(r)) => Some(Value::Bool(r.is_odd())),

        (Operator::Plus1, v) => step(true, v)?,
        (Operator::Minus1, v) => step(false, v)?,

        _ => None,
    };
    result.ok_or_else(|| {
        EleusisError::MalformedExpression(format!(
            "{op} is not defined on {} '{value}'",
            value.type_name()
        ))
    })
}

/// Successor or predecessor within a value's own category.
///
/// `Ok(None)` means the category has no ordering to step in; stepping
/// past the end of a bounded category is `OutOfRange`.
fn step(up: bool, value: Value) -> EleusisResult<Option<Value>> {
    let stepped = match value {
        Value::Card(c) => Some(if up { c.successor() } else { c.predecessor() }.map(Value::Card)),
        Value::Rank(r) => Some(if up { r.successor() } else { r.predecessor() }.map(Value::Rank)),
        Value::Suit(s) => Some(if up { s.successor() } else { s.predecessor() }.map(Value::Suit)),
        Value::Color(k) => Some(Some(Value::Color(k.toggle()))),
        Value::Bool(_) => None,
    };
    match stepped {
        None => Ok(None),
        Some(Some(v)) => Ok(Some(v)),
        Some(None) => Err(EleusisError::OutOfRange(format!(
            "{} has no {}",
            value,
            if up { "successor" } else { "predecessor" }
        ))),
    }
}
