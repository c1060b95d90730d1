//! Runtime values produced while evaluating a rule.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::cards::{Card, Color, Rank, Suit};
use crate::core::{EleusisError, EleusisResult};

/// A value flowing through an expression: a card, one of its properties,
/// or a truth value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Card(Card),
    Rank(Rank),
    Suit(Suit),
    Color(Color),
    Bool(bool),
}

impl Value {
    /// `Bool(b)` is `b`; every other value is truthy.
    #[must_use]
    pub const fn is_truthy(self) -> bool {
        match self {
            Value::Bool(b) => b,
            _ => true,
        }
    }

    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Value::Card(_) => "card",
            Value::Rank(_) => "rank",
            Value::Suit(_) => "suit",
            Value::Color(_) => "color",
            Value::Bool(_) => "bool",
        }
    }

    /// Parse a literal atom: `true`/`false`, a card, a rank, a suit, or a color,
    /// tried in that order.
    #[must_use]
    pub fn parse_literal(text: &str) -> Option<Value> {
        match text {
            "true" => return Some(Value::Bool(true)),
            "false" => return Some(Value::Bool(false)),
            _ => {}
        }
        text.parse::<Card>()
            .map(Value::Card)
            .or_else(|_| text.parse::<Rank>().map(Value::Rank))
            .or_else(|_| text.parse::<Suit>().map(Value::Suit))
            .or_else(|_| text.parse::<Color>().map(Value::Color))
            .ok()
    }

    /// Compare two values under the card ordering contract.
    ///
    /// Same-kind values compare directly. A card compared with a property
    /// is first projected onto that property (its rank, suit, or color), and
    /// a suit compared with a color is projected onto its color.
    pub fn compare(self, other: Value) -> EleusisResult<Ordering> {
        let ordering = match (self, other) {
            (Value::Card(a), Value::Card(b)) => a.cmp(&b),
            (Value::Rank(a), Value::Rank(b)) => a.cmp(&b),
            (Value::Suit(a), Value::Suit(b)) => a.cmp(&b),
            (Value::Color(a), Value::Color(b)) => a.cmp(&b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(&b),

            (Value::Card(c), Value::Rank(r)) => c.rank.cmp(&r),
            (Value::Rank(r), Value::Card(c)) => r.cmp(&c.rank),
            (Value::Card(c), Value::Suit(s)) => c.suit.cmp(&s),
            (Value::Suit(s), Value::Card(c)) => s.cmp(&c.suit),
            (Value::Card(c), Value::Color(k)) => c.color().cmp(&k),
            (Value::Color(k), Value::Card(c)) => k.cmp(&c.color()),
            (Value::Suit(s), Value::Color(k)) => s.color().cmp(&k),
            (Value::Color(k), Value::Suit(s)) => k.cmp(&s.color()),

            (a, b) => {
                return Err(EleusisError::MalformedExpression(format!(
                    "cannot compare {} '{a}' with {} '{b}'",
                    a.type_name(),
                    b.type_name()
                )))
            }
        };
        Ok(ordering)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Card(c) => write!(f, "{c}"),
            Value::Rank(r) => write!(f, "{r}"),
            Value::Suit(s) => write!(f, "{s}"),
            Value::Color(c) => write!(f, "{c}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<Card> for Value {
    fn from(c: Card) -> Self {
        Value::Card(c)
    }
}

impl From<Rank> for Value {
    fn from(r: Rank) -> Self {
        Value::Rank(r)
    }
}

impl From<Suit> for Value {
    fn from(s: Suit) -> Self {
        Value::Suit(s)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
