//! Operator kinds and symbolic slots.
//!
//! Operators are a closed set: dispatch in the evaluator is an exhaustive
//! `match`, and arity is fixed per variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every operator the rule language knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    // === Unary card accessors ===
    Suit,
    Color,
    Value,
    IsRoyal,
    Even,
    Odd,
    Plus1,
    Minus1,

    // === Logic ===
    Not,
    And,
    Or,

    // === Comparison ===
    Equal,
    Less,
    Greater,

    // === Conditional (test, then, else) ===
    If,
}

impl Operator {
    pub const ALL: [Operator; 15] = [
        Operator::Suit,
        Operator::Color,
        Operator::Value,
        Operator::IsRoyal,
        Operator::Even,
        Operator::Odd,
        Operator::Plus1,
        Operator::Minus1,
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Equal,
        Operator::Less,
        Operator::Greater,
        Operator::If,
    ];

    /// Number of operands the operator takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Operator::Suit
            | Operator::Color
            | Operator::Value
            | Operator::IsRoyal
            | Operator::Even
            | Operator::Odd
            | Operator::Plus1
            | Operator::Minus1
            | Operator::Not => 1,
            Operator::And | Operator::Or | Operator::Equal | Operator::Less | Operator::Greater => 2,
            Operator::If => 3,
        }
    }

    /// Canonical name used by the prefix notation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Operator::Suit => "suit",
            Operator::Color => "color",
            Operator::Value => "value",
            Operator::IsRoyal => "is_royal",
            Operator::Even => "even",
            Operator::Odd => "odd",
            Operator::Plus1 => "plus1",
            Operator::Minus1 => "minus1",
            Operator::Not => "not",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Equal => "equal",
            Operator::Less => "less",
            Operator::Greater => "greater",
            Operator::If => "if",
        }
    }

    /// Look up an operator by name. Accepts the camel-case `isRoyal` spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Operator> {
        if name == "isRoyal" {
            return Some(Operator::IsRoyal);
        }
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Positions of the 3-card evaluation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    Previous2,
    Previous,
    Current,
}

impl Slot {
    /// Slots for a window of `len` cards, oldest first (`len` is 2 or 3).
    #[must_use]
    pub fn trailing(len: usize) -> &'static [Slot] {
        const ALL: [Slot; 3] = [Slot::Previous2, Slot::Previous, Slot::Current];
        &ALL[3 - len.min(3)..]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Slot::Previous2 => "previous2",
            Slot::Previous => "previous",
            Slot::Current => "current",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Slot> {
        match name {
            "previous2" | "prev2" => Some(Slot::Previous2),
            "previous" | "prev" => Some(Slot::Previous),
            "current" | "curr" => Some(Slot::Current),
            _ => None,
        }
    }

    /// How many cards before the current one this slot reaches back.
    #[must_use]
    pub const fn lookback(self) -> usize {
        match self {
            Slot::Previous2 => 2,
            Slot::Previous => 1,
            Slot::Current => 0,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
