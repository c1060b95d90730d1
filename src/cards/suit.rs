//! Suits and colors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{EleusisError, EleusisResult};

/// Card suit, in the fixed total order Club < Diamond < Heart < Spade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    /// Derived color: clubs and spades are black, diamonds and hearts red.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Club | Suit::Spade => Color::Black,
            Suit::Diamond | Suit::Heart => Color::Red,
        }
    }

    /// Next suit in C..S order, `None` after spades.
    #[must_use]
    pub fn successor(self) -> Option<Suit> {
        Self::ALL.get(self as usize + 1).copied()
    }

    /// Previous suit in C..S order, `None` before clubs.
    #[must_use]
    pub fn predecessor(self) -> Option<Suit> {
        (self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Suits of the opposite color.
    #[must_use]
    pub fn opposite_color_suits(self) -> [Suit; 2] {
        match self.color() {
            Color::Black => [Suit::Diamond, Suit::Heart],
            Color::Red => [Suit::Club, Suit::Spade],
        }
    }

    pub(crate) const fn symbol(self) -> char {
        match self {
            Suit::Club => 'C',
            Suit::Diamond => 'D',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
        }
    }

    pub(crate) fn from_symbol(symbol: char) -> Option<Suit> {
        match symbol.to_ascii_uppercase() {
            'C' => Some(Suit::Club),
            'D' => Some(Suit::Diamond),
            'H' => Some(Suit::Heart),
            'S' => Some(Suit::Spade),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Suit {
    type Err = EleusisError;

    fn from_str(s: &str) -> EleusisResult<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Suit::from_symbol(c),
            _ => match s.to_ascii_lowercase().as_str() {
                "club" | "clubs" => Some(Suit::Club),
                "diamond" | "diamonds" => Some(Suit::Diamond),
                "heart" | "hearts" => Some(Suit::Heart),
                "spade" | "spades" => Some(Suit::Spade),
                _ => None,
            },
        }
        .ok_or_else(|| EleusisError::InvalidCard(s.to_string()))
    }
}

/// Card color. Black < Red.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::Red];

    /// The other color. Successor and predecessor of a color are both this.
    #[must_use]
    pub const fn toggle(self) -> Color {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Black => "B",
            Color::Red => "R",
        })
    }
}

impl FromStr for Color {
    type Err = EleusisError;

    fn from_str(s: &str) -> EleusisResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Color::Black),
            "r" | "red" => Ok(Color::Red),
            _ => Err(EleusisError::InvalidCard(s.to_string())),
        }
    }
}
