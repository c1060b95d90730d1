//! Playing cards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::rank::Rank;
use super::suit::{Color, Suit};
use crate::core::{EleusisError, EleusisResult};

/// An immutable playing card.
///
/// Cards order by suit first (C < D < H < S), then by rank; the field
/// order below is what the derived `Ord` relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    #[must_use]
    pub const fn is_royal(self) -> bool {
        self.rank.is_royal()
    }

    #[must_use]
    pub const fn is_even(self) -> bool {
        self.rank.is_even()
    }

    #[must_use]
    pub const fn is_odd(self) -> bool {
        self.rank.is_odd()
    }

    /// Same suit, next rank. `None` for kings.
    #[must_use]
    pub fn successor(self) -> Option<Card> {
        self.rank.successor().map(|rank| Card::new(rank, self.suit))
    }

    /// Same suit, previous rank. `None` for aces.
    #[must_use]
    pub fn predecessor(self) -> Option<Card> {
        self.rank.predecessor().map(|rank| Card::new(rank, self.suit))
    }

    /// All 52 cards in card order.
    pub fn deck() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = EleusisError;

    /// Parses rank-then-suit notation: `"2H"`, `"10S"`, `"TS"`, `"QC"`.
    fn from_str(s: &str) -> EleusisResult<Self> {
        let invalid = || EleusisError::InvalidCard(s.to_string());
        let suit_char = s.chars().last().ok_or_else(invalid)?;
        let suit = Suit::from_symbol(suit_char).ok_or_else(invalid)?;
        let rank_text = &s[..s.len() - suit_char.len_utf8()];
        if rank_text.is_empty() {
            return Err(invalid());
        }
        let rank = rank_text.parse::<Rank>().map_err(|_| invalid())?;
        Ok(Card::new(rank, suit))
    }
}
