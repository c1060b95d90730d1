use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{EleusisError, EleusisResult};

/// Card rank in the canonical sequence A, 2..10, J, Q, K.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Jack, Queen and King.
    #[must_use]
    pub const fn is_royal(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    #[must_use]
    pub const fn is_even(self) -> bool {
        self.value() % 2 == 0
    }

    #[must_use]
    pub const fn is_odd(self) -> bool {
        !self.is_even()
    }

    /// Next rank, `None` after the King.
    #[must_use]
    pub const fn successor(self) -> Option<Rank> {
        Rank::from_value(self.value() + 1)
    }

    /// Previous rank, `None` before the Ace.
    #[must_use]
    pub const fn predecessor(self) -> Option<Rank> {
        Rank::from_value(self.value() - 1)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        };
        f.write_str(text)
    }
}

impl FromStr for Rank {
    type Err = EleusisError;

    /// Accepts the face symbols (`A`, `T`, `J`, `Q`, `K`) and numeric values 1..=13.
    fn from_str(s: &str) -> EleusisResult<Self> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "A" => Some(Rank::Ace),
            "T" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            digits => digits.parse::<u8>().ok().and_then(Rank::from_value),
        };
        rank.ok_or_else(|| EleusisError::InvalidCard(s.to_string()))
    }
}
