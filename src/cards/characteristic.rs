//! Characteristic tags: the atomic vocabulary hypotheses are built from.
//!
//! Every card carries exactly five tags, one per [`CharacteristicKind`]:
//! color, suit, rank, parity, and royalty.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use super::card::Card;
use super::rank::Rank;
use super::suit::{Color, Suit};

/// Even or odd rank value (the Ace counts as 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

/// Face card (J, Q, K) or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Royalty {
    Royal,
    NotRoyal,
}

/// Category a characteristic tag belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CharacteristicKind {
    Color,
    Suit,
    Rank,
    Parity,
    Royalty,
}

/// One derived property of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    Color(Color),
    Suit(Suit),
    Rank(Rank),
    Parity(Parity),
    Royalty(Royalty),
}

/// The five tags of a single card, in kind order.
pub type CharacteristicSet = [Characteristic; 5];

impl Characteristic {
    #[must_use]
    pub const fn kind(self) -> CharacteristicKind {
        match self {
            Characteristic::Color(_) => CharacteristicKind::Color,
            Characteristic::Suit(_) => CharacteristicKind::Suit,
            Characteristic::Rank(_) => CharacteristicKind::Rank,
            Characteristic::Parity(_) => CharacteristicKind::Parity,
            Characteristic::Royalty(_) => CharacteristicKind::Royalty,
        }
    }

    /// Compute the characteristic set of a card.
    #[must_use]
    pub fn of(card: Card) -> CharacteristicSet {
        [
            Characteristic::Color(card.color()),
            Characteristic::Suit(card.suit),
            Characteristic::Rank(card.rank),
            Characteristic::Parity(if card.is_even() { Parity::Even } else { Parity::Odd }),
            Characteristic::Royalty(if card.is_royal() {
                Royalty::Royal
            } else {
                Royalty::NotRoyal
            }),
        ]
    }

    /// Whether `card` exhibits this tag.
    #[must_use]
    pub fn matches(self, card: Card) -> bool {
        Self::of(card).contains(&self)
    }

    /// Tags that contradict this one.
    ///
    /// A suit is contradicted by the two suits of the other color. Ranks
    /// have no single contradicting tag and return nothing.
    #[must_use]
    pub fn negations(self) -> SmallVec<[Characteristic; 2]> {
        match self {
            Characteristic::Color(color) => smallvec::smallvec![Characteristic::Color(color.toggle())],
            Characteristic::Suit(suit) => suit
                .opposite_color_suits()
                .into_iter()
                .map(Characteristic::Suit)
                .collect(),
            Characteristic::Rank(_) => SmallVec::new(),
            Characteristic::Parity(Parity::Even) => smallvec::smallvec![Characteristic::Parity(Parity::Odd)],
            Characteristic::Parity(Parity::Odd) => smallvec::smallvec![Characteristic::Parity(Parity::Even)],
            Characteristic::Royalty(Royalty::Royal) => {
                smallvec::smallvec![Characteristic::Royalty(Royalty::NotRoyal)]
            }
            Characteristic::Royalty(Royalty::NotRoyal) => {
                smallvec::smallvec![Characteristic::Royalty(Royalty::Royal)]
            }
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Characteristic::Color(Color::Black) => f.write_str("black"),
            Characteristic::Color(Color::Red) => f.write_str("red"),
            Characteristic::Suit(suit) => write!(f, "suit:{suit}"),
            Characteristic::Rank(rank) => write!(f, "rank:{rank}"),
            Characteristic::Parity(Parity::Even) => f.write_str("even"),
            Characteristic::Parity(Parity::Odd) => f.write_str("odd"),
            Characteristic::Royalty(Royalty::Royal) => f.write_str("royal"),
            Characteristic::Royalty(Royalty::NotRoyal) => f.write_str("not_royal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_has_one_tag_per_kind() {
        let set = Characteristic::of("QH".parse().unwrap());
        let kinds: Vec<_> = set.iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                CharacteristicKind::Color,
                CharacteristicKind::Suit,
                CharacteristicKind::Rank,
                CharacteristicKind::Parity,
                CharacteristicKind::Royalty,
            ]
        );
        assert!(set.contains(&Characteristic::Color(Color::Red)));
        assert!(set.contains(&Characteristic::Parity(Parity::Even)));
        assert!(set.contains(&Characteristic::Royalty(Royalty::Royal)));
    }

    #[test]
    fn test_ace_is_odd_and_not_royal() {
        let set = Characteristic::of("AS".parse().unwrap());
        assert!(set.contains(&Characteristic::Parity(Parity::Odd)));
        assert!(set.contains(&Characteristic::Royalty(Royalty::NotRoyal)));
        assert!(set.contains(&Characteristic::Color(Color::Black)));
    }

    #[test]
    fn test_matches() {
        let card: Card = "7D".parse().unwrap();
        assert!(Characteristic::Suit(Suit::Diamond).matches(card));
        assert!(!Characteristic::Suit(Suit::Heart).matches(card));
        assert!(Characteristic::Rank(Rank::Seven).matches(card));
    }

    #[test]
    fn test_negations() {
        assert_eq!(
            Characteristic::Suit(Suit::Club).negations().as_slice(),
            &[Characteristic::Suit(Suit::Diamond), Characteristic::Suit(Suit::Heart)]
        );
        assert_eq!(
            Characteristic::Color(Color::Red).negations().as_slice(),
            &[Characteristic::Color(Color::Black)]
        );
        assert!(Characteristic::Rank(Rank::Five).negations().is_empty());
    }
}
