//! Card sources for exploration and directed probing.

use crate::cards::{Card, Characteristic};
use crate::core::EleusisRng;

/// Supplies candidate cards.
pub trait CardSampler {
    /// Any card.
    fn next_card(&mut self) -> Card;

    /// A card exhibiting none of `excluded`, falling back to any card when
    /// the exclusions rule out the whole deck.
    fn next_card_avoiding(&mut self, excluded: &[Characteristic]) -> Card;
}

/// Uniform draws with replacement from a 52-card deck.
#[derive(Clone, Debug)]
pub struct RandomSampler {
    rng: EleusisRng,
    deck: Vec<Card>,
}

impl RandomSampler {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_rng(EleusisRng::new(seed).for_context("sampler"))
    }

    #[must_use]
    pub fn from_rng(rng: EleusisRng) -> Self {
        Self {
            rng,
            deck: Card::deck().collect(),
        }
    }

    fn draw(&mut self, pool: &[Card]) -> Option<Card> {
        self.rng.choose(pool).copied()
    }
}

impl CardSampler for RandomSampler {
    fn next_card(&mut self) -> Card {
        let index = self.rng.gen_range_usize(0..self.deck.len());
        self.deck[index]
    }

    fn next_card_avoiding(&mut self, excluded: &[Characteristic]) -> Card {
        let pool: Vec<Card> = self
            .deck
            .iter()
            .copied()
            .filter(|&card| !excluded.iter().any(|tag| tag.matches(card)))
            .collect();
        match self.draw(&pool) {
            Some(card) => card,
            None => self.next_card(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Parity, Rank, Suit};

    #[test]
    fn test_deterministic() {
        let mut a = RandomSampler::new(7);
        let mut b = RandomSampler::new(7);
        for _ in 0..20 {
            assert_eq!(a.next_card(), b.next_card());
        }
    }

    #[test]
    fn test_avoiding_respects_exclusions() {
        let mut sampler = RandomSampler::new(1);
        let excluded = [
            Characteristic::Color(Color::Red),
            Characteristic::Parity(Parity::Even),
        ];
        for _ in 0..50 {
            let card = sampler.next_card_avoiding(&excluded);
            assert_eq!(card.color(), Color::Black);
            assert!(card.is_odd());
        }
    }

    #[test]
    fn test_impossible_exclusions_fall_back() {
        let mut sampler = RandomSampler::new(1);
        let excluded = [
            Characteristic::Color(Color::Red),
            Characteristic::Color(Color::Black),
        ];
        // Any card is acceptable; the call must not panic.
        let _ = sampler.next_card_avoiding(&excluded);
    }

    #[test]
    fn test_single_survivor() {
        let mut sampler = RandomSampler::new(3);
        let mut excluded: Vec<Characteristic> = Suit::ALL
            .into_iter()
            .filter(|&s| s != Suit::Diamond)
            .map(Characteristic::Suit)
            .collect();
        excluded.extend(Rank::ALL.into_iter().filter(|&r| r != Rank::Nine).map(Characteristic::Rank));
        assert_eq!(sampler.next_card_avoiding(&excluded), "9D".parse::<Card>().unwrap());
    }
}
