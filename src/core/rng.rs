//! Deterministic random number generation for card sampling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical play sequences
//! - **Serializable**: O(1) state capture and restore
//! - **Context streams**: Independent sequences for different purposes
//!
//! ```
//! use eleusis::core::EleusisRng;
//!
//! let mut a = EleusisRng::new(42);
//! let mut b = EleusisRng::new(42);
//! assert_eq!(a.gen_range_usize(0..52), b.gen_range_usize(0..52));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG backing every random choice the agent makes.
///
/// Uses ChaCha8 for speed while keeping runs reproducible from a `u64` seed.
#[derive(Clone, Debug)]
pub struct EleusisRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl EleusisRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// A new consumer takes its own context instead of drawing from a shared
    /// stream, so existing consumers replay unchanged.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> EleusisRngState {
        EleusisRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a previously captured state.
    #[must_use]
    pub fn from_state(state: &EleusisRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state, so a run can be replayed from any play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EleusisRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = EleusisRng::new(42);
        let mut rng2 = EleusisRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..52), rng2.gen_range_usize(0..52));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = EleusisRng::new(1);
        let mut rng2 = EleusisRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_streams_are_independent_and_stable() {
        let rng = EleusisRng::new(42);
        let mut explore = rng.for_context("explore");
        let mut probe = rng.for_context("probe");

        let seq1: Vec<_> = (0..10).map(|_| explore.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| probe.gen_range_usize(0..1000)).collect();
        assert_ne!(seq1, seq2);

        let mut again = EleusisRng::new(42).for_context("explore");
        let seq3: Vec<_> = (0..10).map(|_| again.gen_range_usize(0..1000)).collect();
        assert_eq!(seq1, seq3);
    }

    #[test]
    fn test_choose() {
        let mut rng = EleusisRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = EleusisRng::new(42);
        for _ in 0..100 {
            rng.gen_range_usize(0..1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_range_usize(0..1000)).collect();

        let mut restored = EleusisRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range_usize(0..1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = EleusisRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: EleusisRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
