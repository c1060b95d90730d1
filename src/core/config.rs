//! Configuration for inference and the play loop.
//!
//! Configuration is read once at startup and is read-only while the agent
//! runs. Every type here has a `Default` matching the classic game setup
//! and `with_*` builder methods for overrides.

use serde::{Deserialize, Serialize};

use super::error::{EleusisError, EleusisResult};
use crate::cards::{Characteristic, CharacteristicKind};

/// Prior weight of each characteristic tag.
///
/// Biases the scorer toward the dimensions Eleusis rules are usually
/// written in (suit, color, parity) over raw rank equality. Every tag takes
/// its category weight unless a per-tag override is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicWeights {
    pub color: f64,
    pub suit: f64,
    pub rank: f64,
    pub parity: f64,
    pub royalty: f64,

    /// Per-tag weights taking precedence over the category weight.
    #[serde(default)]
    pub overrides: Vec<(Characteristic, f64)>,
}

impl Default for CharacteristicWeights {
    fn default() -> Self {
        Self {
            color: 0.9,
            suit: 1.0,
            rank: 0.3,
            parity: 0.8,
            royalty: 0.5,
            overrides: Vec::new(),
        }
    }
}

impl CharacteristicWeights {
    /// Weight of every tag in a category.
    #[must_use]
    pub fn for_kind(&self, kind: CharacteristicKind) -> f64 {
        match kind {
            CharacteristicKind::Color => self.color,
            CharacteristicKind::Suit => self.suit,
            CharacteristicKind::Rank => self.rank,
            CharacteristicKind::Parity => self.parity,
            CharacteristicKind::Royalty => self.royalty,
        }
    }

    /// Weight of a single tag.
    #[must_use]
    pub fn weight(&self, tag: Characteristic) -> f64 {
        self.overrides
            .iter()
            .find(|(t, _)| *t == tag)
            .map_or_else(|| self.for_kind(tag.kind()), |&(_, w)| w)
    }

    /// Mean weight of a tag tuple, the per-window contribution unit.
    #[must_use]
    pub fn average(&self, tags: &[Characteristic]) -> f64 {
        if tags.is_empty() {
            return 0.0;
        }
        tags.iter().map(|t| self.weight(*t)).sum::<f64>() / tags.len() as f64
    }

    pub fn with_kind(mut self, kind: CharacteristicKind, weight: f64) -> Self {
        match kind {
            CharacteristicKind::Color => self.color = weight,
            CharacteristicKind::Suit => self.suit = weight,
            CharacteristicKind::Rank => self.rank = weight,
            CharacteristicKind::Parity => self.parity = weight,
            CharacteristicKind::Royalty => self.royalty = weight,
        }
        self
    }

    /// Override the weight of one tag, replacing any earlier override.
    pub fn with_tag(mut self, tag: Characteristic, weight: f64) -> Self {
        self.overrides.retain(|(t, _)| *t != tag);
        self.overrides.push((tag, weight));
        self
    }

    /// Weights must be finite and non-negative.
    pub fn validate(&self) -> EleusisResult<()> {
        let kinds = [
            ("color".to_string(), self.color),
            ("suit".to_string(), self.suit),
            ("rank".to_string(), self.rank),
            ("parity".to_string(), self.parity),
            ("royalty".to_string(), self.royalty),
        ];
        let tags = self.overrides.iter().map(|(t, w)| (t.to_string(), *w));
        for (name, w) in kinds.into_iter().chain(tags) {
            if !w.is_finite() || w < 0.0 {
                return Err(EleusisError::Configuration(format!(
                    "weight for {name} must be finite and non-negative, got {w}"
                )));
            }
        }
        Ok(())
    }
}

/// Hypothesis scanning and compounding parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub weights: CharacteristicWeights,

    /// Also scan 3-card windows once three legal cards exist.
    pub use_triple_windows: bool,

    /// How many top hypotheses feed the compound ranker.
    pub top_hypotheses: usize,

    /// Largest conjunction enumerated from the top hypotheses
    /// (the full top set is always added as one extra compound).
    pub max_combination_size: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            weights: CharacteristicWeights::default(),
            use_triple_windows: true,
            top_hypotheses: 5,
            max_combination_size: 3,
        }
    }
}

impl InferenceConfig {
    pub fn with_weights(mut self, weights: CharacteristicWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_triple_windows(mut self, enabled: bool) -> Self {
        self.use_triple_windows = enabled;
        self
    }

    pub fn with_top_hypotheses(mut self, n: usize) -> Self {
        self.top_hypotheses = n;
        self
    }

    pub fn validate(&self) -> EleusisResult<()> {
        self.weights.validate()?;
        if self.top_hypotheses == 0 || self.max_combination_size == 0 {
            return Err(EleusisError::Configuration(
                "top_hypotheses and max_combination_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Play loop parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Plays made at random before inference starts steering.
    pub exploration_plays: u32,

    /// Hard ceiling on plays; reaching it ends the game.
    pub max_plays: u32,

    /// The top rule must persist for more than this many refinement
    /// cycles to count as converged.
    pub convergence_cycles: u32,

    /// Sampling attempts when looking for a card with a predicted verdict.
    pub probe_attempts: u32,

    /// Seed for the card sampler.
    pub seed: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            exploration_plays: 15,
            max_plays: 200,
            convergence_cycles: 10,
            probe_attempts: 52,
            seed: 42,
        }
    }
}

impl AgentConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_plays(mut self, max_plays: u32) -> Self {
        self.max_plays = max_plays;
        self
    }

    pub fn with_exploration_plays(mut self, plays: u32) -> Self {
        self.exploration_plays = plays;
        self
    }

    pub fn with_convergence_cycles(mut self, cycles: u32) -> Self {
        self.convergence_cycles = cycles;
        self
    }

    pub fn validate(&self) -> EleusisResult<()> {
        if self.max_plays == 0 {
            return Err(EleusisError::Configuration("max_plays must be at least 1".into()));
        }
        Ok(())
    }
}

/// Complete configuration for a game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EleusisConfig {
    pub inference: InferenceConfig,
    pub agent: AgentConfig,
}

impl EleusisConfig {
    pub fn with_inference(mut self, inference: InferenceConfig) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    pub fn validate(&self) -> EleusisResult<()> {
        self.inference.validate()?;
        self.agent.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Rank, Suit};

    #[test]
    fn test_default_config() {
        let config = EleusisConfig::default();
        assert_eq!(config.agent.max_plays, 200);
        assert_eq!(config.agent.exploration_plays, 15);
        assert_eq!(config.agent.convergence_cycles, 10);
        assert_eq!(config.inference.top_hypotheses, 5);
        assert!(config.inference.use_triple_windows);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_weights_prefer_suit_over_rank() {
        let w = CharacteristicWeights::default();
        assert!(w.weight(Characteristic::Suit(Suit::Heart)) > w.weight(Characteristic::Rank(Rank::Two)));
        assert!(w.weight(Characteristic::Color(Color::Red)) > w.weight(Characteristic::Rank(Rank::Two)));
    }

    #[test]
    fn test_average() {
        let w = CharacteristicWeights::default();
        let avg = w.average(&[Characteristic::Suit(Suit::Heart), Characteristic::Rank(Rank::Two)]);
        assert!((avg - 0.65).abs() < 1e-9);
        assert_eq!(w.average(&[]), 0.0);
    }

    #[test]
    fn test_tag_override_beats_category() {
        let w = CharacteristicWeights::default()
            .with_tag(Characteristic::Suit(Suit::Heart), 2.0)
            .with_tag(Characteristic::Suit(Suit::Heart), 1.5);
        assert_eq!(w.overrides.len(), 1);
        assert!((w.weight(Characteristic::Suit(Suit::Heart)) - 1.5).abs() < 1e-9);
        assert!((w.weight(Characteristic::Suit(Suit::Spade)) - 1.0).abs() < 1e-9);

        let bad = CharacteristicWeights::default().with_tag(Characteristic::Color(Color::Red), -1.0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EleusisConfig::default()
            .with_agent(AgentConfig::default().with_seed(7).with_max_plays(50))
            .with_inference(InferenceConfig::default().with_triple_windows(false));

        assert_eq!(config.agent.seed, 7);
        assert_eq!(config.agent.max_plays, 50);
        assert!(!config.inference.use_triple_windows);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let weights = CharacteristicWeights::default().with_kind(CharacteristicKind::Rank, f64::NAN);
        assert!(weights.validate().is_err());

        let agent = AgentConfig::default().with_max_plays(0);
        assert!(agent.validate().is_err());

        let inference = InferenceConfig::default().with_top_hypotheses(0);
        assert!(inference.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let weights = CharacteristicWeights::default().with_tag(Characteristic::Rank(Rank::King), 0.7);
        let config = EleusisConfig::default()
            .with_inference(InferenceConfig::default().with_weights(weights));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EleusisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
