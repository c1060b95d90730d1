//! Core building blocks: errors, configuration, and deterministic RNG.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{AgentConfig, CharacteristicWeights, EleusisConfig, InferenceConfig};
pub use error::{EleusisError, EleusisResult};
pub use rng::{EleusisRng, EleusisRngState};
