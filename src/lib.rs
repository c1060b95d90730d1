//! # eleusis
//!
//! An agent that plays the rule-guessing card game Eleusis: an arbiter holds
//! a hidden rule over the last three accepted cards, and the agent plays
//! cards, watches the verdicts, and infers an equivalent rule.
//!
//! ## Design Principles
//!
//! 1. **Rules Are Data**: Hidden and inferred rules share one representation,
//!    the [`ExpressionTree`], which can be parsed, printed, and evaluated.
//!
//! 2. **Fresh Inference**: Every cycle recomputes scores from the board.
//!    The only state carried between cycles is the agent's stability counter.
//!
//! 3. **Deterministic**: Given a seed and a deterministic arbiter, a game
//!    replays identically.
//!
//! ## Architecture
//!
//! - **Persistent Board**: `im` vectors make board snapshots O(1).
//!
//! - **Tag Tuples**: Hypotheses are tuples of characteristic tags, scored
//!   over sliding windows with compounding occurrence weights and pruned at
//!   the running mean.
//!
//! - **Compounds**: The strongest tuples are conjoined, re-scored, and the
//!   winner compiled back into an `ExpressionTree`.
//!
//! ## Modules
//!
//! - `core`: Errors, configuration, RNG
//! - `cards`: Ranks, suits, cards, characteristic tags
//! - `expr`: Rule expressions (parser, evaluator)
//! - `board`: Play history
//! - `inference`: Hypothesis scanning, compounding, compilation
//! - `agent`: Arbiter and sampler seams, the play loop

pub mod agent;
pub mod board;
pub mod cards;
pub mod core;
pub mod expr;
pub mod inference;

// Re-export commonly used types
pub use crate::core::{
    AgentConfig, CharacteristicWeights, EleusisConfig, InferenceConfig,
    EleusisError, EleusisResult,
    EleusisRng, EleusisRngState,
};

pub use crate::cards::{Card, Characteristic, CharacteristicKind, Color, Parity, Rank, Royalty, Suit};

pub use crate::expr::{CardWindow, Expr, ExpressionTree, Operator, Slot, Value};

pub use crate::board::{BoardSlot, BoardState, IllegalObservation};

pub use crate::inference::{
    CompoundRule, CompoundRuleRanker, Evidence, Hypothesis, HypothesisEngine,
    HypothesisRanking, RuleConsistency, RuleRanking, TreeCompiler,
};

pub use crate::agent::{
    Agent, AgentPhase, Arbiter, CardSampler, CompiledRule, RandomSampler, RuleArbiter,
};
