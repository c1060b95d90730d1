//! The playing agent and its seams to the outside world.
//!
//! - `Arbiter`: the hidden rule's verdicts (`RuleArbiter` wraps an
//!   `ExpressionTree`; any `FnMut(Card, &[Card]) -> bool` also works)
//! - `CardSampler`: where candidate cards come from (`RandomSampler`)
//! - `Agent`: the seeding / exploring / refining state machine

pub mod arbiter;
pub mod game;
pub mod sampler;

pub use arbiter::{Arbiter, RuleArbiter};
pub use game::{Agent, AgentPhase, CompiledRule};
pub use sampler::{CardSampler, RandomSampler};
