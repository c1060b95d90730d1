//! Rule inference: from a board snapshot to a ranked, compiled rule.
//!
//! ## Pipeline
//!
//! 1. `Evidence` caches the legal sequence, its characteristic sets, and
//!    the illegal observations for one cycle.
//! 2. `HypothesisEngine` scores characteristic tuples over sliding windows,
//!    prunes at the mean, and penalises tuples contradicted by rejections.
//! 3. `CompoundRuleRanker` conjoins the strongest tuples and re-scores the
//!    conjunctions over 3-card windows.
//! 4. `TreeCompiler` turns the chosen compound into an `ExpressionTree`.
//!
//! Every stage is a pure function of its inputs; nothing carries over
//! between cycles.

pub mod compiler;
pub mod compound;
pub mod consistency;
pub mod evidence;
pub mod hypothesis;
pub mod ranking;

pub use compiler::TreeCompiler;
pub use compound::{CompoundRule, CompoundRuleRanker, RuleRanking};
pub use consistency::RuleConsistency;
pub use evidence::Evidence;
pub use hypothesis::{Hypothesis, HypothesisEngine, HypothesisRanking};
pub use ranking::{HypothesisScore, Ranked, Ranking};
