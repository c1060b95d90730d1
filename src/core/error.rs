//! Error types shared by every layer of the agent.

use thiserror::Error;

/// Errors that can occur while building, evaluating, or inferring rules.
///
/// An empty hypothesis ranking is deliberately absent: it is an expected
/// quiescent state, exposed through `is_empty()` on the ranking types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EleusisError {
    /// Bad operator, arity, slot, or operand types in a rule expression.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    /// A board operation was called without its preconditions.
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),

    /// A successor or predecessor was requested past a domain boundary.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Text that does not name a card, rank, suit, or color.
    #[error("invalid card notation: '{0}'")]
    InvalidCard(String),

    /// Configuration values that cannot drive inference.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for Eleusis operations.
pub type EleusisResult<T> = Result<T, EleusisError>;
