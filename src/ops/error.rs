//! Error types for operation construction, evaluation and inversion.

use crate::register::RegisterError;
use thiserror::Error;

/// Errors raised by operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    /// A parameter or input lies outside the operation's valid domain.
    #[error("precondition violated for {op}: {reason}")]
    PreconditionViolated { op: String, reason: String },

    /// The operation declares no inverse.
    #[error("operation not invertible: {0}")]
    NotInvertible(String),

    #[error("{op} takes {expected} register(s), got {got}")]
    ArityMismatch { op: String, expected: &'static str, got: usize },

    #[error("{op} requires registers of equal width, got {widths:?}")]
    WidthMismatch { op: String, widths: Vec<u32> },

    #[error("arithmetic overflow evaluating {0}")]
    Overflow(String),

    #[error("input domain has {combinations} combinations, limit is {limit}")]
    DomainTooLarge { combinations: u128, limit: u128 },

    #[error("register error: {0}")]
    Register(#[from] RegisterError),
}

impl OpError {
    pub(crate) fn precondition(op: impl ToString, reason: impl Into<String>) -> Self {
        OpError::PreconditionViolated { op: op.to_string(), reason: reason.into() }
    }
}
