// Core error type for the scoring pipeline.
//
// Only invalid input and corpus failures are errors. Numeric edge cases
// (zero probabilities, zero-norm vectors) are absorbed by the measures
// themselves and never surface here.

/// Errors reported by the subset planner, counting engine and orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum CoherenceError {
    #[error("wordset has {size} words, at least {min} are required")]
    WordsetTooSmall { size: usize, min: usize },

    #[error("wordset has {size} words, at most {max} are supported")]
    WordsetTooLarge { size: usize, max: usize },

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unknown {kind} identifier: {name}")]
    UnknownStrategy { kind: &'static str, name: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("corpus reports zero contexts; cannot normalize counts")]
    EmptyCorpus,

    #[error("corpus lookup failed: {reason}")]
    Corpus { reason: String },
}

pub type Result<T> = std::result::Result<T, CoherenceError>;
