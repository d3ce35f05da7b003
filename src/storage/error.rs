use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TupleError {
    #[error("component index {index} out of range for tuple of arity {count}")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("arity mismatch: expected {expected} components, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// Failure reported by an external tuple producer.
    #[error("tuple source failed: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, TupleError>;
