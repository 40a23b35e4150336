//! Error types for the core crate.

use thiserror::Error;

/// Boxed error produced by a circuit evaluator.
///
/// The core never inspects it; it is carried back to the caller as-is.
pub type EvaluatorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by problem construction, objective evaluation and
/// parameter search.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Cost and weight sequences have different lengths.
    #[error("dimension mismatch: {costs} cost values but {weights} weight values")]
    DimensionMismatch {
        /// Number of cost values supplied.
        costs: usize,
        /// Number of weight values supplied.
        weights: usize,
    },

    /// A cost value is zero, so its inverse is undefined.
    #[error("cost value of item {index} is zero")]
    ZeroCost {
        /// Offending item index.
        index: usize,
    },

    /// A cost or weight value is negative or not finite.
    #[error("invalid {field} value {value} for item {index}")]
    InvalidValue {
        /// Which sequence the value belongs to.
        field: &'static str,
        /// Offending item index.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Capacity must be finite and positive.
    #[error("capacity must be finite and positive, got {0}")]
    InvalidCapacity(f64),

    /// Penalty weight is negative, NaN, infinite or has a zero denominator.
    #[error("invalid penalty weight: {0}")]
    InvalidPenaltyWeight(String),

    /// Circuit depth must be at least 1.
    #[error("circuit depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    /// A parameter slice does not have the length the depth requires.
    #[error("expected {expected} parameters, got {actual}")]
    ParameterLength {
        /// Required number of values.
        expected: usize,
        /// Supplied number of values.
        actual: usize,
    },

    /// Bitstring contains characters other than `0` and `1`.
    #[error("invalid bitstring {0:?}")]
    InvalidBitstring(String),

    /// Bitstring is narrower than the number of items.
    #[error("bitstring of width {width} cannot encode {item_count} items")]
    BitstringTooShort {
        /// Width of the offending bitstring.
        width: usize,
        /// Number of items of the problem.
        item_count: usize,
    },

    /// Probability outside `[0, 1]` or not finite.
    #[error("invalid probability {value} for outcome {bitstring:?}")]
    InvalidProbability {
        /// Outcome the value was attached to.
        bitstring: String,
        /// The rejected value.
        value: f64,
    },

    /// Outcome keys of one distribution have different widths.
    #[error("outcome width {actual} differs from {expected}")]
    InconsistentWidth {
        /// Width of the first key seen.
        expected: usize,
        /// Width of the offending key.
        actual: usize,
    },

    /// Shot count must be at least 1.
    #[error("shot count must be at least 1, got {0}")]
    InvalidShots(u32),

    /// Exhaustive enumeration was requested for too many items.
    #[error("exact solver supports at most {max} items, got {items}")]
    TooManyItems {
        /// Number of items of the problem.
        items: usize,
        /// Largest supported item count.
        max: usize,
    },

    /// The optimizer was given an empty or inverted search box.
    #[error("search bounds are empty or inverted")]
    EmptyBounds,

    /// Circuit evaluator failure, passed through unchanged.
    #[error(transparent)]
    Evaluator(EvaluatorError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
