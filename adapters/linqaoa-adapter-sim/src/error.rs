//! Error types for the simulator adapter.

use thiserror::Error;

use linqaoa_core::CoreError;

/// Errors produced by the local circuit evaluators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// The choice register is wider than the configured limit.
    #[error("circuit needs {required} qubits but the simulator allows at most {max}")]
    TooManyQubits {
        /// Qubits the instance needs.
        required: usize,
        /// Configured limit.
        max: usize,
    },

    /// Shot count must be at least 1.
    #[error("shot count must be at least 1, got {0}")]
    InvalidShots(u32),

    /// Problem or distribution error from the core.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
