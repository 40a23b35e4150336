//! Derivative-free optimizers over bounded boxes.
//!
//! Circuit evaluations are expensive and their gradients are not available,
//! so everything here only needs objective values. Objectives are fallible:
//! the first error aborts the run and is handed back to the caller.

mod cobyla;
mod halton;
mod shgo;

pub use cobyla::Cobyla;
pub use halton::Halton;
pub use shgo::{LocalMinimum, Shgo, ShgoOutcome};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Optimal parameter values.
    pub optimal_params: Vec<f64>,
    /// Optimal objective value.
    pub optimal_value: f64,
    /// Number of function evaluations.
    pub num_evaluations: usize,
    /// Number of iterations.
    pub num_iterations: usize,
    /// Best objective value after each improvement.
    pub history: Vec<f64>,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// Local optimizer started from a given point.
pub trait Optimizer {
    /// Minimize `objective` inside `bounds`, starting at `initial_params`.
    fn minimize<F, E>(
        &self,
        objective: F,
        initial_params: Vec<f64>,
        bounds: &[(f64, f64)],
    ) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
        E: From<CoreError>;
}

/// Global optimizer that only needs the search box.
pub trait GlobalOptimizer {
    /// Minimize `objective` inside `bounds`.
    fn minimize_global<F, E>(
        &self,
        objective: F,
        bounds: &[(f64, f64)],
    ) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
        E: From<CoreError>;
}

/// Reject empty, inverted or non-finite boxes.
pub(crate) fn validate_bounds(bounds: &[(f64, f64)]) -> Result<(), CoreError> {
    let valid = !bounds.is_empty()
        && bounds
            .iter()
            .all(|&(lo, hi)| lo.is_finite() && hi.is_finite() && lo <= hi);
    if valid {
        Ok(())
    } else {
        Err(CoreError::EmptyBounds)
    }
}

/// Clamp a point into the box.
pub(crate) fn project(point: &[f64], bounds: &[(f64, f64)]) -> Vec<f64> {
    point
        .iter()
        .zip(bounds)
        .map(|(&v, &(lo, hi))| v.clamp(lo, hi))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds() {
        assert!(validate_bounds(&[(0.0, 1.0)]).is_ok());
        assert!(validate_bounds(&[]).is_err());
        assert!(validate_bounds(&[(1.0, 0.0)]).is_err());
        assert!(validate_bounds(&[(0.0, f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_project() {
        let p = project(&[-1.0, 0.5, 3.0], &[(0.0, 1.0), (0.0, 1.0), (0.0, 2.0)]);
        assert_eq!(p, vec![0.0, 0.5, 2.0]);
    }
}
