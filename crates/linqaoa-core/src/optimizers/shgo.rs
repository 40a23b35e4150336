//! Sampling-based global optimizer in the spirit of simplicial homology
//! global optimization (SHGO).
//!
//! Each refinement pass
//! 1. adds a batch of Halton samples of the search box,
//! 2. marks every sample whose value is not beaten by any of its nearest
//!    neighbours (in box-normalised coordinates) as a candidate minimiser,
//! 3. polishes the most promising new candidates with a bounded local
//!    search.
//!
//! The best point seen anywhere is returned. A small number of passes is the
//! intended use: circuit evaluations dominate the cost, so a few global
//! sweeps are preferred over tight local convergence.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Cobyla, GlobalOptimizer, Halton, OptimizationResult, Optimizer, validate_bounds};
use crate::error::CoreError;

/// A polished local minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalMinimum {
    /// Location of the minimum.
    pub params: Vec<f64>,
    /// Objective value there.
    pub value: f64,
    /// Whether the local search converged.
    pub converged: bool,
}

/// Outcome of a global search, including every polished local minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShgoOutcome {
    /// Best point found.
    pub result: OptimizationResult,
    /// Local minima in the order they were found.
    pub local_minima: Vec<LocalMinimum>,
}

/// Global optimizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shgo {
    /// Number of refinement passes.
    pub iters: usize,
    /// Samples added per pass.
    pub sampling_points: usize,
    /// Local searches started per pass.
    pub max_local_searches: usize,
    /// Local optimizer used for polishing.
    pub local: Cobyla,
}

impl Default for Shgo {
    fn default() -> Self {
        Self {
            iters: 3,
            sampling_points: 64,
            max_local_searches: 2,
            local: Cobyla::new().with_maxiter(60).with_tol(1e-5),
        }
    }
}

impl Shgo {
    /// Create a new optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of refinement passes.
    #[must_use]
    pub fn with_iters(mut self, iters: usize) -> Self {
        self.iters = iters;
        self
    }

    /// Set the number of samples per pass.
    #[must_use]
    pub fn with_sampling_points(mut self, n: usize) -> Self {
        self.sampling_points = n;
        self
    }

    /// Set the number of local searches per pass.
    #[must_use]
    pub fn with_max_local_searches(mut self, n: usize) -> Self {
        self.max_local_searches = n;
        self
    }

    /// Set the local optimizer.
    #[must_use]
    pub fn with_local(mut self, local: Cobyla) -> Self {
        self.local = local;
        self
    }

    /// Run the search and report every polished local minimum.
    pub fn search<F, E>(&self, mut objective: F, bounds: &[(f64, f64)]) -> Result<ShgoOutcome, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
        E: From<CoreError>,
    {
        validate_bounds(bounds)?;

        let mut halton = Halton::new(bounds.len());
        let mut samples: Vec<(Vec<f64>, f64)> = Vec::new();
        let mut started: Vec<usize> = Vec::new();
        let mut local_minima = Vec::new();

        let mut best_params = Vec::new();
        let mut best_value = f64::INFINITY;
        let mut history = Vec::new();
        let mut num_evaluations = 0;
        let mut iterations = 0;

        for iteration in 0..self.iters {
            iterations = iteration + 1;

            for _ in 0..self.sampling_points.max(1) {
                let x = halton.next_in(bounds);
                let f = objective(&x)?;
                num_evaluations += 1;
                if f < best_value {
                    best_value = f;
                    best_params.clone_from(&x);
                }
                samples.push((x, f));
            }

            let candidates: Vec<usize> = minimiser_candidates(&samples, bounds)
                .into_iter()
                .filter(|i| !started.contains(i))
                .take(self.max_local_searches)
                .collect();

            for idx in candidates {
                started.push(idx);
                let local = self
                    .local
                    .minimize(&mut objective, samples[idx].0.clone(), bounds)?;
                num_evaluations += local.num_evaluations;
                if local.optimal_value < best_value {
                    best_value = local.optimal_value;
                    best_params.clone_from(&local.optimal_params);
                }
                local_minima.push(LocalMinimum {
                    params: local.optimal_params,
                    value: local.optimal_value,
                    converged: local.converged,
                });
            }

            history.push(best_value);
            debug!(
                "SHGO pass {}: {} samples, {} local minima, best {:.6}",
                iteration,
                samples.len(),
                local_minima.len(),
                best_value
            );
        }

        info!(
            "SHGO finished: {} evaluations, best value {:.6}",
            num_evaluations, best_value
        );

        let converged = local_minima.iter().any(|m| m.converged);
        Ok(ShgoOutcome {
            result: OptimizationResult {
                optimal_params: best_params,
                optimal_value: best_value,
                num_evaluations,
                num_iterations: iterations,
                history,
                converged,
            },
            local_minima,
        })
    }
}

impl GlobalOptimizer for Shgo {
    fn minimize_global<F, E>(
        &self,
        objective: F,
        bounds: &[(f64, f64)],
    ) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
        E: From<CoreError>,
    {
        self.search(objective, bounds).map(|outcome| outcome.result)
    }
}

/// Indices of samples that no nearby sample beats, best first.
fn minimiser_candidates(samples: &[(Vec<f64>, f64)], bounds: &[(f64, f64)]) -> Vec<usize> {
    let normalised: Vec<Vec<f64>> = samples
        .iter()
        .map(|(x, _)| {
            x.iter()
                .zip(bounds)
                .map(|(&v, &(lo, hi))| if hi > lo { (v - lo) / (hi - lo) } else { 0.0 })
                .collect()
        })
        .collect();
    let k = (2 * bounds.len()).min(samples.len().saturating_sub(1));

    let mut candidates: Vec<usize> = (0..samples.len())
        .filter(|&i| {
            let mut by_distance: Vec<(f64, usize)> = (0..samples.len())
                .filter(|&j| j != i)
                .map(|j| (squared_distance(&normalised[i], &normalised[j]), j))
                .collect();
            by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
            by_distance
                .iter()
                .take(k)
                .all(|&(_, j)| samples[i].1 <= samples[j].1)
        })
        .collect();
    candidates.sort_by(|&a, &b| samples[a].1.total_cmp(&samples[b].1));
    candidates
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult<T> = Result<T, CoreError>;

    #[test]
    fn test_shgo_quadratic() {
        let shgo = Shgo::new();
        let bounds = [(-3.0, 3.0), (-3.0, 3.0)];
        let result: TestResult<_> = shgo.minimize_global(
            |x| Ok((x[0] - 1.0).powi(2) + (x[1] + 0.5).powi(2)),
            &bounds,
        );
        let result = result.unwrap();
        assert!(result.optimal_value < 1e-2);
        assert_eq!(result.num_iterations, 3);
        assert_eq!(result.history.len(), 3);
    }

    #[test]
    fn test_shgo_finds_global_of_multimodal() {
        // Two wells; the deeper one sits near x = 2.
        let f = |x: &[f64]| -> TestResult<f64> {
            let a = (x[0] + 2.0).powi(2);
            let b = (x[0] - 2.0).powi(2);
            Ok(a.min(b - 1.0))
        };
        let result = Shgo::new().minimize_global(f, &[(-4.0, 4.0)]).unwrap();
        assert!((result.optimal_params[0] - 2.0).abs() < 0.05);
        assert!(result.optimal_value < -0.99);
    }

    #[test]
    fn test_shgo_reports_local_minima() {
        let outcome: TestResult<_> = Shgo::new()
            .with_iters(2)
            .with_max_local_searches(1)
            .search(|x| Ok(x[0].sin()), &[(0.0, 6.0)]);
        let outcome = outcome.unwrap();
        assert!(!outcome.local_minima.is_empty());
        assert!(outcome.local_minima.len() <= 2);
        assert!(outcome.result.optimal_value < -0.99);
    }

    #[test]
    fn test_shgo_error_propagates() {
        let result: TestResult<_> =
            Shgo::new().minimize_global(|_| Err(CoreError::InvalidShots(0)), &[(0.0, 1.0)]);
        assert!(matches!(result, Err(CoreError::InvalidShots(0))));
    }

    #[test]
    fn test_shgo_rejects_empty_bounds() {
        let result: TestResult<_> = Shgo::new().minimize_global(|_| Ok(0.0), &[]);
        assert!(matches!(result, Err(CoreError::EmptyBounds)));
    }

    #[test]
    fn test_candidates_sorted_by_value() {
        let samples = vec![
            (vec![0.0], 3.0),
            (vec![1.0], 1.0),
            (vec![2.0], 2.0),
            (vec![3.0], 0.5),
        ];
        let c = minimiser_candidates(&samples, &[(0.0, 3.0)]);
        assert_eq!(c, vec![3, 1]);
    }
}
