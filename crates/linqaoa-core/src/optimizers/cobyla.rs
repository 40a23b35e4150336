//! COBYLA-style bounded local optimizer.
//!
//! A derivative-free simplex search with a shrinking trust radius. Every
//! trial point is projected into the search box before it is evaluated, so
//! the objective is never called outside its bounds.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{OptimizationResult, Optimizer, project, validate_bounds};
use crate::error::CoreError;

/// Local optimizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cobyla {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Convergence tolerance on the simplex value spread.
    pub tol: f64,
    /// Initial trust region radius.
    pub rhobeg: f64,
    /// Final trust region radius.
    pub rhoend: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            rhobeg: 0.5,
            rhoend: 1e-4,
        }
    }
}

impl Cobyla {
    /// Create a new optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    #[must_use]
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set trust region parameters.
    #[must_use]
    pub fn with_trust_region(mut self, rhobeg: f64, rhoend: f64) -> Self {
        self.rhobeg = rhobeg;
        self.rhoend = rhoend;
        self
    }
}

/// Simplex vertices around `center`, stepping inward at the upper bound.
fn simplex_around(center: &[f64], rho: f64, bounds: &[(f64, f64)]) -> Vec<Vec<f64>> {
    let mut vertices = vec![center.to_vec()];
    for (i, &(lo, hi)) in bounds.iter().enumerate() {
        let mut point = center.to_vec();
        point[i] = if point[i] + rho <= hi {
            point[i] + rho
        } else {
            (point[i] - rho).max(lo)
        };
        vertices.push(point);
    }
    vertices
}

fn argmin(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map_or(0, |(i, _)| i)
}

impl Optimizer for Cobyla {
    fn minimize<F, E>(
        &self,
        mut objective: F,
        initial_params: Vec<f64>,
        bounds: &[(f64, f64)],
    ) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
        E: From<CoreError>,
    {
        validate_bounds(bounds)?;
        if initial_params.len() != bounds.len() {
            return Err(CoreError::ParameterLength {
                expected: bounds.len(),
                actual: initial_params.len(),
            }
            .into());
        }

        let n = bounds.len();
        let x = project(&initial_params, bounds);
        let mut f_x = objective(&x)?;
        let mut history = vec![f_x];
        let mut num_evaluations = 1;

        let mut simplex = simplex_around(&x, self.rhobeg, bounds);
        let mut f_simplex = vec![f_x];
        for point in &simplex[1..] {
            f_simplex.push(objective(point)?);
            num_evaluations += 1;
        }

        let mut rho = self.rhobeg;
        let mut converged = false;
        let mut iterations = 0;

        for iteration in 0..self.maxiter {
            iterations = iteration + 1;
            let mut indices: Vec<usize> = (0..=n).collect();
            indices.sort_by(|&a, &b| f_simplex[a].total_cmp(&f_simplex[b]));

            let best_idx = indices[0];
            let worst_idx = indices[n];

            let spread = f_simplex[worst_idx] - f_simplex[best_idx];
            if spread < self.tol && rho <= self.rhoend {
                converged = true;
                break;
            }

            // Shrink the trust region and rebuild the simplex around the best point
            if spread < self.tol {
                rho = (rho * 0.5).max(self.rhoend);
                let best = simplex[best_idx].clone();
                let f_best = f_simplex[best_idx];
                simplex = simplex_around(&best, rho, bounds);
                f_simplex = vec![f_best];
                for point in &simplex[1..] {
                    f_simplex.push(objective(point)?);
                    num_evaluations += 1;
                }
                continue;
            }

            let mut centroid = vec![0.0; n];
            for &idx in &indices[..n] {
                for (c, v) in centroid.iter_mut().zip(&simplex[idx]) {
                    *c += v;
                }
            }
            for c in &mut centroid {
                *c /= n as f64;
            }

            // Reflection, limited to the trust radius
            let mut reflected: Vec<f64> = centroid
                .iter()
                .zip(&simplex[worst_idx])
                .map(|(c, w)| 2.0 * c - w)
                .collect();
            for (r, c) in reflected.iter_mut().zip(&centroid) {
                let diff = *r - c;
                if diff.abs() > rho {
                    *r = c + rho * diff.signum();
                }
            }
            let reflected = project(&reflected, bounds);
            let f_reflected = objective(&reflected)?;
            num_evaluations += 1;

            if f_reflected < f_simplex[best_idx] {
                let expanded: Vec<f64> = centroid
                    .iter()
                    .zip(&reflected)
                    .map(|(c, r)| c + 2.0 * (r - c))
                    .collect();
                let expanded = project(&expanded, bounds);
                let f_expanded = objective(&expanded)?;
                num_evaluations += 1;

                if f_expanded < f_reflected {
                    simplex[worst_idx] = expanded;
                    f_simplex[worst_idx] = f_expanded;
                } else {
                    simplex[worst_idx] = reflected;
                    f_simplex[worst_idx] = f_reflected;
                }
            } else if f_reflected < f_simplex[indices[n - 1]] {
                simplex[worst_idx] = reflected;
                f_simplex[worst_idx] = f_reflected;
            } else {
                let contracted: Vec<f64> = centroid
                    .iter()
                    .zip(&simplex[worst_idx])
                    .map(|(c, w)| 0.5 * (c + w))
                    .collect();
                let f_contracted = objective(&contracted)?;
                num_evaluations += 1;

                if f_contracted < f_simplex[worst_idx] {
                    simplex[worst_idx] = contracted;
                    f_simplex[worst_idx] = f_contracted;
                } else {
                    let best = simplex[best_idx].clone();
                    for i in 0..=n {
                        if i != best_idx {
                            for (v, b) in simplex[i].iter_mut().zip(&best) {
                                *v = 0.5 * (b + *v);
                            }
                            f_simplex[i] = objective(&simplex[i])?;
                            num_evaluations += 1;
                        }
                    }
                }
            }

            let min_idx = argmin(&f_simplex);
            if f_simplex[min_idx] < f_x {
                f_x = f_simplex[min_idx];
                history.push(f_x);
                trace!("COBYLA iteration {}: f = {:.6}, rho = {:.2e}", iteration, f_x, rho);
            }
        }

        let min_idx = argmin(&f_simplex);
        Ok(OptimizationResult {
            optimal_params: simplex[min_idx].clone(),
            optimal_value: f_simplex[min_idx],
            num_evaluations,
            num_iterations: iterations,
            history,
            converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<OptimizationResult, CoreError>;

    #[test]
    fn test_cobyla_simple() {
        let cobyla = Cobyla::new().with_maxiter(200);
        let bounds = [(-5.0, 5.0), (-5.0, 5.0)];

        // Minimize (x-1)^2 + (y-2)^2
        let result: TestResult = cobyla.minimize(
            |params| Ok((params[0] - 1.0).powi(2) + (params[1] - 2.0).powi(2)),
            vec![0.0, 0.0],
            &bounds,
        );
        let result = result.unwrap();

        assert!(result.optimal_value < 0.01);
        assert!((result.optimal_params[0] - 1.0).abs() < 0.1);
        assert!((result.optimal_params[1] - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_cobyla_respects_bounds() {
        let cobyla = Cobyla::new().with_maxiter(200);
        let bounds = [(0.0, 1.0), (0.0, 1.0)];

        // Unconstrained minimum at (3, -2) lies outside the box.
        let result: TestResult = cobyla.minimize(
            |params| {
                assert!(params.iter().zip(&bounds).all(|(v, (lo, hi))| v >= lo && v <= hi));
                Ok((params[0] - 3.0).powi(2) + (params[1] + 2.0).powi(2))
            },
            vec![0.5, 0.5],
            &bounds,
        );
        let result = result.unwrap();

        assert!((result.optimal_params[0] - 1.0).abs() < 0.05);
        assert!(result.optimal_params[1].abs() < 0.05);
    }

    #[test]
    fn test_cobyla_error_propagates() {
        let cobyla = Cobyla::new();
        let bounds = [(0.0, 1.0)];
        let mut calls = 0;
        let result: TestResult = cobyla.minimize(
            |_| {
                calls += 1;
                if calls > 3 {
                    Err(CoreError::InvalidShots(0))
                } else {
                    Ok(1.0)
                }
            },
            vec![0.5],
            &bounds,
        );
        assert!(matches!(result, Err(CoreError::InvalidShots(0))));
    }

    #[test]
    fn test_cobyla_length_mismatch() {
        let bounds = [(0.0, 1.0), (0.0, 1.0)];
        let result: TestResult = Cobyla::new().minimize(|_| Ok(0.0), vec![0.0], &bounds);
        assert!(matches!(result, Err(CoreError::ParameterLength { .. })));
    }
}
