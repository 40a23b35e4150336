//! Angle search over the periodic QAOA domain.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::distribution::OutcomeDistribution;
use crate::error::{CoreError, CoreResult};
use crate::evaluator::CircuitEvaluator;
use crate::expectation::expectation;
use crate::objective::PenalizedObjective;
use crate::optimizers::{GlobalOptimizer, OptimizationResult};
use crate::params::{ParameterVector, SearchDomain};
use crate::penalty::PenaltyWeight;
use crate::problem::ProblemInstance;

/// Best angles found by a search, with the optimizer's bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleSearch {
    /// Best parameters found.
    pub parameters: ParameterVector,
    /// Loss at `parameters`.
    pub loss: f64,
    /// Raw optimizer result (interleaved angles, evaluation counts, history).
    pub optimization: OptimizationResult,
}

impl AngleSearch {
    /// Penalized expectation at the best angles, when the loss is its negation.
    pub fn expectation(&self) -> f64 {
        -self.loss
    }
}

/// Minimize `loss` over the `depth`-layer search domain for penalty `a`.
///
/// The optimizer sees interleaved `[gamma_0, beta_0, ...]` angles; `loss`
/// receives them as structured layers folded into the half-open domain, so
/// the upper bounds are never evaluated. A loss error aborts the search and
/// is returned unchanged.
pub fn optimize_angles<O, F, E>(
    optimizer: &O,
    depth: usize,
    a: PenaltyWeight,
    mut loss: F,
) -> Result<AngleSearch, E>
where
    O: GlobalOptimizer + ?Sized,
    F: FnMut(&ParameterVector) -> Result<f64, E>,
    E: From<CoreError>,
{
    let domain = SearchDomain::new(depth, a)?;
    let bounds = domain.bounds();
    debug!(
        "Searching {} angles, gamma in [0, {:.4}), beta in [0, {:.4})",
        bounds.len(),
        domain.gamma_range.1,
        domain.beta_range.1
    );

    let optimization = optimizer.minimize_global(
        |angles: &[f64]| {
            let parameters = ParameterVector::from_interleaved(angles)?;
            loss(&domain.wrap(&parameters))
        },
        &bounds,
    )?;

    let parameters = domain.wrap(&ParameterVector::from_interleaved(
        &optimization.optimal_params,
    )?);
    Ok(AngleSearch {
        parameters,
        loss: optimization.optimal_value,
        optimization,
    })
}

/// Penalized expectation of one parameter binding.
pub fn penalized_expectation<C>(
    evaluator: &C,
    problem: &ProblemInstance,
    parameters: &ParameterVector,
    a: PenaltyWeight,
) -> CoreResult<f64>
where
    C: CircuitEvaluator + ?Sized,
{
    let distribution = evaluate(evaluator, parameters, a)?;
    expectation(&distribution, &PenalizedObjective::new(problem, a))
}

/// Find angles maximizing the penalized expectation on `evaluator`.
#[instrument(skip(evaluator, problem, optimizer), fields(evaluator = evaluator.name(), items = problem.item_count()))]
pub fn find_optimal_angles<C, O>(
    evaluator: &C,
    problem: &ProblemInstance,
    depth: usize,
    a: PenaltyWeight,
    optimizer: &O,
) -> CoreResult<AngleSearch>
where
    C: CircuitEvaluator + ?Sized,
    O: GlobalOptimizer + ?Sized,
{
    let search = optimize_angles(optimizer, depth, a, |parameters| {
        penalized_expectation(evaluator, problem, parameters, a).map(|e| -e)
    })?;

    info!(
        "Best penalized expectation {:.6} after {} evaluations: {}",
        search.expectation(),
        search.optimization.num_evaluations,
        search.parameters
    );
    Ok(search)
}

/// Call the evaluator, surfacing its failure unchanged.
pub(crate) fn evaluate<C>(
    evaluator: &C,
    parameters: &ParameterVector,
    a: PenaltyWeight,
) -> CoreResult<OutcomeDistribution>
where
    C: CircuitEvaluator + ?Sized,
{
    evaluator.evaluate(parameters, a).map_err(CoreError::Evaluator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::FnEvaluator;
    use crate::optimizers::Shgo;
    use std::f64::consts::PI;

    #[test]
    fn test_optimize_angles_stays_in_domain() {
        let a = PenaltyWeight::ratio(3, 2).unwrap();
        let domain = SearchDomain::new(2, a).unwrap();
        let search: CoreResult<_> = optimize_angles(&Shgo::new(), 2, a, |params| {
            assert!(domain.contains(params));
            Ok(params.gammas().iter().sum::<f64>() + params.betas().iter().sum::<f64>())
        });
        let search = search.unwrap();
        assert_eq!(search.parameters.depth(), 2);
        let total: f64 = search.parameters.to_interleaved().iter().sum();
        assert!((search.loss - total).abs() < 1e-12);
    }

    #[test]
    fn test_optimize_angles_rejects_zero_depth() {
        let result: CoreResult<_> =
            optimize_angles(&Shgo::new(), 0, PenaltyWeight::default(), |_| Ok(0.0));
        assert!(matches!(result, Err(CoreError::InvalidDepth(0))));
    }

    #[test]
    fn test_find_optimal_angles_maximizes_expectation() {
        let problem = ProblemInstance::new(vec![1.0, 2.0], vec![1.0, 1.0], 1.0).unwrap();
        // Probability of the optimal selection "10" peaks at beta_0 = π/2.
        let evaluator = FnEvaluator::new("mock", |params: &ParameterVector, _| {
            let q = params.betas()[0].sin().powi(2);
            Ok(OutcomeDistribution::from_probabilities([("10", q), ("00", 1.0 - q)])?)
        });
        let search =
            find_optimal_angles(&evaluator, &problem, 1, PenaltyWeight::integer(10), &Shgo::new())
                .unwrap();
        assert!(search.expectation() > 1.9);
        assert!((search.parameters.betas()[0] - PI / 2.0).abs() < 0.25);
    }

    #[test]
    fn test_optimize_angles_never_returns_upper_bound() {
        let a = PenaltyWeight::integer(4);
        let domain = SearchDomain::new(1, a).unwrap();
        // Pushes gamma towards the top of its range.
        let search: CoreResult<_> =
            optimize_angles(&Shgo::new(), 1, a, |params| Ok(-params.gammas()[0]));
        let search = search.unwrap();
        let gamma = search.parameters.gammas()[0];
        assert!(domain.contains(&search.parameters));
        assert!(gamma < 2.0 * PI);
        assert!((search.loss + gamma).abs() < 1e-12);
    }

    #[test]
    fn test_evaluator_error_propagates() {
        let problem = ProblemInstance::new(vec![1.0], vec![1.0], 1.0).unwrap();
        let evaluator = FnEvaluator::new("broken", |_: &ParameterVector, _| {
            Err("simulator offline".into())
        });
        let err = find_optimal_angles(&evaluator, &problem, 1, PenaltyWeight::default(), &Shgo::new())
            .unwrap_err();
        assert!(matches!(err, CoreError::Evaluator(_)));
        assert_eq!(err.to_string(), "simulator offline");
    }
}
