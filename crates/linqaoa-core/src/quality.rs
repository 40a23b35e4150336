//! Approximation ratio against the exhaustive ground truth.
//!
//! The ratio is the expected comparable value of an outcome distribution
//! divided by the best achievable value. Two variants share the scoring:
//! [`approximation_ratio`] optimizes angles on an exact evaluator and scores
//! its distribution, [`sampled_approximation_ratio`] re-binds given angles on
//! a shot-sampling evaluator. Both reduce device bitstrings to the choice
//! register first.
//!
//! When nothing but the empty selection is feasible the best value is `0`
//! and the ratio is NaN or infinite. This is logged, not raised.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::angles::{AngleSearch, evaluate, find_optimal_angles};
use crate::distribution::OutcomeDistribution;
use crate::error::CoreResult;
use crate::evaluator::CircuitEvaluator;
use crate::expectation::expectation;
use crate::objective::ComparableObjective;
use crate::optimizers::GlobalOptimizer;
use crate::params::ParameterVector;
use crate::penalty::PenaltyWeight;
use crate::problem::ProblemInstance;
use crate::solver::solve_exact;

/// Achieved versus optimal value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioReport {
    /// `expectation / best_value`.
    pub ratio: f64,
    /// Expected comparable value of the distribution.
    pub expectation: f64,
    /// Value of the first optimal selection.
    pub best_value: f64,
}

impl RatioReport {
    /// Whether the ratio is a finite number.
    pub fn is_defined(&self) -> bool {
        self.ratio.is_finite()
    }
}

/// Result of optimizing and scoring on an exact evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactQuality {
    /// Angle search that produced the parameters.
    pub search: AngleSearch,
    /// Choice-register distribution at the best parameters.
    pub distribution: OutcomeDistribution,
    /// Ratio of that distribution.
    pub report: RatioReport,
}

/// Result of scoring fixed parameters on a sampling evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledQuality {
    /// Choice-register frequencies.
    pub distribution: OutcomeDistribution,
    /// Ratio of those frequencies.
    pub report: RatioReport,
}

/// Score a choice-register distribution against the exact optimum.
pub fn ratio_for_distribution(
    distribution: &OutcomeDistribution,
    problem: &ProblemInstance,
) -> CoreResult<RatioReport> {
    let expectation = expectation(distribution, &ComparableObjective::new(problem))?;
    let solutions = solve_exact(problem)?;
    // Tied selections share one value, so the first one is as good as any.
    let best_value = solutions
        .first()
        .map_or(solutions.best_value, |s| problem.value_of(s));

    let ratio = expectation / best_value;
    if !ratio.is_finite() {
        warn!(
            "Approximation ratio undefined: expectation {} over best value {}",
            expectation, best_value
        );
    }
    Ok(RatioReport {
        ratio,
        expectation,
        best_value,
    })
}

/// Optimize angles on `evaluator` and score the resulting distribution.
#[instrument(skip(evaluator, problem, optimizer), fields(evaluator = evaluator.name()))]
pub fn approximation_ratio<C, O>(
    evaluator: &C,
    problem: &ProblemInstance,
    depth: usize,
    a: PenaltyWeight,
    optimizer: &O,
) -> CoreResult<ExactQuality>
where
    C: CircuitEvaluator + ?Sized,
    O: GlobalOptimizer + ?Sized,
{
    let search = find_optimal_angles(evaluator, problem, depth, a, optimizer)?;
    let distribution = evaluate(evaluator, &search.parameters, a)?.marginalize(problem.item_count())?;
    let report = ratio_for_distribution(&distribution, problem)?;
    info!("Approximation ratio {:.4}", report.ratio);
    Ok(ExactQuality {
        search,
        distribution,
        report,
    })
}

/// Score fixed angles on a shot-sampling evaluator.
///
/// Outcome keys are cut to their trailing `item_count` characters and
/// frequencies of equal keys are summed before scoring.
#[instrument(skip(evaluator, problem, parameters), fields(evaluator = evaluator.name()))]
pub fn sampled_approximation_ratio<C>(
    evaluator: &C,
    problem: &ProblemInstance,
    parameters: &ParameterVector,
    a: PenaltyWeight,
) -> CoreResult<SampledQuality>
where
    C: CircuitEvaluator + ?Sized,
{
    let distribution = evaluate(evaluator, parameters, a)?.marginalize(problem.item_count())?;
    let report = ratio_for_distribution(&distribution, problem)?;
    info!("Sampled approximation ratio {:.4}", report.ratio);
    Ok(SampledQuality {
        distribution,
        report,
    })
}
