//! LinQAOA Core
//!
//! Parameter search and solution-quality evaluation for QAOA circuits that
//! encode EV charging selection as a 0/1 knapsack with a linear soft
//! penalty.
//!
//! # Overview
//!
//! - [`ProblemInstance`]: per-item cost ("time") and weight ("power") plus a
//!   shared capacity.
//! - [`solve_exact`]: exhaustive ground truth, all ties kept.
//! - [`PenalizedObjective`] / [`ComparableObjective`]: the optimizer's soft
//!   penalty score and the feasibility-gated reporting score.
//! - [`expectation`]: probability-weighted mean of an objective over an
//!   [`OutcomeDistribution`].
//! - [`CircuitEvaluator`]: the boundary to whatever simulates the circuit.
//! - [`find_optimal_angles`]: global derivative-free search over the periodic
//!   `(gamma, beta)` domain.
//! - [`approximation_ratio`] / [`sampled_approximation_ratio`]: achieved
//!   versus optimal value.
//!
//! # Example
//!
//! ```ignore
//! use linqaoa_core::{PenaltyWeight, ProblemInstance, Shgo, approximation_ratio};
//!
//! let problem = ProblemInstance::new(vec![1.0, 2.0], vec![1.0, 1.0], 1.0)?;
//! let quality = approximation_ratio(&evaluator, &problem, 3, PenaltyWeight::integer(10), &Shgo::new())?;
//! println!("ratio = {:.3}", quality.report.ratio);
//! ```

pub mod angles;
pub mod distribution;
pub mod error;
pub mod evaluator;
pub mod expectation;
pub mod objective;
pub mod optimizers;
pub mod params;
pub mod penalty;
pub mod problem;
pub mod quality;
pub mod selection;
pub mod solver;

pub use angles::{AngleSearch, find_optimal_angles, optimize_angles, penalized_expectation};
pub use distribution::{Counts, OutcomeDistribution};
pub use error::{CoreError, CoreResult, EvaluatorError};
pub use evaluator::{CircuitEvaluator, FnEvaluator};
pub use expectation::expectation;
pub use objective::{
    ComparableObjective, Objective, PenalizedObjective, comparable_value, penalized_value,
};
pub use optimizers::{
    Cobyla, GlobalOptimizer, LocalMinimum, OptimizationResult, Optimizer, Shgo, ShgoOutcome,
};
pub use params::{Layer, ParameterVector, SearchDomain, beta_range, gamma_range, num_parameters};
pub use penalty::PenaltyWeight;
pub use problem::{InstanceSpec, ProblemInstance};
pub use quality::{
    ExactQuality, RatioReport, SampledQuality, approximation_ratio, ratio_for_distribution,
    sampled_approximation_ratio,
};
pub use selection::Selection;
pub use solver::{MAX_EXACT_ITEMS, SolutionSet, solve_exact};
