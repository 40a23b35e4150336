//! LinQAOA runner for one EV knapsack instance.
//!
//! Optimizes the angles on the exact statevector evaluator, scores the
//! resulting distribution against the brute-force optimum and, on request,
//! re-binds the angles on the shot sampler.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use linqaoa_adapter_sim::{
    SamplerConfig, ShotSampler, SimResult, SimulatorConfig, StatevectorEvaluator,
};
use linqaoa_core::{
    Counts, FnEvaluator, OutcomeDistribution, ParameterVector, PenaltyWeight, ProblemInstance,
    RatioReport, Selection, Shgo, approximation_ratio, sampled_approximation_ratio, solve_exact,
};

/// Most probable choice-register outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostLikely {
    /// Device-order bitstring.
    pub bitstring: String,
    /// Its selection label, item order.
    pub label: String,
    /// Its probability.
    pub probability: f64,
}

/// Everything a batch run reports for one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// The instance.
    pub problem: ProblemInstance,
    /// Number of layers.
    pub depth: usize,
    /// Penalty weight.
    pub penalty: PenaltyWeight,
    /// Optimized angles.
    pub parameters: ParameterVector,
    /// Choice-register distribution at the optimized angles.
    pub distribution: OutcomeDistribution,
    /// Wall-clock time of optimization and final evaluation, in seconds.
    pub elapsed_seconds: f64,
    /// All optimal selections.
    pub best_solutions: Vec<Selection>,
    /// Most probable outcome.
    pub most_likely: Option<MostLikely>,
    /// Exact approximation ratio.
    pub ratio: RatioReport,
    /// Circuit evaluations spent by the optimizer.
    pub evaluations: usize,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

/// Result of re-binding angles on the shot sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledRecord {
    /// Raw counts including ancilla bits.
    pub counts: Counts,
    /// Choice-register frequencies.
    pub distribution: OutcomeDistribution,
    /// Sampled approximation ratio.
    pub ratio: RatioReport,
}

/// Runner configuration.
pub struct KnapsackQaoaRunner {
    /// The instance to solve.
    pub problem: ProblemInstance,
    /// Number of QAOA layers.
    pub depth: usize,
    /// Penalty weight `a`.
    pub penalty: PenaltyWeight,
    /// Global optimizer.
    pub optimizer: Shgo,
    /// Exact simulator settings.
    pub simulator: SimulatorConfig,
}

impl KnapsackQaoaRunner {
    /// Create a runner with `p = 3` and `a = 10`.
    pub fn new(problem: ProblemInstance) -> Self {
        Self {
            problem,
            depth: 3,
            penalty: PenaltyWeight::integer(10),
            optimizer: Shgo::default(),
            simulator: SimulatorConfig::default(),
        }
    }

    /// Set the number of QAOA layers.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Set the penalty weight.
    pub fn with_penalty(mut self, penalty: PenaltyWeight) -> Self {
        self.penalty = penalty;
        self
    }

    /// Set the global optimizer.
    pub fn with_optimizer(mut self, optimizer: Shgo) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Set the exact simulator settings.
    pub fn with_simulator(mut self, simulator: SimulatorConfig) -> Self {
        self.simulator = simulator;
        self
    }

    /// Optimize on the exact evaluator and score the result.
    pub fn run(&self) -> SimResult<RunRecord> {
        let evaluator =
            StatevectorEvaluator::with_config(self.problem.clone(), self.simulator.clone())?;

        let start = Instant::now();
        let quality = approximation_ratio(
            &evaluator,
            &self.problem,
            self.depth,
            self.penalty,
            &self.optimizer,
        )?;
        let elapsed_seconds = start.elapsed().as_secs_f64();

        let solutions = solve_exact(&self.problem)?;
        let most_likely = quality
            .distribution
            .most_likely()
            .map(|(bitstring, probability)| {
                Selection::from_bitstring(bitstring, self.problem.item_count()).map(|selection| {
                    MostLikely {
                        bitstring: bitstring.to_string(),
                        label: selection.to_string(),
                        probability,
                    }
                })
            })
            .transpose()?;

        info!(
            "{} items: ratio {:.4} in {:.2}s",
            self.problem.item_count(),
            quality.report.ratio,
            elapsed_seconds
        );

        Ok(RunRecord {
            problem: self.problem.clone(),
            depth: self.depth,
            penalty: self.penalty,
            parameters: quality.search.parameters,
            distribution: quality.distribution,
            elapsed_seconds,
            best_solutions: solutions.selections,
            most_likely,
            ratio: quality.report,
            evaluations: quality.search.optimization.num_evaluations,
            finished_at: Utc::now(),
        })
    }

    /// Re-bind `parameters` on a shot sampler and score the frequencies.
    pub fn run_sampled(
        &self,
        parameters: &ParameterVector,
        config: SamplerConfig,
    ) -> SimResult<SampledRecord> {
        let sampler = ShotSampler::with_config(self.problem.clone(), config)?;
        let counts = sampler.counts(parameters, self.penalty);
        // Score the same counts that are reported.
        let recorded = FnEvaluator::new("recorded-counts", |_: &ParameterVector, _| {
            Ok(OutcomeDistribution::from_counts(&counts, sampler.shots())?)
        });
        let quality =
            sampled_approximation_ratio(&recorded, &self.problem, parameters, self.penalty)?;

        Ok(SampledRecord {
            counts,
            distribution: quality.distribution,
            ratio: quality.report,
        })
    }
}
