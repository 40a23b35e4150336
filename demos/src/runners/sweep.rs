//! Penalty-weight sweep.

use serde::{Deserialize, Serialize};
use tracing::debug;

use linqaoa_adapter_sim::{SimResult, SimulatorConfig, StatevectorEvaluator};
use linqaoa_core::{PenaltyWeight, ProblemInstance, Shgo, approximation_ratio};

/// Ratio of one instance at one penalty weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Index of the instance in the sweep.
    pub instance: usize,
    /// Penalty weight.
    pub penalty: PenaltyWeight,
    /// Exact approximation ratio.
    pub ratio: f64,
}

/// Sweep configuration.
pub struct PenaltySweep {
    /// Penalty weights to try, in order.
    pub penalties: Vec<PenaltyWeight>,
    /// Number of QAOA layers.
    pub depth: usize,
    /// Global optimizer.
    pub optimizer: Shgo,
    /// Exact simulator settings.
    pub simulator: SimulatorConfig,
}

impl Default for PenaltySweep {
    fn default() -> Self {
        Self {
            penalties: default_penalties(),
            depth: 3,
            optimizer: Shgo::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

impl PenaltySweep {
    /// Create a sweep over `a = 0, 2, ..., 10` at `p = 3`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the penalty weights.
    pub fn with_penalties(mut self, penalties: Vec<PenaltyWeight>) -> Self {
        self.penalties = penalties;
        self
    }

    /// Set the number of QAOA layers.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
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

    /// Number of optimizer runs the sweep will make.
    pub fn num_runs(&self, instances: usize) -> usize {
        self.penalties.len() * instances
    }

    /// Run every penalty weight on every instance.
    ///
    /// `on_point` is called after each point, in penalty-major order.
    pub fn run<F>(
        &self,
        instances: &[ProblemInstance],
        mut on_point: F,
    ) -> SimResult<Vec<SweepPoint>>
    where
        F: FnMut(&SweepPoint),
    {
        let evaluators = instances
            .iter()
            .map(|p| StatevectorEvaluator::with_config(p.clone(), self.simulator.clone()))
            .collect::<SimResult<Vec<_>>>()?;

        let mut points = Vec::with_capacity(self.num_runs(instances.len()));
        for &penalty in &self.penalties {
            for (index, (problem, evaluator)) in instances.iter().zip(&evaluators).enumerate() {
                let quality =
                    approximation_ratio(evaluator, problem, self.depth, penalty, &self.optimizer)?;
                let point = SweepPoint {
                    instance: index,
                    penalty,
                    ratio: quality.report.ratio,
                };
                debug!("a = {}, instance {}: ratio {:.4}", penalty, index + 1, point.ratio);
                on_point(&point);
                points.push(point);
            }
        }
        Ok(points)
    }
}

/// `a = 0, 2, 4, 6, 8, 10`.
pub fn default_penalties() -> Vec<PenaltyWeight> {
    (0..=10).step_by(2).map(PenaltyWeight::integer).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_penalties() {
        let values: Vec<f64> = default_penalties().iter().map(|a| a.value()).collect();
        assert_eq!(values, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_sweep_visits_every_point() {
        let instances = vec![ProblemInstance::reference_suite().swap_remove(0)];
        let sweep = PenaltySweep::new()
            .with_penalties(vec![PenaltyWeight::integer(0), PenaltyWeight::integer(4)])
            .with_depth(1)
            .with_optimizer(Shgo::new().with_iters(1).with_sampling_points(16));
        let mut seen = 0;
        let points = sweep.run(&instances, |_| seen += 1).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(seen, 2);
        assert_eq!(points[1].penalty, PenaltyWeight::integer(4));
        assert!(points.iter().all(|p| p.ratio.is_finite()));
    }
}
