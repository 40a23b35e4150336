//! Shot-sampling evaluator.

use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use linqaoa_core::{
    CircuitEvaluator, Counts, EvaluatorError, OutcomeDistribution, ParameterVector,
    PenaltyWeight, ProblemInstance,
};

use crate::config::SamplerConfig;
use crate::error::{SimError, SimResult};
use crate::exact::StatevectorEvaluator;

/// Evaluator that measures the circuit a fixed number of times.
///
/// Stands in for a real device: the returned frequencies carry shot noise.
/// Counts are normalized by the configured shot count.
#[derive(Debug)]
pub struct ShotSampler {
    simulator: StatevectorEvaluator,
    shots: u32,
    rng: Mutex<StdRng>,
}

impl ShotSampler {
    /// Sampler for `problem` with default settings.
    pub fn new(problem: ProblemInstance) -> SimResult<Self> {
        Self::with_config(problem, SamplerConfig::default())
    }

    /// Sampler for `problem` with explicit settings.
    pub fn with_config(problem: ProblemInstance, config: SamplerConfig) -> SimResult<Self> {
        if config.shots == 0 {
            return Err(SimError::InvalidShots(config.shots));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            simulator: StatevectorEvaluator::with_config(problem, config.simulator)?,
            shots: config.shots,
            rng: Mutex::new(rng),
        })
    }

    /// Shots per binding.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Raw measurement counts for one binding.
    #[instrument(skip(self, parameters))]
    pub fn counts(&self, parameters: &ParameterVector, a: PenaltyWeight) -> Counts {
        let sv = self.simulator.statevector(parameters, a);
        let tallies = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            sv.sample_counts(self.shots, &mut *rng)
        };

        let layout = self.simulator.layout();
        let counts: Counts = tallies
            .into_iter()
            .map(|(outcome, n)| (layout.bitstring(outcome), n))
            .collect();
        debug!("{} shots over {} distinct outcomes", self.shots, counts.len());
        counts
    }

    /// Frequencies for one binding.
    pub fn distribution(
        &self,
        parameters: &ParameterVector,
        a: PenaltyWeight,
    ) -> SimResult<OutcomeDistribution> {
        let counts = self.counts(parameters, a);
        Ok(OutcomeDistribution::from_counts(&counts, self.shots)?)
    }
}

impl CircuitEvaluator for ShotSampler {
    fn name(&self) -> &str {
        "shot-sampler"
    }

    fn evaluate(
        &self,
        parameters: &ParameterVector,
        penalty: PenaltyWeight,
    ) -> Result<OutcomeDistribution, EvaluatorError> {
        Ok(self.distribution(parameters, penalty)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> ProblemInstance {
        ProblemInstance::new(vec![1.0, 2.0], vec![1.0, 1.0], 1.0).unwrap()
    }

    #[test]
    fn test_counts_sum_to_shots() {
        let sampler =
            ShotSampler::with_config(problem(), SamplerConfig::new().with_shots(500).with_seed(3))
                .unwrap();
        let params = ParameterVector::from_interleaved(&[0.4, 0.9]).unwrap();
        let counts = sampler.counts(&params, PenaltyWeight::integer(10));
        assert_eq!(counts.total(), 500);
        assert!(counts.iter().all(|(b, _)| b.len() == 5));
    }

    #[test]
    fn test_zero_shots_rejected() {
        let err = ShotSampler::with_config(problem(), SamplerConfig::new().with_shots(0))
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidShots(0)));
    }
}
