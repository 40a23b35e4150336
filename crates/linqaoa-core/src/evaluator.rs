//! Boundary to the circuit simulator.
//!
//! The core never builds or simulates circuits itself. It asks a
//! [`CircuitEvaluator`] for the outcome distribution of one parameter
//! binding. Exact statevector simulators and shot-sampling devices both
//! satisfy this trait, and tests can plug in a closure via [`FnEvaluator`].

use crate::distribution::OutcomeDistribution;
use crate::error::EvaluatorError;
use crate::params::ParameterVector;
use crate::penalty::PenaltyWeight;

/// Source of outcome distributions for bound circuit parameters.
pub trait CircuitEvaluator {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Distribution of measured bitstrings for the given binding.
    fn evaluate(
        &self,
        parameters: &ParameterVector,
        penalty: PenaltyWeight,
    ) -> Result<OutcomeDistribution, EvaluatorError>;
}

impl<T: CircuitEvaluator + ?Sized> CircuitEvaluator for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(
        &self,
        parameters: &ParameterVector,
        penalty: PenaltyWeight,
    ) -> Result<OutcomeDistribution, EvaluatorError> {
        (**self).evaluate(parameters, penalty)
    }
}

/// Evaluator backed by a closure.
pub struct FnEvaluator<F> {
    name: String,
    f: F,
}

impl<F> FnEvaluator<F>
where
    F: Fn(&ParameterVector, PenaltyWeight) -> Result<OutcomeDistribution, EvaluatorError>,
{
    /// Wrap a closure.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> CircuitEvaluator for FnEvaluator<F>
where
    F: Fn(&ParameterVector, PenaltyWeight) -> Result<OutcomeDistribution, EvaluatorError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(
        &self,
        parameters: &ParameterVector,
        penalty: PenaltyWeight,
    ) -> Result<OutcomeDistribution, EvaluatorError> {
        (self.f)(parameters, penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_evaluator() {
        let evaluator = FnEvaluator::new("fixed", |_: &ParameterVector, _: PenaltyWeight| {
            Ok(OutcomeDistribution::from_probabilities([("01", 1.0)])?)
        });
        let params = ParameterVector::from_interleaved(&[0.0, 0.0]).unwrap();
        let dist = evaluator
            .evaluate(&params, PenaltyWeight::integer(1))
            .unwrap();
        assert_eq!(evaluator.name(), "fixed");
        assert_eq!(dist.get("01"), 1.0);
    }
}
