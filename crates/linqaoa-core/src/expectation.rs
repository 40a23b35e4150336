//! Probability-weighted expectation of an objective.

use crate::distribution::OutcomeDistribution;
use crate::error::CoreResult;
use crate::objective::Objective;

/// Compute `Σ p(b) · f(b)` over all outcomes of the distribution.
///
/// The first objective error aborts the sum and is returned.
pub fn expectation<O>(distribution: &OutcomeDistribution, objective: &O) -> CoreResult<f64>
where
    O: Objective + ?Sized,
{
    distribution
        .iter()
        .try_fold(0.0, |acc, (bitstring, probability)| {
            Ok(acc + probability * objective.evaluate(bitstring)?)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::ComparableObjective;
    use crate::problem::ProblemInstance;

    fn as_integer(bitstring: &str) -> f64 {
        u64::from_str_radix(bitstring, 2).map_or(0.0, |v| v as f64)
    }

    #[test]
    fn test_expectation_of_integer_value() {
        let dist = OutcomeDistribution::from_probabilities([("00", 0.5), ("01", 0.5)]).unwrap();
        assert_eq!(expectation(&dist, &as_integer).unwrap(), 0.5);
    }

    #[test]
    fn test_empty_distribution() {
        let dist = OutcomeDistribution::default();
        assert_eq!(expectation(&dist, &as_integer).unwrap(), 0.0);
    }

    #[test]
    fn test_objective_error_propagates() {
        let problem = ProblemInstance::new(vec![1.0, 2.0, 3.0], vec![1.0; 3], 2.0).unwrap();
        let dist = OutcomeDistribution::from_probabilities([("01", 1.0)]).unwrap();
        let objective = ComparableObjective::new(&problem);
        assert!(expectation(&dist, &objective).is_err());
    }
}
