//! Scalar scores of selections and bitstrings.
//!
//! Two scores exist. The penalized objective drives the parameter search and
//! subtracts `a * (weight - capacity)` from over-capacity selections. The
//! comparable objective is used only for reporting: it is the plain value of
//! a feasible selection and `0` otherwise.

use crate::error::CoreResult;
use crate::penalty::PenaltyWeight;
use crate::problem::ProblemInstance;
use crate::selection::Selection;

/// A scalar score of a device bitstring.
///
/// Implemented by the two problem objectives and by any plain
/// `Fn(&str) -> f64` closure.
pub trait Objective {
    /// Score one bitstring.
    fn evaluate(&self, bitstring: &str) -> CoreResult<f64>;
}

impl<F> Objective for F
where
    F: Fn(&str) -> f64,
{
    fn evaluate(&self, bitstring: &str) -> CoreResult<f64> {
        Ok(self(bitstring))
    }
}

/// Penalized score of a selection.
pub fn penalized_value(selection: &Selection, problem: &ProblemInstance, a: PenaltyWeight) -> f64 {
    let time = problem.value_of(selection);
    let power = problem.weight_of(selection);
    let penalty = if power > problem.capacity() {
        a.value() * (power - problem.capacity())
    } else {
        0.0
    };
    time - penalty
}

/// Feasibility-gated score of a selection.
pub fn comparable_value(selection: &Selection, problem: &ProblemInstance) -> f64 {
    if problem.is_feasible(selection) {
        problem.value_of(selection)
    } else {
        0.0
    }
}

/// Penalized objective bound to a problem and penalty weight.
#[derive(Debug, Clone, Copy)]
pub struct PenalizedObjective<'a> {
    problem: &'a ProblemInstance,
    a: PenaltyWeight,
}

impl<'a> PenalizedObjective<'a> {
    /// Bind the objective.
    pub fn new(problem: &'a ProblemInstance, a: PenaltyWeight) -> Self {
        Self { problem, a }
    }

    /// Score a selection.
    pub fn score(&self, selection: &Selection) -> f64 {
        penalized_value(selection, self.problem, self.a)
    }
}

impl Objective for PenalizedObjective<'_> {
    fn evaluate(&self, bitstring: &str) -> CoreResult<f64> {
        let selection = Selection::from_bitstring(bitstring, self.problem.item_count())?;
        Ok(self.score(&selection))
    }
}

/// Comparable objective bound to a problem.
#[derive(Debug, Clone, Copy)]
pub struct ComparableObjective<'a> {
    problem: &'a ProblemInstance,
}

impl<'a> ComparableObjective<'a> {
    /// Bind the objective.
    pub fn new(problem: &'a ProblemInstance) -> Self {
        Self { problem }
    }

    /// Score a selection.
    pub fn score(&self, selection: &Selection) -> f64 {
        comparable_value(selection, self.problem)
    }
}

impl Objective for ComparableObjective<'_> {
    fn evaluate(&self, bitstring: &str) -> CoreResult<f64> {
        let selection = Selection::from_bitstring(bitstring, self.problem.item_count())?;
        Ok(self.score(&selection))
    }
}
