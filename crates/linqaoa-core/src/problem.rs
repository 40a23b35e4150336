//! EV selection problem definition.
//!
//! A problem instance is a 0/1 knapsack: every electric vehicle (item) has a
//! cost value (the charging time it contributes to the objective) and a
//! weight (the power it draws), and the selected vehicles share a power
//! capacity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::selection::Selection;

/// Literal instance data as it appears in experiment files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// Per-item cost values.
    pub costs: Vec<f64>,
    /// Per-item weights.
    pub weights: Vec<f64>,
    /// Shared capacity.
    pub capacity: f64,
}

/// One immutable problem instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstanceSpec", into = "InstanceSpec")]
pub struct ProblemInstance {
    costs: Vec<f64>,
    weights: Vec<f64>,
    capacity: f64,
    total_weight: f64,
    inverse_costs: Vec<f64>,
}

impl ProblemInstance {
    /// Create a problem instance.
    ///
    /// # Errors
    /// - [`CoreError::DimensionMismatch`] if the sequences differ in length.
    /// - [`CoreError::InvalidValue`] for a negative or non-finite entry.
    /// - [`CoreError::ZeroCost`] for a zero cost value.
    /// - [`CoreError::InvalidCapacity`] unless the capacity is finite and positive.
    pub fn new(costs: Vec<f64>, weights: Vec<f64>, capacity: f64) -> CoreResult<Self> {
        if costs.len() != weights.len() {
            return Err(CoreError::DimensionMismatch {
                costs: costs.len(),
                weights: weights.len(),
            });
        }
        for (index, &value) in costs.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidValue {
                    field: "cost",
                    index,
                    value,
                });
            }
            if value == 0.0 {
                return Err(CoreError::ZeroCost { index });
            }
        }
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidValue {
                    field: "weight",
                    index,
                    value,
                });
            }
        }
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(CoreError::InvalidCapacity(capacity));
        }
        Ok(Self::from_parts(costs, weights, capacity))
    }

    fn from_parts(costs: Vec<f64>, weights: Vec<f64>, capacity: f64) -> Self {
        let total_weight = weights.iter().sum();
        let inverse_costs = costs.iter().map(|c| 1.0 / c).collect();
        Self {
            costs,
            weights,
            capacity,
            total_weight,
            inverse_costs,
        }
    }

    /// The five instances of the reference batch run.
    pub fn reference_suite() -> Vec<Self> {
        vec![
            Self::from_parts(vec![1.0, 2.0], vec![1.0, 1.0], 1.0),
            Self::from_parts(vec![1.0, 2.0], vec![1.0, 1.0], 2.0),
            Self::from_parts(vec![1.0, 1.0, 2.0], vec![1.0, 1.0, 1.0], 2.0),
            Self::from_parts(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0], 3.0),
            Self::from_parts(vec![2.0, 3.0, 1.0, 1.0], vec![2.0, 2.0, 1.0, 1.0], 4.0),
        ]
    }

    /// Number of selectable items.
    pub fn item_count(&self) -> usize {
        self.costs.len()
    }

    /// Sum of all item weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Shared capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Cost value of item `index`.
    pub fn cost(&self, index: usize) -> Option<f64> {
        self.costs.get(index).copied()
    }

    /// Weight of item `index`.
    pub fn weight(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    /// All cost values in item order.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// All weights in item order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Reciprocal cost values, consumed by phase-encoding circuits.
    pub fn inverse_costs(&self) -> &[f64] {
        &self.inverse_costs
    }

    /// Summed cost value of the selected items.
    pub fn value_of(&self, selection: &Selection) -> f64 {
        selection.dot(&self.costs)
    }

    /// Summed weight of the selected items.
    pub fn weight_of(&self, selection: &Selection) -> f64 {
        selection.dot(&self.weights)
    }

    /// Whether the selection fits within the capacity.
    pub fn is_feasible(&self, selection: &Selection) -> bool {
        self.weight_of(selection) <= self.capacity
    }
}

impl TryFrom<InstanceSpec> for ProblemInstance {
    type Error = CoreError;

    fn try_from(spec: InstanceSpec) -> CoreResult<Self> {
        Self::new(spec.costs, spec.weights, spec.capacity)
    }
}

impl From<ProblemInstance> for InstanceSpec {
    fn from(problem: ProblemInstance) -> Self {
        Self {
            costs: problem.costs,
            weights: problem.weights,
            capacity: problem.capacity,
        }
    }
}

impl fmt::Display for ProblemInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EV problem: {} items, costs {:?}, weights {:?}, capacity {}",
            self.item_count(),
            self.costs,
            self.weights,
            self.capacity
        )
    }
}
