//! Exhaustive ground-truth solver.
//!
//! Enumerates all `2^n` selections. Only meant for the small instances used
//! to measure approximation quality.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::problem::ProblemInstance;
use crate::selection::Selection;

/// Largest item count the exhaustive solver accepts.
pub const MAX_EXACT_ITEMS: usize = 24;

/// Two summed values closer than this are treated as a tie.
pub const VALUE_TOLERANCE: f64 = 1e-9;

/// Maximal value and every feasible selection attaining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionSet {
    /// Best achievable value.
    pub best_value: f64,
    /// All optimal selections in ascending integer encoding.
    pub selections: Vec<Selection>,
}

impl SolutionSet {
    /// First optimal selection in enumeration order.
    pub fn first(&self) -> Option<&Selection> {
        self.selections.first()
    }

    /// Number of tied optimal selections.
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Whether no selection was recorded.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// Find all maximal-value feasible selections.
///
/// The empty selection is always feasible, so the result holds at least one
/// selection; its best value is `0` when no item fits.
///
/// # Errors
/// [`CoreError::TooManyItems`] above [`MAX_EXACT_ITEMS`] items.
pub fn solve_exact(problem: &ProblemInstance) -> CoreResult<SolutionSet> {
    let n = problem.item_count();
    if n > MAX_EXACT_ITEMS {
        return Err(CoreError::TooManyItems {
            items: n,
            max: MAX_EXACT_ITEMS,
        });
    }

    let feasible = move || {
        (0..(1u64 << n))
            .map(move |index| Selection::from_index(index, n))
            .filter(move |selection| problem.is_feasible(selection))
    };

    // Ties are measured against the maximum, not a running best.
    let best_value = feasible()
        .map(|selection| problem.value_of(&selection))
        .fold(0.0, f64::max);
    let selections: Vec<Selection> = feasible()
        .filter(|selection| best_value - problem.value_of(selection) <= VALUE_TOLERANCE)
        .collect();

    debug!(
        "Exact solver: {} items, best value {}, {} optimal selection(s)",
        n,
        best_value,
        selections.len()
    );

    Ok(SolutionSet {
        best_value,
        selections,
    })
}
