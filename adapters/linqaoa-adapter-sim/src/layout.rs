//! Register layout of the knapsack QAOA circuit.

use serde::{Deserialize, Serialize};

use linqaoa_core::ProblemInstance;

/// Widths of the three registers of the circuit.
///
/// Qubits are ordered choice, weight, flag, so in a measured bitstring
/// (most significant qubit first) the flag bit comes first and the choice
/// bits come last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterLayout {
    /// One qubit per item.
    pub choice: usize,
    /// Qubits holding the summed weight.
    pub weight: usize,
    /// Overflow flag.
    pub flag: usize,
}

impl RegisterLayout {
    /// Layout for `problem`.
    ///
    /// The weight register holds `bit_length(total_weight)` qubits, plus one
    /// when that equals `bit_length(capacity)`.
    pub fn for_problem(problem: &ProblemInstance) -> Self {
        let mut weight = bit_length(problem.total_weight());
        if bit_length(problem.capacity()) == weight {
            weight += 1;
        }
        Self {
            choice: problem.item_count(),
            weight,
            flag: 1,
        }
    }

    /// Choice register only.
    pub fn choice_only(items: usize) -> Self {
        Self {
            choice: items,
            weight: 0,
            flag: 0,
        }
    }

    /// Number of ancilla qubits.
    pub fn ancillas(&self) -> usize {
        self.weight + self.flag
    }

    /// Total number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.choice + self.ancillas()
    }

    /// Full-width bitstring of a choice-register basis state.
    ///
    /// Ancillas are returned to zero by the phase operator, so they show up
    /// as leading zeros.
    pub fn bitstring(&self, choice_index: usize) -> String {
        format!(
            "{}{:0width$b}",
            "0".repeat(self.ancillas()),
            choice_index,
            width = self.choice
        )
    }
}

/// `floor(log2(x)) + 1`, at least 1.
fn bit_length(x: f64) -> usize {
    if x >= 1.0 {
        x.log2().floor() as usize + 1
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_layouts() {
        let widths: Vec<usize> = ProblemInstance::reference_suite()
            .iter()
            .map(|p| RegisterLayout::for_problem(p).num_qubits())
            .collect();
        // Weight registers of 2, 3, 3, 3 and 4 qubits.
        assert_eq!(widths, vec![5, 6, 7, 7, 9]);
    }

    #[test]
    fn test_bitstring_has_leading_ancillas() {
        let layout = RegisterLayout::for_problem(&ProblemInstance::reference_suite()[0]);
        assert_eq!(layout.ancillas(), 3);
        assert_eq!(layout.bitstring(2), "00010");
        assert_eq!(RegisterLayout::choice_only(2).bitstring(1), "01");
    }
}
