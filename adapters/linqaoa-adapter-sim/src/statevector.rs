//! Statevector simulation of the choice register.

use num_complex::Complex64;
use rand::Rng;
use rustc_hash::FxHashMap;

/// A statevector over the choice register.
///
/// Basis index bit `i` is qubit `i`, which is item `i`.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Equal superposition of all basis states, as after a Hadamard layer.
    pub fn uniform(num_qubits: usize) -> Self {
        let size = 1usize << num_qubits;
        let amp = Complex64::new(1.0 / (size as f64).sqrt(), 0.0);
        Self {
            amplitudes: vec![amp; size],
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitudes in basis order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Multiply each basis amplitude by `exp(-i * gamma * energies[x])`.
    pub fn apply_diagonal_phase(&mut self, energies: &[f64], gamma: f64) {
        for (amp, &e) in self.amplitudes.iter_mut().zip(energies) {
            *amp *= Complex64::from_polar(1.0, -gamma * e);
        }
    }

    /// Apply RX(theta) to one qubit.
    pub fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let neg_i_s = Complex64::new(0.0, -s);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    /// Apply RX(theta) to every qubit.
    pub fn apply_rx_all(&mut self, theta: f64) {
        for qubit in 0..self.num_qubits {
            self.apply_rx(qubit, theta);
        }
    }

    /// Measurement probabilities in basis order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Tally `shots` measurement outcomes by basis index.
    pub fn sample_counts<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> FxHashMap<usize, u64> {
        let mut cumulative = Vec::with_capacity(self.amplitudes.len());
        let mut total = 0.0;
        for amp in &self.amplitudes {
            total += amp.norm_sqr();
            cumulative.push(total);
        }
        let last = self.amplitudes.len() - 1;

        let mut counts = FxHashMap::default();
        for _ in 0..shots {
            let r: f64 = rng.r#gen::<f64>() * total;
            let outcome = cumulative.partition_point(|&c| c <= r).min(last);
            *counts.entry(outcome).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    /// (|0⟩ - i|1⟩)/√2, prepared with the ansatz's own phase layer.
    fn minus_i_state() -> Statevector {
        let mut sv = Statevector::uniform(1);
        sv.apply_diagonal_phase(&[0.0, 1.0], PI / 2.0);
        sv
    }

    #[test]
    fn test_uniform() {
        let sv = Statevector::uniform(2);
        assert_eq!(sv.num_qubits(), 2);
        for amp in sv.amplitudes() {
            assert!(approx_eq(*amp, Complex64::new(0.5, 0.0)));
        }
    }

    #[test]
    fn test_rx_pi_is_global_phase_on_uniform() {
        let mut sv = Statevector::uniform(1);
        sv.apply_rx(0, PI);
        let expected = Complex64::new(0.0, -std::f64::consts::FRAC_1_SQRT_2);
        assert!(approx_eq(sv.amplitudes[0], expected));
        assert!(approx_eq(sv.amplitudes[1], expected));
    }

    #[test]
    fn test_diagonal_phase_keeps_probabilities() {
        let mut sv = Statevector::uniform(2);
        sv.apply_diagonal_phase(&[0.0, 1.0, 2.0, -3.5], 0.7);
        for p in sv.probabilities() {
            assert!((p - 0.25).abs() < 1e-12);
        }
        assert!(approx_eq(sv.amplitudes[1], Complex64::from_polar(0.5, -0.7)));
    }

    #[test]
    fn test_phase_then_mixer_reaches_basis_state() {
        let mut sv = minus_i_state();
        sv.apply_rx_all(PI / 2.0);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_sample_deterministic() {
        let mut sv = minus_i_state();
        sv.apply_rx(0, PI / 2.0);
        let mut rng = StdRng::seed_from_u64(1);
        let counts = sv.sample_counts(100, &mut rng);
        assert_eq!(counts.get(&1), Some(&100));
        assert_eq!(counts.get(&0), None);
    }
}
