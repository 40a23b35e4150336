//! Halton low-discrepancy sequence.

/// Deterministic low-discrepancy sampler of the unit hypercube.
///
/// Dimension `k` uses the radical inverse in the `k`-th prime base. The
/// all-zero point of index 0 is skipped.
#[derive(Debug, Clone)]
pub struct Halton {
    bases: Vec<u64>,
    index: u64,
}

impl Halton {
    /// Sequence over `dim` dimensions.
    pub fn new(dim: usize) -> Self {
        Self {
            bases: first_primes(dim),
            index: 1,
        }
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.bases.len()
    }

    /// Next point in `[0, 1)^dim`.
    pub fn next_unit(&mut self) -> Vec<f64> {
        let i = self.index;
        self.index += 1;
        self.bases.iter().map(|&b| radical_inverse(i, b)).collect()
    }

    /// Next point scaled into `bounds`.
    pub fn next_in(&mut self, bounds: &[(f64, f64)]) -> Vec<f64> {
        self.next_unit()
            .into_iter()
            .zip(bounds)
            .map(|(u, &(lo, hi))| lo + u * (hi - lo))
            .collect()
    }
}

fn radical_inverse(mut i: u64, base: u64) -> f64 {
    let inv = 1.0 / base as f64;
    let mut f = inv;
    let mut result = 0.0;
    while i > 0 {
        result += f * (i % base) as f64;
        i /= base;
        f *= inv;
    }
    result
}

fn first_primes(n: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(n);
    let mut candidate = 2;
    while primes.len() < n {
        if primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}
