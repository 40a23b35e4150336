//! Simulator configuration values.
//!
//! Each evaluator takes its configuration at construction; nothing is read
//! from process-wide state.

use serde::{Deserialize, Serialize};

/// Default number of shots of the sampling evaluator.
pub const DEFAULT_SHOTS: u32 = 2048;

/// Configuration of the exact statevector evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest choice register that will be simulated.
    pub max_qubits: usize,
    /// Report the weight and flag registers as leading zero bits.
    pub include_ancillas: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: 20,
            include_ancillas: true,
        }
    }
}

impl SimulatorConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the qubit limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Choose whether ancilla bits appear in reported bitstrings.
    #[must_use]
    pub fn with_ancillas(mut self, include: bool) -> Self {
        self.include_ancillas = include;
        self
    }
}

/// Configuration of the shot-sampling evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Repetitions per parameter binding.
    pub shots: u32,
    /// Seed of the sampling RNG; fresh entropy when absent.
    pub seed: Option<u64>,
    /// Underlying statevector settings.
    pub simulator: SimulatorConfig,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            seed: None,
            simulator: SimulatorConfig::default(),
        }
    }
}

impl SamplerConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shot count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the statevector settings.
    #[must_use]
    pub fn with_simulator(mut self, simulator: SimulatorConfig) -> Self {
        self.simulator = simulator;
        self
    }
}
