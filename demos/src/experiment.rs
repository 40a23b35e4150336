//! Experiment configuration.
//!
//! An experiment is a batch of problem instances run at one depth and
//! penalty weight. Files are YAML or JSON, picked by extension; fields that
//! are left out keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use linqaoa_adapter_sim::{DEFAULT_SHOTS, SamplerConfig, SimulatorConfig};
use linqaoa_core::{PenaltyWeight, ProblemInstance, Shgo};

/// Configuration of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of QAOA layers.
    pub depth: usize,
    /// Penalty weight `a`.
    pub penalty: PenaltyWeight,
    /// Shots of the sampled evaluator.
    pub shots: u32,
    /// Seed of the sampled evaluator.
    pub seed: Option<u64>,
    /// Global optimizer settings.
    pub optimizer: Shgo,
    /// Exact simulator settings.
    pub simulator: SimulatorConfig,
    /// Instances to run.
    pub instances: Vec<ProblemInstance>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            penalty: PenaltyWeight::integer(10),
            shots: DEFAULT_SHOTS,
            seed: None,
            optimizer: Shgo::default(),
            simulator: SimulatorConfig::default(),
            instances: ProblemInstance::reference_suite(),
        }
    }
}

impl ExperimentConfig {
    /// Load and validate a YAML or JSON experiment file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config: Self = match ext.to_lowercase().as_str() {
            "json" => serde_json::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
            "yaml" | "yml" => serde_yaml_ng::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
            other => {
                return Err(ConfigError::ParseError(format!(
                    "unsupported experiment file extension '{other}' (expected json, yaml or yml)"
                )));
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise start from the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check the values the runners rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ValidationError(
                "depth must be at least 1".into(),
            ));
        }
        if self.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be at least 1".into(),
            ));
        }
        if self.instances.is_empty() {
            return Err(ConfigError::ValidationError(
                "experiment has no instances".into(),
            ));
        }
        if self.optimizer.iters == 0 {
            return Err(ConfigError::ValidationError(
                "optimizer needs at least one refinement pass".into(),
            ));
        }
        Ok(())
    }

    /// Sampled-evaluator settings derived from this experiment.
    pub fn sampler_config(&self) -> SamplerConfig {
        let config = SamplerConfig::new()
            .with_shots(self.shots)
            .with_simulator(self.simulator.clone());
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Set the depth.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Set the penalty weight.
    #[must_use]
    pub fn with_penalty(mut self, penalty: PenaltyWeight) -> Self {
        self.penalty = penalty;
        self
    }

    /// Set the shot count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the optimizer.
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: Shgo) -> Self {
        self.optimizer = optimizer;
        self
    }
}

/// Errors loading an experiment file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
