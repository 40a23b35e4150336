//! LinQAOA Local Circuit Evaluators
//!
//! Two [`CircuitEvaluator`](linqaoa_core::CircuitEvaluator) implementations
//! for the knapsack QAOA circuit:
//!
//! - [`StatevectorEvaluator`]: exact analytic distribution, no sampling noise.
//!   Used for angle optimization and the idealized quality metric.
//! - [`ShotSampler`]: measures the same state a fixed number of times (2048
//!   by default) and reports frequencies. Used as the "real device" stand-in.
//!
//! Only the choice register is simulated, so memory grows as `2^items`:
//!
//! | Items | Memory | Simulation Speed |
//! |-------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! Reported bitstrings follow the circuit's register layout (see
//! [`RegisterLayout`]) unless ancillas are switched off in
//! [`SimulatorConfig`].
//!
//! # Example
//!
//! ```ignore
//! use linqaoa_adapter_sim::{SamplerConfig, ShotSampler, StatevectorEvaluator};
//! use linqaoa_core::{PenaltyWeight, ProblemInstance, Shgo, find_optimal_angles};
//!
//! let problem = ProblemInstance::new(vec![1.0, 2.0], vec![1.0, 1.0], 1.0)?;
//! let exact = StatevectorEvaluator::new(problem.clone())?;
//! let a = PenaltyWeight::integer(10);
//! let search = find_optimal_angles(&exact, &problem, 3, a, &Shgo::new())?;
//!
//! let device = ShotSampler::with_config(problem, SamplerConfig::new().with_seed(7))?;
//! let counts = device.counts(&search.parameters, a);
//! println!("{:?}", counts);
//! ```

mod config;
mod error;
mod exact;
mod layout;
mod sampled;
mod statevector;

pub use config::{DEFAULT_SHOTS, SamplerConfig, SimulatorConfig};
pub use error::{SimError, SimResult};
pub use exact::StatevectorEvaluator;
pub use layout::RegisterLayout;
pub use sampled::ShotSampler;
pub use statevector::Statevector;
