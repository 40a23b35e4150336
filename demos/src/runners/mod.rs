//! Experiment runners for the EV knapsack.

pub mod knapsack;
pub mod sweep;

pub use knapsack::{KnapsackQaoaRunner, MostLikely, RunRecord, SampledRecord};
pub use sweep::{PenaltySweep, SweepPoint, default_penalties};
