//! Circuit angles and their search domain.
//!
//! A depth-`p` circuit has one `(gamma, beta)` pair per layer. Optimizers
//! see the interleaved form `[gamma_0, beta_0, gamma_1, beta_1, ...]`; the
//! rest of the code works with [`Layer`] records.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::penalty::PenaltyWeight;

/// Angles of one phase-separation + mixing layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Phase-separation angle.
    pub gamma: f64,
    /// Mixing angle.
    pub beta: f64,
}

/// Angles of all layers in application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayerList")]
pub struct ParameterVector {
    layers: Vec<Layer>,
}

/// Unchecked serde form of [`ParameterVector`].
#[derive(Deserialize)]
struct LayerList {
    layers: Vec<Layer>,
}

impl TryFrom<LayerList> for ParameterVector {
    type Error = CoreError;

    fn try_from(list: LayerList) -> CoreResult<Self> {
        Self::new(list.layers)
    }
}

impl ParameterVector {
    /// Parameters from layer records.
    pub fn new(layers: Vec<Layer>) -> CoreResult<Self> {
        if layers.is_empty() {
            return Err(CoreError::InvalidDepth(0));
        }
        Ok(Self { layers })
    }

    /// Parameters from the interleaved optimizer form.
    pub fn from_interleaved(angles: &[f64]) -> CoreResult<Self> {
        if angles.is_empty() || angles.len() % 2 != 0 {
            return Err(CoreError::ParameterLength {
                expected: 2 * (angles.len() / 2).max(1),
                actual: angles.len(),
            });
        }
        let layers = angles
            .chunks_exact(2)
            .map(|pair| Layer {
                gamma: pair[0],
                beta: pair[1],
            })
            .collect();
        Ok(Self { layers })
    }

    /// Interleaved `[gamma_0, beta_0, ...]` form.
    pub fn to_interleaved(&self) -> Vec<f64> {
        self.layers.iter().flat_map(|l| [l.gamma, l.beta]).collect()
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Layer records.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Phase-separation angles in layer order.
    pub fn gammas(&self) -> Vec<f64> {
        self.layers.iter().map(|l| l.gamma).collect()
    }

    /// Mixing angles in layer order.
    pub fn betas(&self) -> Vec<f64> {
        self.layers.iter().map(|l| l.beta).collect()
    }
}

impl fmt::Display for ParameterVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, layer) in self.layers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "γ{i}={:.4} β{i}={:.4}", layer.gamma, layer.beta)?;
        }
        Ok(())
    }
}

/// Number of interleaved parameters of a depth-`p` circuit.
pub fn num_parameters(p: usize) -> usize {
    2 * p
}

/// Bounded search box for the angles of a depth-`p` circuit.
///
/// `gamma` lives in `[0, D·2π)` where `D` is the denominator of the penalty
/// weight in lowest terms; `beta` lives in `[0, π)`. Outside these ranges the
/// phase operator repeats itself.
///
/// Optimizers search the closed box returned by [`SearchDomain::bounds`];
/// [`SearchDomain::wrap`] folds their points back into the half-open ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDomain {
    /// Number of layers.
    pub depth: usize,
    /// Range of every gamma.
    pub gamma_range: (f64, f64),
    /// Range of every beta.
    pub beta_range: (f64, f64),
}

impl SearchDomain {
    /// Domain for depth `p` and penalty weight `a`.
    pub fn new(depth: usize, a: PenaltyWeight) -> CoreResult<Self> {
        if depth == 0 {
            return Err(CoreError::InvalidDepth(depth));
        }
        Ok(Self {
            depth,
            gamma_range: gamma_range(a),
            beta_range: beta_range(),
        })
    }

    /// Interleaved per-parameter bounds.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        (0..self.depth)
            .flat_map(|_| [self.gamma_range, self.beta_range])
            .collect()
    }

    /// Whether every angle lies inside the half-open ranges.
    pub fn contains(&self, params: &ParameterVector) -> bool {
        params.depth() == self.depth
            && params.layers().iter().all(|l| {
                (self.gamma_range.0..self.gamma_range.1).contains(&l.gamma)
                    && (self.beta_range.0..self.beta_range.1).contains(&l.beta)
            })
    }

    /// Fold every angle into its half-open range by its period.
    pub fn wrap(&self, params: &ParameterVector) -> ParameterVector {
        let layers = params
            .layers()
            .iter()
            .map(|l| Layer {
                gamma: fold(l.gamma, self.gamma_range),
                beta: fold(l.beta, self.beta_range),
            })
            .collect();
        ParameterVector { layers }
    }
}

fn fold(value: f64, (lo, hi): (f64, f64)) -> f64 {
    let period = hi - lo;
    let r = (value - lo).rem_euclid(period);
    // rem_euclid may round up to the period itself.
    if r >= period { lo } else { lo + r }
}

/// Range of a gamma angle for penalty weight `a`.
pub fn gamma_range(a: PenaltyWeight) -> (f64, f64) {
    (0.0, a.denominator() as f64 * 2.0 * PI)
}

/// Range of a beta angle.
pub fn beta_range() -> (f64, f64) {
    (0.0, PI)
}
