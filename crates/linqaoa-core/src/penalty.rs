//! Penalty weight of the soft capacity constraint.
//!
//! The weight `a` scales how strongly a selection over capacity is punished
//! in the optimization objective. Its denominator in lowest terms also fixes
//! the periodicity of the phase-separation angle, so the weight is kept as a
//! rational number alongside its floating-point value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Largest denominator recovered from a floating-point weight.
pub const MAX_DENOMINATOR: u64 = 1_000_000;

/// Largest weight accepted by [`PenaltyWeight::from_f64`].
const MAX_WEIGHT: f64 = 1e12;

/// Non-negative rational penalty weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PenaltyWeight {
    value: f64,
    numerator: u64,
    denominator: u64,
}

impl PenaltyWeight {
    /// Integral penalty weight.
    pub fn integer(value: u64) -> Self {
        Self {
            value: value as f64,
            numerator: value,
            denominator: 1,
        }
    }

    /// Penalty weight `numerator / denominator`, reduced to lowest terms.
    pub fn ratio(numerator: u64, denominator: u64) -> CoreResult<Self> {
        if denominator == 0 {
            return Err(CoreError::InvalidPenaltyWeight(format!(
                "{numerator}/0 has a zero denominator"
            )));
        }
        let g = gcd(numerator, denominator);
        let (numerator, denominator) = (numerator / g, denominator / g);
        Ok(Self {
            value: numerator as f64 / denominator as f64,
            numerator,
            denominator,
        })
    }

    /// Penalty weight from a float.
    ///
    /// The rational form is the best approximation with a denominator of at
    /// most [`MAX_DENOMINATOR`], so `0.1` becomes `1/10` rather than its
    /// exact binary expansion.
    pub fn from_f64(value: f64) -> CoreResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidPenaltyWeight(format!(
                "{value} is not a finite non-negative number"
            )));
        }
        if value > MAX_WEIGHT {
            return Err(CoreError::InvalidPenaltyWeight(format!(
                "{value} exceeds the supported maximum {MAX_WEIGHT}"
            )));
        }
        let (numerator, denominator) = best_rational(value, MAX_DENOMINATOR);
        Ok(Self {
            value,
            numerator,
            denominator,
        })
    }

    /// Floating-point value used by the objective.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Numerator in lowest terms.
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Denominator in lowest terms.
    pub fn denominator(&self) -> u64 {
        self.denominator
    }
}

impl Default for PenaltyWeight {
    fn default() -> Self {
        Self::integer(10)
    }
}

impl TryFrom<f64> for PenaltyWeight {
    type Error = CoreError;

    fn try_from(value: f64) -> CoreResult<Self> {
        Self::from_f64(value)
    }
}

impl From<PenaltyWeight> for f64 {
    fn from(weight: PenaltyWeight) -> Self {
        weight.value
    }
}

impl fmt::Display for PenaltyWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

/// Best rational approximation of a non-negative `x` with bounded denominator.
///
/// Walks the continued-fraction convergents and, once the next one would
/// exceed `max_den`, picks the closer of the last convergent and the largest
/// admissible semiconvergent.
fn best_rational(x: f64, max_den: u64) -> (u64, u64) {
    let max_den = u128::from(max_den.max(1));
    let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
    let mut frac = x;
    let mut truncated = false;

    for _ in 0..64 {
        let a = frac.floor() as u128;
        let q2 = q0 + a * q1;
        if q2 > max_den {
            truncated = true;
            break;
        }
        let p2 = p0 + a * p1;
        (p0, q0, p1, q1) = (p1, q1, p2, q2);

        let rem = frac - frac.floor();
        if rem <= 1e-12 || (p1 as f64 / q1 as f64 - x).abs() <= f64::EPSILON * x.max(1.0) {
            break;
        }
        frac = 1.0 / rem;
    }

    if truncated && q1 > 0 {
        let k = (max_den - q0) / q1;
        let (ps, qs) = (p0 + k * p1, q0 + k * q1);
        let semi_err = (ps as f64 / qs as f64 - x).abs();
        let conv_err = (p1 as f64 / q1 as f64 - x).abs();
        if semi_err < conv_err {
            return (ps as u64, qs as u64);
        }
    }
    (p1 as u64, q1.max(1) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_weight() {
        let a = PenaltyWeight::integer(10);
        assert_eq!(a.numerator(), 10);
        assert_eq!(a.denominator(), 1);
        assert_eq!(a.value(), 10.0);
        assert_eq!(a.to_string(), "10");
    }

    #[test]
    fn test_ratio_is_reduced() {
        let a = PenaltyWeight::ratio(6, 4).unwrap();
        assert_eq!((a.numerator(), a.denominator()), (3, 2));
        assert_eq!(a.value(), 1.5);
        assert_eq!(a.to_string(), "3/2");
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert!(matches!(
            PenaltyWeight::ratio(1, 0),
            Err(CoreError::InvalidPenaltyWeight(_))
        ));
    }

    #[test]
    fn test_from_f64_recovers_small_fractions() {
        assert_eq!(PenaltyWeight::from_f64(0.5).unwrap().denominator(), 2);
        assert_eq!(PenaltyWeight::from_f64(0.1).unwrap().denominator(), 10);
        assert_eq!(PenaltyWeight::from_f64(2.25).unwrap().denominator(), 4);
        let third = PenaltyWeight::from_f64(1.0 / 3.0).unwrap();
        assert_eq!((third.numerator(), third.denominator()), (1, 3));
    }

    #[test]
    fn test_from_f64_integers_and_zero() {
        assert_eq!(PenaltyWeight::from_f64(10.0).unwrap().denominator(), 1);
        let zero = PenaltyWeight::from_f64(0.0).unwrap();
        assert_eq!((zero.value(), zero.numerator(), zero.denominator()), (0.0, 0, 1));
    }

    #[test]
    fn test_tiny_weight_keeps_its_value() {
        // The fraction rounds to 0/1 but the penalty itself does not vanish.
        let tiny = PenaltyWeight::from_f64(1e-7).unwrap();
        assert_eq!(tiny.value(), 1e-7);
        assert_eq!(tiny.denominator(), 1);
    }

    #[test]
    fn test_from_f64_bounded_denominator() {
        let pi = PenaltyWeight::from_f64(std::f64::consts::PI).unwrap();
        assert!(pi.denominator() <= MAX_DENOMINATOR);
        let approx = pi.numerator() as f64 / pi.denominator() as f64;
        assert!((approx - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_from_f64_rejects_invalid() {
        assert!(PenaltyWeight::from_f64(-1.0).is_err());
        assert!(PenaltyWeight::from_f64(f64::NAN).is_err());
        assert!(PenaltyWeight::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_serde_as_number() {
        let a: PenaltyWeight = serde_json::from_str("0.25").unwrap();
        assert_eq!(a.denominator(), 4);
        assert_eq!(serde_json::to_string(&a).unwrap(), "0.25");
        assert!(serde_json::from_str::<PenaltyWeight>("-2.0").is_err());
    }
}
