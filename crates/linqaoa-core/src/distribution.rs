//! Outcome distributions and shot counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Raw shot counts keyed by device bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct Counts {
    counts: BTreeMap<String, u64>,
}

impl Counts {
    /// Empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, n: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += n;
    }

    /// Observations of `bitstring`.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl TryFrom<BTreeMap<String, u64>> for Counts {
    type Error = CoreError;

    fn try_from(counts: BTreeMap<String, u64>) -> CoreResult<Self> {
        let mut width = None;
        for key in counts.keys() {
            check_key(key, &mut width)?;
        }
        Ok(Self { counts })
    }
}

impl From<Counts> for BTreeMap<String, u64> {
    fn from(counts: Counts) -> Self {
        counts.counts
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (bitstring, n) in iter {
            counts.insert(bitstring, n);
        }
        counts
    }
}

/// Probability (or frequency) per fixed-width bitstring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct OutcomeDistribution {
    probabilities: BTreeMap<String, f64>,
}

impl TryFrom<BTreeMap<String, f64>> for OutcomeDistribution {
    type Error = CoreError;

    fn try_from(probabilities: BTreeMap<String, f64>) -> CoreResult<Self> {
        Self::from_probabilities(probabilities)
    }
}

impl From<OutcomeDistribution> for BTreeMap<String, f64> {
    fn from(distribution: OutcomeDistribution) -> Self {
        distribution.probabilities
    }
}

/// Keys are binary strings sharing the width of the first one seen.
fn check_key(key: &str, width: &mut Option<usize>) -> CoreResult<()> {
    if !key.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(CoreError::InvalidBitstring(key.to_string()));
    }
    match *width {
        None => *width = Some(key.len()),
        Some(w) if w != key.len() => {
            return Err(CoreError::InconsistentWidth {
                expected: w,
                actual: key.len(),
            });
        }
        Some(_) => {}
    }
    Ok(())
}

impl OutcomeDistribution {
    /// Build a distribution, validating keys and values.
    ///
    /// Keys must be binary strings of one common width and values must lie
    /// in `[0, 1]`. The values are not required to sum to one: sampled
    /// distributions carry statistical noise.
    pub fn from_probabilities<I, K>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut probabilities = BTreeMap::new();
        let mut width = None;
        for (key, value) in entries {
            let key = key.into();
            check_key(&key, &mut width)?;
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidProbability {
                    bitstring: key,
                    value,
                });
            }
            *probabilities.entry(key).or_insert(0.0) += value;
        }
        Ok(Self { probabilities })
    }

    /// Normalize shot counts by a fixed shot count.
    ///
    /// Frequencies are `count / shots`, so a device that returns fewer
    /// observations than requested yields a total below one.
    pub fn from_counts(counts: &Counts, shots: u32) -> CoreResult<Self> {
        if shots == 0 {
            return Err(CoreError::InvalidShots(shots));
        }
        let shots = f64::from(shots);
        Self::from_probabilities(
            counts
                .iter()
                .map(|(bitstring, n)| (bitstring.to_string(), n as f64 / shots)),
        )
    }

    /// Restrict every outcome to its `item_count` choice bits.
    ///
    /// The choice register is the low-order end of a device bitstring, so the
    /// trailing `item_count` characters are kept and outcomes that agree on
    /// them are merged by summing.
    pub fn marginalize(&self, item_count: usize) -> CoreResult<Self> {
        let mut probabilities = BTreeMap::new();
        for (key, &value) in &self.probabilities {
            if key.len() < item_count {
                return Err(CoreError::BitstringTooShort {
                    width: key.len(),
                    item_count,
                });
            }
            let choice = &key[key.len() - item_count..];
            *probabilities.entry(choice.to_string()).or_insert(0.0) += value;
        }
        Ok(Self { probabilities })
    }

    /// Probability of `bitstring`, zero when absent.
    pub fn get(&self, bitstring: &str) -> f64 {
        self.probabilities.get(bitstring).copied().unwrap_or(0.0)
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Number of outcomes with an entry.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Whether the distribution has no entries.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Common width of the outcome keys.
    pub fn width(&self) -> Option<usize> {
        self.probabilities.keys().next().map(String::len)
    }

    /// Most probable outcome; ties go to the smallest key.
    pub fn most_likely(&self) -> Option<(&str, f64)> {
        self.probabilities
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (k, &v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((k.as_str(), v)),
            })
    }

    /// Iterate over `(bitstring, probability)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities.iter().map(|(k, &v)| (k.as_str(), v))
    }
}
