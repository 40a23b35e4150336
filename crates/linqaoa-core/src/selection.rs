//! Binary item selections and their bitstring encoding.
//!
//! Device bitstrings are written most-significant qubit first. The choice
//! register sits on the lowest qubits, so item `i` is character
//! `width - 1 - i` of the string and any ancilla bits come first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One 0/1 decision per item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Selection {
    bits: Vec<bool>,
}

impl Selection {
    /// Selection from explicit decisions in item order.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Selection whose item `i` is bit `i` of `index`.
    ///
    /// Items beyond bit 63 are never selected.
    pub fn from_index(index: u64, item_count: usize) -> Self {
        let bits = (0..item_count)
            .map(|i| i < 64 && (index >> i) & 1 == 1)
            .collect();
        Self { bits }
    }

    /// Decode the choice register of a device bitstring.
    ///
    /// The string is reversed and its first `item_count` characters are the
    /// decisions; the remaining characters belong to ancilla registers.
    pub fn from_bitstring(bitstring: &str, item_count: usize) -> CoreResult<Self> {
        if !bitstring.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(CoreError::InvalidBitstring(bitstring.to_string()));
        }
        if bitstring.len() < item_count {
            return Err(CoreError::BitstringTooShort {
                width: bitstring.len(),
                item_count,
            });
        }
        let bits = bitstring
            .bytes()
            .rev()
            .take(item_count)
            .map(|b| b == b'1')
            .collect();
        Ok(Self { bits })
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the selection covers no items at all.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether item `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Number of selected items.
    pub fn selected_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Decisions in item order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Integer encoding with item `i` as bit `i`.
    pub fn index(&self) -> u64 {
        self.bits
            .iter()
            .take(64)
            .enumerate()
            .filter(|(_, b)| **b)
            .fold(0u64, |acc, (i, _)| acc | (1 << i))
    }

    /// Device-order bitstring of the choice register alone.
    pub fn to_bitstring(&self) -> String {
        self.bits
            .iter()
            .rev()
            .map(|&b| if b { '1' } else { '0' })
            .collect()
    }

    /// Dot product of the decisions with per-item values.
    pub fn dot(&self, values: &[f64]) -> f64 {
        self.bits
            .iter()
            .zip(values)
            .filter(|(b, _)| **b)
            .map(|(_, v)| v)
            .sum()
    }
}

impl TryFrom<Vec<u8>> for Selection {
    type Error = CoreError;

    fn try_from(raw: Vec<u8>) -> CoreResult<Self> {
        raw.iter()
            .map(|&b| match b {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(CoreError::InvalidBitstring(format!("{raw:?}"))),
            })
            .collect::<CoreResult<Vec<_>>>()
            .map(Self::new)
    }
}

impl From<Selection> for Vec<u8> {
    fn from(selection: Selection) -> Self {
        selection.bits.into_iter().map(u8::from).collect()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, &b) in self.bits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", u8::from(b))?;
        }
        write!(f, ")")
    }
}
