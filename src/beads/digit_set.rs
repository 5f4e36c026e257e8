// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! DigitSet type for representing sets of register values as bitsets.
//!
//! Bit i is set if digit i is in the set. Requirement tables, trained digits
//! and plain digits all use this representation.
//!
//! # Examples
//!
//! ```
//! use soroban_gen::beads::DigitSet;
//!
//! let mut set = DigitSet::empty();
//! set.insert(1);
//! set.insert(4);
//! set.insert(2);
//!
//! assert_eq!(set.len(), 3);
//! assert_eq!(format!("{}", set), "{1,2,4}");
//! assert!(set.union(DigitSet::from_digits(&[9])).contains(9));
//! ```

use super::MAX_DIGIT;
use std::fmt;

/// A set of digits 0..=9 represented as a bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet(u16);

impl DigitSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// All digits in `lo..=hi`, clipped to 0..=9.
    pub fn range(lo: u8, hi: u8) -> Self {
        (lo..=hi.min(MAX_DIGIT)).collect()
    }

    pub fn from_digits(digits: &[u8]) -> Self {
        digits.iter().copied().collect()
    }

    pub fn contains(self, digit: u8) -> bool {
        digit <= MAX_DIGIT && (self.0 >> digit) & 1 != 0
    }

    /// Insert a digit. Values above 9 are ignored.
    pub fn insert(&mut self, digit: u8) {
        if digit <= MAX_DIGIT {
            self.0 |= 1 << digit;
        }
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn intersection(self, other: DigitSet) -> DigitSet {
        DigitSet(self.0 & other.0)
    }

    pub fn union(self, other: DigitSet) -> DigitSet {
        DigitSet(self.0 | other.0)
    }

    /// Iterate in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=MAX_DIGIT).filter(move |&d| self.contains(d))
    }

    pub fn to_vec(self) -> Vec<u8> {
        self.iter().collect()
    }
}

impl FromIterator<u8> for DigitSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = DigitSet::empty();
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl fmt::Display for DigitSet {
    /// Format as "{1,2,3}".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, digit) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", digit)?;
        }
        write!(f, "}}")
    }
}
