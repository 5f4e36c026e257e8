// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Requirement tables: where a composite step is mandatory.
//!
//! For a family, trained digit d and sign, the table holds every register
//! value v such that
//!
//! 1. the direct move of d from v is illegal, and
//! 2. every target-register op of the formula is a legal direct move when
//!    replayed from v.
//!
//! The tables are derived from bead physics at start-up rather than written
//! out by hand. The carry op on the next register is checked separately,
//! because it depends on a different register.

use crate::beads::{can_move, DigitSet, Sign, MAX_DIGIT};
use crate::config::RuleFamily;
use crate::memo::formulas;

/// Pre-states per trained digit and sign for one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementTable {
    family: RuleFamily,
    addition: [DigitSet; 10],
    subtraction: [DigitSet; 10],
}

impl RequirementTable {
    pub fn derive(family: RuleFamily) -> Self {
        let mut addition = [DigitSet::empty(); 10];
        let mut subtraction = [DigitSet::empty(); 10];
        for digit in family.valid_digits().iter() {
            addition[digit as usize] = qualifying_states(family, digit, Sign::Plus);
            subtraction[digit as usize] = qualifying_states(family, digit, Sign::Minus);
        }
        Self {
            family,
            addition,
            subtraction,
        }
    }

    pub fn family(&self) -> RuleFamily {
        self.family
    }

    /// Register values from which `sign · digit` needs the family's formula.
    pub fn pre_states(&self, digit: u8, sign: Sign) -> DigitSet {
        if digit > MAX_DIGIT {
            return DigitSet::empty();
        }
        match sign {
            Sign::Plus => self.addition[digit as usize],
            Sign::Minus => self.subtraction[digit as usize],
        }
    }

    pub fn requires(&self, digit: u8, sign: Sign, register: u8) -> bool {
        self.pre_states(digit, sign).contains(register)
    }
}

fn qualifying_states(family: RuleFamily, digit: u8, sign: Sign) -> DigitSet {
    let Some(formula) = formulas::build(family, digit, sign) else {
        return DigitSet::empty();
    };
    (0..=MAX_DIGIT)
        .filter(|&v| !can_move(v, digit, sign) && formula.apply_local(v).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brothers_four() {
        let table = RequirementTable::derive(RuleFamily::Brothers);
        assert_eq!(table.pre_states(4, Sign::Plus).to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(table.pre_states(4, Sign::Minus).to_vec(), vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_brothers_one() {
        let table = RequirementTable::derive(RuleFamily::Brothers);
        assert_eq!(table.pre_states(1, Sign::Plus).to_vec(), vec![4]);
        assert_eq!(table.pre_states(1, Sign::Minus).to_vec(), vec![5]);
    }

    #[test]
    fn test_simple_has_no_requirements() {
        let table = RequirementTable::derive(RuleFamily::Simple);
        for digit in 1..=9 {
            assert!(table.pre_states(digit, Sign::Plus).is_empty());
            assert!(table.pre_states(digit, Sign::Minus).is_empty());
        }
    }

    #[test]
    fn test_digits_outside_family_are_empty() {
        let table = RequirementTable::derive(RuleFamily::Mix);
        assert!(table.pre_states(3, Sign::Plus).is_empty());
        assert!(table.pre_states(12, Sign::Plus).is_empty());
        assert!(table.requires(6, Sign::Plus, 8));
    }
}
