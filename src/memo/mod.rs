// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Memoized rule data (immutable, computed once per generator).
//!
//! Holds the requirement table and the formulas for one rule family, so that
//! the search never rebuilds them per step.

pub mod formulas;
pub mod requirements;

pub use formulas::{AtomicOp, Formula};
pub use requirements::RequirementTable;

use crate::beads::{DigitSet, Sign};
use crate::config::RuleFamily;
use tracing::debug;

/// Precomputed tables for one rule family.
#[derive(Debug, Clone)]
pub struct RuleMemo {
    table: RequirementTable,
    /// Indexed by `2 * digit + sign`, plus first.
    formulas: Vec<Option<Formula>>,
}

impl RuleMemo {
    pub fn new(family: RuleFamily) -> Self {
        let table = RequirementTable::derive(family);
        let formulas = (0..=9u8)
            .flat_map(|digit| Sign::BOTH.map(|sign| formulas::build(family, digit, sign)))
            .collect::<Vec<_>>();
        debug!(
            %family,
            formulas = formulas.iter().flatten().count(),
            "memoized requirement tables"
        );
        Self { table, formulas }
    }

    pub fn family(&self) -> RuleFamily {
        self.table.family()
    }

    pub fn table(&self) -> &RequirementTable {
        &self.table
    }

    pub fn pre_states(&self, digit: u8, sign: Sign) -> DigitSet {
        self.table.pre_states(digit, sign)
    }

    pub fn formula(&self, digit: u8, sign: Sign) -> Option<&Formula> {
        let index = 2 * digit as usize + usize::from(sign == Sign::Minus);
        self.formulas.get(index).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_formula_lookup() {
        let memo = RuleMemo::new(RuleFamily::Friends);
        let formula = memo.formula(9, Sign::Minus).unwrap();
        assert_eq!(formula.net(), -9);
        assert!(memo.formula(0, Sign::Plus).is_none());
        assert!(memo.formula(10, Sign::Plus).is_none());
    }
}
