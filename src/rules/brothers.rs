// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Brothers: ±n through the upper bead, using the complement 5-n.
//!
//! Adding 4 to 3 cannot be done directly (only one lower bead is free), so
//! the student engages the upper bead and releases one lower bead instead.

use super::{validate_composite, RuleStrategy};
use crate::config::RuleFamily;
use crate::memo::RuleMemo;
use crate::sequence::Step;
use crate::validation::ValidationFailure;

#[derive(Debug, Clone)]
pub struct BrothersRule {
    memo: RuleMemo,
}

impl BrothersRule {
    pub fn new() -> Self {
        Self {
            memo: RuleMemo::new(RuleFamily::Brothers),
        }
    }
}

impl Default for BrothersRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStrategy for BrothersRule {
    fn family(&self) -> RuleFamily {
        RuleFamily::Brothers
    }

    fn memo(&self) -> &RuleMemo {
        &self.memo
    }

    fn validate(&self, index: usize, step: &Step) -> Result<(), ValidationFailure> {
        validate_composite(&self.memo, index, step)?;
        match step.action.composite_part() {
            Some(composite) if composite.formula.carry().is_some() => {
                Err(ValidationFailure::FormulaMismatch { step: index })
            }
            _ => Ok(()),
        }
    }

    /// A quarter of short exercises, rising to about a third of long ones.
    fn default_quota(&self, length: usize) -> usize {
        if length <= 7 {
            percent_ceil(length, 25).max(1)
        } else if length <= 12 {
            percent_ceil(length, 30)
        } else {
            percent_ceil(length, 35)
        }
    }

    /// With more digits to cover, each one needs fewer slots.
    fn special_rate(&self, trained_digits: usize) -> f64 {
        match trained_digits {
            0 | 1 => 0.75,
            2 => 0.70,
            3 => 0.65,
            _ => 0.60,
        }
    }
}

fn percent_ceil(length: usize, percent: usize) -> usize {
    (length * percent).div_ceil(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beads::{DigitSet, Sign};

    #[test]
    fn test_quota() {
        let rule = BrothersRule::new();
        assert_eq!(rule.default_quota(2), 1);
        assert_eq!(rule.default_quota(7), 2);
        assert_eq!(rule.default_quota(10), 3);
        assert_eq!(rule.default_quota(12), 4);
        assert_eq!(rule.default_quota(20), 7);
    }

    #[test]
    fn test_rate_decreases_with_digits() {
        let rule = BrothersRule::new();
        assert!(rule.special_rate(1) > rule.special_rate(2));
        assert!(rule.special_rate(3) > rule.special_rate(4));
    }

    #[test]
    fn test_moves_at_three() {
        let rule = BrothersRule::new();
        let moves = rule.available_actions(3, DigitSet::range(1, 4), &Sign::BOTH);
        let digits: Vec<_> = moves.iter().map(|mv| mv.value()).collect();
        // 3+2, 3+3 and 3+4 all cross five; no subtraction needs the upper bead.
        assert_eq!(digits, vec![2, 3, 4]);
    }
}
