// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Direct moves only: no composite steps.

use super::{CompositeMove, RuleStrategy};
use crate::beads::{DigitSet, Sign};
use crate::config::RuleFamily;
use crate::memo::RuleMemo;
use crate::sequence::Step;
use crate::validation::ValidationFailure;

#[derive(Debug, Clone)]
pub struct SimpleRule {
    memo: RuleMemo,
}

impl SimpleRule {
    pub fn new() -> Self {
        Self {
            memo: RuleMemo::new(RuleFamily::Simple),
        }
    }
}

impl Default for SimpleRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStrategy for SimpleRule {
    fn family(&self) -> RuleFamily {
        RuleFamily::Simple
    }

    fn memo(&self) -> &RuleMemo {
        &self.memo
    }

    fn available_actions(
        &self,
        _register: u8,
        _digits: DigitSet,
        _signs: &[Sign],
    ) -> Vec<CompositeMove> {
        Vec::new()
    }

    fn validate(&self, index: usize, step: &Step) -> Result<(), ValidationFailure> {
        match step.action.composite_part() {
            None => Ok(()),
            Some(composite) => Err(ValidationFailure::WrongFamily {
                step: index,
                tag: composite.tag,
            }),
        }
    }

    fn default_quota(&self, _length: usize) -> usize {
        0
    }

    fn special_rate(&self, _trained_digits: usize) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_composites() {
        let rule = SimpleRule::new();
        assert!(rule
            .available_actions(4, DigitSet::range(1, 9), &Sign::BOTH)
            .is_empty());
        assert_eq!(rule.default_quota(20), 0);
        assert_eq!(rule.special_rate(9), 0.0);
    }
}
