// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Friends: ±n through the next register, using the complement 10-n.

use super::{validate_composite, RuleStrategy};
use crate::config::RuleFamily;
use crate::memo::RuleMemo;
use crate::sequence::Step;
use crate::validation::ValidationFailure;

#[derive(Debug, Clone)]
pub struct FriendsRule {
    memo: RuleMemo,
}

impl FriendsRule {
    pub fn new() -> Self {
        Self {
            memo: RuleMemo::new(RuleFamily::Friends),
        }
    }
}

impl Default for FriendsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStrategy for FriendsRule {
    fn family(&self) -> RuleFamily {
        RuleFamily::Friends
    }

    fn memo(&self) -> &RuleMemo {
        &self.memo
    }

    fn validate(&self, index: usize, step: &Step) -> Result<(), ValidationFailure> {
        validate_composite(&self.memo, index, step)?;
        match step.action.composite_part() {
            Some(composite) if composite.formula.carry() != Some(composite.sign.factor() as i8) => {
                Err(ValidationFailure::FormulaMismatch { step: index })
            }
            _ => Ok(()),
        }
    }

    /// One in five steps, at least one.
    fn default_quota(&self, length: usize) -> usize {
        (length / 5).max(1)
    }

    fn special_rate(&self, _trained_digits: usize) -> f64 {
        0.5
    }
}
