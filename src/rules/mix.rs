// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mix: a Brothers move nested inside a Friends carry, for digits 6-9.
//!
//! Adding 6 to 8: release the upper bead (-5), engage one lower bead
//! (+1), carry one into the next register. Three ops, never four.

use super::{validate_composite, RuleStrategy};
use crate::config::RuleFamily;
use crate::memo::RuleMemo;
use crate::sequence::Step;
use crate::validation::ValidationFailure;

/// Number of atomic ops in every Mix formula.
pub const MIX_FORMULA_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct MixRule {
    memo: RuleMemo,
}

impl MixRule {
    pub fn new() -> Self {
        Self {
            memo: RuleMemo::new(RuleFamily::Mix),
        }
    }
}

impl Default for MixRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStrategy for MixRule {
    fn family(&self) -> RuleFamily {
        RuleFamily::Mix
    }

    fn memo(&self) -> &RuleMemo {
        &self.memo
    }

    fn validate(&self, index: usize, step: &Step) -> Result<(), ValidationFailure> {
        validate_composite(&self.memo, index, step)?;
        match step.action.composite_part() {
            Some(composite) if composite.formula.len() != MIX_FORMULA_LEN => {
                Err(ValidationFailure::FormulaMismatch { step: index })
            }
            _ => Ok(()),
        }
    }

    fn default_quota(&self, _length: usize) -> usize {
        1
    }

    fn special_rate(&self, _trained_digits: usize) -> f64 {
        0.4
    }
}
