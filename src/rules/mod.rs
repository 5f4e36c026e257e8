// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rule strategies: what composite moves a family offers on one register.
//!
//! Each family implements [`RuleStrategy`] over a single register value.
//! Lifting a move to the whole abacus (lower registers, carry register) is
//! the job of the [`MultiDigitOrchestrator`](crate::orchestrator::MultiDigitOrchestrator).
//!
//! Strategies are selected by variant with [`RuleFamily::strategy`].
//!
//! # Example
//!
//! ```
//! use soroban_gen::beads::{DigitSet, Sign};
//! use soroban_gen::config::RuleFamily;
//!
//! let strategy = RuleFamily::Brothers.strategy();
//! let moves = strategy.available_actions(3, DigitSet::from_digits(&[4]), &Sign::BOTH);
//! assert_eq!(moves.len(), 1);
//! assert_eq!(strategy.apply(3, &moves[0]), Some(7));
//! ```

pub mod brothers;
pub mod friends;
pub mod mix;
pub mod simple;

pub use brothers::BrothersRule;
pub use friends::FriendsRule;
pub use mix::MixRule;
pub use simple::SimpleRule;

use crate::beads::{DigitSet, Sign};
use crate::config::RuleFamily;
use crate::memo::{Formula, RuleMemo};
use crate::sequence::{ActionTag, Step};
use crate::validation::ValidationFailure;
use std::fmt;

/// A composite move on a single register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeMove {
    pub digit: u8,
    pub sign: Sign,
    pub formula: Formula,
}

impl CompositeMove {
    /// Signed value in units of the target register.
    pub fn value(&self) -> i64 {
        self.sign.signed(self.digit as u64)
    }
}

/// The per-family rules of composite steps.
pub trait RuleStrategy: fmt::Debug + Send + Sync {
    fn family(&self) -> RuleFamily;

    /// Precomputed tables for this family.
    fn memo(&self) -> &RuleMemo;

    /// Composite moves whose formula is mandatory at `register`, for the
    /// given trained digits and signs.
    fn available_actions(
        &self,
        register: u8,
        digits: DigitSet,
        signs: &[Sign],
    ) -> Vec<CompositeMove> {
        let memo = self.memo();
        let mut moves = Vec::new();
        for digit in digits.iter() {
            for &sign in signs {
                if !memo.pre_states(digit, sign).contains(register) {
                    continue;
                }
                if let Some(formula) = memo.formula(digit, sign) {
                    moves.push(CompositeMove {
                        digit,
                        sign,
                        formula: formula.clone(),
                    });
                }
            }
        }
        moves
    }

    /// The target register after the move's local ops, or `None` if the move
    /// is not available at `register`.
    fn apply(&self, register: u8, mv: &CompositeMove) -> Option<u8> {
        if !self.memo().pre_states(mv.digit, mv.sign).contains(register) {
            return None;
        }
        mv.formula.apply_local(register)
    }

    /// Check one step of an exercise against this family's rules.
    fn validate(&self, index: usize, step: &Step) -> Result<(), ValidationFailure> {
        validate_composite(self.memo(), index, step)
    }

    /// Minimum number of composite steps in an exercise of `length` steps.
    fn default_quota(&self, length: usize) -> usize;

    /// Probability of trying a composite step, given how many digits are trained.
    fn special_rate(&self, trained_digits: usize) -> f64;
}

impl RuleFamily {
    /// The strategy implementing this family.
    pub fn strategy(self) -> Box<dyn RuleStrategy> {
        match self {
            RuleFamily::Simple => Box::new(SimpleRule::new()),
            RuleFamily::Brothers => Box::new(BrothersRule::new()),
            RuleFamily::Friends => Box::new(FriendsRule::new()),
            RuleFamily::Mix => Box::new(MixRule::new()),
        }
    }
}

/// Shared check for composite steps: right family, mandatory pre-state,
/// canonical formula, and a value the formula plus lower digits add up to.
pub(crate) fn validate_composite(
    memo: &RuleMemo,
    index: usize,
    step: &Step,
) -> Result<(), ValidationFailure> {
    let Some(composite) = step.action.composite_part() else {
        return Ok(());
    };
    if composite.tag != ActionTag::for_family(memo.family()) {
        return Err(ValidationFailure::WrongFamily {
            step: index,
            tag: composite.tag,
        });
    }

    let register = step.before.get(composite.target);
    if !memo
        .pre_states(composite.trained_digit, composite.sign)
        .contains(register)
    {
        return Err(ValidationFailure::RequirementNotMet {
            step: index,
            digit: composite.trained_digit,
            register,
        });
    }

    let mismatch = ValidationFailure::FormulaMismatch { step: index };
    if memo.formula(composite.trained_digit, composite.sign) != Some(&composite.formula) {
        return Err(mismatch);
    }
    let expected = composite.sign.signed(composite.trained_digit as u64) * composite.place_value();
    if composite.formula_value() != expected {
        return Err(mismatch);
    }
    let plain = step.action.plain_part();
    let same_direction = plain == 0 || Sign::of(plain) == Some(composite.sign);
    if !same_direction || plain.unsigned_abs() >= composite.place_value() as u64 {
        return Err(mismatch);
    }
    Ok(())
}
