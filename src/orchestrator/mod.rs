// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Lifting single-register rules to the whole abacus.
//!
//! # Architecture
//!
//! A state with action width `w` has `w + 1` registers:
//!
//! ```text
//!   index:   w          w-1        ...   0
//!           [carry]    [target]   [lower ...]
//! ```
//!
//! - The **target** register (`w - 1`) is the only one where composite
//!   formulas apply.
//! - **Lower** registers change only by plain direct moves in the same
//!   direction as the action. A step never needs a composite move on them.
//! - The **carry** register absorbs the ±1 of a Friends or Mix formula. It
//!   must admit that carry as a direct move. Otherwise only the first step
//!   of a subtraction-only exercise touches it.
//!
//! Round numbers (40, 300) are rationed: at most [`MAX_ROUND_NUMBERS`] per
//! exercise, each admitted with probability [`ROUND_NUMBER_PROBABILITY`].
//! Lower registers of a composite step prefer non-zero digits.
//!
//! Every action is replayed atomic op by atomic op in
//! [`apply_action`](MultiDigitOrchestrator::apply_action), which is also the
//! fold used by validation.

use crate::beads::{can_apply, can_move, can_move_down, can_move_up, DigitSet, Sign};
use crate::config::{DirectionRestriction, RuleConfig, RuleFamily};
use crate::context::AttemptState;
use crate::rules::{CompositeMove, RuleStrategy};
use crate::sequence::{is_round_number, Action, ActionTag, Composite};
use crate::state::DigitState;
use rand::seq::SliceRandom;
use rand::Rng;

/// Above this many digit combinations, plain candidates are sampled.
pub const PLAIN_ENUMERATION_LIMIT: usize = 4096;

/// Random plain candidates drawn per sign when sampling.
const PLAIN_SAMPLES: usize = 64;

/// Attempts at lower-register digits that avoid a repeated magnitude.
const LIFT_REROLLS: usize = 8;

/// Chance of picking a full-width plain step when one is available.
const FULL_WIDTH_PREFERENCE: f64 = 0.75;

/// Chance that a round number is admitted when one is on offer.
pub const ROUND_NUMBER_PROBABILITY: f64 = 0.15;

pub const MAX_ROUND_NUMBERS: usize = 1;

/// Digits an opening is drawn from when biased toward one end of the board.
const OPENING_BIAS_DIGITS: usize = 2;

/// Applies a [`RuleStrategy`] at the target register of a [`DigitState`].
#[derive(Debug, Clone, Copy)]
pub struct MultiDigitOrchestrator<'a> {
    config: &'a RuleConfig,
    strategy: &'a dyn RuleStrategy,
}

impl<'a> MultiDigitOrchestrator<'a> {
    pub fn new(config: &'a RuleConfig, strategy: &'a dyn RuleStrategy) -> Self {
        Self { config, strategy }
    }

    pub fn config(&self) -> &'a RuleConfig {
        self.config
    }

    pub fn strategy(&self) -> &'a dyn RuleStrategy {
        self.strategy
    }

    pub fn target_register(&self) -> usize {
        self.config.target_register()
    }

    fn carry_register(&self) -> usize {
        self.target_register() + 1
    }

    fn place(index: usize) -> u64 {
        10u64.pow(index as u32)
    }

    /// Can the carry register take a +1 (or -1) as a direct move?
    pub fn carry_admits(&self, state: &DigitState, sign: Sign) -> bool {
        let next = state.get(self.carry_register());
        match sign {
            Sign::Plus => next <= 8 && can_move_up(next, 1),
            Sign::Minus => next >= 1 && can_move_down(next, 1),
        }
    }

    /// May `attempt` take another round number? Draws from `rng` only while
    /// the ration lasts.
    pub fn admit_round<R: Rng + ?Sized>(&self, attempt: &AttemptState, rng: &mut R) -> bool {
        attempt.round_numbers < MAX_ROUND_NUMBERS && rng.gen_bool(ROUND_NUMBER_PROBABILITY)
    }

    /// Digits register `index` may move by in direction `sign`; 0 means untouched.
    fn register_options(&self, state: &DigitState, index: usize, sign: Sign) -> Vec<u8> {
        let value = state.get(index);
        std::iter::once(0)
            .chain(
                self.config
                    .plain_digits()
                    .iter()
                    .filter(|&digit| can_move(value, digit, sign)),
            )
            .collect()
    }

    /// The opening step: plain and positive.
    ///
    /// Under [`DirectionRestriction::SubtractionOnly`] it also loads the carry
    /// register, so there is something to subtract from. For carrying
    /// families that digit is one a borrow can be taken from directly.
    ///
    /// The units digit is never 0, so the opening is not a round number.
    /// Simple exercises under a direction restriction open near the end of
    /// the board they move away from: low digits when only adding, high
    /// display digits when only subtracting.
    pub fn first_action<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        let plain = self.config.plain_digits().to_vec();
        let with_zero: Vec<u8> = std::iter::once(0).chain(plain.iter().copied()).collect();
        let bias: Option<&[u8]> = match (self.config.family(), self.config.direction()) {
            (RuleFamily::Simple, DirectionRestriction::AdditionOnly) => {
                Some(&plain[..plain.len().min(OPENING_BIAS_DIGITS)])
            }
            (RuleFamily::Simple, DirectionRestriction::SubtractionOnly) => {
                Some(&plain[plain.len().saturating_sub(OPENING_BIAS_DIGITS)..])
            }
            _ => None,
        };

        let top = if self.config.direction() == DirectionRestriction::SubtractionOnly {
            self.carry_register()
        } else {
            self.target_register()
        };
        let mut top_choices = match bias {
            Some(digits) if top == self.target_register() => digits.to_vec(),
            _ => plain.clone(),
        };
        if top == self.carry_register() && self.config.family().carries() {
            top_choices.retain(|&digit| can_move_down(digit, 1));
            if top_choices.is_empty() {
                top_choices = plain.clone();
            }
        }

        let top_digit = top_choices.choose(rng).copied().unwrap_or(1);
        let mut magnitude = top_digit as u64 * Self::place(top);
        for index in 0..top {
            let choices = match bias {
                Some(digits) => digits,
                None if index == 0 => &plain[..],
                None => &with_zero[..],
            };
            let digit = choices.choose(rng).copied().unwrap_or(1);
            magnitude += digit as u64 * Self::place(index);
        }
        Action::plain(magnitude as i64)
    }

    /// Plain values legal from `state` in any of `signs`, excluding the
    /// magnitudes in `exclude`. Only display registers are touched.
    pub fn plain_actions<R: Rng + ?Sized>(
        &self,
        state: &DigitState,
        signs: &[Sign],
        exclude: &[u64],
        rng: &mut R,
    ) -> Vec<i64> {
        let width = self.config.action_width();
        let mut values = Vec::new();
        for &sign in signs {
            let options: Vec<Vec<u8>> = (0..width)
                .map(|index| self.register_options(state, index, sign))
                .collect();
            let combinations = options
                .iter()
                .try_fold(1usize, |acc, digits| acc.checked_mul(digits.len()));

            let magnitudes: Vec<u64> = match combinations {
                Some(n) if n <= PLAIN_ENUMERATION_LIMIT => options
                    .iter()
                    .enumerate()
                    .fold(vec![0u64], |partial, (index, digits)| {
                        partial
                            .iter()
                            .flat_map(|&m| {
                                digits.iter().map(move |&d| m + d as u64 * Self::place(index))
                            })
                            .collect()
                    }),
                _ => (0..PLAIN_SAMPLES)
                    .map(|_| {
                        options
                            .iter()
                            .enumerate()
                            .map(|(index, digits)| {
                                digits.choose(rng).copied().unwrap_or(0) as u64 * Self::place(index)
                            })
                            .sum::<u64>()
                    })
                    .collect(),
            };

            values.extend(
                magnitudes
                    .into_iter()
                    .filter(|&m| m != 0 && !exclude.contains(&m))
                    .map(|m| sign.signed(m)),
            );
        }
        values.sort_unstable();
        values.dedup();
        values
    }

    /// Choose among plain candidates, preferring magnitudes not yet used in
    /// this exercise and, for wide actions, full-width magnitudes.
    ///
    /// Round candidates count only if [`admit_round`](Self::admit_round)
    /// lets them in, so this is `None` when nothing else is on offer.
    pub fn pick_plain<R: Rng + ?Sized>(
        &self,
        candidates: &[i64],
        attempt: &AttemptState,
        rng: &mut R,
    ) -> Option<i64> {
        let round = candidates
            .iter()
            .any(|value| is_round_number(value.unsigned_abs()));
        let admit = round && self.admit_round(attempt, rng);
        let allowed: Vec<i64> = candidates
            .iter()
            .copied()
            .filter(|value| admit || !is_round_number(value.unsigned_abs()))
            .collect();
        let unused: Vec<i64> = allowed
            .iter()
            .copied()
            .filter(|value| !attempt.has_used(value.unsigned_abs()))
            .collect();
        let pool = if unused.is_empty() { allowed } else { unused };

        let width = self.config.action_width();
        if width > 1 {
            let full_width = Self::place(width - 1);
            let full: Vec<i64> = pool
                .iter()
                .copied()
                .filter(|value| value.unsigned_abs() >= full_width)
                .collect();
            if !full.is_empty() && rng.gen_bool(FULL_WIDTH_PREFERENCE) {
                return full.choose(rng).copied();
            }
        }
        pool.choose(rng).copied()
    }

    /// Composite moves available at the target register whose carry, if
    /// any, the carry register admits.
    pub fn composite_moves(
        &self,
        state: &DigitState,
        digits: DigitSet,
        signs: &[Sign],
    ) -> Vec<CompositeMove> {
        let register = state.get(self.target_register());
        self.strategy
            .available_actions(register, digits, signs)
            .into_iter()
            .filter(|mv| mv.formula.carry().is_none() || self.carry_admits(state, mv.sign))
            .collect()
    }

    /// Turn a composite move into a full action, filling the lower registers
    /// with random plain digits in the same direction, non-zero where the
    /// beads allow.
    ///
    /// Returns the action with its resulting state, or `None` if every
    /// candidate magnitude is in `exclude`, or is round while `allow_round`
    /// is false.
    pub fn lift<R: Rng + ?Sized>(
        &self,
        state: &DigitState,
        mv: &CompositeMove,
        exclude: &[u64],
        allow_round: bool,
        rng: &mut R,
    ) -> Option<(Action, DigitState)> {
        let target = self.target_register();
        let rerolls = if target == 0 { 1 } else { LIFT_REROLLS };
        for _ in 0..rerolls {
            let lower: u64 = (0..target)
                .map(|index| {
                    let moving: Vec<u8> = self
                        .register_options(state, index, mv.sign)
                        .into_iter()
                        .filter(|&digit| digit != 0)
                        .collect();
                    moving.choose(rng).copied().unwrap_or(0) as u64 * Self::place(index)
                })
                .sum();
            let magnitude = mv.digit as u64 * Self::place(target) + lower;
            if exclude.contains(&magnitude) {
                continue;
            }
            if !allow_round && is_round_number(magnitude) {
                return None;
            }
            if let Some(lifted) = self.build_composite(state, mv, lower) {
                return Some(lifted);
            }
        }
        None
    }

    /// Like [`lift`](Self::lift), leaving the lower registers untouched.
    pub fn lift_bare(&self, state: &DigitState, mv: &CompositeMove) -> Option<(Action, DigitState)> {
        self.build_composite(state, mv, 0)
    }

    fn build_composite(
        &self,
        state: &DigitState,
        mv: &CompositeMove,
        lower: u64,
    ) -> Option<(Action, DigitState)> {
        let target = self.target_register();
        let magnitude = mv.digit as u64 * Self::place(target) + lower;
        let composite = Composite {
            tag: ActionTag::for_family(self.strategy.family()),
            trained_digit: mv.digit,
            sign: mv.sign,
            target,
            formula: mv.formula.clone(),
        };
        let action = Action::composite(mv.sign.signed(magnitude), composite);
        let after = self.apply_action(state, &action)?;
        Some((action, after))
    }

    /// Replay `action` on `state`, checking every atomic move against bead
    /// physics. Returns `None` if any move is illegal.
    pub fn apply_action(&self, state: &DigitState, action: &Action) -> Option<DigitState> {
        let sign = action.sign()?;
        match action.composite_part() {
            None => apply_plain_digits(state.clone(), action.magnitude(), sign),
            Some(composite) => {
                if composite.sign != sign {
                    return None;
                }
                let plain = action.plain_part();
                if plain != 0 && Sign::of(plain) != Some(sign) {
                    return None;
                }
                if plain.unsigned_abs() >= composite.place_value() as u64 {
                    return None;
                }
                let mut next = state.clone();
                for op in composite.formula.ops() {
                    let register = composite.target + op.offset;
                    if register >= next.len() || !can_apply(next.get(register), op.delta as i32) {
                        return None;
                    }
                    next = next.apply_register_delta(register, op.delta as i32).ok()?;
                }
                apply_plain_digits(next, plain.unsigned_abs(), sign)
            }
        }
    }
}

/// Move each register by the matching digit of `magnitude`, without carries.
fn apply_plain_digits(mut state: DigitState, magnitude: u64, sign: Sign) -> Option<DigitState> {
    let mut rest = magnitude;
    let mut register = 0;
    while rest > 0 {
        if register >= state.len() {
            return None;
        }
        let digit = (rest % 10) as u8;
        if digit > 0 {
            if !can_move(state.get(register), digit, sign) {
                return None;
            }
            state = state
                .apply_register_delta(register, sign.signed(digit as u64) as i32)
                .ok()?;
        }
        rest /= 10;
        register += 1;
    }
    Some(state)
}
