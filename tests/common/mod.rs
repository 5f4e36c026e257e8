// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use soroban_gen::beads::{can_move, Sign};
use soroban_gen::config::{DirectionRestriction, RuleConfig, RuleFamily, StepCount};
use soroban_gen::memo::RuleMemo;
use soroban_gen::sequence::{ActionTag, Example, Step};

/// A seeded config with an exact length.
pub fn config(family: RuleFamily, digits: &[u8], steps: usize, seed: u64) -> RuleConfig {
    RuleConfig::builder(family)
        .trained_digits(digits.iter().copied())
        .steps(StepCount::Exact(steps))
        .seed(seed)
        .build()
        .unwrap_or_else(|e| panic!("config failed: {e}"))
}

/// Check everything an example must satisfy, best-effort or not.
///
/// Works register by register from the bead rules and memo tables, without
/// going through `SequenceValidator`.
pub fn assert_invariants(example: &Example, config: &RuleConfig) {
    let memo = RuleMemo::new(config.family());
    let width = config.action_width() as u32;
    let max = config.max_value();

    assert!(example.start.is_zero(), "non-zero start in {example}");
    let mut value = 0i64;
    for (index, step) in example.steps.iter().enumerate() {
        assert_eq!(step.before.value() as i64, value, "step {index} of {example}");
        value += step.action.value();
        assert!(value >= 0, "negative total at step {index} of {example}");
        assert_eq!(step.after.value() as i64, value, "step {index} of {example}");
        assert!(step.after.value() <= max, "step {index} of {example}");
        assert!(step.after.registers().iter().all(|&r| r <= 9));

        if index == 0 {
            assert!(step.action.is_plain(), "composite first step in {example}");
            assert!(step.action.value() > 0, "non-positive first step in {example}");
            if config.direction() == DirectionRestriction::SubtractionOnly {
                let magnitude = step.action.magnitude();
                assert!(magnitude >= 10u64.pow(width), "{example}");
                assert!(magnitude < 10u64.pow(width + 1), "{example}");
            }
        }

        match step.action.composite_part() {
            None => assert_plain_step(index, step, example),
            Some(composite) => {
                assert_eq!(composite.tag, ActionTag::for_family(config.family()));
                assert!(config.trained_digits().contains(composite.trained_digit));
                assert!(config.direction().allows(composite.sign), "step {index} of {example}");
                let register = step.before.get(composite.target);
                assert!(
                    memo.pre_states(composite.trained_digit, composite.sign).contains(register),
                    "step {index} of {example}: {register} is not a pre-state"
                );
                assert_eq!(
                    composite.formula.net(),
                    composite.sign.signed(composite.trained_digit as u64),
                    "step {index} of {example}"
                );
                if config.family() == RuleFamily::Mix {
                    assert_eq!(composite.formula.len(), 3);
                }
            }
        }
    }
    assert_eq!(example.answer.value() as i64, value, "answer of {example}");

    let window = config.anti_repeat_window();
    for (index, step) in example.steps.iter().enumerate() {
        let from = index.saturating_sub(window);
        for earlier in &example.steps[from..index] {
            assert_ne!(
                earlier.action.magnitude(),
                step.action.magnitude(),
                "repeat at step {index} of {example}"
            );
        }
    }
}

/// Every register moves directly by its digit of the magnitude.
fn assert_plain_step(index: usize, step: &Step, example: &Example) {
    let sign = match step.action.sign() {
        Some(sign) => sign,
        None => panic!("zero step {index} in {example}"),
    };
    let mut magnitude = step.action.magnitude();
    for register in 0..step.before.len() {
        let digit = (magnitude % 10) as u8;
        magnitude /= 10;
        let before = step.before.get(register);
        let after = step.after.get(register);
        if digit == 0 {
            assert_eq!(before, after, "step {index} of {example}");
            continue;
        }
        assert!(
            can_move(before, digit, sign),
            "step {index} of {example}: {sign}{digit} on {before} is not a direct move"
        );
        let expected = match sign {
            Sign::Plus => before + digit,
            Sign::Minus => before - digit,
        };
        assert_eq!(after, expected, "step {index} of {example}");
    }
    assert_eq!(magnitude, 0, "step {index} of {example} overflows the board");
}

/// Count of composite steps with the given tag.
pub fn count_tagged(example: &Example, tag: ActionTag) -> usize {
    example
        .steps
        .iter()
        .filter(|step| step.action.tag() == tag)
        .count()
}
