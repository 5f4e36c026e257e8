// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Whole-sequence checks on a candidate exercise.
//!
//! The generator runs every completed attempt through
//! [`SequenceValidator::validate`], and stamps fallback output with
//! [`SequenceValidator::violations`]. The checks are:
//!
//! - exact length and minimum composite quota
//! - the states chain from an all-zero start to the answer
//! - every step replays legally, atom by atom, and adds up numerically
//! - no state leaves the configured range
//! - the first step is positive; under subtraction-only it loads the
//!   carry register
//! - no magnitude repeats within the anti-repeat window
//! - composite steps respect the direction restriction and the family's
//!   requirement tables

pub mod errors;

pub use errors::{ValidationFailure, ValidationFailureKind};

use crate::config::DirectionRestriction;
use crate::orchestrator::MultiDigitOrchestrator;
use crate::sequence::Example;

#[derive(Debug, Clone, Copy)]
pub struct SequenceValidator<'a> {
    orchestrator: MultiDigitOrchestrator<'a>,
}

impl<'a> SequenceValidator<'a> {
    pub fn new(orchestrator: MultiDigitOrchestrator<'a>) -> Self {
        Self { orchestrator }
    }

    /// The first violation found, if any.
    pub fn validate(
        &self,
        example: &Example,
        length: usize,
        quota: usize,
    ) -> Result<(), ValidationFailure> {
        match self.violations(example, length, quota).into_iter().next() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Every violation, in step order; length and quota problems bracket the list.
    pub fn violations(&self, example: &Example, length: usize, quota: usize) -> Vec<ValidationFailure> {
        let config = self.orchestrator.config();
        let strategy = self.orchestrator.strategy();
        let width = config.action_width() as u32;
        let max = config.max_value();
        let window = config.anti_repeat_window();
        let mut failures = Vec::new();

        if example.steps.len() != length {
            failures.push(ValidationFailure::WrongLength {
                expected: length,
                actual: example.steps.len(),
            });
        }
        if !example.start.is_zero() {
            failures.push(ValidationFailure::NonZeroStart {
                value: example.start.value(),
            });
        }

        let mut previous = &example.start;
        for (index, step) in example.steps.iter().enumerate() {
            let action = &step.action;

            if step.after.len() != config.register_count()
                || !step.after.is_well_formed()
                || step.after.value() > max
            {
                failures.push(ValidationFailure::OutOfRange {
                    step: index,
                    value: step.after.value(),
                    max,
                });
            }

            let replayed = self.orchestrator.apply_action(&step.before, action);
            let summed = step.before.apply_signed(action.value());
            match replayed {
                None => failures.push(ValidationFailure::IllegalMove { step: index }),
                Some(after) => {
                    if step.before != *previous || after != step.after || summed.as_ref() != Some(&after) {
                        failures.push(ValidationFailure::StateMismatch { step: index });
                    }
                }
            }

            if index == 0 {
                let magnitude = action.magnitude();
                let in_range = match config.direction() {
                    DirectionRestriction::SubtractionOnly => {
                        (10u64.pow(width)..10u64.pow(width + 1)).contains(&magnitude)
                    }
                    _ => magnitude < 10u64.pow(width),
                };
                if action.value() <= 0 || !action.is_plain() || !in_range {
                    failures.push(ValidationFailure::FirstStep {
                        value: action.value(),
                    });
                }
            } else {
                match action.composite_part() {
                    None => {
                        if action.magnitude() >= 10u64.pow(width) {
                            failures.push(ValidationFailure::IllegalMove { step: index });
                        }
                        let allowed = action
                            .sign()
                            .is_some_and(|sign| config.plain_signs().contains(&sign));
                        if !allowed {
                            failures.push(ValidationFailure::DirectionViolated {
                                step: index,
                                value: action.value(),
                            });
                        }
                    }
                    Some(composite) => {
                        if !config.direction().allows(composite.sign) {
                            failures.push(ValidationFailure::DirectionViolated {
                                step: index,
                                value: action.value(),
                            });
                        }
                    }
                }

                let recent = &example.steps[index.saturating_sub(window)..index];
                if recent
                    .iter()
                    .any(|earlier| earlier.action.magnitude() == action.magnitude())
                {
                    failures.push(ValidationFailure::RepeatedMagnitude {
                        step: index,
                        magnitude: action.magnitude(),
                    });
                }
            }

            if let Err(failure) = strategy.validate(index, step) {
                failures.push(failure);
            }
            previous = &step.after;
        }

        if example.answer != *previous {
            failures.push(ValidationFailure::AnswerMismatch {
                expected: previous.value(),
                actual: example.answer.value(),
            });
        }

        let placed = example.special_count();
        if placed < quota {
            failures.push(ValidationFailure::QuotaNotMet {
                required: quota,
                placed,
            });
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beads::{DigitSet, Sign};
    use crate::config::{RuleConfig, RuleFamily, StepCount};
    use crate::context::AttemptState;
    use crate::sequence::{Action, Quality};

    fn brothers_config() -> RuleConfig {
        RuleConfig::builder(RuleFamily::Brothers)
            .trained_digits([4])
            .steps(StepCount::Exact(3))
            .build()
            .unwrap()
    }

    /// +3, +4 (brother), -2.
    fn brothers_example(orchestrator: MultiDigitOrchestrator<'_>) -> Example {
        let mut attempt = AttemptState::new(2);
        let after = orchestrator.apply_action(&attempt.state, &Action::plain(3)).unwrap();
        attempt.push(Action::plain(3), after);
        let mv = orchestrator
            .composite_moves(&attempt.state, DigitSet::from_digits(&[4]), &[Sign::Plus])
            .remove(0);
        let (action, after) = orchestrator.lift_bare(&attempt.state, &mv).unwrap();
        attempt.push(action, after);
        let after = orchestrator.apply_action(&attempt.state, &Action::plain(-2)).unwrap();
        attempt.push(Action::plain(-2), after);
        attempt.into_example(Quality::Validated)
    }

    #[test]
    fn test_valid_example_passes() {
        let config = brothers_config();
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(&config, strategy.as_ref());
        let validator = SequenceValidator::new(orchestrator);
        let example = brothers_example(orchestrator);
        assert_eq!(example.answer.value(), 5);
        assert_eq!(validator.validate(&example, 3, 1), Ok(()));
    }

    #[test]
    fn test_length_and_quota() {
        let config = brothers_config();
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(&config, strategy.as_ref());
        let validator = SequenceValidator::new(orchestrator);
        let example = brothers_example(orchestrator);
        let failures = validator.violations(&example, 4, 2);
        assert_eq!(
            failures,
            vec![
                ValidationFailure::WrongLength {
                    expected: 4,
                    actual: 3
                },
                ValidationFailure::QuotaNotMet {
                    required: 2,
                    placed: 1
                },
            ]
        );
    }

    #[test]
    fn test_tampered_answer() {
        let config = brothers_config();
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(&config, strategy.as_ref());
        let validator = SequenceValidator::new(orchestrator);
        let mut example = brothers_example(orchestrator);
        example.answer = crate::state::DigitState::from_value(2, 6).unwrap();
        assert_eq!(
            validator.validate(&example, 3, 1),
            Err(ValidationFailure::AnswerMismatch {
                expected: 5,
                actual: 6
            })
        );
    }

    #[test]
    fn test_repeated_and_illegal_steps() {
        let config = brothers_config();
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(&config, strategy.as_ref());
        let validator = SequenceValidator::new(orchestrator);
        let mut example = brothers_example(orchestrator);
        // Replace the brother step with a plain +4 from 3, which needs the upper bead.
        example.steps[1].action = Action::plain(4);
        let failures = validator.violations(&example, 3, 0);
        assert!(failures.contains(&ValidationFailure::IllegalMove { step: 1 }));

        let mut example = brothers_example(orchestrator);
        example.steps[2].action = Action::plain(-4);
        let failures = validator.violations(&example, 3, 1);
        assert!(failures.contains(&ValidationFailure::RepeatedMagnitude {
            step: 2,
            magnitude: 4
        }));
    }

    #[test]
    fn test_first_step_must_be_positive() {
        let config = RuleConfig::builder(RuleFamily::Simple)
            .steps(StepCount::Exact(2))
            .build()
            .unwrap();
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(&config, strategy.as_ref());
        let validator = SequenceValidator::new(orchestrator);

        let mut attempt = AttemptState::new(2);
        let after = orchestrator.apply_action(&attempt.state, &Action::plain(12)).unwrap();
        attempt.push(Action::plain(12), after);
        let after = orchestrator.apply_action(&attempt.state, &Action::plain(-1)).unwrap();
        attempt.push(Action::plain(-1), after);
        let example = attempt.into_example(Quality::Validated);
        assert_eq!(
            validator.validate(&example, 2, 0),
            Err(ValidationFailure::FirstStep { value: 12 })
        );
    }
}
