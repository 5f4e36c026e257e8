// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! One randomized attempt at an exercise.

use crate::context::AttemptState;
use crate::orchestrator::MultiDigitOrchestrator;
use crate::sequence::Action;
use crate::state::DigitState;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// Past this many plain steps in a row a composite step is always tried.
pub const PLAIN_STREAK_LIMIT: usize = 3;

/// Builds a single candidate sequence step by step.
///
/// A composite step is forced once the remaining steps only just cover the
/// composite steps still owed, and otherwise tried with probability `rate`
/// (or always after a streak longer than [`PLAIN_STREAK_LIMIT`]). An attempt that
/// cannot make progress is abandoned rather than repaired.
#[derive(Debug, Clone, Copy)]
pub struct AttemptBuilder<'a> {
    orchestrator: MultiDigitOrchestrator<'a>,
    length: usize,
    quota: usize,
    rate: f64,
}

impl<'a> AttemptBuilder<'a> {
    pub fn new(
        orchestrator: MultiDigitOrchestrator<'a>,
        length: usize,
        quota: usize,
        rate: f64,
    ) -> Self {
        Self {
            orchestrator,
            length,
            quota,
            rate: rate.clamp(0.0, 1.0),
        }
    }

    /// Returns `None` on a dead end: no legal step, or too few steps left
    /// for the quota.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<AttemptState> {
        let config = self.orchestrator.config();
        let mut attempt = AttemptState::new(config.register_count());
        if self.length == 0 {
            return Some(attempt);
        }

        let first = self.orchestrator.first_action(rng);
        let after = self.orchestrator.apply_action(&attempt.state, &first)?;
        attempt.push(first, after);

        while attempt.len() < self.length {
            let remaining = self.length - attempt.len();
            let shortfall = self.quota.saturating_sub(attempt.special_count);
            if shortfall > remaining {
                return None;
            }

            let forced = shortfall > 0 && shortfall == remaining;
            let wanted = forced
                || (self.rate > 0.0
                    && (attempt.consecutive_plain > PLAIN_STREAK_LIMIT
                        || rng.gen_bool(self.rate)));

            if wanted {
                if let Some((action, after)) = self.special_step(&attempt, rng) {
                    attempt.push(action, after);
                    continue;
                }
                if forced {
                    trace!(step = attempt.len(), state = %attempt.state, "forced composite unavailable");
                    return None;
                }
            }

            let (action, after) = self.plain_step(&attempt, rng)?;
            attempt.push(action, after);
        }
        Some(attempt)
    }

    /// A composite step, least-used trained digits first. A round magnitude
    /// is taken only when the attempt's ration admits it.
    fn special_step<R: Rng + ?Sized>(
        &self,
        attempt: &AttemptState,
        rng: &mut R,
    ) -> Option<(Action, DigitState)> {
        let config = self.orchestrator.config();
        let exclude = attempt.recent_magnitudes(config.anti_repeat_window());
        let mut moves = self.orchestrator.composite_moves(
            &attempt.state,
            config.trained_digits(),
            config.direction().allowed_signs(),
        );
        if moves.is_empty() {
            return None;
        }

        moves.shuffle(rng);
        let priority = attempt.usage.priority(config.trained_digits().iter(), rng);
        moves.sort_by_key(|mv| priority.iter().position(|&digit| digit == mv.digit));
        let allow_round = self.orchestrator.admit_round(attempt, rng);
        moves
            .iter()
            .find_map(|mv| self.orchestrator.lift(&attempt.state, mv, &exclude, allow_round, rng))
    }

    fn plain_step<R: Rng + ?Sized>(
        &self,
        attempt: &AttemptState,
        rng: &mut R,
    ) -> Option<(Action, DigitState)> {
        let config = self.orchestrator.config();
        let exclude = attempt.recent_magnitudes(config.anti_repeat_window());
        let candidates = self.orchestrator.plain_actions(
            &attempt.state,
            config.plain_signs(),
            &exclude,
            rng,
        );
        let value = self.orchestrator.pick_plain(&candidates, attempt, rng)?;
        let action = Action::plain(value);
        let after = self.orchestrator.apply_action(&attempt.state, &action)?;
        Some((action, after))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuleConfig, RuleFamily, StepCount};
    use crate::orchestrator::MAX_ROUND_NUMBERS;
    use crate::sequence::Quality;
    use crate::validation::SequenceValidator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(family: RuleFamily, digits: &[u8], steps: usize) -> RuleConfig {
        RuleConfig::builder(family)
            .trained_digits(digits.iter().copied())
            .steps(StepCount::Exact(steps))
            .build()
            .unwrap()
    }

    #[test]
    fn test_successful_attempts_validate() {
        let config = config(RuleFamily::Brothers, &[4], 7);
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(&config, strategy.as_ref());
        let builder = AttemptBuilder::new(orchestrator, 7, 2, 0.75);
        let validator = SequenceValidator::new(orchestrator);

        let mut built = 0;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let Some(attempt) = builder.build(&mut rng) {
                built += 1;
                let example = attempt.into_example(Quality::Validated);
                assert_eq!(validator.validate(&example, 7, 2), Ok(()), "seed {seed}: {example}");
            }
        }
        assert!(built > 0);
    }

    #[test]
    fn test_wide_attempts_ration_round_numbers() {
        let config = RuleConfig::builder(RuleFamily::Brothers)
            .trained_digits([4])
            .action_width(2)
            .steps(StepCount::Exact(10))
            .build()
            .unwrap();
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(&config, strategy.as_ref());
        let builder = AttemptBuilder::new(orchestrator, 10, 3, 0.75);

        let mut built = 0;
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let Some(attempt) = builder.build(&mut rng) else {
                continue;
            };
            built += 1;
            let round = attempt.steps.iter().filter(|step| step.action.is_round()).count();
            assert_eq!(round, attempt.round_numbers);
            assert!(round <= MAX_ROUND_NUMBERS, "seed {seed}: {round} round numbers");
        }
        assert!(built > 0);
    }

    #[test]
    fn test_simple_attempt_is_all_plain() {
        let config = config(RuleFamily::Simple, &[1, 2, 3, 4], 6);
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(&config, strategy.as_ref());
        let builder = AttemptBuilder::new(orchestrator, 6, 0, 0.0);

        let mut rng = StdRng::seed_from_u64(3);
        let attempt = builder.build(&mut rng).unwrap();
        assert_eq!(attempt.len(), 6);
        assert_eq!(attempt.special_count, 0);
        assert!(attempt.steps.iter().all(|step| step.action.is_plain()));
    }

    #[test]
    fn test_unreachable_quota_is_a_dead_end() {
        let config = config(RuleFamily::Brothers, &[4], 3);
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(&config, strategy.as_ref());
        // Three composite steps cannot fit after the plain first step.
        let builder = AttemptBuilder::new(orchestrator, 3, 3, 0.5);

        let mut rng = StdRng::seed_from_u64(0);
        assert!(builder.build(&mut rng).is_none());
    }
}
