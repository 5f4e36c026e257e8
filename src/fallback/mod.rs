// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Last-resort construction once the attempt budget is spent.
//!
//! Rather than hoping a random walk lands on a requirement pre-state, the
//! synthesizer steers there:
//!
//! 1. place the usual plain first step
//! 2. for each composite step still owed: over every trained digit, allowed
//!    sign (whose carry the carry register admits) and pre-state, search a
//!    shortest plain path on the target register, apply the formula, and
//!    keep the candidate with the fewest steps including the way back into
//!    the requirement tables afterwards; least-used digits win ties
//! 3. pad the remaining length with plain steps, preferring unused magnitudes
//!
//! Every loop is bounded and nothing here fails: when a stage cannot
//! proceed, the sequence built so far is returned and the caller marks it
//! best-effort.

pub mod path;

pub use path::{distances_to, PathSearch, MAX_PATH_LEN, PATH_SEARCH_CAP};

use crate::beads::{DigitSet, Sign};
use crate::context::AttemptState;
use crate::orchestrator::MultiDigitOrchestrator;
use crate::sequence::Action;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy)]
pub struct FallbackSynthesizer<'a> {
    orchestrator: MultiDigitOrchestrator<'a>,
}

impl<'a> FallbackSynthesizer<'a> {
    pub fn new(orchestrator: MultiDigitOrchestrator<'a>) -> Self {
        Self { orchestrator }
    }

    /// Build a sequence of at most `length` steps aiming for `quota`
    /// composite steps. Always terminates.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        length: usize,
        quota: usize,
        rng: &mut R,
    ) -> AttemptState {
        let config = self.orchestrator.config();
        let mut attempt = AttemptState::new(config.register_count());
        if length == 0 {
            return attempt;
        }

        let first = self.orchestrator.first_action(rng);
        match self.orchestrator.apply_action(&attempt.state, &first) {
            Some(after) => attempt.push(first, after),
            None => return attempt,
        }

        let memo = self.orchestrator.strategy().memo();
        let signs = config.direction().allowed_signs();
        let tables = config
            .trained_digits()
            .iter()
            .flat_map(|digit| signs.iter().map(move |&sign| memo.pre_states(digit, sign)))
            .fold(DigitSet::empty(), DigitSet::union);
        let reentry = distances_to(tables, config.plain_digits(), config.plain_signs());

        while attempt.special_count < quota && attempt.len() < length {
            if !self.place_composite(&mut attempt, length, &reentry, rng) {
                debug!(
                    placed = attempt.special_count,
                    quota,
                    state = %attempt.state,
                    "no reachable pre-state"
                );
                break;
            }
        }

        self.pad(&mut attempt, length, rng);
        attempt
    }

    /// Steer the target register into a pre-state and apply one composite step.
    ///
    /// `reentry` gives, per register value, the plain steps back into any
    /// pre-state, so a composite that strands the register costs more.
    fn place_composite<R: Rng + ?Sized>(
        &self,
        attempt: &mut AttemptState,
        length: usize,
        reentry: &[Option<usize>; 10],
        rng: &mut R,
    ) -> bool {
        let config = self.orchestrator.config();
        let memo = self.orchestrator.strategy().memo();
        let target = self.orchestrator.target_register();
        let place = 10u64.pow(target as u32);
        let window = config.anti_repeat_window();
        let budget = length.saturating_sub(attempt.len() + 1);
        let search = PathSearch {
            digits: config.plain_digits(),
            signs: config.plain_signs(),
            place,
            window,
            max_len: budget.min(MAX_PATH_LEN),
        };
        let start = attempt.state.get(target);
        let recent = attempt.recent_magnitudes(window);

        let mut signs = config.direction().allowed_signs().to_vec();
        signs.shuffle(rng);
        let digits = attempt.usage.priority(config.trained_digits().iter(), rng);

        let mut best: Option<((usize, usize), AttemptState)> = None;
        for digit in digits {
            for &sign in &signs {
                let carries = config.family().carries();
                if carries && !self.orchestrator.carry_admits(&attempt.state, sign) {
                    continue;
                }
                let mut goals = memo.pre_states(digit, sign).to_vec();
                goals.shuffle(rng);
                for goal in goals {
                    let Some(path) = search.find(
                        start,
                        DigitSet::from_digits(&[goal]),
                        &recent,
                        digit as u64 * place,
                    ) else {
                        continue;
                    };
                    let Some(trial) = self.prepare(attempt, &path, digit, sign, rng) else {
                        continue;
                    };
                    let after = trial.state.get(target) as usize;
                    let back = reentry
                        .get(after)
                        .copied()
                        .flatten()
                        .unwrap_or(MAX_PATH_LEN + 1);
                    let cost = (path.len() + 1 + back, path.len());
                    if best.as_ref().map_or(true, |(lowest, _)| cost < *lowest) {
                        trace!(digit, %sign, path = ?path, ?cost, "composite candidate");
                        best = Some((cost, trial));
                    }
                }
            }
        }

        match best {
            Some((_, trial)) => {
                *attempt = trial;
                true
            }
            None => false,
        }
    }

    /// `attempt` extended by `path` and then the composite step, or `None`
    /// if either cannot be played.
    fn prepare<R: Rng + ?Sized>(
        &self,
        attempt: &AttemptState,
        path: &[i64],
        digit: u8,
        sign: Sign,
        rng: &mut R,
    ) -> Option<AttemptState> {
        let mut trial = attempt.clone();
        if !self.follow(&mut trial, path) {
            return None;
        }
        let moves = self.orchestrator.composite_moves(
            &trial.state,
            DigitSet::from_digits(&[digit]),
            &[sign],
        );
        let mv = moves.first()?;
        let exclude = trial.recent_magnitudes(self.orchestrator.config().anti_repeat_window());
        let allow_round = self.orchestrator.admit_round(&trial, rng);
        let (action, after) = self
            .orchestrator
            .lift(&trial.state, mv, &exclude, allow_round, rng)
            .or_else(|| self.orchestrator.lift_bare(&trial.state, mv))?;
        trial.push(action, after);
        Some(trial)
    }

    /// Apply a list of plain values; false if one of them is illegal.
    fn follow(&self, attempt: &mut AttemptState, path: &[i64]) -> bool {
        for &value in path {
            let action = Action::plain(value);
            match self.orchestrator.apply_action(&attempt.state, &action) {
                Some(after) => attempt.push(action, after),
                None => return false,
            }
        }
        true
    }

    fn pad<R: Rng + ?Sized>(&self, attempt: &mut AttemptState, length: usize, rng: &mut R) {
        let config = self.orchestrator.config();
        while attempt.len() < length {
            let exclude = attempt.recent_magnitudes(config.anti_repeat_window());
            let candidates =
                self.orchestrator
                    .plain_actions(&attempt.state, config.plain_signs(), &exclude, rng);
            let picked = self
                .orchestrator
                .pick_plain(&candidates, attempt, rng)
                .or_else(|| candidates.choose(rng).copied());
            let Some(value) = picked else {
                debug!(steps = attempt.len(), length, "no plain step to pad with");
                return;
            };
            let action = Action::plain(value);
            let Some(after) = self.orchestrator.apply_action(&attempt.state, &action) else {
                return;
            };
            attempt.push(action, after);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DirectionRestriction, RuleConfig, RuleFamily, StepCount};
    use crate::sequence::{ActionTag, Quality};
    use crate::validation::{SequenceValidator, ValidationFailure};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn synthesize(
        config: &RuleConfig,
        length: usize,
        quota: usize,
        seed: u64,
    ) -> (AttemptState, Vec<ValidationFailure>) {
        let strategy = config.family().strategy();
        let orchestrator = MultiDigitOrchestrator::new(config, strategy.as_ref());
        let mut rng = StdRng::seed_from_u64(seed);
        let attempt = FallbackSynthesizer::new(orchestrator).synthesize(length, quota, &mut rng);
        let example = attempt.clone().into_example(Quality::Validated);
        let violations = SequenceValidator::new(orchestrator).violations(&example, length, quota);
        (attempt, violations)
    }

    #[test]
    fn test_brothers_fallback_meets_quota() {
        let config = RuleConfig::builder(RuleFamily::Brothers)
            .trained_digits([4])
            .steps(StepCount::Exact(7))
            .build()
            .unwrap();
        for seed in 0..40 {
            let (attempt, violations) = synthesize(&config, 7, 2, seed);
            assert_eq!(violations, vec![], "seed {}", seed);
            assert!(attempt.special_count >= 2);
        }
    }

    #[test]
    fn test_friends_subtraction_fallback() {
        let config = RuleConfig::builder(RuleFamily::Friends)
            .trained_digits([9])
            .direction(DirectionRestriction::SubtractionOnly)
            .steps(StepCount::Exact(5))
            .build()
            .unwrap();
        for seed in 0..40 {
            let (attempt, violations) = synthesize(&config, 5, 1, seed);
            assert_eq!(violations, vec![], "seed {}", seed);
            let friend = attempt
                .steps
                .iter()
                .find(|step| step.action.tag() == ActionTag::Friend)
                .unwrap();
            assert_eq!(friend.action.value(), -9);
        }
    }

    #[test]
    fn test_mix_fallback_with_wide_window() {
        let config = RuleConfig::builder(RuleFamily::Mix)
            .trained_digits([6, 7, 8, 9])
            .steps(StepCount::Exact(6))
            .build()
            .unwrap();
        for seed in 0..40 {
            let (_, violations) = synthesize(&config, 6, 2, seed);
            assert_eq!(violations, vec![], "seed {}", seed);
        }
    }

    #[test]
    fn test_long_brothers_fallback_avoids_slow_cycles() {
        // Seven composite steps in twenty need better than three steps each.
        let cases = [
            (DirectionRestriction::AdditionOnly, vec![1, 2, 3, 4]),
            (DirectionRestriction::SubtractionOnly, vec![4]),
        ];
        for (direction, digits) in cases {
            let config = RuleConfig::builder(RuleFamily::Brothers)
                .trained_digits(digits)
                .direction(direction)
                .steps(StepCount::Exact(20))
                .build()
                .unwrap();
            for seed in 0..40 {
                let (attempt, violations) = synthesize(&config, 20, 7, seed);
                assert_eq!(violations, vec![], "{direction} seed {seed}");
                assert!(attempt.special_count >= 7);
            }
        }
    }

    #[test]
    fn test_impossible_quota_returns_partial() {
        // With only fives to move by, the register never reaches 3 or 4.
        let config = RuleConfig::builder(RuleFamily::Brothers)
            .trained_digits([2])
            .plain_digits([5])
            .direction(DirectionRestriction::AdditionOnly)
            .steps(StepCount::Exact(4))
            .build()
            .unwrap();
        let (attempt, violations) = synthesize(&config, 4, 1, 3);
        assert!(attempt.len() <= 4);
        assert!(!violations.is_empty());
    }
}
