// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fluent construction of a [`RuleConfig`].
//!
//! Conflicting or out-of-range settings fail fast with a [`ConfigError`].
//! An empty trained-digit set is not an error: it is replaced by the family
//! default and a warning is logged.

use super::{
    default_max_attempts, ConfigError, DirectionRestriction, RuleConfig, RuleFamily, StepCount,
    MAX_ACTION_WIDTH,
};
use crate::beads::DigitSet;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RuleConfigBuilder {
    family: RuleFamily,
    trained_digits: Option<DigitSet>,
    plain_digits: Option<DigitSet>,
    action_width: usize,
    steps: StepCount,
    only_addition: bool,
    only_subtraction: bool,
    min_special: Option<usize>,
    anti_repeat_window: Option<usize>,
    special_rate: Option<f64>,
    max_attempts: Option<usize>,
    seed: Option<u64>,
}

impl RuleConfigBuilder {
    pub fn new(family: RuleFamily) -> Self {
        Self {
            family,
            trained_digits: None,
            plain_digits: None,
            action_width: 1,
            steps: StepCount::Exact(family.minimum_length().max(5)),
            only_addition: false,
            only_subtraction: false,
            min_special: None,
            anti_repeat_window: None,
            special_rate: None,
            max_attempts: None,
            seed: None,
        }
    }

    pub fn trained_digits(mut self, digits: impl IntoIterator<Item = u8>) -> Self {
        self.trained_digits = Some(digits.into_iter().collect());
        self
    }

    /// Digits allowed in each register of a plain step. Ignored by
    /// [`RuleFamily::Simple`], whose trained digits are its plain digits.
    pub fn plain_digits(mut self, digits: impl IntoIterator<Item = u8>) -> Self {
        self.plain_digits = Some(digits.into_iter().collect());
        self
    }

    pub fn action_width(mut self, width: usize) -> Self {
        self.action_width = width;
        self
    }

    pub fn steps(mut self, steps: StepCount) -> Self {
        self.steps = steps;
        self
    }

    pub fn only_addition(mut self, on: bool) -> Self {
        self.only_addition = on;
        self
    }

    pub fn only_subtraction(mut self, on: bool) -> Self {
        self.only_subtraction = on;
        self
    }

    /// Shorthand for setting both direction flags.
    pub fn direction(self, direction: DirectionRestriction) -> Self {
        self.only_addition(direction == DirectionRestriction::AdditionOnly)
            .only_subtraction(direction == DirectionRestriction::SubtractionOnly)
    }

    pub fn min_special(mut self, quota: usize) -> Self {
        self.min_special = Some(quota);
        self
    }

    pub fn anti_repeat_window(mut self, window: usize) -> Self {
        self.anti_repeat_window = Some(window);
        self
    }

    pub fn special_rate(mut self, rate: f64) -> Self {
        self.special_rate = Some(rate);
        self
    }

    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<RuleConfig, ConfigError> {
        let direction = match (self.only_addition, self.only_subtraction) {
            (true, true) => return Err(ConfigError::ConflictingDirections),
            (true, false) => DirectionRestriction::AdditionOnly,
            (false, true) => DirectionRestriction::SubtractionOnly,
            (false, false) => DirectionRestriction::Mixed,
        };

        if self.action_width == 0 || self.action_width > MAX_ACTION_WIDTH {
            return Err(ConfigError::InvalidWidth(self.action_width));
        }

        if self.steps.min() == 0 || self.steps.min() > self.steps.max() {
            return Err(ConfigError::InvalidStepCount(self.steps.to_string()));
        }

        if let Some(rate) = self.special_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidRate(rate));
            }
        }

        if self.anti_repeat_window == Some(0) {
            return Err(ConfigError::InvalidWindow);
        }

        let family = self.family;
        let valid = family.valid_digits();
        let requested = self.trained_digits.unwrap_or_else(|| family.default_digits());
        let mut trained_digits = requested.intersection(valid);
        if trained_digits.is_empty() {
            warn!(
                %family,
                requested = %requested,
                default = %family.default_digits(),
                "no valid trained digits, using family default"
            );
            trained_digits = family.default_digits();
        }

        let plain_digits = match family {
            RuleFamily::Simple => trained_digits,
            _ => self
                .plain_digits
                .unwrap_or_else(|| DigitSet::range(1, 9))
                .intersection(DigitSet::range(1, 9)),
        };
        if plain_digits.is_empty() {
            return Err(ConfigError::EmptyPlainDigits);
        }

        let minimum = family.minimum_length();
        let steps = self.steps.at_least(minimum);
        if steps != self.steps {
            warn!(%family, requested = %self.steps, minimum, "exercise too short, raising length");
        }

        Ok(RuleConfig {
            family,
            trained_digits,
            plain_digits,
            action_width: self.action_width,
            steps,
            direction,
            min_special: self.min_special,
            anti_repeat_window: self
                .anti_repeat_window
                .unwrap_or_else(|| family.default_anti_repeat_window()),
            special_rate: self.special_rate,
            max_attempts: self
                .max_attempts
                .unwrap_or_else(|| default_max_attempts(self.action_width)),
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_directions_fail_fast() {
        let result = RuleConfig::builder(RuleFamily::Brothers)
            .only_addition(true)
            .only_subtraction(true)
            .build();
        assert_eq!(result, Err(ConfigError::ConflictingDirections));
    }

    #[test]
    fn test_invalid_digits_fall_back_to_family_default() {
        let config = RuleConfig::builder(RuleFamily::Mix)
            .trained_digits([1, 2])
            .build()
            .unwrap();
        assert_eq!(config.trained_digits().to_vec(), vec![6]);

        let config = RuleConfig::builder(RuleFamily::Brothers)
            .trained_digits([3, 7])
            .build()
            .unwrap();
        assert_eq!(config.trained_digits().to_vec(), vec![3]);
    }

    #[test]
    fn test_width_bounds() {
        for width in [0, 10] {
            let result = RuleConfig::builder(RuleFamily::Simple)
                .action_width(width)
                .build();
            assert_eq!(result, Err(ConfigError::InvalidWidth(width)));
        }
    }

    #[test]
    fn test_step_count_checks() {
        let result = RuleConfig::builder(RuleFamily::Simple)
            .steps(StepCount::Range { min: 6, max: 3 })
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidStepCount(_))));

        let result = RuleConfig::builder(RuleFamily::Simple)
            .steps(StepCount::Exact(0))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidStepCount(_))));
    }

    #[test]
    fn test_short_mix_exercise_is_lengthened() {
        let config = RuleConfig::builder(RuleFamily::Mix)
            .steps(StepCount::Exact(2))
            .build()
            .unwrap();
        assert_eq!(config.step_count(), StepCount::Exact(4));
    }

    #[test]
    fn test_rate_bounds() {
        let result = RuleConfig::builder(RuleFamily::Friends)
            .special_rate(1.5)
            .build();
        assert_eq!(result, Err(ConfigError::InvalidRate(1.5)));
    }

    #[test]
    fn test_zero_window_rejected() {
        let result = RuleConfig::builder(RuleFamily::Simple)
            .trained_digits([1, 2])
            .anti_repeat_window(0)
            .build();
        assert_eq!(result, Err(ConfigError::InvalidWindow));

        let config = RuleConfig::builder(RuleFamily::Simple)
            .anti_repeat_window(1)
            .build()
            .unwrap();
        assert_eq!(config.anti_repeat_window(), 1);
    }

    #[test]
    fn test_simple_plain_digits_follow_trained_digits() {
        let config = RuleConfig::builder(RuleFamily::Simple)
            .trained_digits([1, 2, 3])
            .plain_digits([7])
            .build()
            .unwrap();
        assert_eq!(config.plain_digits().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_plain_digits_rejected() {
        let result = RuleConfig::builder(RuleFamily::Friends)
            .plain_digits([0])
            .build();
        assert_eq!(result, Err(ConfigError::EmptyPlainDigits));
    }

    #[test]
    fn test_defaults() {
        let config = RuleConfig::builder(RuleFamily::Mix).build().unwrap();
        assert_eq!(config.anti_repeat_window(), 3);
        assert_eq!(config.max_attempts(), 100);
        assert_eq!(config.direction(), DirectionRestriction::Mixed);
        assert_eq!(config.target_register(), 0);
    }
}
