// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generation configuration.
//!
//! A [`RuleConfig`] is built once per exercise request through
//! [`RuleConfigBuilder`] and is immutable afterwards. Family-level defaults
//! (valid digits, minimum length, anti-repeat window) live on [`RuleFamily`].
//!
//! # Example
//!
//! ```
//! use soroban_gen::config::{DirectionRestriction, RuleConfig, RuleFamily, StepCount};
//!
//! let config = RuleConfig::builder(RuleFamily::Friends)
//!     .trained_digits([9])
//!     .direction(DirectionRestriction::SubtractionOnly)
//!     .steps(StepCount::Exact(5))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.register_count(), 2);
//! assert_eq!(config.max_value(), 99);
//! ```

pub mod builder;
pub mod errors;

pub use builder::RuleConfigBuilder;
pub use errors::ConfigError;

use crate::beads::{DigitSet, Sign};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Widest supported action, in registers.
pub const MAX_ACTION_WIDTH: usize = 9;

/// Pedagogical rule family.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RuleFamily {
    /// Direct moves only.
    Simple,
    /// ±n through the upper bead, using the complement 5-n.
    Brothers,
    /// ±n through the next register, using the complement 10-n.
    Friends,
    /// Brothers nested inside a Friends carry (digits 6-9).
    Mix,
}

impl RuleFamily {
    /// Digits this family can be trained on.
    pub fn valid_digits(self) -> DigitSet {
        match self {
            RuleFamily::Simple | RuleFamily::Friends => DigitSet::range(1, 9),
            RuleFamily::Brothers => DigitSet::range(1, 4),
            RuleFamily::Mix => DigitSet::range(6, 9),
        }
    }

    /// Substituted when the requested trained digits are all invalid.
    pub fn default_digits(self) -> DigitSet {
        match self {
            RuleFamily::Simple => DigitSet::range(1, 9),
            RuleFamily::Brothers => DigitSet::from_digits(&[4]),
            RuleFamily::Friends => DigitSet::from_digits(&[1]),
            RuleFamily::Mix => DigitSet::from_digits(&[6]),
        }
    }

    /// Shortest exercise that leaves room for preparation and the composite step.
    pub fn minimum_length(self) -> usize {
        match self {
            RuleFamily::Simple | RuleFamily::Brothers => 2,
            RuleFamily::Friends => 3,
            RuleFamily::Mix => 4,
        }
    }

    pub fn default_anti_repeat_window(self) -> usize {
        match self {
            RuleFamily::Mix => 3,
            _ => 1,
        }
    }

    /// Does the composite formula touch the register above the target?
    pub fn carries(self) -> bool {
        matches!(self, RuleFamily::Friends | RuleFamily::Mix)
    }
}

/// Which signs composite steps (and, for [`RuleFamily::Simple`], all steps) may take.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum DirectionRestriction {
    #[strum(serialize = "addition")]
    AdditionOnly,
    #[strum(serialize = "subtraction")]
    SubtractionOnly,
    #[default]
    #[strum(serialize = "mixed")]
    Mixed,
}

impl DirectionRestriction {
    pub fn allowed_signs(self) -> &'static [Sign] {
        match self {
            DirectionRestriction::AdditionOnly => &[Sign::Plus],
            DirectionRestriction::SubtractionOnly => &[Sign::Minus],
            DirectionRestriction::Mixed => &Sign::BOTH,
        }
    }

    pub fn allows(self, sign: Sign) -> bool {
        self.allowed_signs().contains(&sign)
    }
}

/// Requested exercise length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepCount {
    Exact(usize),
    Range { min: usize, max: usize },
}

impl StepCount {
    pub fn min(self) -> usize {
        match self {
            StepCount::Exact(n) => n,
            StepCount::Range { min, .. } => min,
        }
    }

    pub fn max(self) -> usize {
        match self {
            StepCount::Exact(n) => n,
            StepCount::Range { max, .. } => max,
        }
    }

    /// Pick the length of one exercise.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> usize {
        match self {
            StepCount::Exact(n) => n,
            StepCount::Range { min, max } => rng.gen_range(min..=max),
        }
    }

    /// Raise both bounds to at least `floor`.
    fn at_least(self, floor: usize) -> StepCount {
        match self {
            StepCount::Exact(n) => StepCount::Exact(n.max(floor)),
            StepCount::Range { min, max } => StepCount::Range {
                min: min.max(floor),
                max: max.max(floor),
            },
        }
    }
}

impl fmt::Display for StepCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepCount::Exact(n) => write!(f, "{}", n),
            StepCount::Range { min, max } => write!(f, "{}..{}", min, max),
        }
    }
}

impl FromStr for StepCount {
    type Err = ConfigError;

    /// Parse "7" or "5..9".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidStepCount(s.to_string()))
        };
        match s.split_once("..") {
            Some((min, max)) => Ok(StepCount::Range {
                min: parse(min)?,
                max: parse(max)?,
            }),
            None => Ok(StepCount::Exact(parse(s)?)),
        }
    }
}

/// Immutable generation settings for one exercise request.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    family: RuleFamily,
    trained_digits: DigitSet,
    plain_digits: DigitSet,
    action_width: usize,
    steps: StepCount,
    direction: DirectionRestriction,
    min_special: Option<usize>,
    anti_repeat_window: usize,
    special_rate: Option<f64>,
    max_attempts: usize,
    seed: Option<u64>,
}

impl RuleConfig {
    pub fn builder(family: RuleFamily) -> RuleConfigBuilder {
        RuleConfigBuilder::new(family)
    }

    pub fn family(&self) -> RuleFamily {
        self.family
    }

    /// Digits the composite steps are trained on (never empty).
    pub fn trained_digits(&self) -> DigitSet {
        self.trained_digits
    }

    /// Digits allowed in each register of a plain step (never empty, never 0).
    pub fn plain_digits(&self) -> DigitSet {
        self.plain_digits
    }

    /// Registers touched by one action, excluding the carry register.
    pub fn action_width(&self) -> usize {
        self.action_width
    }

    /// Display registers plus the carry register.
    pub fn register_count(&self) -> usize {
        self.action_width + 1
    }

    /// The register where composite formulas apply.
    pub fn target_register(&self) -> usize {
        self.action_width - 1
    }

    /// Largest value the abacus state may hold.
    pub fn max_value(&self) -> u64 {
        10u64.pow(self.register_count() as u32) - 1
    }

    pub fn step_count(&self) -> StepCount {
        self.steps
    }

    pub fn direction(&self) -> DirectionRestriction {
        self.direction
    }

    /// Explicit minimum number of composite steps, if overridden.
    pub fn min_special_override(&self) -> Option<usize> {
        self.min_special
    }

    /// How many preceding steps a magnitude must differ from.
    pub fn anti_repeat_window(&self) -> usize {
        self.anti_repeat_window
    }

    pub fn special_rate_override(&self) -> Option<f64> {
        self.special_rate
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Signs a plain step after the first may take.
    pub fn plain_signs(&self) -> &'static [Sign] {
        match self.family {
            RuleFamily::Simple => self.direction.allowed_signs(),
            _ => &Sign::BOTH,
        }
    }
}

/// Attempt budget before falling back, scaled by action width.
pub fn default_max_attempts(action_width: usize) -> usize {
    match action_width {
        0 | 1 => 100,
        2 | 3 => 200,
        _ => 250,
    }
}
