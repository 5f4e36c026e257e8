// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generation context combining immutable rule data and mutable search state.
//!
//! The GenerationContext holds:
//! - Tier 1 (MEMO): the immutable [`RuleConfig`] and the family's
//!   [`RuleStrategy`] with its precomputed tables
//! - Tier 2 (DYNAMIC): the private random source and statistics
//!
//! Per-attempt state ([`AttemptState`]) is created fresh for every attempt
//! and dropped when the attempt fails. Independent contexts share nothing,
//! so a batch can run one per thread.

pub mod dynamic;

pub use dynamic::{AttemptState, DigitUsage};

use crate::config::RuleConfig;
use crate::rules::RuleStrategy;
use crate::state::Statistics;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Everything one generator needs.
#[derive(Debug)]
pub struct GenerationContext {
    pub config: RuleConfig,
    pub strategy: Box<dyn RuleStrategy>,
    pub rng: StdRng,
    pub statistics: Statistics,
}

impl GenerationContext {
    /// Seeded from the config, or from entropy if it has no seed.
    pub fn new(config: RuleConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: RuleConfig, rng: StdRng) -> Self {
        let strategy = config.family().strategy();
        Self {
            config,
            strategy,
            rng,
            statistics: Statistics::new(),
        }
    }

    /// Composite steps required in an exercise of `length` steps.
    ///
    /// The first step is always plain, so at most `length - 1`.
    pub fn quota(&self, length: usize) -> usize {
        self.config
            .min_special_override()
            .unwrap_or_else(|| self.strategy.default_quota(length))
            .min(length.saturating_sub(1))
    }

    /// Chance of trying a composite step on an unforced step.
    pub fn special_rate(&self) -> f64 {
        self.config.special_rate_override().unwrap_or_else(|| {
            self.strategy
                .special_rate(self.config.trained_digits().len())
        })
    }
}
