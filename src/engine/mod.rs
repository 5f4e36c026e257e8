// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generation engine.
//!
//! This module drives the retry loop that turns a [`RuleConfig`] into an
//! [`Example`]. Each call to [`SequenceGenerator::generate`] resolves a
//! length and a composite quota, then moves through a small phase machine.
//!
//! # Architecture
//!
//! ```text
//! Building ──> Validating ──ok──> Accepted
//!    ^             │
//!    │           reject
//!    │             v
//!    └──────── RetryBuilding ──budget spent──> Fallback ──> Accepted
//! ```
//!
//! 1. `Building`/`RetryBuilding`: run one randomized [`AttemptBuilder`]
//!    attempt. A dead end counts against the budget and retries.
//! 2. `Validating`: check the finished attempt with [`SequenceValidator`].
//!    Rejections are counted per failure kind.
//! 3. `Fallback`: once `max_attempts` is spent, the
//!    [`FallbackSynthesizer`] steers toward pre-states directly. Its output
//!    is validated too, and marked best-effort if it still falls short.
//!
//! Every example returned has passed validation unless its
//! [`Quality`] says otherwise.
//!
//! # Example
//!
//! ```no_run
//! use soroban_gen::config::{RuleConfig, RuleFamily, StepCount};
//! use soroban_gen::engine::SequenceGenerator;
//!
//! let config = RuleConfig::builder(RuleFamily::Friends)
//!     .trained_digits([9])
//!     .steps(StepCount::Exact(5))
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! let mut generator = SequenceGenerator::new(config);
//! let example = generator.generate();
//! println!("{example}");
//! ```

pub mod attempt;

pub use attempt::{AttemptBuilder, PLAIN_STREAK_LIMIT};

use crate::config::RuleConfig;
use crate::context::{AttemptState, GenerationContext};
use crate::fallback::FallbackSynthesizer;
use crate::orchestrator::MultiDigitOrchestrator;
use crate::sequence::{Example, Quality};
use crate::state::{Counters, Statistics};
use crate::validation::SequenceValidator;
use rand::rngs::StdRng;
use tracing::{debug, trace, warn};

/// Where the retry loop currently is.
enum Phase {
    Building,
    Validating(AttemptState),
    RetryBuilding,
    Fallback,
    Accepted(Example),
}

/// Generates exercises for one configuration.
///
/// Owns its own [`GenerationContext`]: repeated calls share the random
/// stream and accumulate statistics.
#[derive(Debug)]
pub struct SequenceGenerator {
    ctx: GenerationContext,
}

impl SequenceGenerator {
    pub fn new(config: RuleConfig) -> Self {
        Self {
            ctx: GenerationContext::new(config),
        }
    }

    /// Use a caller-supplied random source instead of the config's seed.
    pub fn with_rng(config: RuleConfig, rng: StdRng) -> Self {
        Self {
            ctx: GenerationContext::with_rng(config, rng),
        }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.ctx.config
    }

    pub fn statistics(&self) -> &Statistics {
        &self.ctx.statistics
    }

    pub fn into_statistics(self) -> Statistics {
        self.ctx.statistics
    }

    /// Generate one exercise. Never fails: when the attempt budget runs out
    /// the fallback result is returned, flagged best-effort if needed.
    pub fn generate(&mut self) -> Example {
        let length = self.ctx.config.step_count().resolve(&mut self.ctx.rng);
        let quota = self.ctx.quota(length);
        let rate = self.ctx.special_rate();
        let max_attempts = self.ctx.config.max_attempts();

        let orchestrator = MultiDigitOrchestrator::new(&self.ctx.config, self.ctx.strategy.as_ref());
        let validator = SequenceValidator::new(orchestrator);
        let builder = AttemptBuilder::new(orchestrator, length, quota, rate);
        let rng = &mut self.ctx.rng;
        let statistics = &mut self.ctx.statistics;

        debug!(length, quota, rate, "generating");
        let mut attempts = 0;
        let mut phase = Phase::Building;
        loop {
            phase = match phase {
                Phase::Building | Phase::RetryBuilding => {
                    if attempts >= max_attempts {
                        Phase::Fallback
                    } else {
                        attempts += 1;
                        statistics.increment(Counters::Attempts);
                        match builder.build(rng) {
                            Some(attempt) => Phase::Validating(attempt),
                            None => {
                                statistics.increment(Counters::DeadEnds);
                                Phase::RetryBuilding
                            }
                        }
                    }
                }
                Phase::Validating(attempt) => {
                    let example = attempt.into_example(Quality::Validated);
                    match validator.validate(&example, length, quota) {
                        Ok(()) => Phase::Accepted(example),
                        Err(failure) => {
                            trace!(attempt = attempts, %failure, "attempt rejected");
                            statistics.record_failure(&failure);
                            Phase::RetryBuilding
                        }
                    }
                }
                Phase::Fallback => {
                    statistics.increment(Counters::Fallbacks);
                    debug!(attempts, length, quota, "attempt budget spent, synthesizing");
                    let attempt = FallbackSynthesizer::new(orchestrator).synthesize(length, quota, rng);
                    let mut example = attempt.into_example(Quality::Validated);
                    let violations = validator.violations(&example, length, quota);
                    if !violations.is_empty() {
                        statistics.increment(Counters::BestEffort);
                        warn!(
                            family = %orchestrator.config().family(),
                            violations = violations.len(),
                            first = %violations[0],
                            "returning best-effort example"
                        );
                        example.quality = Quality::BestEffort(violations);
                    }
                    Phase::Accepted(example)
                }
                Phase::Accepted(example) => {
                    if !example.is_best_effort() {
                        statistics.increment(Counters::Accepted);
                    }
                    let special = example.special_count() as u64;
                    statistics.add(Counters::SpecialSteps, special);
                    statistics.add(Counters::PlainSteps, example.len() as u64 - special);
                    return example;
                }
            };
        }
    }

    /// Generate `count` exercises from this generator's random stream.
    pub fn generate_many(&mut self, count: usize) -> Vec<Example> {
        (0..count).map(|_| self.generate()).collect()
    }
}
