// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are owned by the generation context and incremented as
//! attempts run. Each validation failure kind also has its own counter.

use crate::validation::{ValidationFailure, ValidationFailureKind};
use std::fmt;
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Randomized attempts started.
    Attempts,
    /// Attempts abandoned because no legal step was found.
    DeadEnds,
    /// Examples that passed validation.
    Accepted,
    /// Times the attempt budget ran out.
    Fallbacks,
    /// Fallback examples that still failed validation.
    BestEffort,
    SpecialSteps,
    PlainSteps,
}

const COUNT: usize = Counters::COUNT + ValidationFailureKind::COUNT;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.add(counter, 1);
    }

    pub fn add(&mut self, counter: Counters, n: u64) {
        self.stats[counter as usize] += n;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Count a rejected attempt under its failure kind.
    pub fn record_failure(&mut self, failure: &ValidationFailure) {
        let kind = ValidationFailureKind::from(failure);
        self.stats[Counters::COUNT + kind as usize] += 1;
    }

    pub fn failures(&self, kind: ValidationFailureKind) -> u64 {
        self.stats[Counters::COUNT + kind as usize]
    }

    /// Add another set of statistics into this one.
    pub fn merge(&mut self, other: &Statistics) {
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats.iter()) {
            *mine += theirs;
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempts={} dead_ends={} accepted={} fallbacks={} best_effort={}",
            self.get(Counters::Attempts),
            self.get(Counters::DeadEnds),
            self.get(Counters::Accepted),
            self.get(Counters::Fallbacks),
            self.get(Counters::BestEffort),
        )
    }
}
