// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable state of one generation attempt (Tier 2: DYNAMIC).

use crate::sequence::{Action, Example, Quality, Step};
use crate::state::DigitState;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// How often, and how recently, each trained digit was used.
#[derive(Debug, Clone, Default)]
pub struct DigitUsage {
    counts: [usize; 10],
    last_used: [Option<usize>; 10],
}

impl DigitUsage {
    pub fn record(&mut self, digit: u8, step: usize) {
        if let Some(count) = self.counts.get_mut(digit as usize) {
            *count += 1;
            self.last_used[digit as usize] = Some(step);
        }
    }

    pub fn count(&self, digit: u8) -> usize {
        self.counts.get(digit as usize).copied().unwrap_or(0)
    }

    /// `digits` ordered least-used first, then least recently used; ties shuffled.
    pub fn priority<R: Rng + ?Sized>(&self, digits: impl IntoIterator<Item = u8>, rng: &mut R) -> Vec<u8> {
        let mut ordered: Vec<u8> = digits.into_iter().filter(|&d| d <= 9).collect();
        ordered.shuffle(rng);
        // Stable sort keeps the shuffled order among equals.
        ordered.sort_by_key(|&d| (self.counts[d as usize], self.last_used[d as usize]));
        ordered
    }
}

/// An exercise under construction.
#[derive(Debug, Clone)]
pub struct AttemptState {
    pub start: DigitState,
    pub state: DigitState,
    pub steps: Vec<Step>,
    pub usage: DigitUsage,
    pub special_count: usize,
    /// Plain steps since the last composite step.
    pub consecutive_plain: usize,
    pub round_numbers: usize,
    used_magnitudes: HashSet<u64>,
}

impl AttemptState {
    pub fn new(register_count: usize) -> Self {
        let start = DigitState::zero(register_count);
        Self {
            state: start.clone(),
            start,
            steps: Vec::new(),
            usage: DigitUsage::default(),
            special_count: 0,
            consecutive_plain: 0,
            round_numbers: 0,
            used_magnitudes: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Record an action whose resulting state has already been checked.
    pub fn push(&mut self, action: Action, after: DigitState) {
        debug_assert!(after.is_well_formed());
        let index = self.steps.len();
        match action.composite_part() {
            Some(composite) => {
                self.usage.record(composite.trained_digit, index);
                self.special_count += 1;
                self.consecutive_plain = 0;
            }
            None => self.consecutive_plain += 1,
        }
        if action.is_round() {
            self.round_numbers += 1;
        }
        self.used_magnitudes.insert(action.magnitude());
        let before = std::mem::replace(&mut self.state, after.clone());
        self.steps.push(Step {
            action,
            before,
            after,
        });
    }

    /// Magnitudes of the last `window` steps, most recent last.
    pub fn recent_magnitudes(&self, window: usize) -> Vec<u64> {
        let skip = self.steps.len().saturating_sub(window);
        self.steps[skip..]
            .iter()
            .map(|step| step.action.magnitude())
            .collect()
    }

    pub fn has_used(&self, magnitude: u64) -> bool {
        self.used_magnitudes.contains(&magnitude)
    }

    pub fn into_example(self, quality: Quality) -> Example {
        Example::new(self.start, self.steps, quality)
    }
}
