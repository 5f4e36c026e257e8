// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use super::{Action, ActionTag, ExampleOutput, StepOutput};
use crate::state::DigitState;
use crate::validation::ValidationFailure;
use std::fmt;

/// An action with the abacus state on either side of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub before: DigitState,
    pub after: DigitState,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)
    }
}

/// Whether an example met every constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Quality {
    #[default]
    Validated,
    /// Fallback output that still breaks the listed constraints.
    BestEffort(Vec<ValidationFailure>),
}

/// One complete exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub start: DigitState,
    pub steps: Vec<Step>,
    pub answer: DigitState,
    pub quality: Quality,
}

impl Example {
    /// Assemble an example; the answer is the state after the last step.
    pub fn new(start: DigitState, steps: Vec<Step>, quality: Quality) -> Self {
        let answer = steps
            .last()
            .map_or_else(|| start.clone(), |step| step.after.clone());
        Self {
            start,
            steps,
            answer,
            quality,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_best_effort(&self) -> bool {
        matches!(self.quality, Quality::BestEffort(_))
    }

    /// Number of non-plain steps.
    pub fn special_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.action.tag() != ActionTag::Plain)
            .count()
    }

    /// Signed values of the steps, in order.
    pub fn values(&self) -> Vec<i64> {
        self.steps.iter().map(|step| step.action.value()).collect()
    }

    pub fn to_output(&self) -> ExampleOutput {
        ExampleOutput {
            start: self.start.value(),
            steps: self.steps.iter().map(StepOutput::from).collect(),
            answer: self.answer.value(),
            best_effort: self.is_best_effort(),
        }
    }
}

impl fmt::Display for Example {
    /// Format as "+7 -2 +4 = 9".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{} ", step)?;
        }
        write!(f, "= {}", self.answer.value())
    }
}
