// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reasons a candidate exercise is rejected.

use crate::sequence::ActionTag;
use std::fmt;
use strum_macros::EnumDiscriminants;

/// Constraint violations found by the sequence validator.
///
/// `step` fields are zero-based step indices.
#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(ValidationFailureKind))]
#[strum_discriminants(derive(Hash, strum_macros::EnumCount, strum_macros::EnumIter))]
pub enum ValidationFailure {
    /// The exercise does not have the requested number of steps.
    WrongLength { expected: usize, actual: usize },

    /// Too few composite steps were placed.
    QuotaNotMet { required: usize, placed: usize },

    /// Exercises always start from an empty abacus.
    NonZeroStart { value: u64 },

    /// A step's recorded states do not chain or do not add up.
    StateMismatch { step: usize },

    /// A step needs a gesture the beads cannot make.
    IllegalMove { step: usize },

    /// A state left the configured range.
    OutOfRange { step: usize, value: u64, max: u64 },

    /// The answer is not the state after the last step.
    AnswerMismatch { expected: u64, actual: u64 },

    /// A magnitude repeats within the anti-repeat window.
    RepeatedMagnitude { step: usize, magnitude: u64 },

    /// The first step is negative or outside its required range.
    FirstStep { value: i64 },

    /// A step's sign is excluded by the direction restriction.
    DirectionViolated { step: usize, value: i64 },

    /// A composite step of a family other than the configured one.
    WrongFamily { step: usize, tag: ActionTag },

    /// A composite step from a state where the direct move was possible.
    RequirementNotMet { step: usize, digit: u8, register: u8 },

    /// A composite step whose formula does not produce its value.
    FormulaMismatch { step: usize },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::WrongLength { expected, actual } => {
                write!(f, "Expected {} steps, found {}", expected, actual)
            }
            ValidationFailure::QuotaNotMet { required, placed } => {
                write!(
                    f,
                    "Only {} composite steps placed, {} required",
                    placed, required
                )
            }
            ValidationFailure::NonZeroStart { value } => {
                write!(f, "Start state is {} rather than zero", value)
            }
            ValidationFailure::StateMismatch { step } => {
                write!(f, "Step {} states do not match its action", step)
            }
            ValidationFailure::IllegalMove { step } => {
                write!(f, "Step {} is not physically legal", step)
            }
            ValidationFailure::OutOfRange { step, value, max } => {
                write!(f, "Step {} reaches {} (max {})", step, value, max)
            }
            ValidationFailure::AnswerMismatch { expected, actual } => {
                write!(f, "Answer {} differs from final state {}", actual, expected)
            }
            ValidationFailure::RepeatedMagnitude { step, magnitude } => {
                write!(f, "Step {} repeats magnitude {}", step, magnitude)
            }
            ValidationFailure::FirstStep { value } => {
                write!(f, "First step {:+} is not allowed", value)
            }
            ValidationFailure::DirectionViolated { step, value } => {
                write!(f, "Step {} value {:+} violates the direction restriction", step, value)
            }
            ValidationFailure::WrongFamily { step, tag } => {
                write!(f, "Step {} is a {} step from another family", step, tag)
            }
            ValidationFailure::RequirementNotMet {
                step,
                digit,
                register,
            } => {
                write!(
                    f,
                    "Step {} trains {} from register value {}, where the direct move works",
                    step, digit, register
                )
            }
            ValidationFailure::FormulaMismatch { step } => {
                write!(f, "Step {} formula does not sum to its value", step)
            }
        }
    }
}

impl std::error::Error for ValidationFailure {}
