// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generated exercises: actions, steps and examples.
//!
//! An [`Example`] starts from the all-zero state and lists its [`Step`]s,
//! each of which pairs an [`Action`] with the states before and after it.
//! [`Example::to_output`] produces the serializable form handed to display
//! and worksheet code.

pub mod action;
pub mod example;
pub mod output;

pub use action::{is_round_number, Action, ActionTag, Composite};
pub use example::{Example, Quality, Step};
pub use output::{ExampleOutput, StepOutput};
