// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Abacus state and generation counters.
//!
//! - [`DigitState`]: the register vector, least significant register first,
//!   with one spare register above the display width for carries.
//! - [`Statistics`]: counters accumulated by a generator across attempts.

pub mod registers;
pub mod statistics;

pub use registers::{DigitState, InvariantViolation};
pub use statistics::{Counters, Statistics};
