// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The abacus as a fixed-width vector of digit registers.

use crate::beads::MAX_DIGIT;
use std::fmt;
use thiserror::Error;

/// A register update that would break the state's invariants.
///
/// Search code only applies moves it has checked, so these indicate a bug
/// rather than a dead end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("register {register} would leave [0, 9]: {value} {delta:+}")]
    RegisterOutOfRange { register: usize, value: u8, delta: i32 },

    #[error("register {register} does not exist in a {len}-register state")]
    NoSuchRegister { register: usize, len: usize },
}

/// Register values, index 0 least significant. Every register is in [0, 9].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitState {
    registers: Vec<u8>,
}

impl DigitState {
    /// All-zero state with `register_count` registers.
    pub fn zero(register_count: usize) -> Self {
        Self {
            registers: vec![0; register_count],
        }
    }

    /// Decompose `value` into `register_count` registers.
    ///
    /// Returns `None` if `value` needs more registers.
    pub fn from_value(register_count: usize, mut value: u64) -> Option<Self> {
        let mut registers = Vec::with_capacity(register_count);
        for _ in 0..register_count {
            registers.push((value % 10) as u8);
            value /= 10;
        }
        if value == 0 {
            Some(Self { registers })
        } else {
            None
        }
    }

    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Value of register `index`, or 0 beyond the top.
    pub fn get(&self, index: usize) -> u8 {
        self.registers.get(index).copied().unwrap_or(0)
    }

    pub fn value(&self) -> u64 {
        self.registers
            .iter()
            .rev()
            .fold(0u64, |acc, &digit| acc * 10 + digit as u64)
    }

    /// Largest value this many registers can hold.
    pub fn max_value(&self) -> u64 {
        10u64.pow(self.registers.len() as u32) - 1
    }

    pub fn is_zero(&self) -> bool {
        self.registers.iter().all(|&digit| digit == 0)
    }

    /// Add a signed multi-register delta, carrying and borrowing as needed.
    ///
    /// Returns `None` if the result is negative or exceeds [`max_value`](Self::max_value).
    pub fn apply_signed(&self, delta: i64) -> Option<DigitState> {
        let result = self.value() as i128 + delta as i128;
        if result < 0 || result > self.max_value() as i128 {
            return None;
        }
        DigitState::from_value(self.registers.len(), result as u64)
    }

    /// Change a single register without carrying.
    pub fn apply_register_delta(
        &self,
        register: usize,
        delta: i32,
    ) -> Result<DigitState, InvariantViolation> {
        let value = *self
            .registers
            .get(register)
            .ok_or(InvariantViolation::NoSuchRegister {
                register,
                len: self.registers.len(),
            })?;
        let updated = value as i32 + delta;
        if !(0..=MAX_DIGIT as i32).contains(&updated) {
            return Err(InvariantViolation::RegisterOutOfRange {
                register,
                value,
                delta,
            });
        }
        let mut next = self.clone();
        next.registers[register] = updated as u8;
        Ok(next)
    }

    /// Every register within [0, 9].
    pub fn is_well_formed(&self) -> bool {
        self.registers.iter().all(|&digit| digit <= MAX_DIGIT)
    }
}

impl fmt::Display for DigitState {
    /// Most significant register first, zero-padded to the full width.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.registers.iter().rev() {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}
