// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonical formulas for composite steps.
//!
//! A formula is the ordered list of direct sub-moves a student actually makes
//! when the direct move is impossible. Offsets are relative to the target
//! register: 0 is the target itself, 1 is the register above it.
//!
//! | Family   | Addition of d                        | Subtraction of d                     |
//! |----------|--------------------------------------|--------------------------------------|
//! | Brothers | +5, -(5-d)                           | -5, +(5-d)                           |
//! | Friends  | +1 next, -(10-d)                     | -1 next, +(10-d)                     |
//! | Mix      | -5, +(5-(10-d)), +1 next             | +5, -(5-(10-d)), -1 next             |

use crate::beads::{apply_direct, Sign};
use crate::config::RuleFamily;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One direct move within a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomicOp {
    /// Register offset from the target register.
    pub offset: usize,
    /// Signed change applied to that register.
    pub delta: i8,
}

impl AtomicOp {
    pub const fn local(delta: i8) -> Self {
        Self { offset: 0, delta }
    }

    pub const fn next(delta: i8) -> Self {
        Self { offset: 1, delta }
    }

    /// Contribution in units of the target register's place value.
    pub fn weight(self) -> i64 {
        self.delta as i64 * 10i64.pow(self.offset as u32)
    }
}

impl fmt::Display for AtomicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.delta)?;
        if self.offset > 0 {
            write!(f, "@{}", self.offset)?;
        }
        Ok(())
    }
}

/// Ordered atomic operations realizing one composite step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Formula(Vec<AtomicOp>);

impl Formula {
    pub fn new(ops: Vec<AtomicOp>) -> Self {
        Self(ops)
    }

    pub fn ops(&self) -> &[AtomicOp] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Net effect in units of the target register's place value.
    pub fn net(&self) -> i64 {
        self.0.iter().map(|op| op.weight()).sum()
    }

    /// The carry or borrow applied to the next register, if any.
    pub fn carry(&self) -> Option<i8> {
        self.0.iter().find(|op| op.offset == 1).map(|op| op.delta)
    }

    /// Replay the target-register ops starting from `v`.
    ///
    /// Returns `None` as soon as one of them is not a legal direct move.
    pub fn apply_local(&self, v: u8) -> Option<u8> {
        self.0
            .iter()
            .filter(|op| op.offset == 0)
            .try_fold(v, |value, op| apply_direct(value, op.delta as i32))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, op) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", op)?;
        }
        write!(f, "]")
    }
}

/// Build the formula for `sign · digit` in `family`.
///
/// Returns `None` for [`RuleFamily::Simple`] and for digits outside the
/// family's range.
pub fn build(family: RuleFamily, digit: u8, sign: Sign) -> Option<Formula> {
    if family == RuleFamily::Simple || !family.valid_digits().contains(digit) {
        return None;
    }
    let s = sign.factor() as i8;
    let d = digit as i8;
    let ops = match family {
        RuleFamily::Brothers => {
            let brother = 5 - d;
            vec![AtomicOp::local(5 * s), AtomicOp::local(-brother * s)]
        }
        RuleFamily::Friends => {
            let friend = 10 - d;
            vec![AtomicOp::next(s), AtomicOp::local(-friend * s)]
        }
        RuleFamily::Mix => {
            let brother = 5 - (10 - d);
            vec![
                AtomicOp::local(-5 * s),
                AtomicOp::local(brother * s),
                AtomicOp::next(s),
            ]
        }
        RuleFamily::Simple => return None,
    };
    Some(Formula(ops))
}
