// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Direction of a move: beads pushed toward the beam (plus) or away (minus).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    /// Both signs, plus first.
    pub const BOTH: [Sign; 2] = [Sign::Plus, Sign::Minus];

    /// The sign of a non-zero value.
    pub fn of(value: i64) -> Option<Sign> {
        match value.signum() {
            1 => Some(Sign::Plus),
            -1 => Some(Sign::Minus),
            _ => None,
        }
    }

    /// +1 or -1.
    pub const fn factor(self) -> i64 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }

    pub const fn opposite(self) -> Sign {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }

    /// Attach this sign to a magnitude.
    pub fn signed(self, magnitude: u64) -> i64 {
        self.factor() * magnitude as i64
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-"),
        }
    }
}
