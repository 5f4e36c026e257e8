// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for building a [`RuleConfig`](super::RuleConfig).

use thiserror::Error;

/// Fatal configuration problems, reported by [`RuleConfigBuilder::build`](super::RuleConfigBuilder::build).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("only-addition and only-subtraction cannot both be set")]
    ConflictingDirections,

    #[error("action width {0} is outside 1..=9")]
    InvalidWidth(usize),

    #[error("invalid step count: {0}")]
    InvalidStepCount(String),

    #[error("special-step rate {0} is outside [0, 1]")]
    InvalidRate(f64),

    #[error("anti-repeat window must be at least 1")]
    InvalidWindow,

    #[error("no plain digits remain in 1..=9")]
    EmptyPlainDigits,
}
