// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Practice-sequence generator for the soroban (Japanese abacus).
//!
//! An exercise is a chain of signed additions starting from zero on a
//! soroban of `width + 1` rods. Every step must be playable with legal bead
//! moves, and a configurable number of steps must exercise a specific
//! technique on the rod being trained:
//!
//! - **Simple**: direct bead moves only
//! - **Brothers**: partners of 5 (`+4 = +5 -1`)
//! - **Friends**: partners of 10 (`+9 = +10 -1`)
//! - **Mix**: both at once (`+6 = -5 +1 +10`)
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! Computed once per rule family and never changed during generation:
//! - Requirement tables: the rod values from which each technique applies
//! - Canonical formulas: the atomic bead moves of each technique
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! Per-attempt state, discarded when an attempt fails:
//! - Register values of the board
//! - Steps taken, composite count, digit usage
//!
//! # Generation
//!
//! 1. [`config`]: validate options and fill per-family defaults
//! 2. [`engine`]: randomized attempts, each checked by [`validation`]
//! 3. [`fallback`]: directed synthesis once the attempt budget is spent
//! 4. [`batch`]: independent generators in parallel
//!
//! # Example
//!
//! ```no_run
//! use soroban_gen::{generate, RuleConfig, RuleFamily, StepCount};
//!
//! let config = RuleConfig::builder(RuleFamily::Brothers)
//!     .trained_digits([4])
//!     .steps(StepCount::Exact(7))
//!     .build()
//!     .unwrap();
//! let example = generate(config);
//! println!("{example}");
//! ```

pub mod batch;
pub mod beads;
pub mod config;
pub mod context;
pub mod engine;
pub mod fallback;
pub mod memo;
pub mod orchestrator;
pub mod rules;
pub mod sequence;
pub mod state;
pub mod validation;

// Re-export commonly used types
pub use batch::{generate_batch, generate_batch_with_statistics};
pub use config::{ConfigError, DirectionRestriction, RuleConfig, RuleFamily, StepCount};
pub use engine::SequenceGenerator;
pub use sequence::{Example, ExampleOutput, Quality};
pub use state::Statistics;

/// Generate a single exercise.
pub fn generate(config: RuleConfig) -> Example {
    SequenceGenerator::new(config).generate()
}
